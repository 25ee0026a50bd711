//! 缓存适配器 - 文件系统实现

mod file_store;

pub use file_store::{FileCacheConfig, FileCacheStore};
