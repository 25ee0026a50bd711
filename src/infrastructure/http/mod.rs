//! HTTP Infrastructure
//!
//! RESTful API: 路由、处理器、状态、错误、中间件

mod dto;
mod error;
mod handlers;
mod middleware;
mod routes;
mod server;
mod state;

pub use routes::create_routes;
pub use server::{HttpServer, ServerConfig};
pub use state::{AppState, SynthesisDefaults};
