//! TTS 适配器 - 上游网关实现

mod fake_client;
mod http_client;

pub use fake_client::{FakeTtsGateway, FakeTtsGatewayConfig};
pub use http_client::{HttpTtsGateway, HttpTtsGatewayConfig};
