// HTTP API
pub mod http;
