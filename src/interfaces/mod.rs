pub mod gateway;
pub mod http_api;
