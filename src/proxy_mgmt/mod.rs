mod authenticate;
mod dispatch;
mod error;

pub use authenticate::Authenticator;
pub use dispatch::Dispatcher;
pub use error::{ProxyError, Stage};

pub mod config;
