//! Bot module - request handling and HTTP serving.

pub mod dispatcher;
pub mod error;
mod runtime;
pub mod sender;
pub mod webhook;

pub use dispatcher::{AppState, Readiness};
pub use runtime::run;
pub use sender::ThrottledBot;
pub use webhook::{register_webhook, router};
