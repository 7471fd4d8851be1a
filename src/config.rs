//! Support for library configuration options

use std::sync::{Arc, Mutex};
use once_cell::sync::Lazy;

/// Where the API lives when nothing else is configured
pub const DEFAULT_API_URL: &str = "http://127.0.0.1:8000/api/";

/// The `User-Agent` header sent by [`Client`](crate::client::Client)s.
/// Feel free to override it when initing this library.
pub static USER_AGENT: Lazy<Arc<Mutex<String>>> = Lazy::new(|| Arc::new(Mutex::new(format!("taskdeck/{}", env!("CARGO_PKG_VERSION")))));

/// Returns the current value of [`USER_AGENT`]
pub fn user_agent() -> String {
    match USER_AGENT.lock() {
        Ok(ua) => ua.clone(),
        Err(poisoned) => poisoned.into_inner().clone(),
    }
}
