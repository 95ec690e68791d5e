#[cfg(not(any(feature = "no-wasm", feature = "wasm")))]
compile_error!("enable either the `no-wasm` or the `wasm` feature");

pub mod app;
pub mod client;
pub mod config;
pub mod debounce;
pub mod error;
pub mod interface;
pub mod model;
pub mod suggestions;
pub mod validate;
pub mod view;

#[cfg(all(test, feature = "no-wasm", not(feature = "wasm")))]
mod test_support;

#[cfg(feature = "no-wasm")]
pub use reqwest::Client;
#[cfg(feature = "no-wasm")]
pub use tokio;

pub use app::controller::Controller;
pub use config::Config;
pub use error::{Error, ErrorKind, Result};
