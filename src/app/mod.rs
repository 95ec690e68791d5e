//! Application module - handles core application logic
//!
//! Response interpretation and the view controller are shared; the view
//! binding is platform specific: the console natively, the DOM in the
//! browser.

use std::future::Future;

pub mod controller;
pub mod request;

#[cfg(feature = "no-wasm")]
pub mod console;

#[cfg(feature = "wasm")]
pub mod dom;

/// Run `fut` on the current thread's event loop without waiting for it.
///
/// Natively this needs an enclosing `tokio::task::LocalSet`.
pub(crate) fn spawn_local<F>(fut: F)
where
    F: Future<Output = ()> + 'static,
{
    #[cfg(feature = "wasm")]
    wasm_bindgen_futures::spawn_local(fut);

    #[cfg(all(feature = "no-wasm", not(feature = "wasm")))]
    drop(tokio::task::spawn_local(fut));
}
