//! Client module - backend transport for both WASM and no-WASM environments
//!
//! Both implementations speak the same JSON-over-POST contract; the reqwest
//! one is used natively and the gloo_net one in the browser.

#[cfg(feature = "no-wasm")]
pub mod request;
#[cfg(feature = "no-wasm")]
pub use request::NoWasmClient;

#[cfg(feature = "wasm")]
pub mod gloo;
#[cfg(feature = "wasm")]
pub use gloo::WasmClient;

pub const STUDENT_INFO_PATH: &str = "get_student_info";
pub const ELIGIBILITY_PATH: &str = "check_eligibility";
pub const SUGGESTIONS_PATH: &str = "get_course_suggestions";
