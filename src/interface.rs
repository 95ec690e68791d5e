#![allow(async_fn_in_trait)] // futures are driven on a single-threaded executor

use crate::config::Config;
use crate::error::Result;
use crate::model::dtos::{EligibilityParams, StudentInfoParams, SuggestionParams};
use serde_json::Value;

/// Common trait for HTTP client functionality
pub trait HttpClient {
    /// Create a new HTTP client instance for the configured backend
    async fn new(config: &Config) -> Result<Self>
    where
        Self: Sized;
}

/// The three backend exchanges. Each returns the decoded JSON body whatever
/// the HTTP status; `Err` means the exchange itself failed.
pub trait RequestApi {
    /// `POST /get_student_info`
    async fn get_student_info(&self, params: StudentInfoParams<'_>) -> Result<Value>;

    /// `POST /check_eligibility`
    async fn check_eligibility(&self, params: EligibilityParams<'_>) -> Result<Value>;

    /// `POST /get_course_suggestions`
    async fn get_course_suggestions(&self, params: SuggestionParams<'_>) -> Result<Value>;
}
