//! WASM HTTP client implementation using gloo_net
//!
//! This module provides HTTP functionality for WASM environments
//! using the gloo_net crate for making HTTP requests via the browser's fetch API.

use crate::config::Config;
use crate::error::Result;
use gloo_net::http::Request;
use serde::Serialize;
use serde_json::Value;

use super::{ELIGIBILITY_PATH, STUDENT_INFO_PATH, SUGGESTIONS_PATH};
use crate::interface::{HttpClient, RequestApi};
use crate::model::dtos::{EligibilityParams, StudentInfoParams, SuggestionParams};

/// HTTP client for WASM environments using gloo_net
#[derive(Debug, Clone)]
pub struct WasmClient {
    config: Config,
}

impl HttpClient for WasmClient {
    async fn new(config: &Config) -> Result<Self> {
        if config.request_timeout.is_some() {
            log::warn!("request timeout is not supported by the fetch client, ignoring it");
        }
        Ok(Self {
            config: config.clone(),
        })
    }
}

impl WasmClient {
    async fn post_json<B: Serialize>(&self, path: &str, body: &B) -> Result<Value> {
        let url = self.config.endpoint(path)?;
        log::debug!("POST {url}");

        let resp = Request::post(url.as_str())
            .header("Content-Type", "application/json")
            .json(body)?
            .send()
            .await?;

        log::debug!("{path} responded with {}", resp.status());

        let text = resp.text().await?;
        Ok(serde_json::from_str::<Value>(&text)?)
    }
}

impl RequestApi for WasmClient {
    async fn get_student_info(&self, params: StudentInfoParams<'_>) -> Result<Value> {
        self.post_json(STUDENT_INFO_PATH, &params).await
    }

    async fn check_eligibility(&self, params: EligibilityParams<'_>) -> Result<Value> {
        self.post_json(ELIGIBILITY_PATH, &params).await
    }

    async fn get_course_suggestions(&self, params: SuggestionParams<'_>) -> Result<Value> {
        self.post_json(SUGGESTIONS_PATH, &params).await
    }
}
