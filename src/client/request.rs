//! No-WASM HTTP client implementation using reqwest
//!
//! This module provides HTTP functionality for non-WASM environments
//! using the reqwest crate for making HTTP requests.

use crate::config::Config;
use crate::error::Result;
use reqwest::{header::CONTENT_TYPE, Client};
use serde::Serialize;
use serde_json::Value;

use super::{ELIGIBILITY_PATH, STUDENT_INFO_PATH, SUGGESTIONS_PATH};
use crate::interface::{HttpClient, RequestApi};
use crate::model::dtos::{EligibilityParams, StudentInfoParams, SuggestionParams};

/// HTTP client for no-WASM environments using reqwest
#[derive(Debug, Clone)]
pub struct NoWasmClient {
    client: Client,
    config: Config,
}

impl HttpClient for NoWasmClient {
    async fn new(config: &Config) -> Result<Self> {
        let mut builder = Client::builder();
        if let Some(timeout) = config.request_timeout {
            builder = builder.timeout(timeout);
        }

        Ok(Self {
            client: builder.build()?,
            config: config.clone(),
        })
    }
}

impl NoWasmClient {
    /// Wrap an already configured reqwest client
    pub fn with_client(client: Client, config: Config) -> Self {
        Self { client, config }
    }

    /// POST a JSON body and decode the JSON answer. Non-2xx answers are
    /// decoded too, the backend reports refusals in the body.
    async fn post_json<B: Serialize>(&self, path: &str, body: &B) -> Result<Value> {
        let url = self.config.endpoint(path)?;
        log::debug!("POST {url}");

        let resp = self
            .client
            .post(url)
            .header(CONTENT_TYPE, "application/json")
            .json(body)
            .send()
            .await?;

        log::debug!("{path} responded with {}", resp.status());

        let text = resp.text().await?;
        Ok(serde_json::from_str::<Value>(&text)?)
    }
}

impl RequestApi for NoWasmClient {
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
