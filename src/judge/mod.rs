//! Reqwest-based client for a Judge0-style remote execution API.
//!
//! A submission is created with `POST {base}?base64_encoded=true&fields=*`
//! and answered with an opaque token; its status is then fetched with
//! `GET {base}/{token}` until a terminal status id is returned. All text
//! fields cross the wire base64-encoded.

pub mod error;
pub mod poll;

use anyhow::Result;
use reqwest::header::{HeaderMap, HeaderValue, CONTENT_TYPE};
use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::config::Config;
use crate::encode;

pub use error::JudgeError;
pub use poll::{watch, StatusSource};

/// Query string shared by the create and fetch endpoints.
const WIRE_PARAMS: [(&str, &str); 2] = [("base64_encoded", "true"), ("fields", "*")];

#[derive(Debug, Serialize)]
struct SubmissionRequest {
    language_id: u32,
    source_code: String,
    stdin: String,
}

#[derive(Debug, Deserialize)]
struct CreatedSubmission {
    token: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct StatusMeta {
    pub id: u8,
    pub description: String,
}

impl StatusMeta {
    /// Ids 1 (In Queue) and 2 (Processing) mean the job has not finished;
    /// every other id is terminal.
    pub fn is_pending(&self) -> bool {
        matches!(self.id, 1 | 2)
    }

    pub fn is_accepted(&self) -> bool {
        self.id == 3
    }
}

/// One terminal (or in-flight) snapshot of a submission. Text fields are
/// still base64-encoded as received; `printer` decodes them for display.
#[derive(Debug, Clone, Deserialize)]
pub struct SubmissionResult {
    pub status: StatusMeta,
    pub stdout: Option<String>,
    pub stderr: Option<String>,
    pub compile_output: Option<String>,
    pub message: Option<String>,
    pub memory: Option<u64>,
    pub time: Option<String>,
}

#[derive(Debug, Clone)]
pub struct JudgeClient {
    http: reqwest::Client,
    base_url: String,
    api_host: Option<String>,
    api_key: Option<String>,
}

impl JudgeClient {
    pub fn from_config(cfg: &Config) -> Result<Self> {
        let timeout = cfg
            .get("REQUEST_TIMEOUT")
            .and_then(|s| s.parse::<u64>().ok())
            .unwrap_or(60);
        let base_url = cfg
            .get("JUDGE_API_URL")
            .unwrap_or_else(|| "https://judge0-ce.p.rapidapi.com/submissions".to_string())
            .trim_end_matches('/')
            .to_string();

        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(timeout))
            .build()?;

        Ok(Self {
            http,
            base_url,
            api_host: cfg.get("JUDGE_API_HOST").filter(|s| !s.trim().is_empty()),
            api_key: cfg.get("JUDGE_API_KEY").filter(|s| !s.trim().is_empty()),
        })
    }

    fn credential_headers(&self) -> Result<HeaderMap, JudgeError> {
        let mut headers = HeaderMap::new();
        if let Some(host) = &self.api_host {
            let hv = HeaderValue::from_str(host)
                .map_err(|e| JudgeError::Client(format!("invalid API host header: {e}")))?;
            headers.insert("X-RapidAPI-Host", hv);
        }
        if let Some(key) = &self.api_key {
            let hv = HeaderValue::from_str(key)
                .map_err(|e| JudgeError::Client(format!("invalid API key header: {e}")))?;
            headers.insert("X-RapidAPI-Key", hv);
        }
        Ok(headers)
    }

    /// Create a submission and return its token.
    pub async fn submit(
        &self,
        language_id: u32,
        source: &str,
        stdin: &str,
    ) -> Result<String, JudgeError> {
        let body = SubmissionRequest {
            language_id,
            source_code: encode::encode(source),
            stdin: encode::encode(stdin),
        };
        let mut headers = self.credential_headers()?;
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        let resp = self
            .http
            .post(&self.base_url)
            .query(&WIRE_PARAMS)
            .headers(headers)
            .json(&body)
            .send()
            .await
            .map_err(JudgeError::from_transport)?;

        if !resp.status().is_success() {
            return Err(JudgeError::from_response(resp).await);
        }
        let created: CreatedSubmission = resp
            .json()
            .await
            .map_err(|e| JudgeError::Client(format!("unexpected create response: {e}")))?;
        Ok(created.token)
    }

    /// Fetch the current status snapshot for a token.
    pub async fn fetch(&self, token: &str) -> Result<SubmissionResult, JudgeError> {
        let url = format!("{}/{}", self.base_url, token);
        let resp = self
            .http
            .get(&url)
            .query(&WIRE_PARAMS)
            .headers(self.credential_headers()?)
            .send()
            .await
            .map_err(JudgeError::from_transport)?;

        if !resp.status().is_success() {
            return Err(JudgeError::from_response(resp).await);
        }
        resp.json()
            .await
            .map_err(|e| JudgeError::Client(format!("unexpected status response: {e}")))
    }
}

impl StatusSource for JudgeClient {
    fn fetch_status(
        &mut self,
        token: &str,
    ) -> impl std::future::Future<Output = Result<SubmissionResult, JudgeError>> + Send {
        self.fetch(token)
    }
}
