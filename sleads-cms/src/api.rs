//! HTTP wrapper for the Sleads CMS endpoints.
//!
//! The wire contract is owned by the backend; response structs stay
//! private to this module and tolerate absent optional members.

use crate::config::CmsConfig;
use crate::error::CmsResult;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use sleads_types::{FetchedField, FieldValue};
use std::time::Duration;
use tracing::debug;

#[derive(Debug, Deserialize)]
struct FieldsResponse {
    fields: Option<Vec<FetchedField>>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ListeningModeResponse {
    listening_mode: Option<bool>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct RegisterRequest<'a> {
    project_id: &'a str,
    page: &'a str,
    fields: &'a [RegisteredField],
    api_key: &'a str,
}

#[derive(Debug, Deserialize)]
struct RegisterResponse {
    success: Option<bool>,
}

/// The `{id, value}` pair reported for one rendered field during
/// registration.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RegisteredField {
    pub id: String,
    pub value: FieldValue,
}

/// Thin client over the CMS HTTP API.
#[derive(Clone)]
pub struct CmsApi {
    client: Client,
    base_url: String,
    project_id: String,
}

impl CmsApi {
    /// Creates an API client for `config`.
    pub fn new(config: &CmsConfig) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_millis(config.request_timeout_ms))
            .build()
            .expect("failed to create HTTP client");

        Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            project_id: config.project_id.clone(),
        }
    }

    /// Fetches the raw field set for a page + optional split variant.
    pub async fn get_fields(
        &self,
        page: &str,
        split_id: Option<&str>,
    ) -> CmsResult<Vec<FetchedField>> {
        let url = format!(
            "{}/cms/get-fields/?projectId={}&pageId={}&splitId={}",
            self.base_url,
            urlencoding::encode(&self.project_id),
            urlencoding::encode(page),
            urlencoding::encode(split_id.unwrap_or_default()),
        );
        debug!("fetching fields for page {page}");
        let response: FieldsResponse = self.client.get(&url).send().await?.json().await?;
        Ok(response.fields.unwrap_or_default())
    }

    /// Probes whether the backend is in an authoring (listening) session.
    pub async fn listening_mode(&self) -> CmsResult<bool> {
        let url = format!("{}/cms/listening-mode/{}", self.base_url, self.project_id);
        let response: ListeningModeResponse = self.client.get(&url).send().await?.json().await?;
        Ok(response.listening_mode.unwrap_or(false))
    }

    /// Reports the rendered field list for an authoring session.
    ///
    /// Returns the backend's acknowledgement flag.
    pub async fn register_fields(
        &self,
        page: &str,
        fields: &[RegisteredField],
        api_key: &str,
    ) -> CmsResult<bool> {
        let url = format!("{}/cms/register", self.base_url);
        let body = RegisterRequest {
            project_id: &self.project_id,
            page,
            fields,
            api_key,
        };
        debug!("registering {} fields for page {page}", fields.len());
        let response: RegisterResponse =
            self.client.post(&url).json(&body).send().await?.json().await?;
        Ok(response.success.unwrap_or(false))
    }
}
