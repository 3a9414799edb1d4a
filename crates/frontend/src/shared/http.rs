//! HTTP plumbing shared by the device and log clients.
//!
//! Clients describe a request as plain data (`ApiRequest`) and hand it to a
//! `Transport`. The browser build sends it with `gloo_net`; tests plug in a
//! scripted transport instead.

use crate::shared::api_utils::{api_base, join_url, with_query};
use crate::shared::error::{ApiError, ApiResult};
use async_trait::async_trait;
use gloo_net::http::Request;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
    Put,
    Delete,
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Method::Get => "GET",
            Method::Post => "POST",
            Method::Put => "PUT",
            Method::Delete => "DELETE",
        })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ApiRequest {
    pub method: Method,
    pub path: String,
    pub query: Vec<(String, String)>,
    pub json_body: Option<String>,
}

impl ApiRequest {
    fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            query: Vec::new(),
            json_body: None,
        }
    }

    pub fn get(path: impl Into<String>) -> Self {
        Self::new(Method::Get, path)
    }

    pub fn post(path: impl Into<String>) -> Self {
        Self::new(Method::Post, path)
    }

    pub fn put(path: impl Into<String>) -> Self {
        Self::new(Method::Put, path)
    }

    pub fn delete(path: impl Into<String>) -> Self {
        Self::new(Method::Delete, path)
    }

    pub fn param(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.query.push((key.into(), value.into()));
        self
    }

    pub fn json<T: Serialize>(mut self, body: &T) -> ApiResult<Self> {
        let json = serde_json::to_string(body)
            .map_err(|e| ApiError::validation(format!("Failed to serialize request: {}", e)))?;
        self.json_body = Some(json);
        Ok(self)
    }

    /// Path plus encoded query string
    pub fn url(&self) -> String {
        with_query(&self.path, &self.query)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ApiResponse {
    pub status: u16,
    pub body: String,
}

#[derive(Deserialize)]
struct ErrorBody {
    detail: serde_json::Value,
}

impl ApiResponse {
    pub fn ok(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Turn a non-2xx response into `ApiError::Http`, reading `{detail}`
    /// from the body when it is there
    pub fn error_for_status(self) -> ApiResult<Self> {
        if self.ok() {
            return Ok(self);
        }
        let detail = serde_json::from_str::<ErrorBody>(&self.body)
            .ok()
            .map(|b| match b.detail {
                serde_json::Value::String(s) => s,
                other => other.to_string(),
            });
        Err(ApiError::Http {
            status: self.status,
            detail,
        })
    }

    pub fn json<T: DeserializeOwned>(&self) -> ApiResult<T> {
        serde_json::from_str(&self.body).map_err(|e| ApiError::Decode(e.to_string()))
    }

    pub fn text(&self) -> &str {
        &self.body
    }
}

#[async_trait(?Send)]
pub trait Transport {
    async fn send(&self, request: ApiRequest) -> ApiResult<ApiResponse>;
}

/// Browser transport backed by `fetch`
#[derive(Debug, Clone)]
pub struct GlooTransport {
    base_url: String,
}

impl GlooTransport {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
        }
    }

    pub fn from_config() -> Self {
        Self::new(api_base())
    }
}

#[async_trait(?Send)]
impl Transport for GlooTransport {
    async fn send(&self, request: ApiRequest) -> ApiResult<ApiResponse> {
        let url = join_url(&self.base_url, &request.url());
        log::debug!("{} {}", request.method, url);

        let builder = match request.method {
            Method::Get => Request::get(&url),
            Method::Post => Request::post(&url),
            Method::Put => Request::put(&url),
            Method::Delete => Request::delete(&url),
        };

        let response = match request.json_body {
            Some(body) => {
                builder
                    .header("Content-Type", "application/json")
                    .body(body)
                    .map_err(|e| ApiError::Network(format!("Failed to build request: {}", e)))?
                    .send()
                    .await
            }
            None => builder.send().await,
        }
        .map_err(|e| ApiError::Network(format!("Failed to send request: {}", e)))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| ApiError::Network(format!("Failed to read response: {}", e)))?;

        Ok(ApiResponse { status, body })
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_for_status_reads_detail() {
        let response = ApiResponse {
            status: 404,
            body: r#"{"detail":"Device not found"}"#.into(),
        };
        assert_eq!(
            response.error_for_status().unwrap_err(),
            ApiError::Http {
                status: 404,
                detail: Some("Device not found".into())
            }
        );
    }

    #[test]
    fn test_error_for_status_without_body() {
        let response = ApiResponse {
            status: 500,
            body: "Internal Server Error".into(),
        };
        let err = response.error_for_status().unwrap_err();
        assert_eq!(err.to_string(), "HTTP error! status: 500");
    }

    #[test]
    fn test_success_passes_through() {
        let response = ApiResponse {
            status: 204,
            body: String::new(),
        };
        assert!(response.error_for_status().is_ok());
    }
}
