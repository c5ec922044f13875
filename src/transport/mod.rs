// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.
//
// SPDX-License-Identifier: Apache-2.0
//! # HTTP transport
//!
//! The identity provider never talks to the network itself. It hands a
//! fully formed [`HttpRequest`] to a [`Transport`] and gets back either the
//! raw [`HttpResponse`] or a [`TransportError`]. Connection pooling, TLS,
//! timeouts and retries all belong to the transport.
use std::fmt;

use async_trait::async_trait;
use bytes::Bytes;
use reqwest::header::{CONTENT_TYPE, HeaderMap, HeaderName, HeaderValue};
use reqwest::{Method, StatusCode};
use serde::Serialize;

mod client;
pub mod error;

pub use error::TransportError;
pub use client::ReqwestTransport;

/// Transport interface expected by the identity provider.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait Transport: Send + Sync {
    /// Execute the request against the identity service.
    ///
    /// `request.path` is relative to the identity service base URL.
    async fn execute(&self, request: HttpRequest) -> Result<HttpResponse, TransportError>;
}

/// Request description handed to the [`Transport`].
///
/// `Debug` prints the body length only since login bodies carry credentials.
#[derive(Clone, Default, PartialEq)]
pub struct HttpRequest {
    /// HTTP method.
    pub method: Method,
    /// Path relative to the identity service base URL.
    pub path: String,
    /// Request headers.
    pub headers: HeaderMap,
    /// Request body.
    pub body: Option<Bytes>,
}

impl HttpRequest {
    /// `GET` request without a body.
    pub fn get<P: Into<String>>(path: P) -> Self {
        Self {
            method: Method::GET,
            path: path.into(),
            ..Default::default()
        }
    }

    /// `POST` request with the JSON encoded body.
    pub fn post_json<P: Into<String>, T: Serialize + ?Sized>(
        path: P,
        body: &T,
    ) -> Result<Self, serde_json::Error> {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        Ok(Self {
            method: Method::POST,
            path: path.into(),
            headers,
            body: Some(Bytes::from(serde_json::to_vec(body)?)),
        })
    }

    /// Set the header.
    pub fn with_header(mut self, name: HeaderName, value: HeaderValue) -> Self {
        self.headers.insert(name, value);
        self
    }
}

impl fmt::Debug for HttpRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HttpRequest")
            .field("method", &self.method)
            .field("path", &self.path)
            .field("headers", &self.headers)
            .field("body_len", &self.body.as_ref().map(Bytes::len))
            .finish()
    }
}

/// Raw response returned by the [`Transport`].
///
/// `Debug` prints the header names and the body length only. Upstream
/// headers are not marked sensitive and both may carry the subject token.
#[derive(Clone, Default, PartialEq)]
pub struct HttpResponse {
    /// Status code.
    pub status: StatusCode,
    /// Response headers.
    pub headers: HeaderMap,
    /// Response body.
    pub body: Bytes,
}

impl fmt::Debug for HttpResponse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HttpResponse")
            .field("status", &self.status)
            .field("headers", &self.headers.keys().collect::<Vec<_>>())
            .field("body_len", &self.body.len())
            .finish()
    }
}

impl HttpResponse {
    /// Response with the status and the JSON encoded body.
    pub fn json<T: Serialize + ?Sized>(
        status: StatusCode,
        body: &T,
    ) -> Result<Self, serde_json::Error> {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        Ok(Self {
            status,
            headers,
            body: Bytes::from(serde_json::to_vec(body)?),
        })
    }

    /// Set the header.
    pub fn with_header(mut self, name: HeaderName, value: HeaderValue) -> Self {
        self.headers.insert(name, value);
        self
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_post_json() {
        let req = HttpRequest::post_json("/v3/auth/tokens", &json!({"a": "b"})).unwrap();
        assert_eq!(Method::POST, req.method);
        assert_eq!("/v3/auth/tokens", req.path);
        assert_eq!(
            Some(&HeaderValue::from_static("application/json")),
            req.headers.get(CONTENT_TYPE)
        );
        assert_eq!(Some(Bytes::from_static(br#"{"a":"b"}"#)), req.body);
    }

    #[test]
    fn test_get() {
        let req = HttpRequest::get("/v2.0/tenants").with_header(
            HeaderName::from_static("x-auth-token"),
            HeaderValue::from_static("tok"),
        );
        assert_eq!(Method::GET, req.method);
        assert!(req.body.is_none());
        assert_eq!("tok", req.headers["x-auth-token"]);
    }

    #[test]
    fn test_request_debug_hides_body() {
        let req = HttpRequest::post_json(
            "/v2.0/tokens",
            &json!({"auth": {"passwordCredentials": {"username": "alice", "password": "s3cr3t"}}}),
        )
        .unwrap();
        let len = req.body.as_ref().unwrap().len();
        let debug = format!("{req:?}");
        assert!(!debug.contains("s3cr3t"));
        assert!(!debug.contains("alice"));
        assert!(debug.contains("/v2.0/tokens"));
        assert!(debug.contains(&format!("body_len: Some({len})")));
    }

    #[test]
    fn test_response_debug_hides_token() {
        let rsp = HttpResponse::json(StatusCode::OK, &json!({"access": {"token": {"id": "tok-2"}}}))
            .unwrap()
            .with_header(
                HeaderName::from_static("x-subject-token"),
                HeaderValue::from_static("tok-1"),
            );
        let debug = format!("{rsp:?}");
        assert!(!debug.contains("tok-1"));
        assert!(!debug.contains("tok-2"));
        assert!(debug.contains("x-subject-token"));
        assert!(debug.contains("200"));
    }
}
