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
//! # Reqwest based transport.
use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Certificate, Client};
use tracing::trace;
use url::Url;

use crate::config::KeystoneSection;
use crate::transport::{HttpRequest, HttpResponse, Transport, TransportError};

/// [`Transport`] sending the requests with a pooled reqwest [`Client`].
#[derive(Clone, Debug)]
pub struct ReqwestTransport {
    /// Reqwest client.
    client: Client,

    /// Identity service base URL. Always ends with `/`.
    base_url: Url,
}

impl ReqwestTransport {
    /// Build the transport for the configured identity service.
    ///
    /// # Arguments
    /// * `config` - reference to the [`KeystoneSection`].
    ///
    /// # Returns
    /// * Success with the transport using a new pooled client.
    /// * `TransportError::Request` when the `ca_cert` cannot be parsed or
    ///   the client cannot be initialized.
    pub fn from_config(config: &KeystoneSection) -> Result<Self, TransportError> {
        let mut client_builder = Client::builder()
            .gzip(true)
            .pool_idle_timeout(Duration::from_secs(90));
        if let Some(timeout) = config.timeout {
            client_builder = client_builder.timeout(Duration::from_secs(timeout));
        }
        if let Some(val) = &config.ca_cert {
            client_builder = client_builder.add_root_certificate(Certificate::from_pem(val.as_bytes())?);
        }
        Ok(Self::new(client_builder.build()?, config.url.clone()))
    }

    /// Build the transport with an existing client.
    pub fn new(client: Client, base_url: Url) -> Self {
        let mut base_url = base_url;
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }
        Self { client, base_url }
    }

    /// Resolve the request path against the base URL.
    ///
    /// The path is always relative to the base, so a base URL such as
    /// `https://cloud/identity` keeps its `identity` prefix.
    fn url(&self, path: &str) -> Result<Url, TransportError> {
        Ok(self.base_url.join(path.trim_start_matches('/'))?)
    }
}

#[async_trait]
impl Transport for ReqwestTransport {
    #[tracing::instrument(level = "debug", skip_all, fields(method = %request.method, path = %request.path))]
    async fn execute(&self, request: HttpRequest) -> Result<HttpResponse, TransportError> {
        let url = self.url(&request.path)?;
        let mut builder = self
            .client
            .request(request.method, url)
            .headers(request.headers);
        if let Some(body) = request.body {
            builder = builder.body(body);
        }
        let response = builder.send().await?;
        let status = response.status();
        let headers = response.headers().clone();
        let body = response.bytes().await?;
        trace!("identity service answered with {status}");
        Ok(HttpResponse {
            status,
            headers,
            body,
        })
    }
}

#[cfg(test)]
mod tests {
    use eyre::Result;
    use httpmock::MockServer;
    use reqwest::StatusCode;
    use reqwest::header::{HeaderName, HeaderValue};
    use serde_json::json;

    use super::*;

    fn get_transport(srv: &MockServer, prefix: &str) -> Result<ReqwestTransport> {
        Ok(ReqwestTransport::new(
            Client::new(),
            Url::parse(&format!("http://{}:{}{}", srv.host(), srv.port(), prefix))?,
        ))
    }

    #[test]
    fn test_url() -> Result<()> {
        let transport = ReqwestTransport::new(Client::new(), Url::parse("https://cloud/identity")?);
        assert_eq!(
            "https://cloud/identity/v3/auth/tokens",
            transport.url("/v3/auth/tokens")?.as_str()
        );
        let transport = ReqwestTransport::new(Client::new(), Url::parse("https://cloud:5000")?);
        assert_eq!(
            "https://cloud:5000/v2.0/tenants",
            transport.url("/v2.0/tenants")?.as_str()
        );
        Ok(())
    }

    #[test]
    fn test_from_config() -> Result<()> {
        let config = KeystoneSection {
            timeout: Some(5),
            ..KeystoneSection::new(Url::parse("https://cloud/identity")?, "os")
        };
        let transport = ReqwestTransport::from_config(&config)?;
        assert_eq!("https://cloud/identity/", transport.base_url.as_str());
        Ok(())
    }

    #[tokio::test]
    async fn test_execute_post() -> Result<()> {
        let srv = MockServer::start_async().await;
        let mock = srv
            .mock_async(|when, then| {
                when.method("POST")
                    .path("/identity/v3/auth/tokens")
                    .header("content-type", "application/json")
                    .json_body(json!({"foo": "bar"}));
                then.status(201)
                    .header("x-subject-token", "tok")
                    .json_body(json!({"token": {}}));
            })
            .await;
        let transport = get_transport(&srv, "/identity")?;

        let rsp = transport
            .execute(HttpRequest::post_json("/v3/auth/tokens", &json!({"foo": "bar"}))?)
            .await?;
        mock.assert_async().await;
        assert_eq!(StatusCode::CREATED, rsp.status);
        assert_eq!("tok", rsp.headers["x-subject-token"]);
        assert_eq!(json!({"token": {}}), serde_json::from_slice::<serde_json::Value>(&rsp.body)?);
        Ok(())
    }

    #[tokio::test]
    async fn test_execute_get_with_status() -> Result<()> {
        let srv = MockServer::start_async().await;
        let mock = srv
            .mock_async(|when, then| {
                when.method("GET")
                    .path("/v2.0/tenants")
                    .header("x-auth-token", "tok");
                then.status(401);
            })
            .await;
        let transport = get_transport(&srv, "")?;

        let rsp = transport
            .execute(HttpRequest::get("/v2.0/tenants").with_header(
                HeaderName::from_static("x-auth-token"),
                HeaderValue::from_static("tok"),
            ))
            .await?;
        mock.assert_async().await;
        assert_eq!(StatusCode::UNAUTHORIZED, rsp.status);
        assert!(rsp.body.is_empty());
        Ok(())
    }

    #[tokio::test]
    async fn test_execute_connection_refused() -> Result<()> {
        // Nothing listens on the discard port.
        let transport = ReqwestTransport::new(Client::new(), Url::parse("http://127.0.0.1:9")?);
        match transport.execute(HttpRequest::get("/v3/auth/tokens")).await {
            Err(TransportError::Request { .. }) => {}
            other => panic!("connection failure expected, got {other:?}"),
        }
        Ok(())
    }
}
