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
//! # Keystone identity provider
//!
//! Authenticates end users against a Keystone identity service and resolves
//! their tenants (v2) or groups (v3). Callers see one contract regardless of
//! the API version the configured identity service speaks:
//!
//! 1. [`request::build_login`] turns the [`LoginIntent`] into the login body
//!    of the configured [`ProtocolVersion`].
//! 2. [`session::extract_session`] turns the answer into a [`Session`].
//! 3. [`entitlement::entitlement_request`] and
//!    [`entitlement::parse_entitlements`] list the memberships with the
//!    subject token of that session.
//!
//! Non successful answers are mapped onto [`IdentityError`] by
//! [`classify`]. The client keeps no state between calls.
use std::borrow::Cow;
use std::sync::Arc;

use async_trait::async_trait;
use tracing::debug;

pub mod classify;
pub mod entitlement;
pub mod error;
pub mod request;
pub mod session;
pub mod types;

use crate::config::KeystoneSection;
use crate::transport::{ReqwestTransport, Transport, TransportError};
use entitlement::{entitlement_request, parse_entitlements};
use request::build_login;
use session::extract_session;
use types::*;

pub use error::IdentityError;
#[cfg(test)]
pub use types::MockIdentityProviderApi;
pub use types::IdentityProviderApi;

/// Keystone identity provider client.
pub struct IdentityProviderClient {
    /// Transport to the identity service.
    transport: Arc<dyn Transport>,

    /// API version of the identity service.
    version: ProtocolVersion,

    /// Domain qualifying user and group names.
    domain: Option<String>,

    /// Default user domain of v3 password logins.
    user_domain_name: Option<String>,
}

impl IdentityProviderClient {
    pub fn new(transport: Arc<dyn Transport>, version: ProtocolVersion) -> Self {
        Self {
            transport,
            version,
            domain: None,
            user_domain_name: None,
        }
    }

    /// Client of the configured identity service using the reqwest transport.
    pub fn from_config(config: &KeystoneSection) -> Result<Self, TransportError> {
        Ok(
            Self::new(Arc::new(ReqwestTransport::from_config(config)?), config.version)
                .with_domain(config.domain.clone())
                .with_user_domain_name(config.user_domain_name.clone()),
        )
    }

    /// Set the domain qualifying user and group names.
    pub fn with_domain(mut self, domain: Option<String>) -> Self {
        self.domain = domain;
        self
    }

    /// Set the user domain used by v3 password logins naming no domain.
    pub fn with_user_domain_name(mut self, user_domain_name: Option<String>) -> Self {
        self.user_domain_name = user_domain_name;
        self
    }

    pub fn version(&self) -> ProtocolVersion {
        self.version
    }

    /// Login name and entitlement names qualified with the configured domain.
    pub fn qualified_identity(
        &self,
        user: &UserAttributes,
        entitlements: &EntitlementSet,
    ) -> QualifiedIdentity {
        let mut groups: Vec<String> = entitlements.names().map(|name| self.qualify(name)).collect();
        groups.sort();
        QualifiedIdentity {
            username: self.qualify(user.login_name()),
            groups,
        }
    }

    fn qualify(&self, name: &str) -> String {
        match &self.domain {
            Some(domain) => format!("{name}@{domain}"),
            None => name.to_string(),
        }
    }

    /// Apply the default user domain to a v3 password login without one.
    fn with_default_user_domain<'a>(&self, intent: &'a LoginIntent) -> Cow<'a, LoginIntent> {
        let (ProtocolVersion::V3, Some(domain_name), LoginIntent::Password(credentials)) =
            (self.version, &self.user_domain_name, intent)
        else {
            return Cow::Borrowed(intent);
        };
        if credentials
            .scope
            .as_ref()
            .is_some_and(|scope| scope.has_domain())
        {
            return Cow::Borrowed(intent);
        }
        let mut credentials = credentials.clone();
        credentials
            .scope
            .get_or_insert_with(ScopeHint::default)
            .domain_name = Some(domain_name.clone());
        Cow::Owned(LoginIntent::Password(credentials))
    }
}

#[async_trait]
impl IdentityProviderApi for IdentityProviderClient {
    /// Exchange the credentials for a [`Session`].
    #[tracing::instrument(level = "debug", skip_all, fields(version = %self.version, method = intent.method()))]
    async fn login(&self, intent: &LoginIntent) -> Result<Session, IdentityError> {
        let intent = self.with_default_user_domain(intent);
        let request = build_login(&intent, self.version)?.to_http()?;
        let response = self.transport.execute(request).await?;
        let session = extract_session(response, self.version, intent.call_kind())?;
        debug!(user_id = %session.user.id, "login succeeded");
        Ok(session)
    }

    /// List the tenants or groups of the session user.
    #[tracing::instrument(level = "debug", skip_all, fields(version = %session.version, user_id = %session.user.id))]
    async fn resolve_entitlements(
        &self,
        session: &Session,
    ) -> Result<EntitlementSet, IdentityError> {
        if session.version != self.version {
            return Err(IdentityError::malformed(format!(
                "session issued under {}, provider configured for {}",
                session.version, self.version
            )));
        }
        let response = self
            .transport
            .execute(entitlement_request(session)?)
            .await?;
        let entitlements = parse_entitlements(response, session.version)?;
        debug!("resolved {} entitlements", entitlements.len());
        Ok(entitlements)
    }

    /// Login and list the memberships of the authenticated user.
    async fn authenticate(
        &self,
        intent: &LoginIntent,
    ) -> Result<(UserAttributes, EntitlementSet), IdentityError> {
        let session = self.login(intent).await?;
        let entitlements = self.resolve_entitlements(&session).await?;
        Ok((session.user, entitlements))
    }
}
