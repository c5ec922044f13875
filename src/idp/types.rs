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
//! # Identity provider types
use std::fmt;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

pub mod entitlement;
pub mod intent;
pub mod session;
pub mod user;

pub use entitlement::{Entitlement, EntitlementBuilder, EntitlementSet};
pub use intent::{
    LoginIntent, PasswordCredentials, PasswordCredentialsBuilder, ScopeHint, ScopeHintBuilder,
    TokenCredentials,
};
pub use session::{Session, SessionBuilder};
pub use user::{DomainAttributes, QualifiedIdentity, UserAttributes, UserAttributesBuilder};

use crate::idp::IdentityError;

/// Keystone identity API version spoken with the identity service.
///
/// Fixed per configured identity provider.
#[derive(Clone, Copy, Debug, Default, Deserialize, Eq, Hash, PartialEq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ProtocolVersion {
    /// Keystone v2.0: tenants, token in the response body.
    V2,
    /// Keystone v3: groups, token in the `X-Subject-Token` header.
    #[default]
    V3,
}

impl fmt::Display for ProtocolVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::V2 => write!(f, "v2"),
            Self::V3 => write!(f, "v3"),
        }
    }
}

/// Identity provider interface.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait IdentityProviderApi: Send + Sync {
    /// Exchange the credentials for a [`Session`].
    ///
    /// Exactly one login request is sent to the identity service.
    async fn login(&self, intent: &LoginIntent) -> Result<Session, IdentityError>;

    /// Entitlements (tenants or groups) of the session user.
    ///
    /// A session issued under another API version than the provider's is
    /// rejected as malformed.
    async fn resolve_entitlements(
        &self,
        session: &Session,
    ) -> Result<EntitlementSet, IdentityError>;

    /// Login followed by the entitlement lookup.
    ///
    /// The lookup is never attempted when the login fails.
    async fn authenticate(
        &self,
        intent: &LoginIntent,
    ) -> Result<(UserAttributes, EntitlementSet), IdentityError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_protocol_version_serde() {
        assert_eq!(
            ProtocolVersion::V2,
            serde_json::from_str::<ProtocolVersion>("\"v2\"").unwrap()
        );
        assert_eq!("\"v3\"", serde_json::to_string(&ProtocolVersion::V3).unwrap());
        assert!(serde_json::from_str::<ProtocolVersion>("\"v4\"").is_err());
        assert_eq!(ProtocolVersion::V3, ProtocolVersion::default());
        assert_eq!("v2", ProtocolVersion::V2.to_string());
    }
}
