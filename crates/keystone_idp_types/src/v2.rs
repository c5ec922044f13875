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
//! # Keystone v2.0 identity API types
//!
//! - `POST /v2.0/tokens`: login with a password or an existing token.
//! - `GET /v2.0/tenants`: tenants the `X-Auth-Token` has access to.
use std::fmt;

use derive_builder::Builder;
use serde::{Deserialize, Serialize};

use crate::Time;
use crate::common::User;
use crate::error::BuilderError;

/// Login path.
pub const TOKENS_PATH: &str = "/v2.0/tokens";

/// Tenant listing path.
pub const TENANTS_PATH: &str = "/v2.0/tenants";

/// Body of the login request.
#[derive(Clone, Debug, Default, Deserialize, PartialEq, Serialize)]
pub struct TokensBody {
    /// Authentication information.
    pub auth: Auth,
}

/// Authentication information sent in a login request.
#[derive(Builder, Clone, Debug, Default, Deserialize, PartialEq, Serialize)]
#[builder(build_fn(error = "BuilderError"))]
#[builder(setter(strip_option, into))]
#[serde(rename_all = "camelCase")]
pub struct Auth {
    /// Name of the tenant to scope the token to.
    #[builder(default)]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tenant_name: Option<String>,

    /// ID of the tenant to scope the token to.
    #[builder(default)]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tenant_id: Option<String>,

    /// Username and password.
    #[builder(default)]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub password_credentials: Option<PasswordCredentials>,

    /// Existing token to authenticate with.
    #[builder(default)]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token: Option<Token>,
}

/// Credentials of a username/password login.
#[derive(Clone, Default, Deserialize, PartialEq, Serialize)]
pub struct PasswordCredentials {
    /// Username.
    pub username: String,
    /// Password.
    pub password: String,
}

impl fmt::Debug for PasswordCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PasswordCredentials")
            .field("username", &self.username)
            .field("password", &"***")
            .finish()
    }
}

/// Token issued by Keystone.
///
/// In requests only `id` is set.
#[derive(Clone, Default, Deserialize, PartialEq, Serialize)]
pub struct Token {
    /// Token value.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    /// Time the token was issued.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub issued_at: Option<Time>,

    /// Time the token expires.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expires: Option<Time>,

    /// Tenant the token is scoped to.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tenant: Option<Tenant>,
}

impl fmt::Debug for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Token")
            .field("id", &self.id.as_ref().map(|_| "***"))
            .field("issued_at", &self.issued_at)
            .field("expires", &self.expires)
            .field("tenant", &self.tenant)
            .finish()
    }
}

/// Tenant of the OpenStack cloud.
#[derive(Clone, Debug, Default, Deserialize, PartialEq, Serialize)]
pub struct Tenant {
    /// Tenant ID.
    pub id: String,
    /// Tenant name.
    #[serde(default)]
    pub name: String,
    /// Tenant description.
    #[serde(default)]
    pub description: Option<String>,
    /// Whether the tenant is enabled.
    #[serde(default)]
    pub enabled: bool,
}

/// Response of a successful login.
#[derive(Clone, Debug, Default, Deserialize, PartialEq, Serialize)]
pub struct TokensResponse {
    /// Granted access.
    pub access: Access,
}

/// Access granted by a login.
#[derive(Clone, Debug, Default, Deserialize, PartialEq, Serialize)]
pub struct Access {
    /// Issued token.
    pub token: Token,
    /// Authenticated user.
    pub user: User,
}

/// Tenants the token has access to.
#[derive(Clone, Debug, Default, Deserialize, PartialEq, Serialize)]
pub struct TenantsResponse {
    /// Tenants.
    pub tenants: Vec<Tenant>,
}
