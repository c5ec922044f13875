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
//! # Authenticated user
use derive_builder::Builder;
use serde::{Deserialize, Serialize};

use openstack_keystone_idp_types::error::BuilderError;

/// Attributes of the authenticated user, independent of the API version.
#[derive(Builder, Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
#[builder(build_fn(error = "BuilderError"))]
#[builder(setter(strip_option, into))]
pub struct UserAttributes {
    /// User ID.
    pub id: String,

    /// User name.
    #[builder(default)]
    #[serde(default)]
    pub name: String,

    /// Login name (v2 only).
    #[builder(default)]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,

    /// User domain (v3 only).
    #[builder(default)]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub domain: Option<DomainAttributes>,
}

impl UserAttributes {
    /// Name the user logs in with: `username` when known, `name` otherwise.
    pub fn login_name(&self) -> &str {
        self.username.as_deref().unwrap_or(&self.name)
    }
}

/// Domain of the user.
#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
pub struct DomainAttributes {
    /// Domain ID.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// Domain name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

/// User and group names qualified with the identity provider domain.
///
/// Without a configured domain the names are used verbatim.
#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
pub struct QualifiedIdentity {
    /// Qualified login name, i.e. `alice@cloud`.
    pub username: String,
    /// Qualified entitlement names in ascending order.
    pub groups: Vec<String>,
}
