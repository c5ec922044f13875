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
use serde::Deserialize;
use url::Url;
use validator::Validate;

use crate::idp::types::ProtocolVersion;

/// Keystone identity provider.
#[derive(Debug, Deserialize, Clone, Validate)]
pub struct KeystoneSection {
    /// Base URL of the identity service, i.e. `https://cloud:5000` or
    /// `https://cloud/identity`.
    pub url: Url,

    /// Identity API version spoken by the service.
    #[serde(default)]
    pub version: ProtocolVersion,

    /// Identity provider name.
    #[validate(length(min = 1, max = 64))]
    pub name: String,

    /// Identity provider description.
    #[serde(default)]
    pub description: Option<String>,

    /// Domain appended to the user and group names (`name@domain`) of the
    /// authenticated principals.
    #[serde(default)]
    #[validate(length(min = 1, max = 64))]
    pub domain: Option<String>,

    /// Domain of the users logging in with a password over v3 when the
    /// login does not name one.
    #[serde(default)]
    pub user_domain_name: Option<String>,

    /// Request timeout in seconds.
    #[serde(default)]
    #[validate(range(min = 1))]
    pub timeout: Option<u64>,

    /// PEM encoded CA certificate of the identity service.
    #[serde(default)]
    pub ca_cert: Option<String>,
}

impl KeystoneSection {
    /// Section for the service at `url` with all optional settings unset.
    pub fn new<N: Into<String>>(url: Url, name: N) -> Self {
        Self {
            url,
            version: ProtocolVersion::default(),
            name: name.into(),
            description: None,
            domain: None,
            user_domain_name: None,
            timeout: None,
            ca_cert: None,
        }
    }
}
