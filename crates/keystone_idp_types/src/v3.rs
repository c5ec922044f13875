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
//! # Keystone v3 identity API types
//!
//! - `POST /v3/auth/tokens`: login. The issued token travels in the
//!   `X-Subject-Token` response header, the body only describes it.
//! - `GET /v3/users/{user_id}/groups`: groups of the user.
use derive_builder::Builder;
use serde::{Deserialize, Serialize};

use crate::Time;
use crate::common::User;
use crate::error::BuilderError;

/// Login path.
pub const AUTH_TOKENS_PATH: &str = "/v3/auth/tokens";

/// Password authentication method name.
pub const METHOD_PASSWORD: &str = "password";

/// Token authentication method name.
pub const METHOD_TOKEN: &str = "token";

/// Path listing the groups of the user.
///
/// The user ID is encoded as a single path segment, so IDs holding `/`, `?`
/// or `#` (e.g. from an LDAP backend) cannot change the target.
pub fn user_groups_path<S: AsRef<str>>(user_id: S) -> String {
    format!("/v3/users/{}/groups", urlencoding::encode(user_id.as_ref()))
}

/// Body of the login request.
#[derive(Clone, Debug, Default, Deserialize, PartialEq, Serialize)]
pub struct AuthTokensBody {
    /// Authentication information.
    pub auth: Auth,
}

/// Authentication information sent in a login request.
#[derive(Clone, Debug, Default, Deserialize, PartialEq, Serialize)]
pub struct Auth {
    /// An identity object.
    pub identity: Identity,
}

/// Identity information sent in a login request.
#[derive(Builder, Clone, Debug, Default, Deserialize, PartialEq, Serialize)]
#[builder(build_fn(error = "BuilderError"))]
#[builder(setter(strip_option, into))]
pub struct Identity {
    /// Authentication methods, i.e. `["password"]`.
    pub methods: Vec<String>,

    /// Password based identity.
    #[builder(default)]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub password: Option<Password>,

    /// Token based identity.
    #[builder(default)]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token: Option<IdentityToken>,
}

/// Password based identity.
#[derive(Clone, Debug, Default, Deserialize, PartialEq, Serialize)]
pub struct Password {
    /// User with the password.
    pub user: User,
}

/// Token based identity.
#[derive(Clone, Default, Deserialize, PartialEq, Serialize)]
pub struct IdentityToken {
    /// Token value.
    pub id: String,
}

impl std::fmt::Debug for IdentityToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("IdentityToken").field("id", &"***").finish()
    }
}

/// Body of a successful login response.
///
/// The token value itself is not part of the body.
#[derive(Clone, Debug, Default, Deserialize, PartialEq, Serialize)]
pub struct AuthTokensResponse {
    /// Token attributes.
    pub token: TokenV3,
}

/// Attributes of the issued token.
#[derive(Clone, Debug, Default, Deserialize, PartialEq, Serialize)]
pub struct TokenV3 {
    /// Time the token was issued.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub issued_at: Option<Time>,

    /// Methods used to obtain the token.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub methods: Vec<String>,

    /// Time the token expires.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expires_at: Option<Time>,

    /// Token owner.
    pub user: User,
}

/// Groups of the user.
#[derive(Clone, Debug, Default, Deserialize, PartialEq, Serialize)]
pub struct UserGroupsResponse {
    /// Groups.
    pub groups: Vec<Group>,
}

/// Keystone group.
#[derive(Clone, Debug, Default, Deserialize, PartialEq, Serialize)]
pub struct Group {
    /// Group ID.
    pub id: String,
    /// Group domain ID.
    #[serde(default)]
    pub domain_id: Option<String>,
    /// Group name.
    #[serde(default)]
    pub name: String,
    /// Group description.
    #[serde(default)]
    pub description: Option<String>,
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::common::{DomainBuilder, UserBuilder};

    #[test]
    fn test_password_body() {
        let body = AuthTokensBody {
            auth: Auth {
                identity: IdentityBuilder::default()
                    .methods(vec![METHOD_PASSWORD.into()])
                    .password(Password {
                        user: UserBuilder::default()
                            .name("alice")
                            .password("secret")
                            .domain(DomainBuilder::default().name("Default").build().unwrap())
                            .build()
                            .unwrap(),
                    })
                    .build()
                    .unwrap(),
            },
        };
        assert_eq!(
            json!({"auth": {"identity": {
                "methods": ["password"],
                "password": {"user": {
                    "name": "alice",
                    "username": "",
                    "password": "secret",
                    "domain": {"name:omitempty": "Default"}
                }}
            }}}),
            serde_json::to_value(&body).unwrap()
        );
        assert!(!format!("{body:?}").contains("secret"));
    }

    #[test]
    fn test_token_body() {
        let body = AuthTokensBody {
            auth: Auth {
                identity: IdentityBuilder::default()
                    .methods(vec![METHOD_TOKEN.into()])
                    .token(IdentityToken {
                        id: "s3cr3t-tok".into(),
                    })
                    .build()
                    .unwrap(),
            },
        };
        assert_eq!(
            json!({"auth": {"identity": {"methods": ["token"], "token": {"id": "s3cr3t-tok"}}}}),
            serde_json::to_value(&body).unwrap()
        );
        assert!(!format!("{body:?}").contains("s3cr3t"));
    }

    #[test]
    fn test_auth_tokens_response() {
        let rsp: AuthTokensResponse = serde_json::from_value(json!({"token": {
            "issued_at": "2015-11-06T14:32:17.893797Z",
            "expires_at": "2015-11-06T15:32:17",
            "methods": ["password"],
            "user": {"id": "u1", "name": "alice", "domain": {"id": "default", "name": "Default"}},
            "audit_ids": ["x"]
        }}))
        .unwrap();
        assert_eq!(Some("u1".into()), rsp.token.user.id);
        assert_eq!(vec!["password".to_string()], rsp.token.methods);
        assert!(rsp.token.expires_at.is_some());
        assert_eq!(
            "Default",
            rsp.token.user.domain.as_ref().map(|d| d.name.as_str()).unwrap()
        );
    }

    #[test]
    fn test_groups_response() {
        let rsp: UserGroupsResponse =
            serde_json::from_value(json!({"groups": [{"id": "g1", "name": "admins"}]})).unwrap();
        assert_eq!("g1", rsp.groups[0].id);
        assert!(rsp.groups[0].domain_id.is_none());
        assert!(serde_json::from_value::<UserGroupsResponse>(json!({"links": {}})).is_err());
    }

    #[test]
    fn test_user_groups_path() {
        assert_eq!("/v3/users/u1/groups", user_groups_path("u1"));
        assert_eq!(
            "/v3/users/cn%3Dalice%2Cou%3Dusers/groups",
            user_groups_path("cn=alice,ou=users")
        );
    }

    #[test]
    fn test_user_groups_path_escapes_delimiters() {
        assert_eq!("/v3/users/a%2Fb/groups", user_groups_path("a/b"));
        assert_eq!("/v3/users/u1%3Fx%3D1/groups", user_groups_path("u1?x=1"));
        assert_eq!("/v3/users/u1%23frag/groups", user_groups_path("u1#frag"));
        assert_eq!(
            "/v3/users/..%2F..%2Fv2.0%2Ftenants%3F/groups",
            user_groups_path("../../v2.0/tenants?")
        );
    }
}
