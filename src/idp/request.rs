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
//! # Login request construction
use secrecy::ExposeSecret;
use validator::Validate;

use openstack_keystone_idp_types::common::{Domain, UserBuilder};
use openstack_keystone_idp_types::{v2, v3};

use crate::idp::IdentityError;
use crate::idp::classify::CallKind;
use crate::idp::types::{LoginIntent, PasswordCredentials, ProtocolVersion, TokenCredentials};
use crate::transport::HttpRequest;

/// Login request body for one API version.
#[derive(Clone, Debug, PartialEq)]
pub enum WireRequest {
    /// `POST /v2.0/tokens`.
    V2(v2::TokensBody),
    /// `POST /v3/auth/tokens`.
    V3(v3::AuthTokensBody),
}

impl WireRequest {
    /// Login path of the API version.
    pub fn path(&self) -> &'static str {
        match self {
            Self::V2(_) => v2::TOKENS_PATH,
            Self::V3(_) => v3::AUTH_TOKENS_PATH,
        }
    }

    /// Encode into the request handed to the transport.
    pub fn to_http(&self) -> Result<HttpRequest, IdentityError> {
        Ok(match self {
            Self::V2(body) => HttpRequest::post_json(self.path(), body)?,
            Self::V3(body) => HttpRequest::post_json(self.path(), body)?,
        })
    }
}

impl LoginIntent {
    /// Classification of the login call.
    pub(crate) fn call_kind(&self) -> CallKind {
        match self {
            Self::Password(_) => CallKind::PasswordLogin,
            Self::Token(_) => CallKind::TokenLogin,
        }
    }
}

/// Build the login request body.
///
/// # Returns
/// * Success with the body for the API version.
/// * `IdentityError::InvalidLoginIntent` when the credentials are empty.
pub fn build_login(
    intent: &LoginIntent,
    version: ProtocolVersion,
) -> Result<WireRequest, IdentityError> {
    intent.validate()?;
    Ok(match (version, intent) {
        (ProtocolVersion::V2, LoginIntent::Password(credentials)) => {
            WireRequest::V2(v2_password(credentials)?)
        }
        (ProtocolVersion::V2, LoginIntent::Token(credentials)) => {
            WireRequest::V2(v2_token(credentials)?)
        }
        (ProtocolVersion::V3, LoginIntent::Password(credentials)) => {
            WireRequest::V3(v3_password(credentials)?)
        }
        (ProtocolVersion::V3, LoginIntent::Token(credentials)) => {
            WireRequest::V3(v3_token(credentials)?)
        }
    })
}

fn v2_password(credentials: &PasswordCredentials) -> Result<v2::TokensBody, IdentityError> {
    let mut auth = v2::AuthBuilder::default();
    auth.password_credentials(v2::PasswordCredentials {
        username: credentials.username.clone(),
        password: credentials.password.expose_secret().to_string(),
    });
    if let Some(scope) = &credentials.scope {
        if let Some(val) = &scope.tenant_name {
            auth.tenant_name(val);
        }
        if let Some(val) = &scope.tenant_id {
            auth.tenant_id(val);
        }
    }
    Ok(v2::TokensBody { auth: auth.build()? })
}

fn v2_token(credentials: &TokenCredentials) -> Result<v2::TokensBody, IdentityError> {
    Ok(v2::TokensBody {
        auth: v2::AuthBuilder::default()
            .token(v2::Token {
                id: Some(credentials.token.expose_secret().to_string()),
                ..Default::default()
            })
            .build()?,
    })
}

fn v3_password(credentials: &PasswordCredentials) -> Result<v3::AuthTokensBody, IdentityError> {
    let mut user = UserBuilder::default();
    user.name(credentials.username.clone())
        .password(credentials.password.expose_secret());
    if let Some(scope) = credentials.scope.as_ref().filter(|scope| scope.has_domain()) {
        user.domain(Domain {
            id: scope.domain_id.clone(),
            name: scope.domain_name.clone().unwrap_or_default(),
        });
    }
    Ok(v3::AuthTokensBody {
        auth: v3::Auth {
            identity: v3::IdentityBuilder::default()
                .methods(vec![v3::METHOD_PASSWORD.to_string()])
                .password(v3::Password {
                    user: user.build()?,
                })
                .build()?,
        },
    })
}

fn v3_token(credentials: &TokenCredentials) -> Result<v3::AuthTokensBody, IdentityError> {
    Ok(v3::AuthTokensBody {
        auth: v3::Auth {
            identity: v3::IdentityBuilder::default()
                .methods(vec![v3::METHOD_TOKEN.to_string()])
                .token(v3::IdentityToken {
                    id: credentials.token.expose_secret().to_string(),
                })
                .build()?,
        },
    })
}
