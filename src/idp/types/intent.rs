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
//! # Login intent
//!
//! What the caller wants to authenticate with. The credentials never leave
//! the process other than in the login request body.
use derive_builder::Builder;
use secrecy::{ExposeSecret, SecretString};
use validator::{Validate, ValidateLength, ValidationError, ValidationErrors};

use openstack_keystone_idp_types::error::BuilderError;

/// Login request of the caller.
#[derive(Clone, Debug)]
pub enum LoginIntent {
    /// Username and password login.
    Password(PasswordCredentials),
    /// Login with an existing token.
    Token(TokenCredentials),
}

impl LoginIntent {
    /// Unscoped password login.
    pub fn password<U: Into<String>, P: Into<String>>(username: U, password: P) -> Self {
        Self::Password(PasswordCredentials {
            username: username.into(),
            password: SecretString::from(password.into()),
            scope: None,
        })
    }

    /// Login with an existing token.
    pub fn token<T: Into<String>>(token: T) -> Self {
        Self::Token(TokenCredentials {
            token: SecretString::from(token.into()),
        })
    }

    /// Authentication method name as used in logs.
    pub fn method(&self) -> &'static str {
        match self {
            Self::Password(_) => "password",
            Self::Token(_) => "token",
        }
    }
}

impl Validate for LoginIntent {
    fn validate(&self) -> Result<(), ValidationErrors> {
        match self {
            Self::Password(credentials) => credentials.validate(),
            Self::Token(credentials) => credentials.validate(),
        }
    }
}

impl From<PasswordCredentials> for LoginIntent {
    fn from(value: PasswordCredentials) -> Self {
        Self::Password(value)
    }
}

impl From<TokenCredentials> for LoginIntent {
    fn from(value: TokenCredentials) -> Self {
        Self::Token(value)
    }
}

/// Username and password.
///
/// Validation never copies the password into the reported errors.
#[derive(Builder, Clone, Debug)]
#[builder(build_fn(error = "BuilderError"))]
#[builder(setter(strip_option, into))]
pub struct PasswordCredentials {
    /// Login name, 1 to 255 characters.
    pub username: String,

    /// Password, not empty.
    pub password: SecretString,

    /// Requested scope.
    #[builder(default)]
    pub scope: Option<ScopeHint>,
}

impl Validate for PasswordCredentials {
    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        if !self.username.validate_length(Some(1), Some(255), None) {
            errors.add("username", ValidationError::new("length"));
        }
        if self.password.expose_secret().is_empty() {
            errors.add("password", ValidationError::new("empty"));
        }
        if let Some(scope) = &self.scope {
            errors.merge_self("scope", scope.validate());
        }
        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}

/// Existing token.
#[derive(Clone, Debug)]
pub struct TokenCredentials {
    /// Token value, not empty.
    pub token: SecretString,
}

impl Validate for TokenCredentials {
    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        if self.token.expose_secret().is_empty() {
            errors.add("token", ValidationError::new("empty"));
        }
        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}

/// Scope requested for a password login.
///
/// Tenant fields apply to v2, domain fields qualify the v3 user.
#[derive(Builder, Clone, Debug, Default, PartialEq, Validate)]
#[builder(build_fn(error = "BuilderError"))]
#[builder(setter(strip_option, into))]
pub struct ScopeHint {
    /// Tenant ID.
    #[builder(default)]
    #[validate(length(min = 1, max = 64))]
    pub tenant_id: Option<String>,

    /// Tenant name.
    #[builder(default)]
    #[validate(length(min = 1, max = 255))]
    pub tenant_name: Option<String>,

    /// Domain ID of the user.
    #[builder(default)]
    #[validate(length(min = 1, max = 64))]
    pub domain_id: Option<String>,

    /// Domain name of the user.
    #[builder(default)]
    #[validate(length(min = 1, max = 255))]
    pub domain_name: Option<String>,
}

impl ScopeHint {
    /// Whether the user domain is given.
    pub fn has_domain(&self) -> bool {
        self.domain_id.is_some() || self.domain_name.is_some()
    }
}
