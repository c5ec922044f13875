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
//! # Authenticated session
use chrono::{DateTime, Utc};
use derive_builder::Builder;
use secrecy::{ExposeSecret, SecretString};

use openstack_keystone_idp_types::error::BuilderError;

use crate::idp::types::{ProtocolVersion, UserAttributes};

/// Session issued by the identity service.
///
/// Holds the subject token used for the follow-up calls. The token is never
/// printed: `Debug` redacts it.
#[derive(Builder, Clone, Debug)]
#[builder(build_fn(error = "BuilderError", validate = "Self::validate"))]
#[builder(setter(into))]
pub struct Session {
    /// Subject token.
    pub subject_token: SecretString,

    /// Time the token was issued.
    #[builder(default)]
    pub issued_at: Option<DateTime<Utc>>,

    /// Time the token expires.
    #[builder(default)]
    pub expires_at: Option<DateTime<Utc>>,

    /// Methods used to obtain the token (v3 only).
    #[builder(default)]
    pub methods: Vec<String>,

    /// Authenticated user.
    pub user: UserAttributes,

    /// API version the token was issued with.
    pub version: ProtocolVersion,
}

impl SessionBuilder {
    fn validate(&self) -> Result<(), String> {
        match &self.subject_token {
            Some(token) if token.expose_secret().is_empty() => {
                Err("subject token must not be empty".into())
            }
            _ => Ok(()),
        }
    }
}

impl Session {
    /// Whether the token is expired at the given time.
    ///
    /// A session without an expiration time never expires locally.
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        self.expires_at.is_some_and(|expires_at| expires_at <= now)
    }
}

#[cfg(test)]
mod tests {
    use chrono::TimeDelta;

    use super::*;
    use crate::idp::types::UserAttributesBuilder;

    fn user() -> UserAttributes {
        UserAttributesBuilder::default().id("u1").build().unwrap()
    }

    #[test]
    fn test_build() {
        let session = SessionBuilder::default()
            .subject_token("tok".to_string())
            .user(user())
            .version(ProtocolVersion::V3)
            .build()
            .unwrap();
        assert_eq!("tok", session.subject_token.expose_secret());
        assert!(session.issued_at.is_none());
        assert!(session.methods.is_empty());
    }

    #[test]
    fn test_empty_token_rejected() {
        match SessionBuilder::default()
            .subject_token(String::new())
            .user(user())
            .version(ProtocolVersion::V2)
            .build()
        {
            Err(BuilderError::Validation(_)) => {}
            other => panic!("validation error expected, got {other:?}"),
        }
    }

    #[test]
    fn test_debug_hides_token() {
        let session = SessionBuilder::default()
            .subject_token("s3cr3t-tok".to_string())
            .user(user())
            .version(ProtocolVersion::V3)
            .build()
            .unwrap();
        assert!(!format!("{session:?}").contains("s3cr3t-tok"));
    }

    #[test]
    fn test_is_expired_at() {
        let now = Utc::now();
        let mut session = SessionBuilder::default()
            .subject_token("tok".to_string())
            .user(user())
            .version(ProtocolVersion::V3)
            .build()
            .unwrap();
        assert!(!session.is_expired_at(now));
        session.expires_at = Some(now - TimeDelta::seconds(1));
        assert!(session.is_expired_at(now));
        session.expires_at = Some(now + TimeDelta::hours(1));
        assert!(!session.is_expired_at(now));
    }
}
