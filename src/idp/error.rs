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
//! # Identity provider error
use thiserror::Error;
use validator::ValidationErrors;

use openstack_keystone_idp_types::error::BuilderError;

use crate::transport::TransportError;

/// Identity provider error.
///
/// Only [`IdentityError::UpstreamUnavailable`] is worth retrying. Every other
/// kind is final for the attempted login.
#[derive(Debug, Error)]
pub enum IdentityError {
    /// Structures builder error.
    #[error(transparent)]
    Builder {
        /// The source of the error.
        #[from]
        source: BuilderError,
    },

    /// The token used for the call is expired, revoked or unknown.
    #[error("the token is expired or invalid")]
    ExpiredOrInvalidToken,

    /// Username or password wrong.
    #[error("invalid username or password")]
    InvalidCredentials,

    /// The login intent is empty or incomplete.
    #[error("invalid login request: {}", source)]
    InvalidLoginIntent {
        /// The source of the error.
        #[from]
        source: ValidationErrors,
    },

    /// Request serialization error.
    #[error("json serde error: {}", source)]
    Json {
        /// The source of the error.
        #[from]
        source: serde_json::Error,
    },

    /// The identity service answered with something that cannot be used.
    #[error("malformed response from the identity service: {detail}")]
    MalformedResponse {
        /// Offending field or body fragment. Never contains secrets.
        detail: String,
    },

    /// Credentials are valid, but lack the rights for the call.
    #[error("not authorized")]
    Unauthorized,

    /// The identity service cannot be reached or failed.
    #[error("identity service unavailable: {detail}")]
    UpstreamUnavailable {
        /// Failure description.
        detail: String,
        /// Transport failure, if the request never got an answer.
        #[source]
        source: Option<TransportError>,
    },
}

impl IdentityError {
    /// [`IdentityError::MalformedResponse`] with the given detail.
    pub fn malformed<D: Into<String>>(detail: D) -> Self {
        Self::MalformedResponse {
            detail: detail.into(),
        }
    }

    /// Whether the caller may retry the same login.
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::UpstreamUnavailable { .. })
    }
}
