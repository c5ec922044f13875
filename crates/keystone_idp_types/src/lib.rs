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

//! # OpenStack Keystone identity provider wire types
//!
//! This crate defines the request and response shapes of the two Keystone
//! identity APIs the identity provider bridge talks to:
//!
//! - [`v2`]: the legacy `/v2.0/tokens` login and `/v2.0/tenants` listing.
//! - [`v3`]: the `/v3/auth/tokens` login and `/v3/users/{id}/groups`
//!   listing.
//!
//! Some keys are spelled the way the deployed service (and the clients
//! built against it) spell them, even where that looks like a typo. They
//! are kept as they are to stay byte compatible on the wire.

use serde::{Deserialize, Serialize};

pub mod common;
pub mod error;
pub mod time;
pub mod v2;
pub mod v3;

pub use common::{Domain, User};
pub use time::Time;

/// Header carrying the token that authenticates an API request.
pub const AUTH_TOKEN_HEADER: &str = "x-auth-token";

/// Header carrying the token issued by a v3 login.
pub const SUBJECT_TOKEN_HEADER: &str = "x-subject-token";

/// Error body returned by Keystone on failed requests.
///
/// Both API versions use the same envelope.
#[derive(Clone, Debug, Default, Deserialize, PartialEq, Serialize)]
pub struct ErrorResponse {
    /// Error object.
    pub error: ErrorDetail,
}

/// Error details.
#[derive(Clone, Debug, Default, Deserialize, PartialEq, Serialize)]
pub struct ErrorDetail {
    /// HTTP status code repeated in the body.
    #[serde(default)]
    pub code: u16,
    /// Short title, i.e. `Unauthorized`.
    #[serde(default)]
    pub title: Option<String>,
    /// Human readable explanation.
    #[serde(default)]
    pub message: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_response() {
        let rsp: ErrorResponse = serde_json::from_str(
            r#"{"error": {"code": 401, "title": "Unauthorized", "message": "The request you have made requires authentication."}}"#,
        )
        .unwrap();
        assert_eq!(401, rsp.error.code);
        assert_eq!(Some("Unauthorized".into()), rsp.error.title);
    }
}
