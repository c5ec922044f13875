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
//! # Response classification
//!
//! Maps the transport outcome and the HTTP status of an identity service
//! answer onto [`IdentityError`]. The same status means different things for
//! different calls: `401` on a password login is a wrong password, while on a
//! token login or a lookup it means the token is not accepted.
use reqwest::StatusCode;
use tracing::{debug, trace};

use openstack_keystone_idp_types::ErrorResponse;

use crate::idp::IdentityError;
use crate::transport::{HttpResponse, TransportError};

/// Identity service call being classified.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum CallKind {
    /// Login with username and password.
    PasswordLogin,
    /// Login with an existing token.
    TokenLogin,
    /// Tenant or group listing with the subject token.
    EntitlementLookup,
}

/// Pass through the answers that carry a usable body.
///
/// Any `2xx` is a success. For [`CallKind::EntitlementLookup`] a `404` is
/// passed through as well: the user has no memberships.
pub fn check_response(kind: CallKind, response: HttpResponse) -> Result<HttpResponse, IdentityError> {
    if response.status.is_success()
        || (kind == CallKind::EntitlementLookup && response.status == StatusCode::NOT_FOUND)
    {
        return Ok(response);
    }
    Err(classify_status(kind, response.status, &response.body))
}

/// Error for the non successful status.
pub fn classify_status(kind: CallKind, status: StatusCode, body: &[u8]) -> IdentityError {
    let upstream_title = serde_json::from_slice::<ErrorResponse>(body)
        .ok()
        .and_then(|rsp| rsp.error.title);
    debug!(
        ?kind,
        %status,
        "identity service rejected the call"
    );
    if let Some(title) = &upstream_title {
        trace!("identity service error title: {title}");
    }
    match (kind, status) {
        (CallKind::PasswordLogin, StatusCode::BAD_REQUEST | StatusCode::UNAUTHORIZED) => {
            IdentityError::InvalidCredentials
        }
        (CallKind::TokenLogin, StatusCode::BAD_REQUEST | StatusCode::NOT_FOUND) => {
            IdentityError::ExpiredOrInvalidToken
        }
        (_, StatusCode::UNAUTHORIZED) => IdentityError::ExpiredOrInvalidToken,
        (_, StatusCode::FORBIDDEN) => IdentityError::Unauthorized,
        (_, status) if status.is_server_error() => IdentityError::UpstreamUnavailable {
            detail: format!("identity service answered with {status}"),
            source: None,
        },
        (_, status) => IdentityError::malformed(match upstream_title {
            Some(title) => format!("unexpected status {status}: {title}"),
            None => format!("unexpected status {status}"),
        }),
    }
}

impl From<TransportError> for IdentityError {
    fn from(value: TransportError) -> Self {
        Self::UpstreamUnavailable {
            detail: value.to_string(),
            source: Some(value),
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn classify(kind: CallKind, status: u16) -> IdentityError {
        classify_status(kind, StatusCode::from_u16(status).unwrap(), b"")
    }

    #[test]
    fn test_password_login() {
        assert!(matches!(
            classify(CallKind::PasswordLogin, 401),
            IdentityError::InvalidCredentials
        ));
        assert!(matches!(
            classify(CallKind::PasswordLogin, 400),
            IdentityError::InvalidCredentials
        ));
        assert!(matches!(
            classify(CallKind::PasswordLogin, 403),
            IdentityError::Unauthorized
        ));
        assert!(matches!(
            classify(CallKind::PasswordLogin, 404),
            IdentityError::MalformedResponse { .. }
        ));
    }

    #[test]
    fn test_token_login() {
        for status in [400, 401, 404] {
            assert!(matches!(
                classify(CallKind::TokenLogin, status),
                IdentityError::ExpiredOrInvalidToken
            ));
        }
        assert!(matches!(
            classify(CallKind::TokenLogin, 403),
            IdentityError::Unauthorized
        ));
    }

    #[test]
    fn test_lookup() {
        assert!(matches!(
            classify(CallKind::EntitlementLookup, 401),
            IdentityError::ExpiredOrInvalidToken
        ));
        assert!(matches!(
            classify(CallKind::EntitlementLookup, 403),
            IdentityError::Unauthorized
        ));
        assert!(matches!(
            classify(CallKind::EntitlementLookup, 400),
            IdentityError::MalformedResponse { .. }
        ));
    }

    #[test]
    fn test_server_errors() {
        for kind in [
            CallKind::PasswordLogin,
            CallKind::TokenLogin,
            CallKind::EntitlementLookup,
        ] {
            for status in [500, 502, 503] {
                let err = classify(kind, status);
                assert!(err.is_retryable(), "{kind:?} {status} must be retryable");
            }
        }
    }

    #[test]
    fn test_unexpected_status_detail() {
        let body = serde_json::to_vec(&json!({"error": {
            "code": 409,
            "title": "Conflict",
            "message": "whatever"
        }}))
        .unwrap();
        match classify_status(CallKind::PasswordLogin, StatusCode::CONFLICT, &body) {
            IdentityError::MalformedResponse { detail } => {
                assert_eq!("unexpected status 409 Conflict: Conflict", detail);
            }
            other => panic!("malformed response expected, got {other:?}"),
        }
    }

    #[test]
    fn test_check_response() {
        let ok = HttpResponse {
            status: StatusCode::CREATED,
            ..Default::default()
        };
        assert!(check_response(CallKind::PasswordLogin, ok).is_ok());
        let not_found = HttpResponse {
            status: StatusCode::NOT_FOUND,
            ..Default::default()
        };
        assert!(check_response(CallKind::EntitlementLookup, not_found.clone()).is_ok());
        assert!(check_response(CallKind::TokenLogin, not_found).is_err());
    }
}
