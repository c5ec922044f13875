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
//! # Entitlement resolution
use reqwest::StatusCode;
use reqwest::header::{HeaderName, HeaderValue};
use secrecy::ExposeSecret;
use tracing::debug;

use openstack_keystone_idp_types::{AUTH_TOKEN_HEADER, v2, v3};

use crate::idp::IdentityError;
use crate::idp::classify::{CallKind, check_response};
use crate::idp::types::{Entitlement, EntitlementSet, ProtocolVersion, Session};
use crate::transport::{HttpRequest, HttpResponse};

impl From<v2::Tenant> for Entitlement {
    fn from(value: v2::Tenant) -> Self {
        Self {
            id: value.id,
            name: value.name,
            description: value.description,
            enabled: value.enabled,
            domain_id: None,
        }
    }
}

impl From<v3::Group> for Entitlement {
    fn from(value: v3::Group) -> Self {
        Self {
            id: value.id,
            name: value.name,
            description: value.description,
            enabled: true,
            domain_id: value.domain_id,
        }
    }
}

/// Entitlement listing request authenticated with the subject token.
///
/// The token header is marked sensitive so that it is masked whenever the
/// request headers get printed.
pub fn entitlement_request(session: &Session) -> Result<HttpRequest, IdentityError> {
    let mut token = HeaderValue::from_str(session.subject_token.expose_secret())
        .map_err(|_| IdentityError::malformed("subject token is not a valid header value"))?;
    token.set_sensitive(true);
    let path = match session.version {
        ProtocolVersion::V2 => v2::TENANTS_PATH.to_string(),
        ProtocolVersion::V3 => {
            // Dot segments survive percent encoding and get resolved by the URL join.
            if matches!(session.user.id.as_str(), "." | "..") {
                return Err(IdentityError::malformed("user id is a dot path segment"));
            }
            v3::user_groups_path(&session.user.id)
        }
    };
    Ok(HttpRequest::get(path).with_header(HeaderName::from_static(AUTH_TOKEN_HEADER), token))
}

/// Parse the entitlement listing answer.
///
/// A `404` means no memberships. A successful answer without the
/// `tenants`/`groups` collection is malformed, an empty collection is not.
pub fn parse_entitlements(
    response: HttpResponse,
    version: ProtocolVersion,
) -> Result<EntitlementSet, IdentityError> {
    let response = check_response(CallKind::EntitlementLookup, response)?;
    if response.status == StatusCode::NOT_FOUND {
        debug!("no entitlements found");
        return Ok(EntitlementSet::default());
    }
    Ok(match version {
        ProtocolVersion::V2 => serde_json::from_slice::<v2::TenantsResponse>(&response.body)
            .map_err(|e| IdentityError::malformed(format!("invalid tenants body: {e}")))?
            .tenants
            .into_iter()
            .map(Entitlement::from)
            .collect(),
        ProtocolVersion::V3 => serde_json::from_slice::<v3::UserGroupsResponse>(&response.body)
            .map_err(|e| IdentityError::malformed(format!("invalid groups body: {e}")))?
            .groups
            .into_iter()
            .map(Entitlement::from)
            .collect(),
    })
}
