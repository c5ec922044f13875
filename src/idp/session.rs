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
//! # Session extraction
//!
//! Turns a login answer into a [`Session`]. A v2 answer carries the token in
//! `access.token.id`, a v3 answer in the `X-Subject-Token` header with the
//! body only describing it.
//!
//! Error details name the offending field. They never quote the token.
use serde_json::Value;

use openstack_keystone_idp_types::{SUBJECT_TOKEN_HEADER, User, v2, v3};

use crate::idp::IdentityError;
use crate::idp::classify::{CallKind, check_response};
use crate::idp::types::{DomainAttributes, ProtocolVersion, Session, SessionBuilder, UserAttributes};
use crate::transport::HttpResponse;

/// Extract the session from the login answer.
///
/// # Arguments
/// * `response` - raw answer of the identity service.
/// * `version` - API version the login was sent with.
/// * `kind` - login kind, used to classify non successful answers.
pub fn extract_session(
    response: HttpResponse,
    version: ProtocolVersion,
    kind: CallKind,
) -> Result<Session, IdentityError> {
    let response = check_response(kind, response)?;
    match version {
        ProtocolVersion::V2 => extract_v2(&response),
        ProtocolVersion::V3 => extract_v3(&response),
    }
}

fn extract_v2(response: &HttpResponse) -> Result<Session, IdentityError> {
    let raw: Value = serde_json::from_slice(&response.body)
        .map_err(|e| IdentityError::malformed(format!("invalid login body: {e}")))?;
    let token_id = raw
        .pointer("/access/token/id")
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string();
    let rsp: v2::TokensResponse = serde_json::from_value(raw).map_err(|e| {
        IdentityError::malformed(redact(format!("invalid login body: {e}"), &token_id))
    })?;
    let access = rsp.access;
    let token = access
        .token
        .id
        .filter(|id| !id.is_empty())
        .ok_or_else(|| IdentityError::malformed("access.token.id"))?;
    Ok(SessionBuilder::default()
        .subject_token(token)
        .issued_at(access.token.issued_at.map(|time| time.0))
        .expires_at(access.token.expires.map(|time| time.0))
        .user(user_attributes(access.user, "access.user")?)
        .version(ProtocolVersion::V2)
        .build()?)
}

fn extract_v3(response: &HttpResponse) -> Result<Session, IdentityError> {
    let token = response
        .headers
        .get(SUBJECT_TOKEN_HEADER)
        .and_then(|val| val.to_str().ok())
        .filter(|val| !val.is_empty())
        .ok_or_else(|| IdentityError::malformed("X-Subject-Token header"))?;
    let rsp: v3::AuthTokensResponse = serde_json::from_slice(&response.body).map_err(|e| {
        IdentityError::malformed(redact(format!("invalid login body: {e}"), token))
    })?;
    let token_info = rsp.token;
    Ok(SessionBuilder::default()
        .subject_token(token.to_string())
        .issued_at(token_info.issued_at.map(|time| time.0))
        .expires_at(token_info.expires_at.map(|time| time.0))
        .methods(token_info.methods)
        .user(user_attributes(token_info.user, "token.user")?)
        .version(ProtocolVersion::V3)
        .build()?)
}

/// Normalize the wire user. `id` is mandatory.
fn user_attributes(user: User, path: &str) -> Result<UserAttributes, IdentityError> {
    let id = user
        .id
        .filter(|id| !id.is_empty())
        .ok_or_else(|| IdentityError::malformed(format!("{path}.id")))?;
    Ok(UserAttributes {
        id,
        name: user.name.unwrap_or_default(),
        username: Some(user.username).filter(|val| !val.is_empty()),
        domain: user.domain.map(|domain| DomainAttributes {
            id: domain.id,
            name: Some(domain.name).filter(|val| !val.is_empty()),
        }),
    })
}

fn redact(detail: String, secret: &str) -> String {
    if secret.is_empty() {
        detail
    } else {
        detail.replace(secret, "***")
    }
}
