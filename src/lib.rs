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

//! # OpenStack Keystone identity provider
//!
//! Authenticates end users against an external Keystone identity service and
//! resolves the tenants (v2) or groups (v3) they belong to. The two API
//! versions are incompatible on the wire: the login bodies differ, v3 hands
//! the issued token out in the `X-Subject-Token` header instead of the body,
//! and the membership listing is a different call. Callers get one contract
//! regardless: the [`idp::IdentityProviderApi`].
//!
//! ```no_run
//! use openstack_keystone_idp::config::Config;
//! use openstack_keystone_idp::idp::types::LoginIntent;
//! use openstack_keystone_idp::idp::{IdentityProviderApi, IdentityProviderClient};
//!
//! # async fn example() -> eyre::Result<()> {
//! let config = Config::new("/etc/keystone-idp/keystone-idp.conf".into())?;
//! let idp = IdentityProviderClient::from_config(&config.keystone)?;
//! let (user, entitlements) = idp
//!     .authenticate(&LoginIntent::password("alice", "secret"))
//!     .await?;
//! println!("{} is a member of {} groups", user.id, entitlements.len());
//! # Ok(())
//! # }
//! ```
//!
//! The wire shapes live in the `openstack-keystone-idp-types` crate.

pub mod config;
pub mod idp;
pub mod transport;
