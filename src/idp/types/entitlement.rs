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
//! # Entitlements
//!
//! Tenants (v2) and groups (v3) of the user, normalized into one shape.
use std::collections::BTreeMap;
use std::collections::btree_map::{IntoValues, Values};

use derive_builder::Builder;
use serde::{Deserialize, Serialize, Serializer};

use openstack_keystone_idp_types::error::BuilderError;

/// Tenant or group the user belongs to.
#[derive(Builder, Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[builder(build_fn(error = "BuilderError"))]
#[builder(setter(strip_option, into))]
pub struct Entitlement {
    /// Tenant or group ID.
    pub id: String,

    /// Tenant or group name.
    #[builder(default)]
    pub name: String,

    /// Description.
    #[builder(default)]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Whether the entitlement is enabled. Groups are always enabled.
    #[builder(default = "true")]
    pub enabled: bool,

    /// Owning domain (v3 only).
    #[builder(default)]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub domain_id: Option<String>,
}

/// Set of entitlements keyed by ID.
///
/// Iteration follows the ID order, so two lookups returning the same members
/// in a different order compare equal.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct EntitlementSet(BTreeMap<String, Entitlement>);

impl EntitlementSet {
    /// Add the entitlement. Returns `false` when the ID was already known, in
    /// which case the later entry wins.
    pub fn insert(&mut self, entitlement: Entitlement) -> bool {
        self.0.insert(entitlement.id.clone(), entitlement).is_none()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn contains(&self, id: &str) -> bool {
        self.0.contains_key(id)
    }

    pub fn get(&self, id: &str) -> Option<&Entitlement> {
        self.0.get(id)
    }

    pub fn iter(&self) -> Values<'_, String, Entitlement> {
        self.0.values()
    }

    /// Entitlement names in ID order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.0.values().map(|entitlement| entitlement.name.as_str())
    }
}

impl FromIterator<Entitlement> for EntitlementSet {
    fn from_iter<I: IntoIterator<Item = Entitlement>>(iter: I) -> Self {
        let mut set = Self::default();
        for entitlement in iter {
            set.insert(entitlement);
        }
        set
    }
}

impl IntoIterator for EntitlementSet {
    type Item = Entitlement;
    type IntoIter = IntoValues<String, Entitlement>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_values()
    }
}

impl<'a> IntoIterator for &'a EntitlementSet {
    type Item = &'a Entitlement;
    type IntoIter = Values<'a, String, Entitlement>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.values()
    }
}

impl Serialize for EntitlementSet {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(self.0.values())
    }
}
