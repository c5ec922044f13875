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
//! # Keystone timestamps
//!
//! Keystone emits token timestamps either as RFC 3339 (with an offset or
//! `Z`) or, in some deployments, as a bare `YYYY-MM-DDTHH:MM:SS` without
//! any offset. The latter is read as UTC.
use std::fmt;
use std::ops::Deref;

use chrono::{DateTime, NaiveDateTime, SecondsFormat, Utc};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::TimeDecodeError;

/// Layout of the offset-less fallback form.
pub const FALLBACK_LAYOUT: &str = "%Y-%m-%dT%H:%M:%S";

/// Decode a Keystone timestamp.
///
/// RFC 3339 is tried first, then [`FALLBACK_LAYOUT`]. When both fail the
/// raw text is returned inside the error.
pub fn decode(raw: &str) -> Result<DateTime<Utc>, TimeDecodeError> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Ok(dt.with_timezone(&Utc));
    }
    NaiveDateTime::parse_from_str(raw, FALLBACK_LAYOUT)
        .map(|naive| naive.and_utc())
        .map_err(|_| TimeDecodeError { raw: raw.into() })
}

/// Timestamp accepting both Keystone encodings on deserialization.
///
/// Serialization always produces RFC 3339.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct Time(pub DateTime<Utc>);

impl Deref for Time {
    type Target = DateTime<Utc>;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl From<DateTime<Utc>> for Time {
    fn from(value: DateTime<Utc>) -> Self {
        Self(value)
    }
}

impl From<Time> for DateTime<Utc> {
    fn from(value: Time) -> Self {
        value.0
    }
}

impl fmt::Display for Time {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0.to_rfc3339_opts(SecondsFormat::AutoSi, true))
    }
}

impl Serialize for Time {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Time {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        decode(&raw).map(Self).map_err(serde::de::Error::custom)
    }
}
