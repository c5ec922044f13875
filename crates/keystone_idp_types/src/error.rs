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
//! # Wire type errors
use thiserror::Error;

/// Builder error.
///
/// Raised by the `derive_builder` generated builders when a mandatory field
/// was not set.
#[derive(Debug, Error, PartialEq)]
pub enum BuilderError {
    /// Uninitialized field.
    #[error("{0}")]
    UninitializedField(String),
    /// Custom validation error.
    #[error("{0}")]
    Validation(String),
}

impl From<String> for BuilderError {
    fn from(s: String) -> Self {
        Self::Validation(s)
    }
}

impl From<derive_builder::UninitializedFieldError> for BuilderError {
    fn from(ufe: derive_builder::UninitializedFieldError) -> Self {
        Self::UninitializedField(ufe.to_string())
    }
}

/// Timestamp decoding error.
///
/// Carries the offending raw text to help the operator.
#[derive(Clone, Debug, Error, PartialEq)]
#[error("cannot decode timestamp {raw:?}")]
pub struct TimeDecodeError {
    /// The raw text that failed both accepted layouts.
    pub raw: String,
}
