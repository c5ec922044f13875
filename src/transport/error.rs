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
//! # Transport error
use thiserror::Error;

/// Transport error.
///
/// The request never produced an HTTP response (connection refused,
/// timeout, TLS failure, ...).
#[derive(Debug, Error)]
pub enum TransportError {
    /// Request error.
    #[error("request to the identity service failed: {}", source)]
    Request {
        /// The source of the error.
        #[from]
        source: reqwest::Error,
    },

    /// Url parsing error.
    #[error(transparent)]
    UrlParse {
        /// The source of the error.
        #[from]
        source: url::ParseError,
    },
}
