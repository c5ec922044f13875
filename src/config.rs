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
//! # Identity provider configuration
//!
//! Parsing of the INI configuration file.
use std::path::PathBuf;

use config::{File, FileFormat};
use eyre::{Report, WrapErr};
use serde::Deserialize;
use validator::Validate;

mod default;
mod keystone;

pub use default::DefaultSection;
pub use keystone::KeystoneSection;

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    /// Global configuration options
    #[serde(rename = "DEFAULT", default)]
    pub default: DefaultSection,

    /// Keystone identity provider
    pub keystone: KeystoneSection,
}

impl Config {
    pub fn new(path: PathBuf) -> Result<Self, Report> {
        let builder = config::Config::builder()
            .add_source(File::from(path).format(FileFormat::Ini).required(true));

        builder.try_into()
    }
}

impl TryFrom<config::ConfigBuilder<config::builder::DefaultState>> for Config {
    type Error = Report;
    fn try_from(
        builder: config::ConfigBuilder<config::builder::DefaultState>,
    ) -> Result<Self, Self::Error> {
        let mut builder = builder;
        builder = builder
            .set_default("DEFAULT.debug", "false")?
            .set_default("keystone.version", "v3")?;

        let config: Self = builder
            .build()
            .wrap_err("Failed to read configuration file")?
            .try_deserialize()
            .wrap_err("Failed to parse configuration file")?;
        config
            .keystone
            .validate()
            .wrap_err("Invalid [keystone] configuration")?;
        Ok(config)
    }
}
