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
//! Keystone identity provider command line client.
//!
//! Authenticates against the configured identity service and prints the
//! user, the entitlements and the qualified identity as JSON.

use std::io;
use std::path::PathBuf;

use clap::Parser;
use color_eyre::eyre::{Report, Result, eyre};
use eyre::WrapErr;
use secrecy::SecretString;
use serde::Serialize;
use tracing::{Level, info};
use tracing_subscriber::{
    Layer,
    filter::{LevelFilter, Targets},
    prelude::*,
};

use openstack_keystone_idp::config::Config;
use openstack_keystone_idp::idp::types::{
    EntitlementSet, LoginIntent, PasswordCredentialsBuilder, QualifiedIdentity, ScopeHintBuilder,
    UserAttributes,
};
use openstack_keystone_idp::idp::{IdentityProviderApi, IdentityProviderClient};

/// Keystone identity provider.
///
/// Log in to the Keystone identity service with a password or an existing
/// token and list the tenants or groups of the user.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Path to the identity provider config file.
    #[arg(short, long, default_value = "/etc/keystone-idp/keystone-idp.conf")]
    config: PathBuf,

    /// Verbosity level. Repeat to increase level.
    #[arg(short, long, global=true, action = clap::ArgAction::Count, display_order = 920)]
    pub verbose: u8,

    /// Login name.
    #[arg(long, conflicts_with = "token", required_unless_present = "token")]
    username: Option<String>,

    /// Password.
    #[arg(long, env = "OS_PASSWORD", hide_env_values = true)]
    password: Option<String>,

    /// Existing token to log in with.
    #[arg(long, env = "OS_TOKEN", hide_env_values = true)]
    token: Option<String>,

    /// Tenant name to scope a v2 login to.
    #[arg(long)]
    tenant_name: Option<String>,

    /// Tenant ID to scope a v2 login to.
    #[arg(long)]
    tenant_id: Option<String>,

    /// User domain name of a v3 login.
    #[arg(long)]
    domain_name: Option<String>,

    /// User domain ID of a v3 login.
    #[arg(long)]
    domain_id: Option<String>,
}

/// Authentication result.
#[derive(Serialize)]
struct Output {
    user: UserAttributes,
    entitlements: EntitlementSet,
    qualified: QualifiedIdentity,
}

impl Args {
    fn login_intent(&self) -> Result<LoginIntent> {
        if let Some(token) = &self.token {
            return Ok(LoginIntent::token(token.clone()));
        }
        let username = self
            .username
            .clone()
            .ok_or_else(|| eyre!("either --username or --token is required"))?;
        let password = self
            .password
            .clone()
            .ok_or_else(|| eyre!("--password (or OS_PASSWORD) is required with --username"))?;
        let mut scope = ScopeHintBuilder::default();
        if let Some(val) = &self.tenant_name {
            scope.tenant_name(val);
        }
        if let Some(val) = &self.tenant_id {
            scope.tenant_id(val);
        }
        if let Some(val) = &self.domain_name {
            scope.domain_name(val);
        }
        if let Some(val) = &self.domain_id {
            scope.domain_id(val);
        }
        Ok(PasswordCredentialsBuilder::default()
            .username(username)
            .password(SecretString::from(password))
            .scope(scope.build()?)
            .build()?
            .into())
    }
}

#[tokio::main]
async fn main() -> Result<(), Report> {
    let args = Args::parse();
    let cfg = Config::new(args.config.clone())?;

    let mut level = match args.verbose {
        0 => LevelFilter::WARN,
        1 => LevelFilter::INFO,
        2 => LevelFilter::DEBUG,
        _ => LevelFilter::TRACE,
    };
    if cfg.default.debug {
        level = level.max(LevelFilter::DEBUG);
    }
    let filter = Targets::new()
        .with_default(level)
        .with_target("hyper_util", Level::INFO)
        .with_target("rustls", Level::INFO);

    let log_layer = tracing_subscriber::fmt::layer()
        .with_writer(io::stderr)
        .with_filter(filter);

    // build the tracing registry
    tracing_subscriber::registry().with(log_layer).init();

    info!(
        "Authenticating against the {} identity provider at {} ({})",
        cfg.keystone.name, cfg.keystone.url, cfg.keystone.version
    );

    let intent = args.login_intent()?;
    let idp = IdentityProviderClient::from_config(&cfg.keystone)
        .wrap_err("Failed to initialize the identity service client")?;
    let (user, entitlements) = idp
        .authenticate(&intent)
        .await
        .wrap_err("Authentication failed")?;
    let qualified = idp.qualified_identity(&user, &entitlements);

    println!(
        "{}",
        serde_json::to_string_pretty(&Output {
            user,
            entitlements,
            qualified,
        })?
    );
    Ok(())
}
