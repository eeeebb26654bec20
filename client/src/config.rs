//! Connection settings for the SpacetimeDB module.
//!
//! Everything can come from the command line or the environment:
//!
//! ```text
//! client --uri http://127.0.0.1:3000 --module grove --token-file ~/.grove/token
//! STDB_URI=https://example.net STDB_MODULE=grove client
//! ```

use bevy::prelude::*;
use clap::Parser;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Parser, Resource, Debug, Clone)]
#[command(name = "grove", about = "Grove multiplayer client")]
pub struct ClientArgs {
    /// SpacetimeDB host
    #[arg(long, env = "STDB_URI", default_value = "http://127.0.0.1:3000")]
    pub uri: String,

    /// Published module (database) name
    #[arg(long = "module", env = "STDB_MODULE", default_value = "grove")]
    pub module_name: String,

    /// JWT identifying this client; without one the identity is ephemeral
    #[arg(short, long, env = "STDB_TOKEN", conflicts_with = "token_file")]
    pub token: Option<String>,

    /// File holding the JWT
    #[arg(long)]
    pub token_file: Option<PathBuf>,
}

impl Default for ClientArgs {
    fn default() -> Self {
        Self {
            uri: "http://127.0.0.1:3000".into(),
            module_name: "grove".into(),
            token: None,
            token_file: None,
        }
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("couldn't read token file {path}: {source}")]
    TokenFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("token file {0} is empty")]
    EmptyTokenFile(PathBuf),
}

impl ClientArgs {
    /// The JWT to connect with, if any.
    pub fn resolve_token(&self) -> Result<Option<String>, ConfigError> {
        if let Some(token) = &self.token {
            return Ok(Some(token.trim().to_string()));
        }
        let Some(path) = &self.token_file else {
            return Ok(None);
        };

        let token = std::fs::read_to_string(path).map_err(|source| ConfigError::TokenFile {
            path: path.clone(),
            source,
        })?;
        let token = token.trim();
        if token.is_empty() {
            return Err(ConfigError::EmptyTokenFile(path.clone()));
        }
        Ok(Some(token.to_string()))
    }
}

pub(super) fn plugin(app: &mut App) {
    // Invalid arguments (and `--help`) print usage and exit here, before any window opens.
    app.insert_resource(ClientArgs::parse());
}
