//! Configuration management for TallyChain

use serde::Deserialize;
use std::fs;
use std::path::Path;

use crate::error::{LedgerError, Result};

#[derive(Debug, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub node: NodeSection,
}

#[derive(Debug, Deserialize)]
pub struct NodeSection {
    /// Identity this process reports as a mining participant. Assigned by
    /// the operator; identity generation is out of scope for the ledger.
    #[serde(default = "default_node_id")]
    pub node_id: String,
}

impl Default for NodeSection {
    fn default() -> Self {
        NodeSection {
            node_id: default_node_id(),
        }
    }
}

fn default_node_id() -> String {
    "tally-local".to_string()
}

/// Read `config.toml` from the working directory. Defaults apply when the
/// file is absent.
pub fn load_config() -> Result<Config> {
    load_config_from("config.toml")
}

pub fn load_config_from(path: impl AsRef<Path>) -> Result<Config> {
    let config_str = fs::read_to_string(path).unwrap_or_default();
    let config: Config = if config_str.is_empty() {
        Config::default()
    } else {
        toml::from_str(&config_str).map_err(|e| LedgerError::Config(e.to_string()))?
    };

    // Validate critical values
    if config.node.node_id.is_empty() {
        return Err(LedgerError::Config(
            "node.node_id must not be empty".to_string(),
        ));
    }

    Ok(config)
}
