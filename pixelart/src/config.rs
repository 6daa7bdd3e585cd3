//! Chain selection: which contract address to use on which chain.

use serde::Deserialize;

use crate::contract::ContractConfig;
use crate::token::Address;

/// Address used when a chain has no configured deployment.
pub const FALLBACK_CONTRACT: Address = Address([
    0x0a, 0xbc, 0x3a, 0x09, 0x26, 0x87, 0x0a, 0x6b, 0xd1, 0xee, 0xe5, 0x9f, 0xdc, 0x59, 0x83,
    0x9c, 0xd9, 0xc0, 0x0e, 0xd0,
]);

/// Chains the front-end offers in its wallet picker.
pub const KNOWN_CHAINS: &[(u64, &str)] = &[
    (31337, "anvil"),
    (11155111, "sepolia"),
    (84532, "base-sepolia"),
    (1, "mainnet"),
];

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ChainEntry {
    pub id: u64,
    pub name: String,
    #[serde(default)]
    pub contract: Option<Address>,
}

/// Per-chain contract deployments with a fallback address.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ChainRegistry {
    #[serde(default = "default_fallback")]
    pub fallback: Address,
    #[serde(default, rename = "chain")]
    pub chains: Vec<ChainEntry>,
}

fn default_fallback() -> Address {
    FALLBACK_CONTRACT
}

impl Default for ChainRegistry {
    fn default() -> Self {
        Self {
            fallback: FALLBACK_CONTRACT,
            chains: KNOWN_CHAINS
                .iter()
                .map(|&(id, name)| ChainEntry {
                    id,
                    name: name.to_string(),
                    contract: None,
                })
                .collect(),
        }
    }
}

impl ChainRegistry {
    /// Parse a registry from TOML:
    ///
    /// ```toml
    /// fallback = "0x0abc3a0926870a6bd1eee59fdc59839cd9c00ed0"
    ///
    /// [[chain]]
    /// id = 31337
    /// name = "anvil"
    /// contract = "0x5fbdb2315678afecb367f032d93f642f64180aa3"
    /// ```
    #[cfg(feature = "config")]
    pub fn from_toml(s: &str) -> Result<Self, crate::error::ConfigError> {
        toml::from_str(s).map_err(|e| crate::error::ConfigError::Parse(e.to_string()))
    }

    pub fn chain(&self, chain_id: u64) -> Option<&ChainEntry> {
        self.chains.iter().find(|c| c.id == chain_id)
    }

    pub fn chain_by_name(&self, name: &str) -> Option<&ChainEntry> {
        self.chains.iter().find(|c| c.name.eq_ignore_ascii_case(name))
    }

    /// Contract config for `chain_id`, using the fallback address when the
    /// chain has no deployment of its own.
    pub fn resolve(&self, chain_id: u64) -> ContractConfig {
        let address = self
            .chain(chain_id)
            .and_then(|c| c.contract)
            .unwrap_or_else(|| {
                tracing::debug!(chain_id, "no deployment configured, using fallback contract");
                self.fallback
            });
        ContractConfig { chain_id, address }
    }
}
