//! Dapp Configuration
//!
//! Contract names and display settings, loadable from JSON. Every field
//! has a default, so `{}` is a valid config.
//!
//! ```json
//! {
//!   "fund_me_contract": "FundMe",
//!   "token_contract": "Eth",
//!   "decimals": 18,
//!   "deployments": {
//!     "FundMe": "0x05a1...",
//!     "Eth": "0x049d..."
//!   }
//! }
//! ```

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use fundme_common::{
    constants::{contracts, display, token},
    errors::{FundMeError, FundMeResult},
    math::FixedPointFormat,
    types::Address,
};
use fundme_eth_token::EthToken;

use crate::collaborators::StaticResolver;

/// Errors loading a config file
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("config is not valid JSON: {0}")]
    Parse(#[from] serde_json::Error),
    #[error(transparent)]
    Invalid(#[from] FundMeError),
}

/// Runtime settings for the page
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DappConfig {
    /// Deployment name of the funding contract
    pub fund_me_contract: String,
    /// Deployment name of the token spent when funding
    pub token_contract: String,
    /// Fixed-point decimals of the token
    pub decimals: u8,
    /// Shown while the funder count is loading
    pub pending_placeholder: String,
    /// Known deployments, used when no live resolver is available
    pub deployments: BTreeMap<String, Address>,
}

impl Default for DappConfig {
    fn default() -> Self {
        Self {
            fund_me_contract: contracts::FUND_ME.into(),
            token_contract: contracts::ETH.into(),
            decimals: token::DECIMALS,
            pending_placeholder: display::PENDING_PLACEHOLDER.into(),
            deployments: BTreeMap::new(),
        }
    }
}

impl DappConfig {
    /// Parse and validate a JSON config
    pub fn from_json(text: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> FundMeResult<()> {
        if self.fund_me_contract.trim().is_empty() {
            return Err(FundMeError::InvalidConfig {
                param: "fund_me_contract",
                reason: "must not be empty",
            });
        }
        if self.token_contract.trim().is_empty() {
            return Err(FundMeError::InvalidConfig {
                param: "token_contract",
                reason: "must not be empty",
            });
        }
        if self.fund_me_contract == self.token_contract {
            return Err(FundMeError::InvalidConfig {
                param: "token_contract",
                reason: "must differ from fund_me_contract",
            });
        }
        if self.decimals > token::MAX_DECIMALS {
            return Err(FundMeError::InvalidConfig {
                param: "decimals",
                reason: "must be at most 38",
            });
        }
        Ok(())
    }

    /// Fixed-point scale of amounts
    pub fn format(&self) -> FundMeResult<FixedPointFormat> {
        FixedPointFormat::new(self.decimals)
    }

    /// Binding for the configured token contract
    pub fn token(&self) -> EthToken {
        EthToken::new(self.token_contract.clone())
    }

    /// Resolver over the static deployment table
    pub fn resolver(&self) -> StaticResolver {
        StaticResolver::new(self.deployments.clone())
    }
}
