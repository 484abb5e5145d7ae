//! Eth Token Binding
//!
//! Client-side binding for the ERC-20 style token the FundMe contract is
//! funded with. The dapp only ever approves the funding contract to pull
//! tokens; the transfer itself happens inside `fund`.

use borsh::{BorshDeserialize, BorshSerialize};
use serde::{Deserialize, Serialize};

use fundme_common::{
    constants::{contracts, functions, token},
    math::FixedPointFormat,
    types::{Address, CallArg, ContractCall, FixedPointAmount},
};

// ============ Token Metadata ============

/// The token contract, addressed by its deployment name
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, BorshSerialize, BorshDeserialize)]
pub struct EthToken {
    /// Name the resolver knows the token contract by
    contract: String,
}

impl EthToken {
    pub fn new(contract: impl Into<String>) -> Self {
        Self {
            contract: contract.into(),
        }
    }

    /// Deployment name of the token contract
    pub fn contract(&self) -> &str {
        &self.contract
    }

    /// Get token name
    pub fn name() -> &'static str {
        token::NAME
    }

    /// Get token symbol
    pub fn symbol() -> &'static str {
        token::SYMBOL
    }

    /// Get token decimals
    pub fn decimals() -> u8 {
        token::DECIMALS
    }

    /// Fixed-point scale of token amounts
    pub fn format() -> FixedPointFormat {
        FixedPointFormat::ETHER
    }

    /// Build `approve(spender, amount)` against this token.
    pub fn approve(&self, spender: Address, amount: FixedPointAmount) -> ContractCall {
        TokenCall::Approve { spender, amount }.into_call(&self.contract)
    }
}

impl Default for EthToken {
    fn default() -> Self {
        Self::new(contracts::ETH)
    }
}

// ============ Token Calls ============

/// Token entry points the dapp calls
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, BorshSerialize, BorshDeserialize)]
pub enum TokenCall {
    /// Allow `spender` to transfer up to `amount` from the caller
    Approve {
        spender: Address,
        amount: FixedPointAmount,
    },
}

impl TokenCall {
    /// Entry point name on the token contract
    pub fn function(&self) -> &'static str {
        match self {
            Self::Approve { .. } => functions::APPROVE,
        }
    }

    /// Lower into a generic contract call on `contract`
    pub fn into_call(self, contract: &str) -> ContractCall {
        let function = self.function();
        match self {
            Self::Approve { spender, amount } => {
                tracing::trace!(%spender, %amount, contract, "approval call built");
                ContractCall::new(
                    contract,
                    function,
                    vec![CallArg::Address(spender), CallArg::Amount(amount)],
                )
            }
        }
    }

    /// Recognize a token call, ignoring which contract it targets
    pub fn from_call(call: &ContractCall) -> Option<Self> {
        match (call.function(), call.args()) {
            (functions::APPROVE, [CallArg::Address(spender), CallArg::Amount(amount)]) => {
                Some(Self::Approve {
                    spender: *spender,
                    amount: *amount,
                })
            }
            _ => None,
        }
    }
}
