//! FundMe Dapp Core
//!
//! Client-side logic for the FundMe crowdfunding contract. A connected
//! wallet funds the contract with the `Eth` token; an authorized caller
//! withdraws the balance.
//!
//! ## Flow
//!
//! ```text
//! amount text ─▶ FixedPointFormat ─▶ composer ─▶ TransactionExecutor
//!                                    [approve(FundMe, x), fund(x)]
//!
//! ContractReader ─▶ projector ─▶ PageView
//! ```
//!
//! Wallet connection, contract address resolution, signing and broadcast
//! are collaborators behind the traits in [`collaborators`].
//!
//! ## CLI
//!
//! When compiled with the `cli` feature, the `fund-me-cli` binary composes
//! batches against a static deployment and prints them without sending.

pub mod collaborators;
pub mod composer;
pub mod config;
pub mod page;
pub mod projector;

#[cfg(feature = "cli")]
pub mod cli;


pub use collaborators::{
    ContractReader, ContractResolver, DryRunExecutor, StaticResolver, TransactionExecutor,
    WalletConnection,
};
pub use composer::{compose_fund_calls, compose_withdraw_call, ContractTarget, FundMeCall};
pub use config::{ConfigError, DappConfig};
pub use page::{ActionError, FundMePage, PageView};
pub use projector::{project_contribution, project_funder_count, FunderCountDisplay, FundMeView};
