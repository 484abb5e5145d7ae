//! FundMe Common Library
//!
//! Shared types, constants, and utilities for the FundMe dapp crates.
//!
//! The dapp lets a connected wallet fund the `FundMe` contract with the
//! `Eth` token and lets an authorized caller withdraw the balance. This
//! crate holds the pieces every contract binding needs:
//!
//! - **Amounts**: conversion between typed decimal strings and the
//!   contract's 18-decimal fixed-point integers ([`math`])
//! - **Calls**: immutable contract calls and ordered, atomic call batches
//!   ([`types`])
//! - **Reads**: the resolved/unresolved state of an on-chain view ([`types::ReadState`])
//! - **Errors**: typed errors with stable codes ([`errors`])
//!
//! Signing, broadcast, ABI encoding and network selection live in external
//! collaborators and are not part of this crate.
//!
//! This crate is `no_std` compatible when built without the default `std`
//! feature.

#![cfg_attr(not(feature = "std"), no_std)]

extern crate alloc;

pub use alloc::{string::String, vec::Vec};

pub mod constants;
pub mod errors;
pub mod types;
pub mod math;
pub mod validation;


// Re-exports for convenience
pub use constants::*;
pub use errors::*;
pub use types::*;
pub use math::*;
pub use validation::*;
