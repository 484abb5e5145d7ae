//! External Collaborators
//!
//! The dapp core never talks to a chain itself. Address resolution, call
//! submission, view reads and the wallet connection are provided by the
//! host through these traits.

use std::cell::RefCell;
use std::collections::BTreeMap;
use std::convert::Infallible;
use std::fmt;

use fundme_common::types::{Address, CallArg, CallBatch, ContractCall, ReadState};

// ============ Traits ============

/// Resolves a contract's deployment name to its on-chain address
pub trait ContractResolver {
    /// `None` while deployment metadata is still loading or unknown
    fn resolve(&self, contract: &str) -> Option<Address>;
}

/// Submits calls on behalf of the connected wallet.
///
/// Reverts (insufficient allowance, unauthorized withdraw) surface as
/// `Self::Error`; the core passes them through untouched.
pub trait TransactionExecutor {
    type Receipt;
    type Error: fmt::Display;

    /// Submit all calls as one atomic transaction, in order
    fn submit_batch(&self, batch: &CallBatch) -> Result<Self::Receipt, Self::Error>;

    /// Submit a single call
    fn submit_call(&self, call: &ContractCall) -> Result<Self::Receipt, Self::Error>;
}

/// Reads a contract view function
pub trait ContractReader {
    fn read(&self, contract: &str, function: &str, args: &[CallArg]) -> ReadState<u128>;
}

/// The wallet connection shared by the whole page
pub trait WalletConnection {
    /// `None` when no wallet is connected
    fn connected_address(&self) -> Option<Address>;
}

impl<T: ContractResolver + ?Sized> ContractResolver for &T {
    fn resolve(&self, contract: &str) -> Option<Address> {
        (**self).resolve(contract)
    }
}

impl<T: ContractReader + ?Sized> ContractReader for &T {
    fn read(&self, contract: &str, function: &str, args: &[CallArg]) -> ReadState<u128> {
        (**self).read(contract, function, args)
    }
}

impl<T: WalletConnection + ?Sized> WalletConnection for &T {
    fn connected_address(&self) -> Option<Address> {
        (**self).connected_address()
    }
}

impl WalletConnection for Option<Address> {
    fn connected_address(&self) -> Option<Address> {
        *self
    }
}

// ============ Static Deployment ============

/// Resolver over a fixed name → address table
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StaticResolver {
    addresses: BTreeMap<String, Address>,
}

impl StaticResolver {
    pub fn new(addresses: BTreeMap<String, Address>) -> Self {
        Self { addresses }
    }

    pub fn with(mut self, contract: impl Into<String>, address: Address) -> Self {
        self.addresses.insert(contract.into(), address);
        self
    }
}

impl ContractResolver for StaticResolver {
    fn resolve(&self, contract: &str) -> Option<Address> {
        self.addresses.get(contract).copied()
    }
}

// ============ Dry Run ============

/// Executor that records batches instead of sending them.
///
/// The receipt is the batch digest.
#[derive(Debug, Default)]
pub struct DryRunExecutor {
    submitted: RefCell<Vec<CallBatch>>,
}

impl DryRunExecutor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Batches recorded so far, oldest first
    pub fn submitted(&self) -> Vec<CallBatch> {
        self.submitted.borrow().clone()
    }
}

impl TransactionExecutor for DryRunExecutor {
    type Receipt = [u8; 32];
    type Error = Infallible;

    fn submit_batch(&self, batch: &CallBatch) -> Result<Self::Receipt, Self::Error> {
        let digest = batch.digest();
        tracing::info!(calls = batch.len(), digest = %hex::encode(digest), "dry run: batch recorded");
        self.submitted.borrow_mut().push(batch.clone());
        Ok(digest)
    }

    fn submit_call(&self, call: &ContractCall) -> Result<Self::Receipt, Self::Error> {
        self.submit_batch(&CallBatch::single(call.clone()))
    }
}
