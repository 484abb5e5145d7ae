//! Core Types for the FundMe dapp
//!
//! Addresses, amounts, contract calls and read states shared by the
//! contract bindings.

use core::{fmt, str::FromStr};

use borsh::{BorshDeserialize, BorshSerialize};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use sha2::{Digest, Sha256};

use crate::errors::{FundMeError, FundMeResult};
use crate::{String, Vec};

// ============ Address ============

/// 32-byte account or contract address
#[derive(Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, BorshSerialize, BorshDeserialize)]
pub struct Address([u8; 32]);

impl Address {
    /// The zero address
    pub const ZERO: Address = Address([0u8; 32]);

    /// Wrap raw address bytes
    pub const fn new(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }

    /// Raw address bytes
    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    pub fn is_zero(&self) -> bool {
        self.0 == [0u8; 32]
    }

    /// Parse a hex address, with or without `0x`, left-padding short input.
    pub fn from_hex(value: &str) -> FundMeResult<Self> {
        let digits = value
            .strip_prefix("0x")
            .or_else(|| value.strip_prefix("0X"))
            .unwrap_or(value);

        if digits.is_empty() {
            return Err(FundMeError::InvalidAddress { reason: "empty" });
        }
        if digits.len() > 64 {
            return Err(FundMeError::InvalidAddress {
                reason: "longer than 32 bytes",
            });
        }

        let mut padded = String::with_capacity(64);
        for _ in digits.len()..64 {
            padded.push('0');
        }
        padded.push_str(digits);

        let mut bytes = [0u8; 32];
        hex::decode_to_slice(padded.as_bytes(), &mut bytes).map_err(|_| {
            FundMeError::InvalidAddress {
                reason: "not hexadecimal",
            }
        })?;
        Ok(Self(bytes))
    }
}

impl From<[u8; 32]> for Address {
    fn from(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }
}

impl FromStr for Address {
    type Err = FundMeError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Self::from_hex(value)
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("0x")?;
        for byte in &self.0 {
            write!(f, "{:02x}", byte)?;
        }
        Ok(())
    }
}

impl fmt::Debug for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Address({})", self)
    }
}

impl Serialize for Address {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Address {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let text = <String as Deserialize>::deserialize(deserializer)?;
        Self::from_hex(&text).map_err(serde::de::Error::custom)
    }
}

// ============ Amounts ============

/// Integer amount at the token's fixed-point scale (wei for 18 decimals)
#[derive(
    Debug,
    Default,
    Copy,
    Clone,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    BorshSerialize,
    BorshDeserialize,
)]
#[serde(transparent)]
pub struct FixedPointAmount(u128);

impl FixedPointAmount {
    /// The maximum value of `FixedPointAmount`.
    pub const MAX: FixedPointAmount = FixedPointAmount(u128::MAX);

    pub const fn new(value: u128) -> Self {
        Self(value)
    }

    pub const fn zero() -> Self {
        Self(0)
    }

    /// Returns the inner base-unit value.
    pub const fn value(&self) -> u128 {
        self.0
    }

    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }
}

impl From<u128> for FixedPointAmount {
    fn from(value: u128) -> Self {
        Self(value)
    }
}

impl fmt::Display for FixedPointAmount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Human-readable decimal amount, as typed or as displayed
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DecimalAmount(String);

impl DecimalAmount {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl From<&str> for DecimalAmount {
    fn from(value: &str) -> Self {
        Self(value.into())
    }
}

impl From<String> for DecimalAmount {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl PartialEq<&str> for DecimalAmount {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

impl fmt::Display for DecimalAmount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

// ============ Contract Calls ============

/// A single argument of a contract call
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, BorshSerialize, BorshDeserialize)]
#[serde(rename_all = "snake_case")]
pub enum CallArg {
    Address(Address),
    Amount(FixedPointAmount),
}

impl CallArg {
    fn tag(&self) -> u8 {
        match self {
            Self::Address(_) => 0x01,
            Self::Amount(_) => 0x02,
        }
    }
}

/// One call against a named contract.
///
/// Immutable once built; consumed by the transaction collaborator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, BorshSerialize, BorshDeserialize)]
pub struct ContractCall {
    contract: String,
    function: String,
    args: Vec<CallArg>,
}

impl ContractCall {
    pub fn new(contract: impl Into<String>, function: impl Into<String>, args: Vec<CallArg>) -> Self {
        Self {
            contract: contract.into(),
            function: function.into(),
            args,
        }
    }

    /// Name of the target contract
    pub fn contract(&self) -> &str {
        &self.contract
    }

    /// Entry point on the target contract
    pub fn function(&self) -> &str {
        &self.function
    }

    pub fn args(&self) -> &[CallArg] {
        &self.args
    }

    /// First amount argument, if any
    pub fn amount(&self) -> Option<FixedPointAmount> {
        self.args.iter().find_map(|arg| match arg {
            CallArg::Amount(amount) => Some(*amount),
            CallArg::Address(_) => None,
        })
    }

    fn hash_into(&self, hasher: &mut Sha256) {
        hasher.update((self.contract.len() as u32).to_le_bytes());
        hasher.update(self.contract.as_bytes());
        hasher.update((self.function.len() as u32).to_le_bytes());
        hasher.update(self.function.as_bytes());
        hasher.update((self.args.len() as u32).to_le_bytes());
        for arg in &self.args {
            hasher.update([arg.tag()]);
            match arg {
                CallArg::Address(address) => hasher.update(address.as_bytes()),
                CallArg::Amount(amount) => hasher.update(amount.value().to_le_bytes()),
            }
        }
    }
}

/// Ordered calls submitted as one atomic transaction.
///
/// Never empty. Order is significant: an approval must precede the call
/// that spends it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, BorshSerialize)]
#[serde(try_from = "Vec<ContractCall>", into = "Vec<ContractCall>")]
pub struct CallBatch {
    calls: Vec<ContractCall>,
}

impl CallBatch {
    /// Batch holding a single call
    pub fn single(call: ContractCall) -> Self {
        let mut calls = Vec::with_capacity(1);
        calls.push(call);
        Self { calls }
    }

    /// Batch from calls in submission order
    pub fn from_calls(calls: Vec<ContractCall>) -> FundMeResult<Self> {
        if calls.is_empty() {
            return Err(FundMeError::EmptyBatch);
        }
        Ok(Self { calls })
    }

    pub fn calls(&self) -> &[ContractCall] {
        &self.calls
    }

    pub fn len(&self) -> usize {
        self.calls.len()
    }

    pub fn is_empty(&self) -> bool {
        self.calls.is_empty()
    }

    pub fn iter(&self) -> core::slice::Iter<'_, ContractCall> {
        self.calls.iter()
    }

    pub fn into_calls(self) -> Vec<ContractCall> {
        self.calls
    }

    /// SHA-256 fingerprint of the calls in order.
    pub fn digest(&self) -> [u8; 32] {
        let mut hasher = Sha256::new();
        hasher.update((self.calls.len() as u32).to_le_bytes());
        for call in &self.calls {
            call.hash_into(&mut hasher);
        }
        let result = hasher.finalize();
        let mut digest = [0u8; 32];
        digest.copy_from_slice(&result);
        digest
    }
}

impl TryFrom<Vec<ContractCall>> for CallBatch {
    type Error = FundMeError;

    fn try_from(calls: Vec<ContractCall>) -> Result<Self, Self::Error> {
        Self::from_calls(calls)
    }
}

impl From<CallBatch> for Vec<ContractCall> {
    fn from(batch: CallBatch) -> Self {
        batch.calls
    }
}

impl BorshDeserialize for CallBatch {
    fn deserialize_reader<R: borsh::io::Read>(reader: &mut R) -> borsh::io::Result<Self> {
        let calls = Vec::<ContractCall>::deserialize_reader(reader)?;
        Self::from_calls(calls)
            .map_err(|_| borsh::io::Error::new(borsh::io::ErrorKind::InvalidData, "call batch is empty"))
    }
}

impl<'a> IntoIterator for &'a CallBatch {
    type Item = &'a ContractCall;
    type IntoIter = core::slice::Iter<'a, ContractCall>;

    fn into_iter(self) -> Self::IntoIter {
        self.calls.iter()
    }
}

// ============ Reads ============

/// Result of an on-chain view read that may still be in flight
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReadState<T> {
    /// No value yet (loading, failed, or not requested)
    Unresolved,
    /// The raw value returned by the chain
    Resolved(T),
}

impl<T> ReadState<T> {
    pub fn is_resolved(&self) -> bool {
        matches!(self, Self::Resolved(_))
    }

    pub fn resolved(self) -> Option<T> {
        match self {
            Self::Resolved(value) => Some(value),
            Self::Unresolved => None,
        }
    }

    pub fn map<U, F: FnOnce(T) -> U>(self, f: F) -> ReadState<U> {
        match self {
            Self::Resolved(value) => ReadState::Resolved(f(value)),
            Self::Unresolved => ReadState::Unresolved,
        }
    }

    pub fn unwrap_or(self, default: T) -> T {
        match self {
            Self::Resolved(value) => value,
            Self::Unresolved => default,
        }
    }
}

impl<T> Default for ReadState<T> {
    fn default() -> Self {
        Self::Unresolved
    }
}

impl<T> From<Option<T>> for ReadState<T> {
    fn from(value: Option<T>) -> Self {
        match value {
            Some(value) => Self::Resolved(value),
            None => Self::Unresolved,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fund_me() -> Address {
        Address::new([7u8; 32])
    }

    fn approve(amount: u128) -> ContractCall {
        ContractCall::new(
            "Eth",
            "approve",
            vec![CallArg::Address(fund_me()), CallArg::Amount(FixedPointAmount::new(amount))],
        )
    }

    fn fund(amount: u128) -> ContractCall {
        ContractCall::new("FundMe", "fund", vec![CallArg::Amount(FixedPointAmount::new(amount))])
    }

    #[test]
    fn test_address_hex_round_trip() {
        let address: Address = "0x49d36570d4e46f48e99674bd3fcc84644ddd6b96f7c741b1562b82f9e004dc7"
            .parse()
            .unwrap();
        assert_eq!(
            address.to_string(),
            "0x049d36570d4e46f48e99674bd3fcc84644ddd6b96f7c741b1562b82f9e004dc7"
        );
    }

    #[test]
    fn test_address_short_hex_is_left_padded() {
        let address = Address::from_hex("0x1").unwrap();
        let mut expected = [0u8; 32];
        expected[31] = 1;
        assert_eq!(address, Address::new(expected));
    }

    #[test]
    fn test_address_rejects_bad_input() {
        assert_eq!(
            Address::from_hex("0x"),
            Err(FundMeError::InvalidAddress { reason: "empty" })
        );
        assert!(Address::from_hex("0xzz").is_err());
        assert!(Address::from_hex(&"1".repeat(65)).is_err());
    }

    #[test]
    fn test_empty_batch_rejected() {
        assert_eq!(CallBatch::from_calls(Vec::new()), Err(FundMeError::EmptyBatch));
    }

    #[test]
    fn test_digest_depends_on_order() {
        let forward = CallBatch::from_calls(vec![approve(5), fund(5)]).unwrap();
        let reversed = CallBatch::from_calls(vec![fund(5), approve(5)]).unwrap();
        let again = CallBatch::from_calls(vec![approve(5), fund(5)]).unwrap();

        assert_ne!(forward.digest(), reversed.digest());
        assert_eq!(forward.digest(), again.digest());
    }

    #[test]
    fn test_digest_depends_on_amount() {
        let a = CallBatch::from_calls(vec![approve(5), fund(5)]).unwrap();
        let b = CallBatch::from_calls(vec![approve(6), fund(6)]).unwrap();
        assert_ne!(a.digest(), b.digest());
    }

    #[test]
    fn test_call_amount_picks_first_amount_arg() {
        assert_eq!(approve(42).amount(), Some(FixedPointAmount::new(42)));
        assert_eq!(ContractCall::new("FundMe", "withdraw", Vec::new()).amount(), None);
    }

    #[test]
    fn test_batch_cbor_encoding() {
        let batch = CallBatch::from_calls(vec![approve(2_500), fund(2_500)]).unwrap();

        let mut bytes = Vec::new();
        ciborium::into_writer(&batch, &mut bytes).unwrap();
        let decoded: CallBatch = ciborium::from_reader(bytes.as_slice()).unwrap();

        assert_eq!(decoded, batch);
    }

    #[test]
    fn test_empty_batch_cbor_rejected() {
        let mut bytes = Vec::new();
        ciborium::into_writer(&Vec::<ContractCall>::new(), &mut bytes).unwrap();
        let decoded: Result<CallBatch, _> = ciborium::from_reader(bytes.as_slice());
        assert!(decoded.is_err());
    }

    #[test]
    fn test_batch_borsh_encoding() {
        let batch = CallBatch::from_calls(vec![approve(7), fund(7)]).unwrap();
        let bytes = borsh::to_vec(&batch).unwrap();
        assert_eq!(borsh::from_slice::<CallBatch>(&bytes).unwrap(), batch);
    }

    #[test]
    fn test_empty_batch_borsh_rejected() {
        let bytes = borsh::to_vec(&Vec::<ContractCall>::new()).unwrap();
        assert!(borsh::from_slice::<CallBatch>(&bytes).is_err());
    }

    #[test]
    fn test_read_state_from_option() {
        assert_eq!(ReadState::from(Some(3u128)), ReadState::Resolved(3));
        assert_eq!(ReadState::<u128>::from(None), ReadState::Unresolved);
        assert_eq!(ReadState::<u128>::Unresolved.unwrap_or(9), 9);
        assert_eq!(ReadState::Resolved(2u128).map(|v| v * 2), ReadState::Resolved(4));
    }
}
