//! Error Types for the FundMe dapp
//!
//! Typed errors with stable codes. Transaction reverts are not represented
//! here: they belong to the transaction collaborator and are passed through
//! untouched.

use core::fmt;

use crate::String;

/// Result type alias for FundMe operations
pub type FundMeResult<T> = Result<T, FundMeError>;

/// Main error enum for the dapp core
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FundMeError {
    // ============ Amount Errors ============
    /// Amount text could not be read as a decimal number
    #[error("invalid amount {input:?}: {reason}")]
    InvalidAmount {
        input: String,
        reason: AmountErrorReason,
    },

    /// Amount does not fit the fixed-point range
    #[error("amount {input:?} overflows the {decimals}-decimal fixed-point range")]
    Overflow { input: String, decimals: u8 },

    /// Fixed-point scale cannot be represented
    #[error("unsupported decimals {decimals} (maximum {maximum})")]
    UnsupportedDecimals { decimals: u8, maximum: u8 },

    // ============ Precondition Errors ============
    /// Contract address has not been resolved yet
    #[error("contract {contract:?} has no resolved address")]
    UnresolvedContract { contract: String },

    /// Address text is not a valid hex address
    #[error("invalid address: {reason}")]
    InvalidAddress {
        /// Description of why the address is invalid
        reason: &'static str,
    },

    // ============ Call Errors ============
    /// A batch must carry at least one call
    #[error("call batch is empty")]
    EmptyBatch,

    /// Batch does not have the approve-then-fund shape
    #[error("malformed fund batch: {reason}")]
    MalformedBatch { reason: &'static str },

    // ============ Configuration Errors ============
    /// Invalid configuration value
    #[error("invalid config {param}: {reason}")]
    InvalidConfig {
        param: &'static str,
        reason: &'static str,
    },
}

/// Reasons for amount-related errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AmountErrorReason {
    /// Nothing but whitespace was typed
    Empty,
    /// Not a decimal number
    NotANumber,
    /// Negative, non-zero value
    Negative,
}

impl fmt::Display for AmountErrorReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            Self::Empty => "empty input",
            Self::NotANumber => "not a number",
            Self::Negative => "negative value",
        };
        f.write_str(text)
    }
}

impl FundMeError {
    /// Returns a human-readable error code for logging/debugging
    pub fn code(&self) -> &'static str {
        match self {
            Self::InvalidAmount { .. } => "E010_INVALID_AMOUNT",
            Self::Overflow { .. } => "E011_AMOUNT_OVERFLOW",
            Self::UnsupportedDecimals { .. } => "E012_UNSUPPORTED_DECIMALS",
            Self::UnresolvedContract { .. } => "E020_UNRESOLVED_CONTRACT",
            Self::InvalidAddress { .. } => "E021_INVALID_ADDRESS",
            Self::EmptyBatch => "E030_EMPTY_BATCH",
            Self::MalformedBatch { .. } => "E031_MALFORMED_BATCH",
            Self::InvalidConfig { .. } => "E040_INVALID_CONFIG",
        }
    }

    /// Returns true if the user can fix this by changing input or waiting
    pub fn is_recoverable(&self) -> bool {
        match self {
            Self::InvalidAmount { .. } => true,      // Retype the amount
            Self::Overflow { .. } => true,           // Smaller amount
            Self::UnresolvedContract { .. } => true, // Wait for metadata
            _ => false,
        }
    }
}
