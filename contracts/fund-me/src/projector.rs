//! Read Projector
//!
//! Maps raw view results to what the page shows. Derived on every render,
//! never cached.

use std::fmt;

use fundme_common::{
    constants::{display, functions},
    math::FixedPointFormat,
    types::{Address, CallArg, DecimalAmount, FixedPointAmount, ReadState},
};

use crate::collaborators::ContractReader;

// ============ Views ============

/// FundMe view functions read by the page
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FundMeView {
    /// Number of distinct funders
    FundersLength,
    /// Amount contributed by `funder`
    AddressToAmountFunded { funder: Address },
}

impl FundMeView {
    pub fn function(&self) -> &'static str {
        match self {
            Self::FundersLength => functions::FUNDERS_LENGTH,
            Self::AddressToAmountFunded { .. } => functions::ADDRESS_TO_AMOUNT_FUNDED,
        }
    }

    pub fn args(&self) -> Vec<CallArg> {
        match self {
            Self::FundersLength => Vec::new(),
            Self::AddressToAmountFunded { funder } => vec![CallArg::Address(*funder)],
        }
    }

    /// Read this view from `contract`
    pub fn read<R: ContractReader + ?Sized>(&self, contract: &str, reader: &R) -> ReadState<u128> {
        reader.read(contract, self.function(), &self.args())
    }
}

// ============ Funder Count ============

/// Funder count as displayed.
///
/// A pending read is not zero: zero funders is a real answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FunderCountDisplay {
    Pending,
    Count(u128),
}

impl FunderCountDisplay {
    pub fn count(&self) -> Option<u128> {
        match self {
            Self::Count(count) => Some(*count),
            Self::Pending => None,
        }
    }

    /// Text with a custom placeholder for the pending state
    pub fn render(&self, placeholder: &str) -> String {
        match self {
            Self::Count(count) => count.to_string(),
            Self::Pending => placeholder.to_string(),
        }
    }
}

impl fmt::Display for FunderCountDisplay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Count(count) => write!(f, "{}", count),
            Self::Pending => f.write_str(display::PENDING_PLACEHOLDER),
        }
    }
}

/// Pass a resolved count through; pending stays pending.
pub fn project_funder_count(raw: ReadState<u128>) -> FunderCountDisplay {
    match raw {
        ReadState::Resolved(count) => FunderCountDisplay::Count(count),
        ReadState::Unresolved => FunderCountDisplay::Pending,
    }
}

// ============ Contribution ============

/// Contribution in 18-decimal units, pending shown as `"0.0"`.
pub fn project_contribution(raw: ReadState<u128>) -> DecimalAmount {
    project_contribution_with(raw, &FixedPointFormat::ETHER)
}

/// Contribution at a configured scale, pending shown as zero.
pub fn project_contribution_with(raw: ReadState<u128>, format: &FixedPointFormat) -> DecimalAmount {
    format.format(FixedPointAmount::new(raw.unwrap_or(0)))
}
