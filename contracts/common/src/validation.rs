//! Validation Helpers for the FundMe dapp
//!
//! Precondition checks run before a batch is handed to the transaction
//! collaborator.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use fundme_common::{check, validation::require_resolved};
//!
//! check!(!batch.is_empty(), FundMeError::EmptyBatch);
//! let spender = require_resolved("FundMe", resolver.resolve("FundMe"))?;
//! ```

use crate::{
    constants::functions,
    errors::{FundMeError, FundMeResult},
    types::{Address, CallArg, CallBatch},
};

// ============ Validation Macro ============

/// Check a condition and return an error if it fails.
///
/// # Examples
///
/// ```rust,ignore
/// check!(batch.len() == 2, FundMeError::MalformedBatch { reason: "length" });
/// ```
#[macro_export]
macro_rules! check {
    ($condition:expr, $error:expr) => {
        if !($condition) {
            return Err($error);
        }
    };
}

// ============ Preconditions ============

/// Require a contract address to be resolved.
pub fn require_resolved(contract: &str, address: Option<Address>) -> FundMeResult<Address> {
    address.ok_or_else(|| FundMeError::UnresolvedContract {
        contract: contract.into(),
    })
}

// ============ Batch Shape ============

/// Validates the approve-then-fund batch shape.
///
/// - exactly two calls
/// - index 0: `approve(spender, amount)` on `token_contract`
/// - index 1: `fund(amount)` on `fund_contract`
/// - both calls carry the same amount
pub fn validate_fund_batch(
    batch: &CallBatch,
    token_contract: &str,
    fund_contract: &str,
) -> FundMeResult<()> {
    let calls = batch.calls();
    check!(
        calls.len() == 2,
        FundMeError::MalformedBatch {
            reason: "expected exactly two calls"
        }
    );

    let (approve, fund) = (&calls[0], &calls[1]);
    check!(
        approve.contract() == token_contract && approve.function() == functions::APPROVE,
        FundMeError::MalformedBatch {
            reason: "first call must be the token approval"
        }
    );
    check!(
        fund.contract() == fund_contract && fund.function() == functions::FUND,
        FundMeError::MalformedBatch {
            reason: "second call must be the fund call"
        }
    );

    let approved = match approve.args() {
        [CallArg::Address(_), CallArg::Amount(amount)] => *amount,
        _ => {
            return Err(FundMeError::MalformedBatch {
                reason: "approval takes (spender, amount)",
            })
        }
    };
    let funded = match fund.args() {
        [CallArg::Amount(amount)] => *amount,
        _ => {
            return Err(FundMeError::MalformedBatch {
                reason: "fund takes (amount)",
            })
        }
    };
    check!(
        approved == funded,
        FundMeError::MalformedBatch {
            reason: "approved and funded amounts differ"
        }
    );

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{ContractCall, FixedPointAmount};

    fn spender() -> Address {
        Address::new([9u8; 32])
    }

    fn approve(amount: u128) -> ContractCall {
        ContractCall::new(
            "Eth",
            "approve",
            vec![CallArg::Address(spender()), CallArg::Amount(FixedPointAmount::new(amount))],
        )
    }

    fn fund(amount: u128) -> ContractCall {
        ContractCall::new("FundMe", "fund", vec![CallArg::Amount(FixedPointAmount::new(amount))])
    }

    #[test]
    fn test_valid_fund_batch() {
        let batch = CallBatch::from_calls(vec![approve(10), fund(10)]).unwrap();
        assert!(validate_fund_batch(&batch, "Eth", "FundMe").is_ok());
    }

    #[test]
    fn test_reversed_batch_rejected() {
        let batch = CallBatch::from_calls(vec![fund(10), approve(10)]).unwrap();
        assert!(matches!(
            validate_fund_batch(&batch, "Eth", "FundMe"),
            Err(FundMeError::MalformedBatch { .. })
        ));
    }

    #[test]
    fn test_mismatched_amounts_rejected() {
        let batch = CallBatch::from_calls(vec![approve(10), fund(11)]).unwrap();
        assert_eq!(
            validate_fund_batch(&batch, "Eth", "FundMe"),
            Err(FundMeError::MalformedBatch {
                reason: "approved and funded amounts differ"
            })
        );
    }

    #[test]
    fn test_single_call_rejected() {
        let batch = CallBatch::single(fund(10));
        assert!(validate_fund_batch(&batch, "Eth", "FundMe").is_err());
    }

    #[test]
    fn test_require_resolved() {
        assert_eq!(require_resolved("FundMe", Some(spender())), Ok(spender()));
        assert_eq!(
            require_resolved("FundMe", None),
            Err(FundMeError::UnresolvedContract {
                contract: "FundMe".into()
            })
        );
    }
}
