//! Call Composer
//!
//! Turns a user action into the calls to submit. Funding is two calls in
//! one atomic batch: the token approval first, then `fund`, both carrying
//! the same amount. Withdrawal is a single argument-less call; who may
//! withdraw is enforced by the contract, not here.

use borsh::{BorshDeserialize, BorshSerialize};
use serde::{Deserialize, Serialize};

use fundme_common::{
    constants::functions,
    errors::FundMeResult,
    types::{Address, CallArg, CallBatch, ContractCall, FixedPointAmount},
    validation::require_resolved,
};
use fundme_eth_token::EthToken;

use crate::collaborators::ContractResolver;

// ============ Targets ============

/// A contract by name, with its address if the resolver knows it yet
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContractTarget {
    name: String,
    address: Option<Address>,
}

impl ContractTarget {
    pub fn new(name: impl Into<String>, address: Option<Address>) -> Self {
        Self {
            name: name.into(),
            address,
        }
    }

    /// Look `name` up through the resolver
    pub fn resolve<R: ContractResolver + ?Sized>(name: &str, resolver: &R) -> Self {
        Self::new(name, resolver.resolve(name))
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn address(&self) -> Option<Address> {
        self.address
    }

    pub fn is_resolved(&self) -> bool {
        self.address.is_some()
    }
}

// ============ FundMe Calls ============

/// FundMe entry points
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, BorshSerialize, BorshDeserialize)]
pub enum FundMeCall {
    /// Pull `amount` of the token from the caller (needs a prior approval)
    Fund { amount: FixedPointAmount },
    /// Send the whole balance to the owner
    Withdraw,
}

impl FundMeCall {
    pub fn function(&self) -> &'static str {
        match self {
            Self::Fund { .. } => functions::FUND,
            Self::Withdraw => functions::WITHDRAW,
        }
    }

    /// Lower into a generic contract call on `contract`
    pub fn into_call(self, contract: &str) -> ContractCall {
        let args = match self {
            Self::Fund { amount } => vec![CallArg::Amount(amount)],
            Self::Withdraw => Vec::new(),
        };
        ContractCall::new(contract, self.function(), args)
    }
}

// ============ Composition ============

/// Compose `[approve(funding, amount), fund(amount)]`.
///
/// The approval names the funding contract's address as spender, so the
/// batch cannot be built until that address is resolved. In that case no
/// calls are produced and `UnresolvedContract` is returned.
pub fn compose_fund_calls(
    amount: FixedPointAmount,
    approval_target: &EthToken,
    funding_target: &ContractTarget,
) -> FundMeResult<CallBatch> {
    let spender = require_resolved(funding_target.name(), funding_target.address())?;

    let approve = approval_target.approve(spender, amount);
    let fund = FundMeCall::Fund { amount }.into_call(funding_target.name());
    let batch = CallBatch::from_calls(vec![approve, fund])?;

    tracing::debug!(
        %amount,
        token = approval_target.contract(),
        target = funding_target.name(),
        digest = %hex::encode(batch.digest()),
        "fund batch composed"
    );
    Ok(batch)
}

/// Compose the single `withdraw()` call.
pub fn compose_withdraw_call(funding_target: &str) -> CallBatch {
    CallBatch::single(FundMeCall::Withdraw.into_call(funding_target))
}

#[cfg(test)]
mod tests {
    use super::*;
    use fundme_common::{errors::FundMeError, math::to_fixed_point, validation::validate_fund_batch};

    use crate::collaborators::StaticResolver;

    fn fund_me_address() -> Address {
        Address::new([0x42; 32])
    }

    fn resolved_target() -> ContractTarget {
        ContractTarget::new("FundMe", Some(fund_me_address()))
    }

    #[test]
    fn test_fund_batch_scenario() {
        let amount = to_fixed_point("2.5");
        assert_eq!(amount, FixedPointAmount::new(2_500_000_000_000_000_000));

        let batch = compose_fund_calls(amount, &EthToken::default(), &resolved_target()).unwrap();

        assert_eq!(batch.len(), 2);
        let approve = &batch.calls()[0];
        assert_eq!(approve.contract(), "Eth");
        assert_eq!(approve.function(), "approve");
        assert_eq!(
            approve.args(),
            &[CallArg::Address(fund_me_address()), CallArg::Amount(amount)]
        );

        let fund = &batch.calls()[1];
        assert_eq!(fund.contract(), "FundMe");
        assert_eq!(fund.function(), "fund");
        assert_eq!(fund.args(), &[CallArg::Amount(amount)]);
    }

    #[test]
    fn test_fund_batch_shape_holds_for_any_amount() {
        for amount in [0u128, 1, 1_000_000_000_000_000_000, u128::MAX] {
            let amount = FixedPointAmount::new(amount);
            let batch = compose_fund_calls(amount, &EthToken::default(), &resolved_target()).unwrap();
            assert!(validate_fund_batch(&batch, "Eth", "FundMe").is_ok());
            assert_eq!(batch.calls()[0].amount(), batch.calls()[1].amount());
        }
    }

    #[test]
    fn test_zero_amount_still_composes() {
        let batch =
            compose_fund_calls(to_fixed_point("abc"), &EthToken::default(), &resolved_target()).unwrap();
        assert_eq!(batch.calls()[1].amount(), Some(FixedPointAmount::zero()));
    }

    #[test]
    fn test_unresolved_funding_contract() {
        let target = ContractTarget::new("FundMe", None);
        let result = compose_fund_calls(FixedPointAmount::new(1), &EthToken::default(), &target);
        assert_eq!(
            result,
            Err(FundMeError::UnresolvedContract {
                contract: "FundMe".into()
            })
        );
    }

    #[test]
    fn test_target_from_resolver() {
        let resolver = StaticResolver::default().with("FundMe", fund_me_address());

        assert!(ContractTarget::resolve("FundMe", &resolver).is_resolved());
        assert!(!ContractTarget::resolve("Other", &resolver).is_resolved());
    }

    #[test]
    fn test_fund_me_call_cbor_encoding() {
        let call = FundMeCall::Fund {
            amount: FixedPointAmount::new(2_500_000_000_000_000_000),
        };

        let mut bytes = Vec::new();
        ciborium::into_writer(&call, &mut bytes).unwrap();
        let decoded: FundMeCall = ciborium::from_reader(bytes.as_slice()).unwrap();

        assert_eq!(decoded, call);
        assert_eq!(decoded.into_call("FundMe").amount(), call.into_call("FundMe").amount());
    }

    #[test]
    fn test_withdraw_call() {
        let batch = compose_withdraw_call("FundMe");
        assert_eq!(batch.len(), 1);
        assert_eq!(batch.calls()[0].function(), "withdraw");
        assert!(batch.calls()[0].args().is_empty());
    }
}
