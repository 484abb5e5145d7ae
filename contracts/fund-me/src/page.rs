//! FundMe Page Controller
//!
//! Holds the one piece of mutable state the page owns, the amount field,
//! and wires user actions to the composer and reads to the projector.
//! Batches are always composed from the amount as it is when the action
//! fires, never from an earlier keystroke.

use fundme_common::{
    constants::display,
    errors::{FundMeError, FundMeResult},
    math::FixedPointFormat,
    types::{Address, CallBatch, DecimalAmount, FixedPointAmount, ReadState},
    validation::{require_resolved, validate_fund_batch},
};
use fundme_eth_token::{EthToken, TokenCall};

use crate::collaborators::{ContractReader, ContractResolver, TransactionExecutor, WalletConnection};
use crate::composer::{compose_fund_calls, compose_withdraw_call, ContractTarget, FundMeCall};
use crate::config::DappConfig;
use crate::projector::{project_contribution_with, project_funder_count, FunderCountDisplay, FundMeView};

/// Why a user action did not produce a transaction
#[derive(Debug, thiserror::Error)]
pub enum ActionError<E> {
    /// The action should have been disabled (e.g. contract not resolved)
    #[error(transparent)]
    Precondition(#[from] FundMeError),
    /// The transaction collaborator reported a failure
    #[error("transaction failed: {0}")]
    Transaction(E),
}

/// Everything the page renders, derived from the current reads
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageView {
    pub connected_address: Option<Address>,
    pub funders: FunderCountDisplay,
    pub my_contribution: DecimalAmount,
    pending_placeholder: String,
}

impl PageView {
    pub fn funders_label(&self) -> String {
        format!("Funders: {}", self.funders.render(&self.pending_placeholder))
    }

    pub fn contribution_label(&self) -> String {
        format!("My contribution: {}", self.my_contribution)
    }
}

/// The single FundMe page
#[derive(Debug, Clone)]
pub struct FundMePage {
    amount: DecimalAmount,
    config: DappConfig,
    format: FixedPointFormat,
    token: EthToken,
}

impl FundMePage {
    /// New page with the amount field at `"0"`
    pub fn new(config: DappConfig) -> FundMeResult<Self> {
        config.validate()?;
        let format = config.format()?;
        let token = config.token();
        Ok(Self {
            amount: DecimalAmount::from(display::INITIAL_AMOUNT),
            config,
            format,
            token,
        })
    }

    pub fn config(&self) -> &DappConfig {
        &self.config
    }

    // ============ Amount Field ============

    /// Replace the amount text (one call per keystroke)
    pub fn set_amount(&mut self, input: impl Into<String>) {
        self.amount = DecimalAmount::new(input);
    }

    /// Amount text as typed
    pub fn amount(&self) -> &DecimalAmount {
        &self.amount
    }

    /// Current amount in base units; invalid text counts as zero
    pub fn fixed_point_amount(&self) -> FixedPointAmount {
        self.format.parse_or_zero(self.amount.as_str())
    }

    /// Current amount, or why the text is not a valid amount
    pub fn validated_amount(&self) -> FundMeResult<FixedPointAmount> {
        self.format.parse(self.amount.as_str())
    }

    // ============ Actions ============

    fn fund_me_target<R: ContractResolver + ?Sized>(&self, resolver: &R) -> ContractTarget {
        ContractTarget::resolve(&self.config.fund_me_contract, resolver)
    }

    /// Whether the Fund action can be offered
    pub fn can_fund<R: ContractResolver + ?Sized>(&self, resolver: &R) -> bool {
        self.fund_me_target(resolver).is_resolved()
    }

    /// Compose the fund batch from the amount as it is now
    pub fn compose_fund<R: ContractResolver + ?Sized>(&self, resolver: &R) -> FundMeResult<CallBatch> {
        let target = self.fund_me_target(resolver);
        let batch = compose_fund_calls(self.fixed_point_amount(), &self.token, &target)?;
        validate_fund_batch(&batch, self.token.contract(), target.name())?;
        let spender = require_resolved(target.name(), target.address())?;
        require_approved_spender(&batch, spender)?;
        Ok(batch)
    }

    /// Approve and fund in one transaction
    pub fn fund<R, E>(&self, resolver: &R, executor: &E) -> Result<E::Receipt, ActionError<E::Error>>
    where
        R: ContractResolver + ?Sized,
        E: TransactionExecutor + ?Sized,
    {
        let batch = self.compose_fund(resolver)?;
        tracing::info!(amount = %self.amount, calls = batch.len(), "submitting fund batch");

        executor.submit_batch(&batch).map_err(|err| {
            tracing::warn!(error = %err, "fund transaction failed");
            ActionError::Transaction(err)
        })
    }

    /// Compose the withdraw call
    pub fn compose_withdraw(&self) -> CallBatch {
        compose_withdraw_call(&self.config.fund_me_contract)
    }

    /// Withdraw the contract balance (contract enforces who may)
    pub fn withdraw<E>(&self, executor: &E) -> Result<E::Receipt, ActionError<E::Error>>
    where
        E: TransactionExecutor + ?Sized,
    {
        let call = FundMeCall::Withdraw.into_call(&self.config.fund_me_contract);
        tracing::info!(contract = call.contract(), "submitting withdraw");

        executor.submit_call(&call).map_err(|err| {
            tracing::warn!(error = %err, "withdraw transaction failed");
            ActionError::Transaction(err)
        })
    }

    // ============ Rendering ============

    /// Derive the page view from the current reads
    pub fn render<Rd, W>(&self, reader: &Rd, wallet: &W) -> PageView
    where
        Rd: ContractReader + ?Sized,
        W: WalletConnection + ?Sized,
    {
        let contract = &self.config.fund_me_contract;
        let connected_address = wallet.connected_address();

        let funders = project_funder_count(FundMeView::FundersLength.read(contract, reader));

        // No wallet, no contribution to look up
        let contribution = match connected_address {
            Some(funder) => FundMeView::AddressToAmountFunded { funder }.read(contract, reader),
            None => ReadState::Unresolved,
        };

        PageView {
            connected_address,
            funders,
            my_contribution: project_contribution_with(contribution, &self.format),
            pending_placeholder: self.config.pending_placeholder.clone(),
        }
    }
}

/// The batch's approval must authorize `spender`, the funding contract
fn require_approved_spender(batch: &CallBatch, spender: Address) -> FundMeResult<()> {
    match batch.calls().first().and_then(TokenCall::from_call) {
        Some(TokenCall::Approve { spender: approved, .. }) if approved == spender => Ok(()),
        _ => Err(FundMeError::MalformedBatch {
            reason: "approval must name the funding contract as spender",
        }),
    }
}

impl Default for FundMePage {
    fn default() -> Self {
        Self {
            amount: DecimalAmount::from(display::INITIAL_AMOUNT),
            config: DappConfig::default(),
            format: FixedPointFormat::ETHER,
            token: EthToken::default(),
        }
    }
}
