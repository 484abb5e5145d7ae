//! Dapp Constants
//!
//! Contract names, function names and token parameters shared by the
//! FundMe crates. Names match the deployed contract metadata the resolver
//! collaborator looks up.

/// Token Metadata
pub mod token {
    /// Token name
    pub const NAME: &str = "Ether";
    /// Token symbol
    pub const SYMBOL: &str = "ETH";
    /// Decimal places of the on-chain fixed-point representation
    pub const DECIMALS: u8 = 18;
    /// One whole token in base units (1 ETH = 10^18 wei)
    pub const ONE: u128 = 1_000_000_000_000_000_000;
    /// Largest scale whose power of ten still fits in `u128`
    pub const MAX_DECIMALS: u8 = 38;
}

/// Contract names as known to the deployment metadata
pub mod contracts {
    /// The funding contract
    pub const FUND_ME: &str = "FundMe";
    /// The token spent when funding
    pub const ETH: &str = "Eth";
}

/// Entry points and views called by the dapp
pub mod functions {
    /// Token: authorize `spender` to move `amount` on the caller's behalf
    pub const APPROVE: &str = "approve";
    /// FundMe: pull `amount` from the caller
    pub const FUND: &str = "fund";
    /// FundMe: send the whole balance to the owner
    pub const WITHDRAW: &str = "withdraw";
    /// FundMe view: number of funders
    pub const FUNDERS_LENGTH: &str = "funders_length";
    /// FundMe view: amount contributed by an address
    pub const ADDRESS_TO_AMOUNT_FUNDED: &str = "address_to_amount_funded";
}

/// Display defaults
pub mod display {
    /// Shown while the funder count read is still pending
    pub const PENDING_PLACEHOLDER: &str = "-";
    /// Initial contents of the amount field
    pub const INITIAL_AMOUNT: &str = "0";
}
