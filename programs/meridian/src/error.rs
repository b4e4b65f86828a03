use anchor_lang::prelude::*;

#[error_code]
pub enum ErrorCode {
    // Authorization
    #[msg("Unauthorized: signer is not the admin")]
    Unauthorized,
    #[msg("Signer is not the owner of the source account")]
    InvalidSigner,
    #[msg("Exchange account does not belong to the signer")]
    InvalidExchangeAccount,

    // Staleness
    #[msg("Oracle price is outdated")]
    OutdatedOracle,

    // Capacity / limits
    #[msg("Mint limit exceeded")]
    MintLimit,
    #[msg("Withdraw limit exceeded")]
    WithdrawLimit,
    #[msg("Synthetic max supply exceeded")]
    MaxSupply,
    #[msg("Collateral reserve limit exceeded")]
    CollateralLimitExceeded,
    #[msg("Collateral entry list is full")]
    CollateralEntryLimit,
    #[msg("Asset registry capacity exceeded")]
    RegistryCapacity,
    #[msg("Swapline limit exceeded")]
    SwaplineLimit,
    #[msg("Vault borrow limit exceeded")]
    VaultBorrowLimit,
    #[msg("Vault withdraw limit exceeded")]
    VaultWithdrawLimit,
    #[msg("User borrow limit exceeded")]
    UserBorrowLimit,

    // Invariant violations
    #[msg("Invalid liquidation")]
    InvalidLiquidation,
    #[msg("Liquidation deadline not passed")]
    LiquidationDeadline,
    #[msg("Wash trade")]
    WashTrade,
    #[msg("Tokens do not match registered synthetics")]
    MismatchedTokens,
    #[msg("Synthetic asset cannot be used as collateral")]
    SyntheticCollateral,
    #[msg("Trade value too small")]
    InsufficientValueTrade,
    #[msg("Invalid liquidation fund account")]
    InvalidLiquidationFund,
    #[msg("Insufficient collateral")]
    InsufficientCollateral,

    // Numeric
    #[msg("Arithmetic overflow")]
    Overflow,
    #[msg("Decimal scales are different")]
    DifferentScale,
    #[msg("Parameter out of range")]
    ParameterOutOfRange,

    // Lifecycle
    #[msg("Account already initialized")]
    Initialized,
    #[msg("Account is not initialized")]
    Uninitialized,
    #[msg("No asset with such address was found")]
    NoAssetFound,
    #[msg("Settlement slot not reached")]
    SettlementNotReached,
    #[msg("Cannot settle the USD synthetic")]
    UsdSettlement,
    #[msg("Invalid asset registry")]
    InvalidRegistry,

    // Operational
    #[msg("Program is currently halted")]
    Halted,
    #[msg("Swap is unavailable for this asset")]
    SwapUnavailable,
    #[msg("No rewards to claim")]
    NoRewards,
    #[msg("Insufficient amount for admin withdrawal")]
    InsufficientAdminWithdraw,
    #[msg("Oracle confidence out of range")]
    PriceConfidenceOutOfRange,
    #[msg("Invalid oracle type")]
    InvalidOracleType,
    #[msg("Oracle account is not owned by the expected program")]
    InvalidOracleProgram,
}
