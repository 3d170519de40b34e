#![no_std]

pub static ERROR_AMOUNT_MUST_BE_GREATER_THAN_ZERO: &[u8] = b"Amount must be greater than zero.";

pub static ERROR_INSUFFICIENT_BALANCE: &[u8] = b"Insufficient stablecoin balance.";

pub static ERROR_BELOW_MIN_COLLATERAL_RATIO: &[u8] =
    b"Collateral ratio would fall below the minimum collateral ratio.";

pub static ERROR_BELOW_MIN_DEBT: &[u8] = b"Trove debt would fall below the minimum debt.";

pub static ERROR_TROVE_NOT_ACTIVE: &[u8] = b"Trove does not exist or is closed.";

pub static ERROR_NOT_TROVE_OWNER: &[u8] = b"Caller is not the owner of this trove.";

pub static ERROR_INVALID_COLLATERAL_TOKEN: &[u8] = b"Payment is not the collateral token.";

pub static ERROR_WITHDRAW_MORE_THAN_COLLATERAL: &[u8] =
    b"Cannot withdraw more collateral than the trove holds.";

pub static ERROR_COLLATERAL_TOP_UP_AND_WITHDRAWAL: &[u8] =
    b"Cannot add and withdraw collateral in the same adjustment.";

pub static ERROR_ZERO_ADJUSTMENT: &[u8] = b"Adjustment must change collateral or debt.";

pub static ERROR_REPAY_EXCEEDS_NET_DEBT: &[u8] =
    b"Repayment exceeds the trove debt net of gas compensation.";

pub static ERROR_ONLY_ONE_TROVE_IN_SYSTEM: &[u8] = b"Cannot close the only trove in the system.";

pub static ERROR_INTEREST_RATE_TOO_HIGH: &[u8] = b"Annual interest rate above the maximum.";

pub static ERROR_NOTHING_TO_LIQUIDATE: &[u8] = b"Nothing to liquidate.";

pub static ERROR_NOTHING_TO_REDEEM: &[u8] = b"Unable to redeem any amount.";

pub static ERROR_USER_HAS_NO_DEPOSIT: &[u8] = b"User must have a non-zero deposit.";

pub static ERROR_NO_COLLATERAL_GAIN: &[u8] = b"Caller must have a non-zero collateral gain.";

pub static ERROR_NO_COLLATERAL_SURPLUS: &[u8] = b"No collateral available to claim.";

pub static ERROR_PRICE_NOT_SET: &[u8] = b"Price feed has not been initialized.";

pub static ERROR_PRICE_FEED_STALE: &[u8] = b"Price feed is stale.";

pub static ERROR_UNAUTHORIZED_ORACLE: &[u8] = b"Caller is not the price oracle.";

pub static ERROR_INVALID_RISK_PARAMS: &[u8] = b"Invalid risk parameters.";

pub static ERROR_INVALID_ADDRESS: &[u8] = b"Address must not be zero.";

pub static ERROR_CONTRACT_PAUSED: &[u8] = b"Contract is paused.";

// Invariant violations. Reaching any of these aborts the whole call.

pub static ERROR_INVARIANT_ZERO_TOTAL_STAKES: &[u8] =
    b"Invariant violation: redistribution with zero total stakes.";

pub static ERROR_INVARIANT_ZERO_COLLATERAL_SNAPSHOT: &[u8] =
    b"Invariant violation: zero total collateral snapshot with non-zero stakes snapshot.";

pub static ERROR_INVARIANT_OFFSET_EXCEEDS_DEPOSITS: &[u8] =
    b"Invariant violation: offset debt exceeds stability pool deposits.";

pub static ERROR_INVARIANT_ZERO_PRODUCT: &[u8] =
    b"Invariant violation: stability pool product reached zero.";

pub static ERROR_INVARIANT_BUCKET_UNDERFLOW: &[u8] =
    b"Invariant violation: pool balance underflow.";

pub static ERROR_INVARIANT_DIVISION_BY_ZERO: &[u8] = b"Invariant violation: division by zero.";
