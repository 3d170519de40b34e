#![no_std]

/// 1.0 in 18-decimal fixed point. Every stablecoin and collateral amount uses it.
pub const WAD: u128 = 1_000_000_000_000_000_000;
pub const WAD_PRECISION: usize = 18;

/// Precision of values living in `amount * 1e18` space: the Stability Pool
/// sum `S` and the carried division remainders.
pub const DOUBLE_WAD_PRECISION: usize = 36;

/// Factor applied to `P` whenever an offset would push it below this value.
pub const SCALE_FACTOR: u128 = 1_000_000_000;

/// Deposits whose snapshot is more scale changes behind than this are worth zero.
pub const MAX_SCALE_FACTOR_EXPONENT: u64 = 8;

pub const SECONDS_PER_YEAR: u64 = 31_536_000;

/// Minimum collateral ratio (110%)
pub const DEFAULT_MCR: u128 = 1_100_000_000_000_000_000;

/// Minimum Trove debt, gas compensation included
pub const DEFAULT_MIN_DEBT: u128 = 2_000 * WAD;

/// Stablecoin reserved in the gas pool at open and paid to the liquidator
pub const DEFAULT_BOLD_GAS_COMPENSATION: u128 = 200 * WAD;

/// Share of a liquidated Trove's collateral paid to the liquidator (0.5%)
pub const DEFAULT_COLL_GAS_COMPENSATION: u128 = 5_000_000_000_000_000;

/// Liquidation penalty when the debt is absorbed by the Stability Pool (5%)
pub const DEFAULT_LIQUIDATION_PENALTY_SP: u128 = 50_000_000_000_000_000;

/// Liquidation penalty when the debt is redistributed to other Troves (10%)
pub const DEFAULT_LIQUIDATION_PENALTY_REDISTRIBUTION: u128 = 100_000_000_000_000_000;

/// Redemption fee charged on the drawn collateral (0.5%)
pub const DEFAULT_REDEMPTION_FEE: u128 = 5_000_000_000_000_000;

/// Highest annual interest rate a borrower may pick (250%)
pub const DEFAULT_MAX_ANNUAL_INTEREST_RATE: u128 = 2_500_000_000_000_000_000;

pub const DEFAULT_MAX_PRICE_STALE_SECONDS: u64 = 3_600;

/// Upper bound for the collateral gas compensation share (10%)
pub const MAX_COLL_GAS_COMPENSATION: u128 = 100_000_000_000_000_000;

/// Upper bound for both liquidation penalties (50%)
pub const MAX_LIQUIDATION_PENALTY: u128 = 500_000_000_000_000_000;
