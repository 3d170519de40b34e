#![no_std]

multiversx_sc::imports!();
multiversx_sc::derive_imports!();

/// Lifecycle state of a Trove.
///
/// `Zombie` Troves were redeemed below the minimum debt. They are skipped by
/// redemptions but still accrue rewards, can be liquidated and can be brought
/// back to `Active` by an adjustment that restores the minimum debt.
#[type_abi]
#[derive(NestedEncode, NestedDecode, TopEncode, TopDecode, Clone, Copy, PartialEq, Eq, Debug)]
pub enum TroveStatus {
    NonExistent,
    Active,
    ClosedByOwner,
    ClosedByLiquidation,
    ClosedByRedemption,
    Zombie,
}

impl TroveStatus {
    /// Open Troves hold collateral and debt and take part in redistributions.
    pub fn is_open(&self) -> bool {
        matches!(self, TroveStatus::Active | TroveStatus::Zombie)
    }
}

/// Values of `L_coll` and `L_boldDebt` at the last time rewards were applied
/// to a Trove.
#[type_abi]
#[derive(NestedEncode, NestedDecode, TopEncode, TopDecode, Clone)]
pub struct RewardSnapshot<M: ManagedTypeApi> {
    pub l_coll: ManagedDecimal<M, NumDecimals>,
    pub l_bold_debt: ManagedDecimal<M, NumDecimals>,
}

#[type_abi]
#[derive(NestedEncode, NestedDecode, TopEncode, TopDecode, Clone)]
pub struct Trove<M: ManagedTypeApi> {
    pub id: u64,
    pub owner: ManagedAddress<M>,
    pub status: TroveStatus,
    /// Recorded collateral, pending redistribution rewards excluded.
    pub coll: ManagedDecimal<M, NumDecimals>,
    /// Recorded debt including the gas compensation reserve, pending rewards
    /// and unapplied interest excluded.
    pub debt: ManagedDecimal<M, NumDecimals>,
    pub stake: ManagedDecimal<M, NumDecimals>,
    pub reward_snapshot: RewardSnapshot<M>,
    pub annual_interest_rate: ManagedDecimal<M, NumDecimals>,
    pub last_debt_update_timestamp: u64,
}

impl<M: ManagedTypeApi> Trove<M> {
    pub fn is_open(&self) -> bool {
        self.status.is_open()
    }
}

/// Pool state captured when a depositor last touched the Stability Pool.
#[type_abi]
#[derive(NestedEncode, NestedDecode, TopEncode, TopDecode, Clone)]
pub struct DepositSnapshot<M: ManagedTypeApi> {
    pub p: ManagedDecimal<M, NumDecimals>,
    pub s: ManagedDecimal<M, NumDecimals>,
    pub scale: u64,
    pub epoch: u64,
}

#[type_abi]
#[derive(NestedEncode, NestedDecode, TopEncode, TopDecode, Clone)]
pub struct Deposit<M: ManagedTypeApi> {
    pub initial_value: ManagedDecimal<M, NumDecimals>,
    pub snapshot: DepositSnapshot<M>,
}

/// Risk parameters. All ratios are WAD fractions (1e18 == 100%).
#[type_abi]
#[derive(NestedEncode, NestedDecode, TopEncode, TopDecode, Clone)]
pub struct ProtocolParams<M: ManagedTypeApi> {
    pub mcr: ManagedDecimal<M, NumDecimals>,
    pub min_debt: ManagedDecimal<M, NumDecimals>,
    pub bold_gas_compensation: ManagedDecimal<M, NumDecimals>,
    pub coll_gas_compensation: ManagedDecimal<M, NumDecimals>,
    pub liquidation_penalty_sp: ManagedDecimal<M, NumDecimals>,
    pub liquidation_penalty_redistribution: ManagedDecimal<M, NumDecimals>,
    pub redemption_fee: ManagedDecimal<M, NumDecimals>,
    pub max_annual_interest_rate: ManagedDecimal<M, NumDecimals>,
    pub max_price_stale_seconds: u64,
}

#[type_abi]
#[derive(NestedEncode, NestedDecode, TopEncode, TopDecode, Clone)]
pub struct PriceFeed<M: ManagedTypeApi> {
    /// Stablecoin per unit of collateral, WAD.
    pub price: ManagedDecimal<M, NumDecimals>,
    pub timestamp: u64,
}

/// Outcome of liquidating a single Trove.
#[type_abi]
#[derive(NestedEncode, NestedDecode, TopEncode, TopDecode, Clone)]
pub struct LiquidationValues<M: ManagedTypeApi> {
    pub entire_debt: ManagedDecimal<M, NumDecimals>,
    pub entire_coll: ManagedDecimal<M, NumDecimals>,
    pub coll_gas_compensation: ManagedDecimal<M, NumDecimals>,
    pub bold_gas_compensation: ManagedDecimal<M, NumDecimals>,
    pub debt_to_offset: ManagedDecimal<M, NumDecimals>,
    pub coll_to_send_to_sp: ManagedDecimal<M, NumDecimals>,
    pub debt_to_redistribute: ManagedDecimal<M, NumDecimals>,
    pub coll_to_redistribute: ManagedDecimal<M, NumDecimals>,
    pub coll_surplus: ManagedDecimal<M, NumDecimals>,
}

/// Debt and collateral of a Trove with pending rewards and interest applied.
#[type_abi]
#[derive(NestedEncode, NestedDecode, TopEncode, TopDecode, Clone)]
pub struct EntireDebtAndColl<M: ManagedTypeApi> {
    pub debt: ManagedDecimal<M, NumDecimals>,
    pub coll: ManagedDecimal<M, NumDecimals>,
    pub pending_debt_reward: ManagedDecimal<M, NumDecimals>,
    pub pending_coll_reward: ManagedDecimal<M, NumDecimals>,
    pub accrued_interest: ManagedDecimal<M, NumDecimals>,
}

#[type_abi]
#[derive(NestedEncode, NestedDecode, TopEncode, TopDecode, Clone)]
pub struct SystemState<M: ManagedTypeApi> {
    pub active_coll: ManagedDecimal<M, NumDecimals>,
    pub active_debt: ManagedDecimal<M, NumDecimals>,
    pub default_coll: ManagedDecimal<M, NumDecimals>,
    pub default_debt: ManagedDecimal<M, NumDecimals>,
    pub stability_pool_coll: ManagedDecimal<M, NumDecimals>,
    pub total_bold_deposits: ManagedDecimal<M, NumDecimals>,
    pub coll_surplus: ManagedDecimal<M, NumDecimals>,
    pub gas_pool_bold: ManagedDecimal<M, NumDecimals>,
    pub bold_total_supply: ManagedDecimal<M, NumDecimals>,
    pub total_stakes: ManagedDecimal<M, NumDecimals>,
    pub total_stakes_snapshot: ManagedDecimal<M, NumDecimals>,
    pub total_collateral_snapshot: ManagedDecimal<M, NumDecimals>,
    pub l_coll: ManagedDecimal<M, NumDecimals>,
    pub l_bold_debt: ManagedDecimal<M, NumDecimals>,
    pub p: ManagedDecimal<M, NumDecimals>,
    pub current_scale: u64,
    pub current_epoch: u64,
}
