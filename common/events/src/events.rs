#![no_std]

multiversx_sc::imports!();
multiversx_sc::derive_imports!();
pub use common_structs::*;

/// What caused a Trove record to change.
#[type_abi]
#[derive(NestedEncode, NestedDecode, TopEncode, TopDecode, Clone, Copy, PartialEq, Eq)]
pub enum TroveOperation {
    Open,
    Adjust,
    AdjustInterestRate,
    ApplyPendingRewards,
    Close,
    Liquidate,
    Redeem,
    RedirectCollateralGain,
}

#[multiversx_sc::module]
pub trait EventsModule {
    // Emitted on every Trove change so an off-chain sorted index can follow
    // the Trove's collateral ratio and interest rate.
    #[event("trove_updated")]
    fn trove_updated_event(
        &self,
        #[indexed] trove_id: u64,
        #[indexed] owner: &ManagedAddress,
        #[indexed] operation: TroveOperation,
        #[indexed] status: TroveStatus,
        #[indexed] coll: &ManagedDecimal<Self::Api, NumDecimals>,
        #[indexed] debt: &ManagedDecimal<Self::Api, NumDecimals>,
        #[indexed] stake: &ManagedDecimal<Self::Api, NumDecimals>,
        #[indexed] annual_interest_rate: &ManagedDecimal<Self::Api, NumDecimals>,
    );

    #[event("trove_liquidated")]
    fn trove_liquidated_event(
        &self,
        #[indexed] trove_id: u64,
        #[indexed] liquidator: &ManagedAddress,
        #[indexed] values: &LiquidationValues<Self::Api>,
    );

    #[event("redistribution")]
    fn redistribution_event(
        &self,
        #[indexed] coll: &ManagedDecimal<Self::Api, NumDecimals>,
        #[indexed] debt: &ManagedDecimal<Self::Api, NumDecimals>,
        #[indexed] l_coll: &ManagedDecimal<Self::Api, NumDecimals>,
        #[indexed] l_bold_debt: &ManagedDecimal<Self::Api, NumDecimals>,
    );

    #[event("system_snapshots_updated")]
    fn system_snapshots_updated_event(
        &self,
        #[indexed] total_stakes_snapshot: &ManagedDecimal<Self::Api, NumDecimals>,
        #[indexed] total_collateral_snapshot: &ManagedDecimal<Self::Api, NumDecimals>,
    );

    #[event("stability_pool_offset")]
    fn stability_pool_offset_event(
        &self,
        #[indexed] debt: &ManagedDecimal<Self::Api, NumDecimals>,
        #[indexed] coll: &ManagedDecimal<Self::Api, NumDecimals>,
        #[indexed] p: &ManagedDecimal<Self::Api, NumDecimals>,
        #[indexed] s: &ManagedDecimal<Self::Api, NumDecimals>,
        #[indexed] scale: u64,
        #[indexed] epoch: u64,
    );

    #[event("deposit_updated")]
    fn deposit_updated_event(
        &self,
        #[indexed] depositor: &ManagedAddress,
        #[indexed] deposit: &Deposit<Self::Api>,
        #[indexed] collateral_gain: &ManagedDecimal<Self::Api, NumDecimals>,
    );

    #[event("redemption")]
    fn redemption_event(
        &self,
        #[indexed] redeemer: &ManagedAddress,
        #[indexed] attempted_amount: &ManagedDecimal<Self::Api, NumDecimals>,
        #[indexed] redeemed_amount: &ManagedDecimal<Self::Api, NumDecimals>,
        #[indexed] coll_sent: &ManagedDecimal<Self::Api, NumDecimals>,
        #[indexed] coll_fee: &ManagedDecimal<Self::Api, NumDecimals>,
    );

    #[event("collateral_surplus")]
    fn collateral_surplus_event(
        &self,
        #[indexed] owner: &ManagedAddress,
        #[indexed] amount: &ManagedDecimal<Self::Api, NumDecimals>,
        #[indexed] claimable: &ManagedDecimal<Self::Api, NumDecimals>,
    );

    #[event("price_updated")]
    fn price_updated_event(&self, #[indexed] feed: &PriceFeed<Self::Api>);

    #[event("risk_params_updated")]
    fn risk_params_updated_event(&self, #[indexed] params: &ProtocolParams<Self::Api>);
}
