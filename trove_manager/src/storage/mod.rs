use common_structs::{Deposit, PriceFeed, ProtocolParams, Trove};
multiversx_sc::imports!();

#[multiversx_sc::module]
pub trait Storage {
    /// Get the collateral token
    /// The only token accepted as Trove collateral and paid out as liquidation
    /// and Stability Pool gains.
    #[view(getCollateralToken)]
    #[storage_mapper("collateral_token")]
    fn collateral_token(&self) -> SingleValueMapper<EgldOrEsdtTokenIdentifier>;

    /// Get the price oracle
    /// Address allowed to push collateral prices through `submitPrice`.
    #[view(getPriceOracle)]
    #[storage_mapper("price_oracle_address")]
    fn price_oracle_address(&self) -> SingleValueMapper<ManagedAddress>;

    /// Get the interest recipient
    /// Address credited with the stablecoin minted from Trove interest.
    #[view(getInterestRecipient)]
    #[storage_mapper("interest_recipient")]
    fn interest_recipient(&self) -> SingleValueMapper<ManagedAddress>;

    #[view(getProtocolParams)]
    #[storage_mapper("protocol_params")]
    fn protocol_params(&self) -> SingleValueMapper<ProtocolParams<Self::Api>>;

    #[view(getLastPriceFeed)]
    #[storage_mapper("last_price_feed")]
    fn last_price_feed(&self) -> SingleValueMapper<PriceFeed<Self::Api>>;

    // Troves

    #[storage_mapper("troves")]
    fn troves(&self, trove_id: u64) -> SingleValueMapper<Trove<Self::Api>>;

    #[view(getLastTroveId)]
    #[storage_mapper("last_trove_id")]
    fn last_trove_id(&self) -> SingleValueMapper<u64>;

    /// Get the open Troves
    /// Ids of every Active or Zombie Trove.
    #[view(getOpenTroves)]
    #[storage_mapper("open_troves")]
    fn open_troves(&self) -> UnorderedSetMapper<u64>;

    #[view(getOwnerTroves)]
    #[storage_mapper("owner_troves")]
    fn owner_troves(&self, owner: &ManagedAddress) -> UnorderedSetMapper<u64>;

    // Redistribution

    #[view(getLColl)]
    #[storage_mapper("l_coll")]
    fn l_coll(&self) -> SingleValueMapper<ManagedDecimal<Self::Api, NumDecimals>>;

    #[view(getLBoldDebt)]
    #[storage_mapper("l_bold_debt")]
    fn l_bold_debt(&self) -> SingleValueMapper<ManagedDecimal<Self::Api, NumDecimals>>;

    #[storage_mapper("last_coll_error_redistribution")]
    fn last_coll_error_redistribution(
        &self,
    ) -> SingleValueMapper<ManagedDecimal<Self::Api, NumDecimals>>;

    #[storage_mapper("last_bold_debt_error_redistribution")]
    fn last_bold_debt_error_redistribution(
        &self,
    ) -> SingleValueMapper<ManagedDecimal<Self::Api, NumDecimals>>;

    #[storage_mapper("total_stakes")]
    fn total_stakes(&self) -> SingleValueMapper<ManagedDecimal<Self::Api, NumDecimals>>;

    #[view(getTotalStakesSnapshot)]
    #[storage_mapper("total_stakes_snapshot")]
    fn total_stakes_snapshot(&self) -> SingleValueMapper<ManagedDecimal<Self::Api, NumDecimals>>;

    #[view(getTotalCollateralSnapshot)]
    #[storage_mapper("total_collateral_snapshot")]
    fn total_collateral_snapshot(
        &self,
    ) -> SingleValueMapper<ManagedDecimal<Self::Api, NumDecimals>>;

    // Pool buckets

    /// Collateral and debt recorded on open Troves.
    #[storage_mapper("active_coll")]
    fn active_coll(&self) -> SingleValueMapper<ManagedDecimal<Self::Api, NumDecimals>>;

    #[storage_mapper("active_debt")]
    fn active_debt(&self) -> SingleValueMapper<ManagedDecimal<Self::Api, NumDecimals>>;

    /// Redistributed collateral and debt not yet applied to any Trove.
    #[storage_mapper("default_coll")]
    fn default_coll(&self) -> SingleValueMapper<ManagedDecimal<Self::Api, NumDecimals>>;

    #[storage_mapper("default_debt")]
    fn default_debt(&self) -> SingleValueMapper<ManagedDecimal<Self::Api, NumDecimals>>;

    /// Collateral earned by Stability Pool depositors and not yet withdrawn.
    #[storage_mapper("stability_pool_coll")]
    fn stability_pool_coll(&self) -> SingleValueMapper<ManagedDecimal<Self::Api, NumDecimals>>;

    /// Collateral left over from liquidations and redemptions, claimable by Trove owners.
    #[storage_mapper("coll_surplus_total")]
    fn coll_surplus_total(&self) -> SingleValueMapper<ManagedDecimal<Self::Api, NumDecimals>>;

    #[storage_mapper("coll_surplus")]
    fn coll_surplus(
        &self,
        owner: &ManagedAddress,
    ) -> SingleValueMapper<ManagedDecimal<Self::Api, NumDecimals>>;

    /// Stablecoin reserved as liquidation gas compensation.
    #[storage_mapper("gas_pool_bold")]
    fn gas_pool_bold(&self) -> SingleValueMapper<ManagedDecimal<Self::Api, NumDecimals>>;

    // Stablecoin ledger

    #[storage_mapper("bold_balance")]
    fn bold_balance(
        &self,
        account: &ManagedAddress,
    ) -> SingleValueMapper<ManagedDecimal<Self::Api, NumDecimals>>;

    #[view(getBoldTotalSupply)]
    #[storage_mapper("bold_total_supply")]
    fn bold_total_supply(&self) -> SingleValueMapper<ManagedDecimal<Self::Api, NumDecimals>>;

    // Stability Pool

    #[view(getTotalBoldDeposits)]
    #[storage_mapper("total_bold_deposits")]
    fn total_bold_deposits(&self) -> SingleValueMapper<ManagedDecimal<Self::Api, NumDecimals>>;

    #[view(getP)]
    #[storage_mapper("p")]
    fn p(&self) -> SingleValueMapper<ManagedDecimal<Self::Api, NumDecimals>>;

    #[view(getCurrentScale)]
    #[storage_mapper("current_scale")]
    fn current_scale(&self) -> SingleValueMapper<u64>;

    #[view(getCurrentEpoch)]
    #[storage_mapper("current_epoch")]
    fn current_epoch(&self) -> SingleValueMapper<u64>;

    /// Sum `S` per epoch and scale. Missing entries read as zero.
    #[storage_mapper("epoch_to_scale_to_sum")]
    fn epoch_to_scale_to_sum(
        &self,
        epoch: u64,
        scale: u64,
    ) -> SingleValueMapper<ManagedDecimal<Self::Api, NumDecimals>>;

    #[storage_mapper("last_coll_error_offset")]
    fn last_coll_error_offset(&self) -> SingleValueMapper<ManagedDecimal<Self::Api, NumDecimals>>;

    #[storage_mapper("last_bold_loss_error_offset")]
    fn last_bold_loss_error_offset(
        &self,
    ) -> SingleValueMapper<ManagedDecimal<Self::Api, NumDecimals>>;

    #[storage_mapper("deposits")]
    fn deposits(&self, depositor: &ManagedAddress) -> SingleValueMapper<Deposit<Self::Api>>;

    #[view(getDepositors)]
    #[storage_mapper("depositors")]
    fn depositors(&self) -> UnorderedSetMapper<ManagedAddress>;
}
