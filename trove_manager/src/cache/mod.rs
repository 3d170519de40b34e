use common_structs::ProtocolParams;

multiversx_sc::imports!();
multiversx_sc::derive_imports!();

/// In-memory copy of the global ledger state for one endpoint call.
///
/// **Scope**: Redistribution accumulators, stake snapshots, pool buckets,
/// stablecoin supply and the Stability Pool product state.
///
/// **Goal**: Operate on a single consistent view of the system and write
/// it back once. A failed call reverts, so either every field is committed
/// or none is.
///
/// **Fields**:
/// - Amounts, stakes, `L_*` and `p` are WAD (18 decimals).
/// - Carried division remainders are 36 decimals.
/// - The price is loaded on first use, so calls that never need it do not
///   fail on a stale feed.
pub struct Cache<'a, C>
where
    C: crate::storage::Storage + crate::oracle::OracleModule,
{
    sc_ref: &'a C,
    pub params: ProtocolParams<C::Api>,
    pub timestamp: u64,
    price: Option<ManagedDecimal<C::Api, NumDecimals>>,

    pub l_coll: ManagedDecimal<C::Api, NumDecimals>,
    pub l_bold_debt: ManagedDecimal<C::Api, NumDecimals>,
    pub last_coll_error_redistribution: ManagedDecimal<C::Api, NumDecimals>,
    pub last_bold_debt_error_redistribution: ManagedDecimal<C::Api, NumDecimals>,
    pub total_stakes: ManagedDecimal<C::Api, NumDecimals>,
    pub total_stakes_snapshot: ManagedDecimal<C::Api, NumDecimals>,
    pub total_collateral_snapshot: ManagedDecimal<C::Api, NumDecimals>,

    pub active_coll: ManagedDecimal<C::Api, NumDecimals>,
    pub active_debt: ManagedDecimal<C::Api, NumDecimals>,
    pub default_coll: ManagedDecimal<C::Api, NumDecimals>,
    pub default_debt: ManagedDecimal<C::Api, NumDecimals>,
    pub stability_pool_coll: ManagedDecimal<C::Api, NumDecimals>,
    pub coll_surplus_total: ManagedDecimal<C::Api, NumDecimals>,
    pub gas_pool_bold: ManagedDecimal<C::Api, NumDecimals>,
    pub bold_total_supply: ManagedDecimal<C::Api, NumDecimals>,

    pub total_bold_deposits: ManagedDecimal<C::Api, NumDecimals>,
    pub p: ManagedDecimal<C::Api, NumDecimals>,
    pub current_scale: u64,
    pub current_epoch: u64,
    pub last_coll_error_offset: ManagedDecimal<C::Api, NumDecimals>,
    pub last_bold_loss_error_offset: ManagedDecimal<C::Api, NumDecimals>,
}

impl<'a, C> Cache<'a, C>
where
    C: crate::storage::Storage + crate::oracle::OracleModule,
{
    pub fn new(sc_ref: &'a C) -> Self {
        Cache {
            params: sc_ref.protocol_params().get(),
            timestamp: sc_ref.blockchain().get_block_timestamp(),
            price: None,
            l_coll: sc_ref.l_coll().get(),
            l_bold_debt: sc_ref.l_bold_debt().get(),
            last_coll_error_redistribution: sc_ref.last_coll_error_redistribution().get(),
            last_bold_debt_error_redistribution: sc_ref
                .last_bold_debt_error_redistribution()
                .get(),
            total_stakes: sc_ref.total_stakes().get(),
            total_stakes_snapshot: sc_ref.total_stakes_snapshot().get(),
            total_collateral_snapshot: sc_ref.total_collateral_snapshot().get(),
            active_coll: sc_ref.active_coll().get(),
            active_debt: sc_ref.active_debt().get(),
            default_coll: sc_ref.default_coll().get(),
            default_debt: sc_ref.default_debt().get(),
            stability_pool_coll: sc_ref.stability_pool_coll().get(),
            coll_surplus_total: sc_ref.coll_surplus_total().get(),
            gas_pool_bold: sc_ref.gas_pool_bold().get(),
            bold_total_supply: sc_ref.bold_total_supply().get(),
            total_bold_deposits: sc_ref.total_bold_deposits().get(),
            p: sc_ref.p().get(),
            current_scale: sc_ref.current_scale().get(),
            current_epoch: sc_ref.current_epoch().get(),
            last_coll_error_offset: sc_ref.last_coll_error_offset().get(),
            last_bold_loss_error_offset: sc_ref.last_bold_loss_error_offset().get(),
            sc_ref,
        }
    }

    /// Current collateral price, validated against the staleness limit once
    /// per call and reused afterwards.
    pub fn get_price(&mut self) -> ManagedDecimal<C::Api, NumDecimals> {
        if let Some(price) = &self.price {
            return price.clone();
        }

        let price = self
            .sc_ref
            .get_validated_price(self.timestamp, self.params.max_price_stale_seconds);
        self.price = Some(price.clone());

        price
    }

    /// Collateral held by open Troves plus collateral awaiting redistribution.
    pub fn total_system_coll(&self) -> ManagedDecimal<C::Api, NumDecimals> {
        self.active_coll.clone() + self.default_coll.clone()
    }

    pub fn total_system_debt(&self) -> ManagedDecimal<C::Api, NumDecimals> {
        self.active_debt.clone() + self.default_debt.clone()
    }
}

impl<C> Drop for Cache<'_, C>
where
    C: crate::storage::Storage + crate::oracle::OracleModule,
{
    fn drop(&mut self) {
        // commit changes to storage for the mutable fields
        self.sc_ref.l_coll().set(&self.l_coll);
        self.sc_ref.l_bold_debt().set(&self.l_bold_debt);
        self.sc_ref
            .last_coll_error_redistribution()
            .set(&self.last_coll_error_redistribution);
        self.sc_ref
            .last_bold_debt_error_redistribution()
            .set(&self.last_bold_debt_error_redistribution);
        self.sc_ref.total_stakes().set(&self.total_stakes);
        self.sc_ref
            .total_stakes_snapshot()
            .set(&self.total_stakes_snapshot);
        self.sc_ref
            .total_collateral_snapshot()
            .set(&self.total_collateral_snapshot);
        self.sc_ref.active_coll().set(&self.active_coll);
        self.sc_ref.active_debt().set(&self.active_debt);
        self.sc_ref.default_coll().set(&self.default_coll);
        self.sc_ref.default_debt().set(&self.default_debt);
        self.sc_ref
            .stability_pool_coll()
            .set(&self.stability_pool_coll);
        self.sc_ref.coll_surplus_total().set(&self.coll_surplus_total);
        self.sc_ref.gas_pool_bold().set(&self.gas_pool_bold);
        self.sc_ref.bold_total_supply().set(&self.bold_total_supply);
        self.sc_ref
            .total_bold_deposits()
            .set(&self.total_bold_deposits);
        self.sc_ref.p().set(&self.p);
        self.sc_ref.current_scale().set(self.current_scale);
        self.sc_ref.current_epoch().set(self.current_epoch);
        self.sc_ref
            .last_coll_error_offset()
            .set(&self.last_coll_error_offset);
        self.sc_ref
            .last_bold_loss_error_offset()
            .set(&self.last_bold_loss_error_offset);
    }
}
