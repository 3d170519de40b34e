multiversx_sc::imports!();

use common_structs::{Deposit, EntireDebtAndColl, SystemState, Trove};

use crate::{
    helpers, oracle, positions, redistribution, stability_pool, storage, utils, validation,
};

/// Read-only queries. Everything is computed from storage as of the current
/// block, pending rewards and interest included, without writing anything.
#[multiversx_sc::module]
pub trait ViewsModule:
    storage::Storage
    + oracle::OracleModule
    + common_events::EventsModule
    + common_math::SharedMathModule
    + common_accounting::SharedAccountingModule
    + common_rates::InterestRates
    + helpers::MathsModule
    + utils::TroveUtilsModule
    + redistribution::RedistributionModule
    + positions::account::PositionAccountModule
    + validation::ValidationModule
    + stability_pool::StabilityPoolModule
    + multiversx_sc_modules::pause::PauseModule
{
    /// Collateral redistributed to the Trove and not yet applied to it.
    #[view(getPendingCollateralReward)]
    fn get_pending_collateral_reward(
        &self,
        trove_id: u64,
    ) -> ManagedDecimal<Self::Api, NumDecimals> {
        self.get_entire_debt_and_coll_view(trove_id).pending_coll_reward
    }

    /// Debt redistributed to the Trove and not yet applied to it.
    #[view(getPendingDebtReward)]
    fn get_pending_debt_reward(&self, trove_id: u64) -> ManagedDecimal<Self::Api, NumDecimals> {
        self.get_entire_debt_and_coll_view(trove_id).pending_debt_reward
    }

    #[view(getEntireDebtAndColl)]
    fn get_entire_debt_and_coll_view(&self, trove_id: u64) -> EntireDebtAndColl<Self::Api> {
        let trove = self.get_trove(trove_id);
        self.get_entire_debt_and_coll(
            &trove,
            &self.l_coll().get(),
            &self.l_bold_debt().get(),
            self.blockchain().get_block_timestamp(),
        )
    }

    /// Stored Trove record. Unknown ids come back as a `NonExistent` Trove.
    #[view(getTrove)]
    fn get_trove(&self, trove_id: u64) -> Trove<Self::Api> {
        let mapper = self.troves(trove_id);
        if !mapper.is_empty() {
            return mapper.get();
        }

        Trove {
            id: trove_id,
            owner: ManagedAddress::zero(),
            status: common_structs::TroveStatus::NonExistent,
            coll: self.wad_zero(),
            debt: self.wad_zero(),
            stake: self.wad_zero(),
            reward_snapshot: common_structs::RewardSnapshot {
                l_coll: self.wad_zero(),
                l_bold_debt: self.wad_zero(),
            },
            annual_interest_rate: self.wad_zero(),
            last_debt_update_timestamp: 0,
        }
    }

    /// Individual collateral ratio at the last price, pending rewards and
    /// interest included.
    #[view(getTroveIcr)]
    fn get_trove_icr_view(&self, trove_id: u64) -> ManagedDecimal<Self::Api, NumDecimals> {
        let entire = self.get_entire_debt_and_coll_view(trove_id);
        let price = self.current_price();
        self.compute_collateral_ratio(&entire.coll, &entire.debt, &price)
    }

    /// Total collateral ratio of the whole system at the last price.
    #[view(getTcr)]
    fn get_tcr(&self) -> ManagedDecimal<Self::Api, NumDecimals> {
        let price = self.current_price();
        self.compute_collateral_ratio(
            &self.get_total_system_collateral(),
            &self.get_total_system_debt(),
            &price,
        )
    }

    #[view(getCompoundedDeposit)]
    fn get_compounded_deposit(
        &self,
        depositor: &ManagedAddress,
    ) -> ManagedDecimal<Self::Api, NumDecimals> {
        match self.get_deposit(depositor) {
            Some(deposit) => self.compounded_deposit_at(
                &deposit,
                &self.p().get(),
                self.current_scale().get(),
                self.current_epoch().get(),
            ),
            None => self.wad_zero(),
        }
    }

    #[view(getDepositorCollateralGain)]
    fn get_depositor_collateral_gain(
        &self,
        depositor: &ManagedAddress,
    ) -> ManagedDecimal<Self::Api, NumDecimals> {
        match self.get_deposit(depositor) {
            Some(deposit) => self.depositor_collateral_gain(&deposit),
            None => self.wad_zero(),
        }
    }

    #[view(getDeposit)]
    fn get_deposit_view(&self, depositor: &ManagedAddress) -> OptionalValue<Deposit<Self::Api>> {
        self.get_deposit(depositor).into()
    }

    #[view(getTotalStakes)]
    fn get_total_stakes(&self) -> ManagedDecimal<Self::Api, NumDecimals> {
        self.total_stakes().get()
    }

    /// Active plus default collateral.
    #[view(getTotalSystemCollateral)]
    fn get_total_system_collateral(&self) -> ManagedDecimal<Self::Api, NumDecimals> {
        self.active_coll().get() + self.default_coll().get()
    }

    #[view(getTotalSystemDebt)]
    fn get_total_system_debt(&self) -> ManagedDecimal<Self::Api, NumDecimals> {
        self.active_debt().get() + self.default_debt().get()
    }

    #[view(getBoldBalance)]
    fn get_bold_balance_view(
        &self,
        account: &ManagedAddress,
    ) -> ManagedDecimal<Self::Api, NumDecimals> {
        self.get_bold_balance(account)
    }

    #[view(getCollSurplus)]
    fn get_coll_surplus_view(
        &self,
        owner: &ManagedAddress,
    ) -> ManagedDecimal<Self::Api, NumDecimals> {
        self.get_coll_surplus(owner)
    }

    #[view(getSystemState)]
    fn get_system_state(&self) -> SystemState<Self::Api> {
        SystemState {
            active_coll: self.active_coll().get(),
            active_debt: self.active_debt().get(),
            default_coll: self.default_coll().get(),
            default_debt: self.default_debt().get(),
            stability_pool_coll: self.stability_pool_coll().get(),
            total_bold_deposits: self.total_bold_deposits().get(),
            coll_surplus: self.coll_surplus_total().get(),
            gas_pool_bold: self.gas_pool_bold().get(),
            bold_total_supply: self.bold_total_supply().get(),
            total_stakes: self.total_stakes().get(),
            total_stakes_snapshot: self.total_stakes_snapshot().get(),
            total_collateral_snapshot: self.total_collateral_snapshot().get(),
            l_coll: self.l_coll().get(),
            l_bold_debt: self.l_bold_debt().get(),
            p: self.p().get(),
            current_scale: self.current_scale().get(),
            current_epoch: self.current_epoch().get(),
        }
    }

    fn current_price(&self) -> ManagedDecimal<Self::Api, NumDecimals> {
        let params = self.protocol_params().get();
        self.get_validated_price(
            self.blockchain().get_block_timestamp(),
            params.max_price_stale_seconds,
        )
    }
}
