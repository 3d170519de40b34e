multiversx_sc::imports!();

use common_errors::{ERROR_NO_COLLATERAL_SURPLUS, ERROR_ONLY_ONE_TROVE_IN_SYSTEM};
use common_events::TroveOperation;
use common_structs::TroveStatus;

use crate::{cache::Cache, helpers, oracle, redistribution, storage, utils, validation};

use super::account;

#[multiversx_sc::module]
pub trait PositionCloseModule:
    storage::Storage
    + oracle::OracleModule
    + common_events::EventsModule
    + common_math::SharedMathModule
    + common_accounting::SharedAccountingModule
    + common_rates::InterestRates
    + helpers::MathsModule
    + utils::TroveUtilsModule
    + redistribution::RedistributionModule
    + account::PositionAccountModule
    + validation::ValidationModule
    + multiversx_sc_modules::pause::PauseModule
{
    /// Repays a Trove's entire debt and returns all of its collateral.
    ///
    /// The owner burns the debt net of the gas compensation, the gas pool
    /// burns the rest.
    ///
    /// # Errors
    /// - `ERROR_ONLY_ONE_TROVE_IN_SYSTEM`: The last open Trove cannot close.
    /// - `ERROR_INSUFFICIENT_BALANCE`: The owner cannot cover the net debt.
    fn process_close_trove(
        &self,
        caller: &ManagedAddress,
        trove_id: u64,
        cache: &mut Cache<Self>,
    ) -> ManagedDecimal<Self::Api, NumDecimals> {
        let mut trove = self.require_open_trove(trove_id);
        self.require_trove_owner(&trove, caller);
        require!(self.open_troves().len() > 1, ERROR_ONLY_ONE_TROVE_IN_SYSTEM);

        self.apply_pending_rewards(&mut trove, cache);

        let gas_part = self.get_min(
            trove.debt.clone(),
            cache.params.bold_gas_compensation.clone(),
        );
        let net_debt = trove.debt.clone() - gas_part.clone();
        self.require_sufficient_bold_balance(caller, &net_debt);

        self.burn_bold(caller, &net_debt, cache);
        cache.gas_pool_bold = self.sub_or_fail(&cache.gas_pool_bold, &gas_part);
        cache.bold_total_supply = self.sub_or_fail(&cache.bold_total_supply, &gas_part);

        cache.active_debt = self.sub_or_fail(&cache.active_debt, &trove.debt);
        cache.active_coll = self.sub_or_fail(&cache.active_coll, &trove.coll);

        let coll = trove.coll.clone();
        self.close_trove_record(
            &mut trove,
            TroveStatus::ClosedByOwner,
            TroveOperation::Close,
            cache,
        );

        self.send_collateral(caller, &coll);

        coll
    }

    /// Pays out collateral left to `owner` by liquidations and redemptions.
    fn process_claim_collateral(
        &self,
        owner: &ManagedAddress,
        cache: &mut Cache<Self>,
    ) -> ManagedDecimal<Self::Api, NumDecimals> {
        let amount = self.get_coll_surplus(owner);
        require!(
            amount.into_raw_units() > &BigUint::zero(),
            ERROR_NO_COLLATERAL_SURPLUS
        );

        self.coll_surplus(owner).clear();
        cache.coll_surplus_total = self.sub_or_fail(&cache.coll_surplus_total, &amount);
        self.send_collateral(owner, &amount);

        amount
    }
}
