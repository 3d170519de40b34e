multiversx_sc::imports!();

use common_constants::WAD_PRECISION;
use common_errors::ERROR_NOTHING_TO_LIQUIDATE;
use common_events::TroveOperation;
use common_structs::{LiquidationValues, Trove, TroveStatus};

use crate::{
    cache::Cache, helpers, oracle, redistribution, stability_pool, storage, utils, validation,
};

use super::account;

#[multiversx_sc::module]
pub trait PositionLiquidationModule:
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
    + stability_pool::StabilityPoolModule
    + multiversx_sc_modules::pause::PauseModule
{
    /// Liquidates every listed Trove whose collateral ratio is under the MCR.
    ///
    /// Troves that are closed, unknown or still healthy are skipped. The
    /// liquidator collects the stablecoin gas compensation of each Trove from
    /// the gas pool plus a share of its collateral.
    ///
    /// # Returns
    /// - Number of Troves liquidated.
    ///
    /// # Errors
    /// - `ERROR_NOTHING_TO_LIQUIDATE`: No listed Trove was liquidatable.
    /// - `ERROR_INVARIANT_ZERO_TOTAL_STAKES`: Debt left to redistribute with
    ///   no open Trove to take it.
    fn process_liquidate(
        &self,
        liquidator: &ManagedAddress,
        trove_ids: &ManagedVec<Self::Api, u64>,
        cache: &mut Cache<Self>,
    ) -> usize {
        let price = cache.get_price();
        let mut liquidated = 0usize;
        let mut coll_gas_total = self.wad_zero();

        for trove_id in trove_ids.iter() {
            let mapper = self.troves(trove_id);
            if mapper.is_empty() {
                continue;
            }

            let mut trove = mapper.get();
            if !trove.is_open() {
                continue;
            }

            let entire = self.get_entire_debt_and_coll(
                &trove,
                &cache.l_coll,
                &cache.l_bold_debt,
                cache.timestamp,
            );
            let icr = self.compute_collateral_ratio(&entire.coll, &entire.debt, &price);
            if icr >= cache.params.mcr {
                continue;
            }

            let values = self.liquidate_trove(&mut trove, &price, cache);
            self.trove_liquidated_event(trove_id, liquidator, &values);

            self.move_gas_compensation_to(liquidator, &values.bold_gas_compensation, cache);
            coll_gas_total += &values.coll_gas_compensation;
            liquidated += 1;
        }

        require!(liquidated > 0, ERROR_NOTHING_TO_LIQUIDATE);

        self.send_collateral(liquidator, &coll_gas_total);

        liquidated
    }

    /// Runs the liquidation of a single Trove whose ratio is known to be
    /// under the MCR.
    ///
    /// Pending rewards are applied, the collateral gas compensation is
    /// taken, as much debt as the Stability Pool holds is offset and the rest
    /// is redistributed over the remaining stakes. Collateral above the
    /// penalty cap goes to the owner as claimable surplus.
    fn liquidate_trove(
        &self,
        trove: &mut Trove<Self::Api>,
        price: &ManagedDecimal<Self::Api, NumDecimals>,
        cache: &mut Cache<Self>,
    ) -> LiquidationValues<Self::Api> {
        self.apply_pending_rewards(trove, cache);

        let values = self.compute_liquidation_values(trove, price, cache);

        cache.active_coll = self.sub_or_fail(&cache.active_coll, &values.coll_gas_compensation);

        self.offset(&values.debt_to_offset, &values.coll_to_send_to_sp, cache);

        cache.active_coll = self.sub_or_fail(&cache.active_coll, &values.coll_surplus);
        self.add_coll_surplus(&trove.owner, &values.coll_surplus, cache);

        self.close_trove_record(
            trove,
            TroveStatus::ClosedByLiquidation,
            TroveOperation::Liquidate,
            cache,
        );

        self.redistribute_debt_and_coll(
            &values.debt_to_redistribute,
            &values.coll_to_redistribute,
            cache,
        );
        self.update_system_snapshots(cache);

        values
    }

    /// Splits a Trove's entire collateral and debt into gas compensation,
    /// Stability Pool offset, redistribution and owner surplus.
    fn compute_liquidation_values(
        &self,
        trove: &Trove<Self::Api>,
        price: &ManagedDecimal<Self::Api, NumDecimals>,
        cache: &Cache<Self>,
    ) -> LiquidationValues<Self::Api> {
        let coll_gas_compensation =
            self.mul_down(&trove.coll, &cache.params.coll_gas_compensation, WAD_PRECISION);
        let bold_gas_compensation = self.get_min(
            trove.debt.clone(),
            cache.params.bold_gas_compensation.clone(),
        );
        let coll_to_liquidate = trove.coll.clone() - coll_gas_compensation.clone();

        let split =
            self.compute_offset_split(&trove.debt, &coll_to_liquidate, &cache.total_bold_deposits);

        let sp_cap = self.compute_seizable_collateral(
            &split.debt_to_offset,
            &cache.params.liquidation_penalty_sp,
            price,
        );
        let coll_to_send_to_sp = self.get_min(split.coll_to_sp.clone(), sp_cap);

        let redistribution_cap = self.compute_seizable_collateral(
            &split.debt_to_redistribute,
            &cache.params.liquidation_penalty_redistribution,
            price,
        );
        let coll_to_redistribute =
            self.get_min(split.coll_to_redistribute.clone(), redistribution_cap);

        let coll_surplus =
            coll_to_liquidate.clone() - coll_to_send_to_sp.clone() - coll_to_redistribute.clone();

        LiquidationValues {
            entire_debt: trove.debt.clone(),
            entire_coll: trove.coll.clone(),
            coll_gas_compensation,
            bold_gas_compensation,
            debt_to_offset: split.debt_to_offset,
            coll_to_send_to_sp,
            debt_to_redistribute: split.debt_to_redistribute,
            coll_to_redistribute,
            coll_surplus,
        }
    }

    /// Pays the stablecoin gas compensation out of the gas pool.
    fn move_gas_compensation_to(
        &self,
        liquidator: &ManagedAddress,
        amount: &ManagedDecimal<Self::Api, NumDecimals>,
        cache: &mut Cache<Self>,
    ) {
        let paid = self.get_min(amount.clone(), cache.gas_pool_bold.clone());
        cache.gas_pool_bold = self.sub_or_fail(&cache.gas_pool_bold, &paid);
        self.credit_bold(liquidator, &paid);
    }
}
