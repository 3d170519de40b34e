multiversx_sc::imports!();

use common_errors::{
    ERROR_COLLATERAL_TOP_UP_AND_WITHDRAWAL, ERROR_REPAY_EXCEEDS_NET_DEBT,
    ERROR_WITHDRAW_MORE_THAN_COLLATERAL, ERROR_ZERO_ADJUSTMENT,
};
use common_events::TroveOperation;
use common_structs::TroveStatus;

use crate::{cache::Cache, helpers, oracle, redistribution, storage, utils, validation};

use super::account;

/// Requested change to an open Trove.
pub struct TroveAdjustment<M: ManagedTypeApi> {
    pub coll_top_up: ManagedDecimal<M, NumDecimals>,
    pub coll_withdrawal: ManagedDecimal<M, NumDecimals>,
    pub debt_change: ManagedDecimal<M, NumDecimals>,
    pub is_debt_increase: bool,
}

#[multiversx_sc::module]
pub trait PositionAdjustModule:
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
    /// Changes a Trove's collateral and/or debt.
    ///
    /// Pending rewards and interest are applied first, so the checks run on
    /// the Trove's entire position. A Zombie Trove that ends the adjustment
    /// at or above the minimum debt becomes Active again.
    ///
    /// # Errors
    /// - `ERROR_COLLATERAL_TOP_UP_AND_WITHDRAWAL`: Both directions at once.
    /// - `ERROR_ZERO_ADJUSTMENT`: Nothing changes.
    /// - `ERROR_WITHDRAW_MORE_THAN_COLLATERAL`: Withdrawal above the Trove's collateral.
    /// - `ERROR_REPAY_EXCEEDS_NET_DEBT`: Repayment would eat into the gas compensation.
    /// - `ERROR_BELOW_MIN_DEBT`: Resulting debt under the minimum.
    /// - `ERROR_BELOW_MIN_COLLATERAL_RATIO`: Resulting ratio under the MCR.
    /// - `ERROR_INSUFFICIENT_BALANCE`: Not enough stablecoin to repay.
    fn process_adjust_trove(
        &self,
        caller: &ManagedAddress,
        trove_id: u64,
        adjustment: TroveAdjustment<Self::Api>,
        cache: &mut Cache<Self>,
    ) {
        let mut trove = self.require_open_trove(trove_id);
        self.require_trove_owner(&trove, caller);

        let zero = self.wad_zero();
        require!(
            adjustment.coll_top_up == zero || adjustment.coll_withdrawal == zero,
            ERROR_COLLATERAL_TOP_UP_AND_WITHDRAWAL
        );
        require!(
            adjustment.coll_top_up > zero
                || adjustment.coll_withdrawal > zero
                || adjustment.debt_change > zero,
            ERROR_ZERO_ADJUSTMENT
        );
        if adjustment.is_debt_increase && adjustment.debt_change > zero {
            self.require_active_contract();
        }

        self.apply_pending_rewards(&mut trove, cache);

        require!(
            adjustment.coll_withdrawal <= trove.coll,
            ERROR_WITHDRAW_MORE_THAN_COLLATERAL
        );

        let new_coll = trove.coll.clone() + adjustment.coll_top_up.clone()
            - adjustment.coll_withdrawal.clone();
        let new_debt = if adjustment.is_debt_increase {
            trove.debt.clone() + adjustment.debt_change.clone()
        } else {
            let gas_compensation = &cache.params.bold_gas_compensation;
            let net_debt = if trove.debt > *gas_compensation {
                trove.debt.clone() - gas_compensation.clone()
            } else {
                zero.clone()
            };
            require!(
                adjustment.debt_change <= net_debt,
                ERROR_REPAY_EXCEEDS_NET_DEBT
            );
            trove.debt.clone() - adjustment.debt_change.clone()
        };

        self.require_at_least_min_debt(&new_debt, cache);
        self.require_icr_above_mcr(&new_coll, &new_debt, cache);

        if adjustment.is_debt_increase {
            self.mint_bold(caller, &adjustment.debt_change, cache);
            cache.active_debt += &adjustment.debt_change;
        } else {
            self.burn_bold(caller, &adjustment.debt_change, cache);
            cache.active_debt = self.sub_or_fail(&cache.active_debt, &adjustment.debt_change);
        }
        cache.active_coll += &adjustment.coll_top_up;
        cache.active_coll = self.sub_or_fail(&cache.active_coll, &adjustment.coll_withdrawal);

        trove.coll = new_coll;
        trove.debt = new_debt;
        trove.status = TroveStatus::Active;
        self.update_stake_and_total_stakes(&mut trove, cache);
        self.store_trove(&trove, TroveOperation::Adjust);

        self.send_collateral(caller, &adjustment.coll_withdrawal);
    }

    /// Sets a new annual interest rate. Interest accrued at the old rate is
    /// folded into the debt first.
    fn process_adjust_interest_rate(
        &self,
        caller: &ManagedAddress,
        trove_id: u64,
        new_annual_interest_rate: ManagedDecimal<Self::Api, NumDecimals>,
        cache: &mut Cache<Self>,
    ) {
        let mut trove = self.require_open_trove(trove_id);
        self.require_trove_owner(&trove, caller);
        self.require_valid_interest_rate(&new_annual_interest_rate, cache);

        self.apply_pending_rewards(&mut trove, cache);
        trove.annual_interest_rate = new_annual_interest_rate;

        self.store_trove(&trove, TroveOperation::AdjustInterestRate);
    }
}
