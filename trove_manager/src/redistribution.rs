multiversx_sc::imports!();

use common_structs::{RewardSnapshot, Trove};

use crate::{cache::Cache, helpers, oracle, storage, utils};

/// Liquidation redistribution through the `L_coll` / `L_boldDebt`
/// accumulators.
///
/// Redistributed collateral and debt move from the active to the default
/// bucket and are pulled back into a Trove only when the Trove is next
/// touched. Stakes decide each Trove's share.
#[multiversx_sc::module]
pub trait RedistributionModule:
    storage::Storage
    + oracle::OracleModule
    + common_events::EventsModule
    + common_math::SharedMathModule
    + common_accounting::SharedAccountingModule
    + common_rates::InterestRates
    + helpers::MathsModule
    + utils::TroveUtilsModule
{
    /// Folds pending redistribution rewards and accrued interest into the
    /// Trove record.
    ///
    /// Rewards move from the default to the active bucket and interest is
    /// minted to the interest recipient. The reward snapshot is refreshed and
    /// the stake recomputed. Calling it twice in a row changes nothing the
    /// second time.
    fn apply_pending_rewards(&self, trove: &mut Trove<Self::Api>, cache: &mut Cache<Self>) {
        if !trove.is_open() {
            return;
        }

        // Interest runs on the recorded debt only.
        self.accrue_trove_interest(trove, cache);

        let pending_coll = self.compute_pending_reward(
            &trove.stake,
            &cache.l_coll,
            &trove.reward_snapshot.l_coll,
        );
        let pending_debt = self.compute_pending_reward(
            &trove.stake,
            &cache.l_bold_debt,
            &trove.reward_snapshot.l_bold_debt,
        );

        if pending_coll.into_raw_units() > &BigUint::zero()
            || pending_debt.into_raw_units() > &BigUint::zero()
        {
            trove.coll += &pending_coll;
            trove.debt += &pending_debt;

            cache.default_coll = self.sub_or_fail(&cache.default_coll, &pending_coll);
            cache.default_debt = self.sub_or_fail(&cache.default_debt, &pending_debt);
            cache.active_coll += &pending_coll;
            cache.active_debt += &pending_debt;
        }

        self.update_trove_reward_snapshot(trove, cache);
        self.update_stake_and_total_stakes(trove, cache);
    }

    /// Adds the interest accrued since the last debt update to the Trove.
    fn accrue_trove_interest(&self, trove: &mut Trove<Self::Api>, cache: &mut Cache<Self>) {
        let interest = self.calculate_trove_interest(trove, cache.timestamp);
        trove.last_debt_update_timestamp = cache.timestamp;
        if interest.into_raw_units() == &BigUint::zero() {
            return;
        }

        trove.debt += &interest;
        cache.active_debt += &interest;
        let recipient = self.interest_recipient().get();
        self.mint_bold(&recipient, &interest, cache);
    }

    fn update_trove_reward_snapshot(&self, trove: &mut Trove<Self::Api>, cache: &Cache<Self>) {
        trove.reward_snapshot = RewardSnapshot {
            l_coll: cache.l_coll.clone(),
            l_bold_debt: cache.l_bold_debt.clone(),
        };
    }

    /// Recomputes the stake from the Trove's current collateral and keeps
    /// `total_stakes` in line.
    fn update_stake_and_total_stakes(&self, trove: &mut Trove<Self::Api>, cache: &mut Cache<Self>) {
        let new_stake = self.compute_new_stake(
            &trove.coll,
            &cache.total_stakes_snapshot,
            &cache.total_collateral_snapshot,
        );

        cache.total_stakes =
            self.sub_or_fail(&cache.total_stakes, &trove.stake) + new_stake.clone();
        trove.stake = new_stake;
    }

    fn remove_stake(&self, trove: &mut Trove<Self::Api>, cache: &mut Cache<Self>) {
        cache.total_stakes = self.sub_or_fail(&cache.total_stakes, &trove.stake);
        trove.stake = self.wad_zero();
    }

    /// Spreads `debt` and `coll` over every remaining stake.
    ///
    /// # Errors
    /// - `ERROR_INVARIANT_ZERO_TOTAL_STAKES`: Debt is left but no open Trove
    ///   has a stake.
    fn redistribute_debt_and_coll(
        &self,
        debt: &ManagedDecimal<Self::Api, NumDecimals>,
        coll: &ManagedDecimal<Self::Api, NumDecimals>,
        cache: &mut Cache<Self>,
    ) {
        if debt.into_raw_units() == &BigUint::zero() {
            return;
        }

        let coll_reward = self.compute_redistribution_per_unit(
            coll,
            &cache.last_coll_error_redistribution,
            &cache.total_stakes,
        );
        let debt_reward = self.compute_redistribution_per_unit(
            debt,
            &cache.last_bold_debt_error_redistribution,
            &cache.total_stakes,
        );

        cache.l_coll += &coll_reward.per_unit;
        cache.l_bold_debt += &debt_reward.per_unit;
        cache.last_coll_error_redistribution = coll_reward.error;
        cache.last_bold_debt_error_redistribution = debt_reward.error;

        cache.active_coll = self.sub_or_fail(&cache.active_coll, coll);
        cache.active_debt = self.sub_or_fail(&cache.active_debt, debt);
        cache.default_coll += coll;
        cache.default_debt += debt;

        self.redistribution_event(coll, debt, &cache.l_coll, &cache.l_bold_debt);
    }

    /// Captures stakes and system collateral after a liquidation. New stakes
    /// are scaled by this ratio.
    fn update_system_snapshots(&self, cache: &mut Cache<Self>) {
        cache.total_stakes_snapshot = cache.total_stakes.clone();
        cache.total_collateral_snapshot = cache.total_system_coll();

        self.system_snapshots_updated_event(
            &cache.total_stakes_snapshot,
            &cache.total_collateral_snapshot,
        );
    }
}
