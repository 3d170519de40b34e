multiversx_sc::imports!();

use common_events::TroveOperation;
use common_structs::{RewardSnapshot, Trove, TroveStatus};

use crate::{cache::Cache, helpers, oracle, redistribution, storage, utils};

#[multiversx_sc::module]
pub trait PositionAccountModule:
    storage::Storage
    + oracle::OracleModule
    + common_events::EventsModule
    + common_math::SharedMathModule
    + common_accounting::SharedAccountingModule
    + common_rates::InterestRates
    + helpers::MathsModule
    + utils::TroveUtilsModule
    + redistribution::RedistributionModule
{
    /// Registers a new Active Trove for `owner` and assigns it the next id.
    ///
    /// The stake is derived from `coll` and the current system snapshots and
    /// the reward snapshot is taken at the current `L` values, so the Trove
    /// starts with no pending rewards.
    fn create_trove(
        &self,
        owner: &ManagedAddress,
        coll: ManagedDecimal<Self::Api, NumDecimals>,
        debt: ManagedDecimal<Self::Api, NumDecimals>,
        annual_interest_rate: ManagedDecimal<Self::Api, NumDecimals>,
        cache: &mut Cache<Self>,
    ) -> Trove<Self::Api> {
        let trove_id = self.last_trove_id().get() + 1;
        self.last_trove_id().set(trove_id);

        let mut trove = Trove {
            id: trove_id,
            owner: owner.clone(),
            status: TroveStatus::Active,
            coll,
            debt,
            stake: self.wad_zero(),
            reward_snapshot: RewardSnapshot {
                l_coll: cache.l_coll.clone(),
                l_bold_debt: cache.l_bold_debt.clone(),
            },
            annual_interest_rate,
            last_debt_update_timestamp: cache.timestamp,
        };
        self.update_stake_and_total_stakes(&mut trove, cache);

        self.open_troves().insert(trove_id);
        self.owner_troves(owner).insert(trove_id);

        trove
    }

    fn store_trove(&self, trove: &Trove<Self::Api>, operation: TroveOperation) {
        self.troves(trove.id).set(trove);
        self.trove_updated_event(
            trove.id,
            &trove.owner,
            operation,
            trove.status,
            &trove.coll,
            &trove.debt,
            &trove.stake,
            &trove.annual_interest_rate,
        );
    }

    /// Zeroes the Trove, drops its stake and removes it from the open set.
    ///
    /// The caller settles the Trove's collateral and debt against the pool
    /// buckets beforehand.
    fn close_trove_record(
        &self,
        trove: &mut Trove<Self::Api>,
        status: TroveStatus,
        operation: TroveOperation,
        cache: &mut Cache<Self>,
    ) {
        self.remove_stake(trove, cache);

        trove.coll = self.wad_zero();
        trove.debt = self.wad_zero();
        trove.status = status;

        self.open_troves().swap_remove(&trove.id);
        self.owner_troves(&trove.owner).swap_remove(&trove.id);

        self.store_trove(trove, operation);
    }
}
