multiversx_sc::imports!();

use common_errors::ERROR_INVARIANT_BUCKET_UNDERFLOW;
use common_structs::{EntireDebtAndColl, Trove};

use crate::{oracle, storage};

#[multiversx_sc::module]
pub trait MathsModule:
    storage::Storage
    + oracle::OracleModule
    + common_events::EventsModule
    + common_math::SharedMathModule
    + common_accounting::SharedAccountingModule
    + common_rates::InterestRates
{
    /// `a - b` for ledger balances. Going negative means the books no
    /// longer add up, so the call aborts.
    fn sub_or_fail(
        &self,
        a: &ManagedDecimal<Self::Api, NumDecimals>,
        b: &ManagedDecimal<Self::Api, NumDecimals>,
    ) -> ManagedDecimal<Self::Api, NumDecimals> {
        if a < b {
            sc_panic!(ERROR_INVARIANT_BUCKET_UNDERFLOW);
        }

        a.clone() - b.clone()
    }

    /// Debt and collateral of a Trove as if its pending rewards and interest
    /// were applied now.
    fn get_entire_debt_and_coll(
        &self,
        trove: &Trove<Self::Api>,
        l_coll: &ManagedDecimal<Self::Api, NumDecimals>,
        l_bold_debt: &ManagedDecimal<Self::Api, NumDecimals>,
        timestamp: u64,
    ) -> EntireDebtAndColl<Self::Api> {
        if !trove.is_open() {
            return EntireDebtAndColl {
                debt: self.wad_zero(),
                coll: self.wad_zero(),
                pending_debt_reward: self.wad_zero(),
                pending_coll_reward: self.wad_zero(),
                accrued_interest: self.wad_zero(),
            };
        }

        let pending_coll_reward =
            self.compute_pending_reward(&trove.stake, l_coll, &trove.reward_snapshot.l_coll);
        let pending_debt_reward = self.compute_pending_reward(
            &trove.stake,
            l_bold_debt,
            &trove.reward_snapshot.l_bold_debt,
        );
        let accrued_interest = self.calculate_trove_interest(trove, timestamp);

        EntireDebtAndColl {
            debt: trove.debt.clone() + pending_debt_reward.clone() + accrued_interest.clone(),
            coll: trove.coll.clone() + pending_coll_reward.clone(),
            pending_debt_reward,
            pending_coll_reward,
            accrued_interest,
        }
    }
}
