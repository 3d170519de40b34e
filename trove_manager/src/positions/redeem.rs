multiversx_sc::imports!();

use common_constants::WAD_PRECISION;
use common_errors::ERROR_NOTHING_TO_REDEEM;
use common_events::TroveOperation;
use common_structs::{Trove, TroveStatus};

use crate::{cache::Cache, helpers, oracle, redistribution, storage, utils, validation};

use super::account;

/// Outcome of redeeming against a single Trove.
pub struct SingleRedemption<M: ManagedTypeApi> {
    pub bold_redeemed: ManagedDecimal<M, NumDecimals>,
    pub coll_sent: ManagedDecimal<M, NumDecimals>,
    pub coll_fee: ManagedDecimal<M, NumDecimals>,
}

#[multiversx_sc::module]
pub trait PositionRedeemModule:
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
    /// Swaps stablecoin for collateral at face value, walking the Troves in
    /// the order given by the caller.
    ///
    /// Each Trove pays out at most its debt net of gas compensation. The fee
    /// is a fraction of the drawn collateral and stays in the Trove. A Trove
    /// redeemed down to its gas compensation closes and its remaining
    /// collateral becomes claimable surplus. One left under the minimum debt
    /// turns Zombie.
    ///
    /// # Errors
    /// - `ERROR_INSUFFICIENT_BALANCE`: The redeemer holds less than `amount`.
    /// - `ERROR_NOTHING_TO_REDEEM`: No listed Trove could be redeemed against.
    fn process_redeem(
        &self,
        redeemer: &ManagedAddress,
        amount: &ManagedDecimal<Self::Api, NumDecimals>,
        trove_ids: &ManagedVec<Self::Api, u64>,
        cache: &mut Cache<Self>,
    ) -> ManagedDecimal<Self::Api, NumDecimals> {
        self.require_amount_greater_than_zero(amount.into_raw_units());
        self.require_sufficient_bold_balance(redeemer, amount);

        let price = cache.get_price();
        let mut remaining = amount.clone();
        let mut total_redeemed = self.wad_zero();
        let mut total_coll_sent = self.wad_zero();
        let mut total_fee = self.wad_zero();

        for trove_id in trove_ids.iter() {
            if remaining.into_raw_units() == &BigUint::zero() {
                break;
            }

            let mapper = self.troves(trove_id);
            if mapper.is_empty() {
                continue;
            }

            let mut trove = mapper.get();
            if trove.status != TroveStatus::Active {
                continue;
            }

            let entire = self.get_entire_debt_and_coll(
                &trove,
                &cache.l_coll,
                &cache.l_bold_debt,
                cache.timestamp,
            );
            let icr = self.compute_collateral_ratio(&entire.coll, &entire.debt, &price);
            if icr < cache.params.mcr {
                continue;
            }

            self.apply_pending_rewards(&mut trove, cache);
            let outcome = self.redeem_from_trove(&mut trove, &remaining, &price, cache);
            if outcome.bold_redeemed.into_raw_units() == &BigUint::zero() {
                continue;
            }

            remaining = remaining - outcome.bold_redeemed.clone();
            total_redeemed += &outcome.bold_redeemed;
            total_coll_sent += &outcome.coll_sent;
            total_fee += &outcome.coll_fee;
        }

        require!(
            total_redeemed.into_raw_units() > &BigUint::zero(),
            ERROR_NOTHING_TO_REDEEM
        );

        self.burn_bold(redeemer, &total_redeemed, cache);
        self.send_collateral(redeemer, &total_coll_sent);
        self.redemption_event(redeemer, amount, &total_redeemed, &total_coll_sent, &total_fee);

        total_redeemed
    }

    fn redeem_from_trove(
        &self,
        trove: &mut Trove<Self::Api>,
        max_amount: &ManagedDecimal<Self::Api, NumDecimals>,
        price: &ManagedDecimal<Self::Api, NumDecimals>,
        cache: &mut Cache<Self>,
    ) -> SingleRedemption<Self::Api> {
        let gas_compensation = cache.params.bold_gas_compensation.clone();
        if trove.debt <= gas_compensation {
            self.store_trove(trove, TroveOperation::ApplyPendingRewards);
            return SingleRedemption {
                bold_redeemed: self.wad_zero(),
                coll_sent: self.wad_zero(),
                coll_fee: self.wad_zero(),
            };
        }

        let redeemable = trove.debt.clone() - gas_compensation.clone();
        let bold_redeemed = self.get_min(max_amount.clone(), redeemable);

        let coll_drawn = self.get_min(
            self.div_down(&bold_redeemed, price, WAD_PRECISION),
            trove.coll.clone(),
        );
        let coll_fee = self.mul_down(&coll_drawn, &cache.params.redemption_fee, WAD_PRECISION);
        let coll_sent = coll_drawn - coll_fee.clone();

        trove.debt = trove.debt.clone() - bold_redeemed.clone();
        trove.coll = trove.coll.clone() - coll_sent.clone();
        cache.active_debt = self.sub_or_fail(&cache.active_debt, &bold_redeemed);
        cache.active_coll = self.sub_or_fail(&cache.active_coll, &coll_sent);

        if trove.debt == gas_compensation {
            cache.gas_pool_bold = self.sub_or_fail(&cache.gas_pool_bold, &gas_compensation);
            cache.bold_total_supply =
                self.sub_or_fail(&cache.bold_total_supply, &gas_compensation);
            cache.active_debt = self.sub_or_fail(&cache.active_debt, &gas_compensation);

            let surplus = trove.coll.clone();
            cache.active_coll = self.sub_or_fail(&cache.active_coll, &surplus);
            self.add_coll_surplus(&trove.owner, &surplus, cache);

            self.close_trove_record(
                trove,
                TroveStatus::ClosedByRedemption,
                TroveOperation::Redeem,
                cache,
            );
        } else {
            if trove.debt < cache.params.min_debt {
                trove.status = TroveStatus::Zombie;
            }
            self.update_stake_and_total_stakes(trove, cache);
            self.store_trove(trove, TroveOperation::Redeem);
        }

        SingleRedemption {
            bold_redeemed,
            coll_sent,
            coll_fee,
        }
    }
}
