multiversx_sc::imports!();

use common_errors::{
    ERROR_AMOUNT_MUST_BE_GREATER_THAN_ZERO, ERROR_INVARIANT_OFFSET_EXCEEDS_DEPOSITS,
    ERROR_NO_COLLATERAL_GAIN, ERROR_USER_HAS_NO_DEPOSIT,
};
use common_events::TroveOperation;
use common_structs::{Deposit, DepositSnapshot};

use crate::{
    cache::Cache, helpers, oracle, positions::account, redistribution, storage, utils, validation,
};

/// Stability Pool deposits and liquidation offsets.
///
/// Deposits are never iterated. Every depositor keeps a snapshot of the
/// running product `P`, the sum `S` of its scale, the scale and the epoch.
/// The compounded deposit and the collateral gain follow from comparing
/// that snapshot with the current values.
#[multiversx_sc::module]
pub trait StabilityPoolModule:
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
    /// Cancels `debt` against the pool and hands `coll` to its depositors.
    ///
    /// Updates `S` for the current epoch and scale, then shrinks `P`. A loss
    /// that empties the pool starts a new epoch with `P` back at `1e18`.
    /// The absorbed stablecoin is burned.
    ///
    /// # Errors
    /// - `ERROR_INVARIANT_OFFSET_EXCEEDS_DEPOSITS`: `debt` is larger than the pool.
    fn offset(
        &self,
        debt: &ManagedDecimal<Self::Api, NumDecimals>,
        coll: &ManagedDecimal<Self::Api, NumDecimals>,
        cache: &mut Cache<Self>,
    ) {
        if debt.into_raw_units() == &BigUint::zero()
            || cache.total_bold_deposits.into_raw_units() == &BigUint::zero()
        {
            return;
        }

        if debt > &cache.total_bold_deposits {
            sc_panic!(ERROR_INVARIANT_OFFSET_EXCEEDS_DEPOSITS);
        }

        let gain = self.compute_offset_gain_per_unit(
            coll,
            &cache.last_coll_error_offset,
            &cache.total_bold_deposits,
        );
        let loss = self.compute_offset_loss_per_unit(
            debt,
            &cache.last_bold_loss_error_offset,
            &cache.total_bold_deposits,
        );
        cache.last_coll_error_offset = gain.error;
        cache.last_bold_loss_error_offset = loss.error;

        let sum_increase = self.compute_sum_increase(&gain.per_unit, &cache.p);
        let new_sum = self.get_sum(cache.current_epoch, cache.current_scale) + sum_increase;
        self.epoch_to_scale_to_sum(cache.current_epoch, cache.current_scale)
            .set(&new_sum);

        let update = self.compute_product_update(&cache.p, &loss.per_unit);
        if update.depleted {
            cache.current_epoch += 1;
            cache.current_scale = 0;
        } else {
            cache.current_scale += update.scale_increase;
        }
        cache.p = update.p;

        cache.total_bold_deposits = self.sub_or_fail(&cache.total_bold_deposits, debt);
        cache.bold_total_supply = self.sub_or_fail(&cache.bold_total_supply, debt);
        cache.active_debt = self.sub_or_fail(&cache.active_debt, debt);
        cache.active_coll = self.sub_or_fail(&cache.active_coll, coll);
        cache.stability_pool_coll += coll;

        self.stability_pool_offset_event(
            debt,
            coll,
            &cache.p,
            &new_sum,
            cache.current_scale,
            cache.current_epoch,
        );
    }

    fn get_deposit(&self, depositor: &ManagedAddress) -> Option<Deposit<Self::Api>> {
        let mapper = self.deposits(depositor);
        if mapper.is_empty() {
            return None;
        }

        Some(mapper.get())
    }

    /// Compounded value of `deposit` against the given pool state.
    fn compounded_deposit_at(
        &self,
        deposit: &Deposit<Self::Api>,
        p: &ManagedDecimal<Self::Api, NumDecimals>,
        current_scale: u64,
        current_epoch: u64,
    ) -> ManagedDecimal<Self::Api, NumDecimals> {
        self.compute_compounded_deposit(
            &deposit.initial_value,
            &deposit.snapshot,
            p,
            current_scale,
            current_epoch,
        )
    }

    /// Collateral earned by `deposit` since its snapshot. The sums are always
    /// read from storage, `offset` writes them there directly.
    fn depositor_collateral_gain(
        &self,
        deposit: &Deposit<Self::Api>,
    ) -> ManagedDecimal<Self::Api, NumDecimals> {
        let sums = self.get_sums_from(deposit.snapshot.epoch, deposit.snapshot.scale);
        self.compute_depositor_collateral_gain(&deposit.initial_value, &deposit.snapshot, &sums)
    }

    /// Returns `(compounded_deposit, collateral_gain)` for `depositor`, both
    /// zero when there is no deposit.
    fn settle_deposit(
        &self,
        depositor: &ManagedAddress,
        cache: &Cache<Self>,
    ) -> (
        ManagedDecimal<Self::Api, NumDecimals>,
        ManagedDecimal<Self::Api, NumDecimals>,
    ) {
        match self.get_deposit(depositor) {
            Some(deposit) => (
                self.compounded_deposit_at(
                    &deposit,
                    &cache.p,
                    cache.current_scale,
                    cache.current_epoch,
                ),
                self.depositor_collateral_gain(&deposit),
            ),
            None => (self.wad_zero(), self.wad_zero()),
        }
    }

    /// Stores `new_value` as the depositor's initial value with a fresh
    /// snapshot, or removes the deposit when it reaches zero.
    fn update_deposit(
        &self,
        depositor: &ManagedAddress,
        new_value: ManagedDecimal<Self::Api, NumDecimals>,
        collateral_gain: &ManagedDecimal<Self::Api, NumDecimals>,
        cache: &Cache<Self>,
    ) {
        let deposit = if new_value.into_raw_units() == &BigUint::zero() {
            self.deposits(depositor).clear();
            self.depositors().swap_remove(depositor);

            Deposit {
                initial_value: new_value,
                snapshot: DepositSnapshot {
                    p: self.wad_zero(),
                    s: self.double_wad_zero(),
                    scale: 0,
                    epoch: 0,
                },
            }
        } else {
            let deposit = Deposit {
                initial_value: new_value,
                snapshot: DepositSnapshot {
                    p: cache.p.clone(),
                    s: self.get_sum(cache.current_epoch, cache.current_scale),
                    scale: cache.current_scale,
                    epoch: cache.current_epoch,
                },
            };
            self.deposits(depositor).set(&deposit);
            self.depositors().insert(depositor.clone());

            deposit
        };

        self.deposit_updated_event(depositor, &deposit, collateral_gain);
    }

    fn pay_out_collateral_gain(
        &self,
        depositor: &ManagedAddress,
        gain: &ManagedDecimal<Self::Api, NumDecimals>,
        cache: &mut Cache<Self>,
    ) {
        if gain.into_raw_units() == &BigUint::zero() {
            return;
        }

        cache.stability_pool_coll = self.sub_or_fail(&cache.stability_pool_coll, gain);
        self.send_collateral(depositor, gain);
    }

    /// Moves `amount` stablecoin from the caller into the pool.
    ///
    /// The existing deposit is compounded first and its collateral gain paid
    /// out, then the deposit restarts at `compounded + amount`.
    fn process_provide_to_sp(
        &self,
        depositor: &ManagedAddress,
        amount: &ManagedDecimal<Self::Api, NumDecimals>,
        cache: &mut Cache<Self>,
    ) {
        require!(
            amount.into_raw_units() > &BigUint::zero(),
            ERROR_AMOUNT_MUST_BE_GREATER_THAN_ZERO
        );

        let (compounded, gain) = self.settle_deposit(depositor, cache);

        self.debit_bold(depositor, amount);
        cache.total_bold_deposits += amount;

        let new_value = compounded + amount.clone();
        self.update_deposit(depositor, new_value, &gain, cache);
        self.pay_out_collateral_gain(depositor, &gain, cache);
    }

    /// Withdraws up to `amount` of the compounded deposit and pays out the
    /// collateral gain. A zero `amount` only claims the gain.
    ///
    /// # Errors
    /// - `ERROR_USER_HAS_NO_DEPOSIT`: The caller never deposited or fully withdrew.
    fn process_withdraw_from_sp(
        &self,
        depositor: &ManagedAddress,
        amount: &ManagedDecimal<Self::Api, NumDecimals>,
        cache: &mut Cache<Self>,
    ) -> ManagedDecimal<Self::Api, NumDecimals> {
        require!(
            self.get_deposit(depositor).is_some(),
            ERROR_USER_HAS_NO_DEPOSIT
        );

        let (compounded, gain) = self.settle_deposit(depositor, cache);
        let to_withdraw = self.get_min(amount.clone(), compounded.clone());

        cache.total_bold_deposits = self.sub_or_fail(&cache.total_bold_deposits, &to_withdraw);
        self.credit_bold(depositor, &to_withdraw);

        let new_value = compounded - to_withdraw.clone();
        self.update_deposit(depositor, new_value, &gain, cache);
        self.pay_out_collateral_gain(depositor, &gain, cache);

        to_withdraw
    }

    /// Sends the caller's collateral gain into one of its Troves instead of
    /// its wallet. The deposit keeps its compounded value.
    ///
    /// # Errors
    /// - `ERROR_USER_HAS_NO_DEPOSIT`: No deposit to take the gain from.
    /// - `ERROR_NO_COLLATERAL_GAIN`: The deposit has not earned anything.
    /// - `ERROR_TROVE_NOT_ACTIVE` / `ERROR_NOT_TROVE_OWNER`: Bad target Trove.
    /// - `ERROR_BELOW_MIN_COLLATERAL_RATIO`: The Trove is still under MCR with the gain added.
    fn process_redirect_gain_to_trove(
        &self,
        depositor: &ManagedAddress,
        trove_id: u64,
        cache: &mut Cache<Self>,
    ) {
        require!(
            self.get_deposit(depositor).is_some(),
            ERROR_USER_HAS_NO_DEPOSIT
        );

        let mut trove = self.require_open_trove(trove_id);
        self.require_trove_owner(&trove, depositor);

        let (compounded, gain) = self.settle_deposit(depositor, cache);
        require!(
            gain.into_raw_units() > &BigUint::zero(),
            ERROR_NO_COLLATERAL_GAIN
        );

        self.update_deposit(depositor, compounded, &gain, cache);

        self.apply_pending_rewards(&mut trove, cache);

        cache.stability_pool_coll = self.sub_or_fail(&cache.stability_pool_coll, &gain);
        cache.active_coll += &gain;
        trove.coll += &gain;
        self.require_icr_above_mcr(&trove.coll, &trove.debt, cache);

        self.update_stake_and_total_stakes(&mut trove, cache);
        self.store_trove(&trove, TroveOperation::RedirectCollateralGain);
    }
}
