#![no_std]

use common_constants::{
    DOUBLE_WAD_PRECISION, MAX_SCALE_FACTOR_EXPONENT, SCALE_FACTOR, WAD, WAD_PRECISION,
};
use common_errors::{
    ERROR_INVARIANT_DIVISION_BY_ZERO, ERROR_INVARIANT_ZERO_COLLATERAL_SNAPSHOT,
    ERROR_INVARIANT_ZERO_PRODUCT, ERROR_INVARIANT_ZERO_TOTAL_STAKES,
};
use common_structs::DepositSnapshot;

multiversx_sc::imports!();

/// Reward or loss per unit of stake (WAD) with the division remainder that
/// has to be fed into the next computation (36 decimals).
pub struct PerUnitAmount<M: ManagedTypeApi> {
    pub per_unit: ManagedDecimal<M, NumDecimals>,
    pub error: ManagedDecimal<M, NumDecimals>,
}

/// New value of the Stability Pool product after a loss.
pub struct ProductUpdate<M: ManagedTypeApi> {
    pub p: ManagedDecimal<M, NumDecimals>,
    pub scale_increase: u64,
    pub depleted: bool,
}

/// How a liquidated Trove is split between Stability Pool offset and
/// redistribution.
pub struct OffsetSplit<M: ManagedTypeApi> {
    pub debt_to_offset: ManagedDecimal<M, NumDecimals>,
    pub coll_to_sp: ManagedDecimal<M, NumDecimals>,
    pub debt_to_redistribute: ManagedDecimal<M, NumDecimals>,
    pub coll_to_redistribute: ManagedDecimal<M, NumDecimals>,
}

/// Pure accounting formulas for Trove stakes, liquidation redistribution and
/// the Stability Pool product/sum scheme.
///
/// Nothing here touches storage: callers pass in the current state and write
/// the results back. Every division truncates; remainders that matter for
/// conservation are returned so the caller can carry them into the next call.
#[multiversx_sc::module]
pub trait SharedAccountingModule: common_math::SharedMathModule {
    /// Stake of a Trove holding `coll`.
    ///
    /// Before the first liquidation the stake equals the collateral. Afterwards
    /// it is scaled by `total_stakes_snapshot / total_collateral_snapshot`, so a
    /// newcomer does not share in rewards distributed before it joined.
    fn compute_new_stake(
        &self,
        coll: &ManagedDecimal<Self::Api, NumDecimals>,
        total_stakes_snapshot: &ManagedDecimal<Self::Api, NumDecimals>,
        total_collateral_snapshot: &ManagedDecimal<Self::Api, NumDecimals>,
    ) -> ManagedDecimal<Self::Api, NumDecimals> {
        if total_stakes_snapshot.into_raw_units() == &BigUint::zero() {
            return coll.rescale(WAD_PRECISION);
        }

        require!(
            total_collateral_snapshot.into_raw_units() > &BigUint::zero(),
            ERROR_INVARIANT_ZERO_COLLATERAL_SNAPSHOT
        );

        let raw = self.mul_div_floor(
            coll.rescale(WAD_PRECISION).into_raw_units(),
            total_stakes_snapshot.into_raw_units(),
            total_collateral_snapshot.into_raw_units(),
        );

        self.to_decimal_wad(raw)
    }

    /// Per-unit-staked increment of `L_coll` or `L_boldDebt` when `amount` is
    /// redistributed over `total_stakes`.
    ///
    /// # Arguments
    /// - `amount`: Collateral or debt being redistributed (WAD).
    /// - `last_error`: Remainder left by the previous redistribution (36 decimals).
    /// - `total_stakes`: Sum of all open Trove stakes (WAD).
    ///
    /// # Errors
    /// - `ERROR_INVARIANT_ZERO_TOTAL_STAKES`: Nobody is left to absorb the amount.
    fn compute_redistribution_per_unit(
        &self,
        amount: &ManagedDecimal<Self::Api, NumDecimals>,
        last_error: &ManagedDecimal<Self::Api, NumDecimals>,
        total_stakes: &ManagedDecimal<Self::Api, NumDecimals>,
    ) -> PerUnitAmount<Self::Api> {
        require!(
            total_stakes.into_raw_units() > &BigUint::zero(),
            ERROR_INVARIANT_ZERO_TOTAL_STAKES
        );

        self.divide_with_remainder(amount, last_error, total_stakes)
    }

    /// Reward owed to a stake since its snapshot: `stake * (L - L_snapshot) / 1e18`.
    fn compute_pending_reward(
        &self,
        stake: &ManagedDecimal<Self::Api, NumDecimals>,
        current_l: &ManagedDecimal<Self::Api, NumDecimals>,
        snapshot_l: &ManagedDecimal<Self::Api, NumDecimals>,
    ) -> ManagedDecimal<Self::Api, NumDecimals> {
        if current_l <= snapshot_l {
            return self.wad_zero();
        }

        let delta = current_l.into_raw_units() - snapshot_l.into_raw_units();
        self.mul_down(stake, &self.to_decimal_wad(delta), WAD_PRECISION)
    }

    /// Collateral gain per unit deposited when `coll` is sent to the Stability Pool.
    fn compute_offset_gain_per_unit(
        &self,
        coll: &ManagedDecimal<Self::Api, NumDecimals>,
        last_error: &ManagedDecimal<Self::Api, NumDecimals>,
        total_deposits: &ManagedDecimal<Self::Api, NumDecimals>,
    ) -> PerUnitAmount<Self::Api> {
        require!(
            total_deposits.into_raw_units() > &BigUint::zero(),
            ERROR_INVARIANT_DIVISION_BY_ZERO
        );

        self.divide_with_remainder(coll, last_error, total_deposits)
    }

    /// Stablecoin loss per unit deposited when `debt` is absorbed by the pool.
    ///
    /// The loss is rounded up and the over-charge is carried in `last_error`
    /// and deducted next time, so compounded deposits never add up to more than
    /// the pool holds. Absorbing the whole pool yields exactly `1e18`.
    fn compute_offset_loss_per_unit(
        &self,
        debt: &ManagedDecimal<Self::Api, NumDecimals>,
        last_error: &ManagedDecimal<Self::Api, NumDecimals>,
        total_deposits: &ManagedDecimal<Self::Api, NumDecimals>,
    ) -> PerUnitAmount<Self::Api> {
        require!(
            total_deposits.into_raw_units() > &BigUint::zero(),
            ERROR_INVARIANT_DIVISION_BY_ZERO
        );

        let wad = BigUint::from(WAD);
        let debt_raw = debt.rescale(WAD_PRECISION).into_raw_units().clone();
        let total_raw = total_deposits.rescale(WAD_PRECISION).into_raw_units().clone();

        if debt_raw == total_raw {
            return PerUnitAmount {
                per_unit: self.wad(),
                error: self.double_wad_zero(),
            };
        }

        let base = &debt_raw * &wad;
        let error_raw = last_error.rescale(DOUBLE_WAD_PRECISION).into_raw_units().clone();
        let (per_unit, error) = if base > error_raw {
            let numerator = &base - &error_raw;
            let per_unit = &numerator / &total_raw + BigUint::from(1u64);
            let error = &per_unit * &total_raw - &numerator;
            (per_unit, error)
        } else {
            // The carried over-charge already covers this loss.
            (BigUint::zero(), &error_raw - &base)
        };

        if per_unit >= wad {
            return PerUnitAmount {
                per_unit: self.wad(),
                error: self.double_wad_zero(),
            };
        }

        PerUnitAmount {
            per_unit: self.to_decimal_wad(per_unit),
            error: self.to_decimal_double_wad(error),
        }
    }

    /// Applies a loss to the running product `P`.
    ///
    /// A loss of exactly `1e18` empties the pool: the caller starts a new epoch
    /// and `P` resets to `1e18`. Otherwise `P *= (1 - loss)`, and whenever the
    /// result falls under `SCALE_FACTOR` it is multiplied back up by
    /// `SCALE_FACTOR`, one scale step at a time.
    fn compute_product_update(
        &self,
        current_p: &ManagedDecimal<Self::Api, NumDecimals>,
        loss_per_unit: &ManagedDecimal<Self::Api, NumDecimals>,
    ) -> ProductUpdate<Self::Api> {
        let wad = BigUint::from(WAD);
        let loss_raw = loss_per_unit.rescale(WAD_PRECISION).into_raw_units().clone();

        if loss_raw >= wad {
            return ProductUpdate {
                p: self.wad(),
                scale_increase: 0,
                depleted: true,
            };
        }

        let factor = &wad - &loss_raw;
        let mut product = current_p.rescale(WAD_PRECISION).into_raw_units() * &factor;
        require!(product > BigUint::zero(), ERROR_INVARIANT_ZERO_PRODUCT);

        let scale_factor = BigUint::from(SCALE_FACTOR);
        let mut new_p = &product / &wad;
        let mut scale_increase = 0u64;
        while new_p < scale_factor {
            product *= &scale_factor;
            new_p = &product / &wad;
            scale_increase += 1;
        }

        ProductUpdate {
            p: self.to_decimal_wad(new_p),
            scale_increase,
            depleted: false,
        }
    }

    /// Increment of `S[epoch][scale]`: `gain_per_unit * P` (36 decimals).
    fn compute_sum_increase(
        &self,
        gain_per_unit: &ManagedDecimal<Self::Api, NumDecimals>,
        current_p: &ManagedDecimal<Self::Api, NumDecimals>,
    ) -> ManagedDecimal<Self::Api, NumDecimals> {
        let raw = gain_per_unit.rescale(WAD_PRECISION).into_raw_units()
            * current_p.rescale(WAD_PRECISION).into_raw_units();

        self.to_decimal_double_wad(raw)
    }

    /// Current value of a deposit: `initial * P / P_snapshot`, divided by
    /// `SCALE_FACTOR` for every scale change since the snapshot. A deposit
    /// from an earlier epoch was fully used up.
    fn compute_compounded_deposit(
        &self,
        initial_value: &ManagedDecimal<Self::Api, NumDecimals>,
        snapshot: &DepositSnapshot<Self::Api>,
        current_p: &ManagedDecimal<Self::Api, NumDecimals>,
        current_scale: u64,
        current_epoch: u64,
    ) -> ManagedDecimal<Self::Api, NumDecimals> {
        if initial_value.into_raw_units() == &BigUint::zero() || snapshot.epoch < current_epoch {
            return self.wad_zero();
        }

        let scale_diff = current_scale - snapshot.scale;
        if scale_diff > MAX_SCALE_FACTOR_EXPONENT {
            return self.wad_zero();
        }

        let denominator = snapshot.p.rescale(WAD_PRECISION).into_raw_units()
            * &BigUint::from(SCALE_FACTOR).pow(scale_diff as u32);
        let raw = self.mul_div_floor(
            initial_value.rescale(WAD_PRECISION).into_raw_units(),
            current_p.rescale(WAD_PRECISION).into_raw_units(),
            &denominator,
        );

        self.to_decimal_wad(raw)
    }

    /// Collateral earned by a deposit since its snapshot.
    ///
    /// `sums` holds `S[snapshot.epoch][snapshot.scale + i]` for
    /// `i = 0..=MAX_SCALE_FACTOR_EXPONENT` as raw 36-decimal values. Gains
    /// recorded `i` scales later are divided by `SCALE_FACTOR^i`.
    fn compute_depositor_collateral_gain(
        &self,
        initial_value: &ManagedDecimal<Self::Api, NumDecimals>,
        snapshot: &DepositSnapshot<Self::Api>,
        sums: &ManagedVec<Self::Api, BigUint<Self::Api>>,
    ) -> ManagedDecimal<Self::Api, NumDecimals> {
        if initial_value.into_raw_units() == &BigUint::zero() || sums.is_empty() {
            return self.wad_zero();
        }

        let snapshot_s = snapshot.s.rescale(DOUBLE_WAD_PRECISION).into_raw_units().clone();
        let first = (*sums.get(0)).clone();
        let mut normalized_gain = if first > snapshot_s {
            &first - &snapshot_s
        } else {
            BigUint::zero()
        };

        let scale_factor = BigUint::from(SCALE_FACTOR);
        let mut divisor = BigUint::from(1u64);
        for i in 1..sums.len() {
            divisor *= &scale_factor;
            normalized_gain += &*sums.get(i) / &divisor;
        }

        let raw = self.mul_div_floor(
            initial_value.rescale(WAD_PRECISION).into_raw_units(),
            &normalized_gain,
            snapshot.p.rescale(WAD_PRECISION).into_raw_units(),
        ) / BigUint::from(WAD);

        self.to_decimal_wad(raw)
    }

    /// Splits a liquidated Trove between Stability Pool offset and redistribution.
    /// The pool absorbs as much debt as it holds and receives collateral in the
    /// same proportion.
    fn compute_offset_split(
        &self,
        debt: &ManagedDecimal<Self::Api, NumDecimals>,
        coll: &ManagedDecimal<Self::Api, NumDecimals>,
        total_deposits: &ManagedDecimal<Self::Api, NumDecimals>,
    ) -> OffsetSplit<Self::Api> {
        let zero = self.wad_zero();
        let (debt_to_offset, coll_to_sp) = if total_deposits > &zero && debt > &zero {
            let debt_to_offset = self.get_min(debt.clone(), total_deposits.clone());
            let coll_to_sp = self.to_decimal_wad(self.mul_div_floor(
                coll.into_raw_units(),
                debt_to_offset.into_raw_units(),
                debt.into_raw_units(),
            ));
            (debt_to_offset, coll_to_sp)
        } else {
            (zero.clone(), zero)
        };

        OffsetSplit {
            debt_to_redistribute: debt.clone() - debt_to_offset.clone(),
            coll_to_redistribute: coll.clone() - coll_to_sp.clone(),
            debt_to_offset,
            coll_to_sp,
        }
    }

    /// `coll * price / debt`. Debt-free Troves report the largest representable ratio.
    fn compute_collateral_ratio(
        &self,
        coll: &ManagedDecimal<Self::Api, NumDecimals>,
        debt: &ManagedDecimal<Self::Api, NumDecimals>,
        price: &ManagedDecimal<Self::Api, NumDecimals>,
    ) -> ManagedDecimal<Self::Api, NumDecimals> {
        if debt.into_raw_units() == &BigUint::zero() {
            return self.to_decimal_wad(BigUint::from(u128::MAX));
        }

        let value = self.mul_down(coll, price, WAD_PRECISION);
        self.div_down(&value, debt, WAD_PRECISION)
    }

    /// Most collateral a liquidation may seize: `debt * (1 + penalty) / price`.
    fn compute_seizable_collateral(
        &self,
        debt: &ManagedDecimal<Self::Api, NumDecimals>,
        penalty: &ManagedDecimal<Self::Api, NumDecimals>,
        price: &ManagedDecimal<Self::Api, NumDecimals>,
    ) -> ManagedDecimal<Self::Api, NumDecimals> {
        let with_penalty = self.mul_down(debt, &(self.wad() + penalty.clone()), WAD_PRECISION);
        self.div_down(&with_penalty, price, WAD_PRECISION)
    }

    /// `(amount * 1e18 + last_error) / divisor`, returning the quotient (WAD)
    /// and the new remainder (36 decimals).
    fn divide_with_remainder(
        &self,
        amount: &ManagedDecimal<Self::Api, NumDecimals>,
        last_error: &ManagedDecimal<Self::Api, NumDecimals>,
        divisor: &ManagedDecimal<Self::Api, NumDecimals>,
    ) -> PerUnitAmount<Self::Api> {
        let divisor_raw = divisor.rescale(WAD_PRECISION).into_raw_units().clone();
        let numerator = amount.rescale(WAD_PRECISION).into_raw_units() * &BigUint::from(WAD)
            + last_error.rescale(DOUBLE_WAD_PRECISION).into_raw_units();
        let per_unit = &numerator / &divisor_raw;
        let error = &numerator - &(&per_unit * &divisor_raw);

        PerUnitAmount {
            per_unit: self.to_decimal_wad(per_unit),
            error: self.to_decimal_double_wad(error),
        }
    }
}
