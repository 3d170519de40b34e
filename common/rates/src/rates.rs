#![no_std]
use common_constants::{SECONDS_PER_YEAR, WAD_PRECISION};
use common_structs::Trove;

multiversx_sc::imports!();

/// The InterestRates module computes the simple interest owed by a Trove
/// since its debt was last updated.
///
/// **Scope**: Every Trove carries its own annual rate, chosen by the owner.
///
/// **Goal**: Let debt grow lazily: interest is only materialized when the
/// Trove is touched, together with its pending redistribution rewards.
#[multiversx_sc::module]
pub trait InterestRates: common_math::SharedMathModule {
    /// Calculates simple interest on `debt` over `elapsed_seconds`.
    ///
    /// **Formula**:
    /// - `interest = debt * annual_rate * elapsed_seconds / SECONDS_PER_YEAR`
    /// - Truncated toward zero, so the borrower is never charged more than owed.
    ///
    /// # Arguments
    /// - `debt`: Recorded Trove debt (WAD).
    /// - `annual_rate`: Annual interest rate (WAD, 1e18 == 100%).
    /// - `elapsed_seconds`: Seconds since the last debt update.
    ///
    /// # Returns
    /// - `ManagedDecimal<Self::Api, NumDecimals>`: Interest owed (WAD).
    fn calculate_accrued_interest(
        &self,
        debt: &ManagedDecimal<Self::Api, NumDecimals>,
        annual_rate: &ManagedDecimal<Self::Api, NumDecimals>,
        elapsed_seconds: u64,
    ) -> ManagedDecimal<Self::Api, NumDecimals> {
        if elapsed_seconds == 0 {
            return self.wad_zero();
        }

        let yearly = self.mul_down(debt, annual_rate, WAD_PRECISION);
        let raw = self.mul_div_floor(
            yearly.into_raw_units(),
            &BigUint::from(elapsed_seconds),
            &BigUint::from(SECONDS_PER_YEAR),
        );

        self.to_decimal_wad(raw)
    }

    /// Interest owed by `trove` at `timestamp`.
    ///
    /// # Returns
    /// - Zero for closed Troves or when no time has passed.
    fn calculate_trove_interest(
        &self,
        trove: &Trove<Self::Api>,
        timestamp: u64,
    ) -> ManagedDecimal<Self::Api, NumDecimals> {
        if !trove.is_open() || timestamp <= trove.last_debt_update_timestamp {
            return self.wad_zero();
        }

        self.calculate_accrued_interest(
            &trove.debt,
            &trove.annual_interest_rate,
            timestamp - trove.last_debt_update_timestamp,
        )
    }
}
