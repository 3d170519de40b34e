#![no_std]

use common_constants::{DOUBLE_WAD_PRECISION, WAD, WAD_PRECISION};
use common_errors::ERROR_INVARIANT_DIVISION_BY_ZERO;

multiversx_sc::imports!();

/// Fixed-point helpers shared by every accounting module.
///
/// All operations truncate toward zero. Values are `BigUint` backed, so
/// intermediate products never overflow.
#[multiversx_sc::module]
pub trait SharedMathModule {
    /// `a * b / denominator`, rounded down.
    fn mul_div_floor(
        &self,
        a: &BigUint<Self::Api>,
        b: &BigUint<Self::Api>,
        denominator: &BigUint<Self::Api>,
    ) -> BigUint<Self::Api> {
        require!(denominator > &BigUint::zero(), ERROR_INVARIANT_DIVISION_BY_ZERO);
        (a * b) / denominator
    }

    /// Multiplies two decimals and truncates the result at `precision`.
    fn mul_down(
        &self,
        a: &ManagedDecimal<Self::Api, NumDecimals>,
        b: &ManagedDecimal<Self::Api, NumDecimals>,
        precision: NumDecimals,
    ) -> ManagedDecimal<Self::Api, NumDecimals> {
        let scaled_a = a.rescale(precision);
        let scaled_b = b.rescale(precision);
        let raw = self.mul_div_floor(
            scaled_a.into_raw_units(),
            scaled_b.into_raw_units(),
            &self.pow10(precision),
        );

        self.to_decimal(raw, precision)
    }

    /// Divides two decimals and truncates the result at `precision`.
    fn div_down(
        &self,
        a: &ManagedDecimal<Self::Api, NumDecimals>,
        b: &ManagedDecimal<Self::Api, NumDecimals>,
        precision: NumDecimals,
    ) -> ManagedDecimal<Self::Api, NumDecimals> {
        let scaled_a = a.rescale(precision);
        let scaled_b = b.rescale(precision);
        let raw = self.mul_div_floor(
            scaled_a.into_raw_units(),
            &self.pow10(precision),
            scaled_b.into_raw_units(),
        );

        self.to_decimal(raw, precision)
    }

    fn pow10(&self, exponent: NumDecimals) -> BigUint<Self::Api> {
        BigUint::from(10u64).pow(exponent as u32)
    }

    fn to_decimal_wad(&self, value: BigUint) -> ManagedDecimal<<Self as ContractBase>::Api, usize> {
        self.to_decimal(value, WAD_PRECISION)
    }

    fn to_decimal_double_wad(
        &self,
        value: BigUint,
    ) -> ManagedDecimal<<Self as ContractBase>::Api, usize> {
        self.to_decimal(value, DOUBLE_WAD_PRECISION)
    }

    fn wad(&self) -> ManagedDecimal<<Self as ContractBase>::Api, usize> {
        self.to_decimal(BigUint::from(WAD), WAD_PRECISION)
    }

    fn wad_zero(&self) -> ManagedDecimal<<Self as ContractBase>::Api, usize> {
        self.to_decimal(BigUint::zero(), WAD_PRECISION)
    }

    fn double_wad_zero(&self) -> ManagedDecimal<<Self as ContractBase>::Api, usize> {
        self.to_decimal(BigUint::zero(), DOUBLE_WAD_PRECISION)
    }

    fn to_decimal(
        &self,
        value: BigUint,
        precision: NumDecimals,
    ) -> ManagedDecimal<<Self as ContractBase>::Api, usize> {
        ManagedDecimal::from_raw_units(value, precision)
    }

    fn get_min(
        &self,
        a: ManagedDecimal<Self::Api, NumDecimals>,
        b: ManagedDecimal<Self::Api, NumDecimals>,
    ) -> ManagedDecimal<Self::Api, NumDecimals> {
        if a < b {
            a
        } else {
            b
        }
    }
}
