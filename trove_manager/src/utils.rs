multiversx_sc::imports!();

use common_constants::MAX_SCALE_FACTOR_EXPONENT;
use common_errors::ERROR_INSUFFICIENT_BALANCE;

use crate::{cache::Cache, helpers, oracle, storage};

/// Stablecoin ledger, collateral transfers and storage reads with zero
/// defaults.
///
/// The stablecoin is accounted inside the contract: minting credits a
/// balance and grows the total supply, burning does the opposite. Collateral
/// is a real token held by the contract and paid out with plain transfers.
#[multiversx_sc::module]
pub trait TroveUtilsModule:
    storage::Storage
    + oracle::OracleModule
    + common_events::EventsModule
    + common_math::SharedMathModule
    + common_accounting::SharedAccountingModule
    + common_rates::InterestRates
    + helpers::MathsModule
{
    fn get_bold_balance(&self, account: &ManagedAddress) -> ManagedDecimal<Self::Api, NumDecimals> {
        let mapper = self.bold_balance(account);
        if mapper.is_empty() {
            return self.wad_zero();
        }

        mapper.get()
    }

    /// Credits a ledger balance without touching the supply.
    fn credit_bold(
        &self,
        account: &ManagedAddress,
        amount: &ManagedDecimal<Self::Api, NumDecimals>,
    ) {
        if amount.into_raw_units() == &BigUint::zero() {
            return;
        }

        let balance = self.get_bold_balance(account);
        self.bold_balance(account).set(balance + amount.clone());
    }

    /// Debits a ledger balance without touching the supply.
    ///
    /// # Errors
    /// - `ERROR_INSUFFICIENT_BALANCE`: The account holds less than `amount`.
    fn debit_bold(
        &self,
        account: &ManagedAddress,
        amount: &ManagedDecimal<Self::Api, NumDecimals>,
    ) {
        if amount.into_raw_units() == &BigUint::zero() {
            return;
        }

        let balance = self.get_bold_balance(account);
        require!(&balance >= amount, ERROR_INSUFFICIENT_BALANCE);

        let remaining = balance - amount.clone();
        if remaining.into_raw_units() == &BigUint::zero() {
            self.bold_balance(account).clear();
        } else {
            self.bold_balance(account).set(remaining);
        }
    }

    fn mint_bold(
        &self,
        to: &ManagedAddress,
        amount: &ManagedDecimal<Self::Api, NumDecimals>,
        cache: &mut Cache<Self>,
    ) {
        self.credit_bold(to, amount);
        cache.bold_total_supply += amount;
    }

    /// Burns stablecoin from `from`, failing with a recoverable error when the
    /// balance is too small.
    fn burn_bold(
        &self,
        from: &ManagedAddress,
        amount: &ManagedDecimal<Self::Api, NumDecimals>,
        cache: &mut Cache<Self>,
    ) {
        self.debit_bold(from, amount);
        cache.bold_total_supply = self.sub_or_fail(&cache.bold_total_supply, amount);
    }

    /// Moves stablecoin between two ledger accounts. Supply is unchanged.
    fn move_bold(
        &self,
        from: &ManagedAddress,
        to: &ManagedAddress,
        amount: &ManagedDecimal<Self::Api, NumDecimals>,
    ) {
        self.debit_bold(from, amount);
        self.credit_bold(to, amount);
    }

    fn send_collateral(
        &self,
        to: &ManagedAddress,
        amount: &ManagedDecimal<Self::Api, NumDecimals>,
    ) {
        let token = self.collateral_token().get();
        self.tx()
            .to(to)
            .egld_or_single_esdt(&token, 0, amount.into_raw_units())
            .transfer_if_not_empty();
    }

    fn get_coll_surplus(&self, owner: &ManagedAddress) -> ManagedDecimal<Self::Api, NumDecimals> {
        let mapper = self.coll_surplus(owner);
        if mapper.is_empty() {
            return self.wad_zero();
        }

        mapper.get()
    }

    /// Records collateral the Trove owner can claim later.
    fn add_coll_surplus(
        &self,
        owner: &ManagedAddress,
        amount: &ManagedDecimal<Self::Api, NumDecimals>,
        cache: &mut Cache<Self>,
    ) {
        if amount.into_raw_units() == &BigUint::zero() {
            return;
        }

        let claimable = self.get_coll_surplus(owner) + amount.clone();
        self.coll_surplus(owner).set(&claimable);
        cache.coll_surplus_total += amount;
        self.collateral_surplus_event(owner, amount, &claimable);
    }

    fn get_sum(&self, epoch: u64, scale: u64) -> ManagedDecimal<Self::Api, NumDecimals> {
        let mapper = self.epoch_to_scale_to_sum(epoch, scale);
        if mapper.is_empty() {
            return self.double_wad_zero();
        }

        mapper.get()
    }

    /// `S[epoch][scale + i]` for every scale a deposit snapshot can still
    /// collect gains from, as raw 36-decimal values.
    fn get_sums_from(&self, epoch: u64, scale: u64) -> ManagedVec<Self::Api, BigUint<Self::Api>> {
        let mut sums = ManagedVec::new();
        for i in 0..=MAX_SCALE_FACTOR_EXPONENT {
            sums.push(self.get_sum(epoch, scale + i).into_raw_units().clone());
        }

        sums
    }
}
