multiversx_sc::imports!();

use common_errors::ERROR_AMOUNT_MUST_BE_GREATER_THAN_ZERO;
use common_events::TroveOperation;

use crate::{cache::Cache, helpers, oracle, redistribution, storage, utils, validation};

use super::account;

#[multiversx_sc::module]
pub trait PositionOpenModule:
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
    /// Opens a Trove backed by `coll` and mints `requested_debt` to the owner.
    ///
    /// The recorded debt also carries the flat gas compensation, which is
    /// minted into the gas pool and paid to whoever liquidates the Trove.
    ///
    /// # Returns
    /// - The new Trove id.
    ///
    /// # Errors
    /// - `ERROR_AMOUNT_MUST_BE_GREATER_THAN_ZERO`: No collateral attached.
    /// - `ERROR_INTEREST_RATE_TOO_HIGH`: Rate above the configured maximum.
    /// - `ERROR_BELOW_MIN_DEBT`: Debt plus gas compensation under the minimum.
    /// - `ERROR_BELOW_MIN_COLLATERAL_RATIO`: Collateral ratio under the MCR.
    fn process_open_trove(
        &self,
        owner: &ManagedAddress,
        coll: ManagedDecimal<Self::Api, NumDecimals>,
        requested_debt: ManagedDecimal<Self::Api, NumDecimals>,
        annual_interest_rate: ManagedDecimal<Self::Api, NumDecimals>,
        cache: &mut Cache<Self>,
    ) -> u64 {
        require!(
            coll.into_raw_units() > &BigUint::zero(),
            ERROR_AMOUNT_MUST_BE_GREATER_THAN_ZERO
        );
        self.require_valid_interest_rate(&annual_interest_rate, cache);

        let gas_compensation = cache.params.bold_gas_compensation.clone();
        let entire_debt = requested_debt.clone() + gas_compensation.clone();
        self.require_at_least_min_debt(&entire_debt, cache);
        self.require_icr_above_mcr(&coll, &entire_debt, cache);

        cache.active_coll += &coll;
        cache.active_debt += &entire_debt;

        let trove = self.create_trove(owner, coll, entire_debt, annual_interest_rate, cache);

        self.mint_bold(owner, &requested_debt, cache);
        cache.gas_pool_bold += &gas_compensation;
        cache.bold_total_supply += &gas_compensation;

        self.store_trove(&trove, TroveOperation::Open);

        trove.id
    }
}
