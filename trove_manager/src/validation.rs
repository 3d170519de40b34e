multiversx_sc::imports!();

use common_constants::{MAX_COLL_GAS_COMPENSATION, MAX_LIQUIDATION_PENALTY, WAD};
use common_errors::{
    ERROR_AMOUNT_MUST_BE_GREATER_THAN_ZERO, ERROR_BELOW_MIN_COLLATERAL_RATIO, ERROR_BELOW_MIN_DEBT,
    ERROR_CONTRACT_PAUSED, ERROR_INSUFFICIENT_BALANCE, ERROR_INTEREST_RATE_TOO_HIGH,
    ERROR_INVALID_ADDRESS, ERROR_INVALID_COLLATERAL_TOKEN, ERROR_INVALID_RISK_PARAMS,
    ERROR_NOT_TROVE_OWNER, ERROR_TROVE_NOT_ACTIVE,
};
use common_structs::{ProtocolParams, Trove};

use crate::{cache::Cache, helpers, oracle, storage, utils};

#[multiversx_sc::module]
pub trait ValidationModule:
    storage::Storage
    + oracle::OracleModule
    + common_events::EventsModule
    + common_math::SharedMathModule
    + common_accounting::SharedAccountingModule
    + common_rates::InterestRates
    + helpers::MathsModule
    + utils::TroveUtilsModule
    + multiversx_sc_modules::pause::PauseModule
{
    fn require_amount_greater_than_zero(&self, amount: &BigUint) {
        require!(
            amount > &BigUint::zero(),
            ERROR_AMOUNT_MUST_BE_GREATER_THAN_ZERO
        );
    }

    fn require_active_contract(&self) {
        require!(self.not_paused(), ERROR_CONTRACT_PAUSED);
    }

    fn require_non_zero_address(&self, address: &ManagedAddress) {
        require!(!address.is_zero(), ERROR_INVALID_ADDRESS);
    }

    /// Reads the attached payment as collateral.
    ///
    /// # Returns
    /// - The paid amount in WAD, zero when nothing was attached.
    ///
    /// # Errors
    /// - `ERROR_INVALID_COLLATERAL_TOKEN`: A non-zero payment in another token.
    fn get_collateral_payment(&self) -> ManagedDecimal<Self::Api, NumDecimals> {
        let (token, amount) = self.call_value().egld_or_single_fungible_esdt();
        if amount == BigUint::zero() {
            return self.wad_zero();
        }

        require!(
            token == self.collateral_token().get(),
            ERROR_INVALID_COLLATERAL_TOKEN
        );

        self.to_decimal_wad(amount)
    }

    /// Loads an Active or Zombie Trove.
    fn require_open_trove(&self, trove_id: u64) -> Trove<Self::Api> {
        let mapper = self.troves(trove_id);
        require!(!mapper.is_empty(), ERROR_TROVE_NOT_ACTIVE);

        let trove = mapper.get();
        require!(trove.is_open(), ERROR_TROVE_NOT_ACTIVE);

        trove
    }

    fn require_trove_owner(&self, trove: &Trove<Self::Api>, caller: &ManagedAddress) {
        require!(&trove.owner == caller, ERROR_NOT_TROVE_OWNER);
    }

    /// Ensures `coll * price / debt` stays at or above the minimum collateral ratio.
    fn require_icr_above_mcr(
        &self,
        coll: &ManagedDecimal<Self::Api, NumDecimals>,
        debt: &ManagedDecimal<Self::Api, NumDecimals>,
        cache: &mut Cache<Self>,
    ) {
        let price = cache.get_price();
        let icr = self.compute_collateral_ratio(coll, debt, &price);
        require!(icr >= cache.params.mcr, ERROR_BELOW_MIN_COLLATERAL_RATIO);
    }

    fn require_at_least_min_debt(
        &self,
        debt: &ManagedDecimal<Self::Api, NumDecimals>,
        cache: &Cache<Self>,
    ) {
        require!(debt >= &cache.params.min_debt, ERROR_BELOW_MIN_DEBT);
    }

    fn require_valid_interest_rate(
        &self,
        annual_rate: &ManagedDecimal<Self::Api, NumDecimals>,
        cache: &Cache<Self>,
    ) {
        require!(
            annual_rate <= &cache.params.max_annual_interest_rate,
            ERROR_INTEREST_RATE_TOO_HIGH
        );
    }

    fn require_sufficient_bold_balance(
        &self,
        account: &ManagedAddress,
        amount: &ManagedDecimal<Self::Api, NumDecimals>,
    ) {
        require!(
            &self.get_bold_balance(account) >= amount,
            ERROR_INSUFFICIENT_BALANCE
        );
    }

    /// Checks risk parameters before they are stored.
    ///
    /// - MCR strictly above 100%.
    /// - Collateral gas compensation at most `MAX_COLL_GAS_COMPENSATION`.
    /// - Both penalties at most `MAX_LIQUIDATION_PENALTY`.
    /// - Redemption fee below 100%.
    /// - Non-zero staleness window.
    fn validate_risk_params(&self, params: &ProtocolParams<Self::Api>) {
        let wad = self.wad();
        let max_penalty = self.to_decimal_wad(BigUint::from(MAX_LIQUIDATION_PENALTY));

        require!(params.mcr > wad, ERROR_INVALID_RISK_PARAMS);
        require!(
            params.coll_gas_compensation
                <= self.to_decimal_wad(BigUint::from(MAX_COLL_GAS_COMPENSATION)),
            ERROR_INVALID_RISK_PARAMS
        );
        require!(
            params.liquidation_penalty_sp <= max_penalty,
            ERROR_INVALID_RISK_PARAMS
        );
        require!(
            params.liquidation_penalty_redistribution <= max_penalty,
            ERROR_INVALID_RISK_PARAMS
        );
        require!(
            params.redemption_fee < self.to_decimal_wad(BigUint::from(WAD)),
            ERROR_INVALID_RISK_PARAMS
        );
        require!(
            params.max_price_stale_seconds > 0,
            ERROR_INVALID_RISK_PARAMS
        );
    }
}
