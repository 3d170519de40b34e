multiversx_sc::imports!();

use common_structs::ProtocolParams;

use crate::{helpers, oracle, storage, utils, validation};

/// Owner-only governance of oracle, interest recipient and risk parameters.
///
/// The stablecoin gas compensation is fixed at deployment: open Troves carry
/// it inside their debt and the gas pool holds exactly that much for them.
#[multiversx_sc::module]
pub trait ConfigModule:
    storage::Storage
    + oracle::OracleModule
    + common_events::EventsModule
    + common_math::SharedMathModule
    + common_accounting::SharedAccountingModule
    + common_rates::InterestRates
    + helpers::MathsModule
    + utils::TroveUtilsModule
    + validation::ValidationModule
    + multiversx_sc_modules::pause::PauseModule
{
    #[only_owner]
    #[endpoint(setPriceOracle)]
    fn set_price_oracle(&self, oracle: ManagedAddress) {
        self.require_non_zero_address(&oracle);
        self.price_oracle_address().set(&oracle);
    }

    #[only_owner]
    #[endpoint(setInterestRecipient)]
    fn set_interest_recipient(&self, recipient: ManagedAddress) {
        self.require_non_zero_address(&recipient);
        self.interest_recipient().set(&recipient);
    }

    /// Replaces the risk parameters. All amounts and ratios are 18-decimal
    /// raw values.
    ///
    /// # Errors
    /// - `ERROR_INVALID_RISK_PARAMS`: See `validate_risk_params`.
    #[only_owner]
    #[endpoint(updateRiskParams)]
    fn update_risk_params(
        &self,
        mcr: BigUint,
        min_debt: BigUint,
        coll_gas_compensation: BigUint,
        liquidation_penalty_sp: BigUint,
        liquidation_penalty_redistribution: BigUint,
        redemption_fee: BigUint,
        max_annual_interest_rate: BigUint,
        max_price_stale_seconds: u64,
    ) {
        let current = self.protocol_params().get();
        let params = ProtocolParams {
            mcr: self.to_decimal_wad(mcr),
            min_debt: self.to_decimal_wad(min_debt),
            bold_gas_compensation: current.bold_gas_compensation,
            coll_gas_compensation: self.to_decimal_wad(coll_gas_compensation),
            liquidation_penalty_sp: self.to_decimal_wad(liquidation_penalty_sp),
            liquidation_penalty_redistribution: self
                .to_decimal_wad(liquidation_penalty_redistribution),
            redemption_fee: self.to_decimal_wad(redemption_fee),
            max_annual_interest_rate: self.to_decimal_wad(max_annual_interest_rate),
            max_price_stale_seconds,
        };

        self.validate_risk_params(&params);
        self.protocol_params().set(&params);
        self.risk_params_updated_event(&params);
    }
}
