#![no_std]

multiversx_sc::imports!();
multiversx_sc::derive_imports!();

pub mod cache;
pub mod config;
pub mod helpers;
pub mod oracle;
pub mod positions;
pub mod redistribution;
pub mod stability_pool;
pub mod storage;
pub mod utils;
pub mod validation;
pub mod views;

use cache::Cache;
use common_constants::{
    DEFAULT_COLL_GAS_COMPENSATION, DEFAULT_LIQUIDATION_PENALTY_REDISTRIBUTION,
    DEFAULT_LIQUIDATION_PENALTY_SP, DEFAULT_MAX_ANNUAL_INTEREST_RATE,
    DEFAULT_MAX_PRICE_STALE_SECONDS, DEFAULT_MCR, DEFAULT_MIN_DEBT, DEFAULT_REDEMPTION_FEE,
};
pub use common_errors::*;
pub use common_structs::*;
use positions::adjust::TroveAdjustment;

#[multiversx_sc::contract]
pub trait TroveManager:
    positions::account::PositionAccountModule
    + positions::open::PositionOpenModule
    + positions::adjust::PositionAdjustModule
    + positions::close::PositionCloseModule
    + positions::liquidation::PositionLiquidationModule
    + positions::redeem::PositionRedeemModule
    + stability_pool::StabilityPoolModule
    + redistribution::RedistributionModule
    + config::ConfigModule
    + common_events::EventsModule
    + storage::Storage
    + oracle::OracleModule
    + validation::ValidationModule
    + utils::TroveUtilsModule
    + views::ViewsModule
    + helpers::MathsModule
    + common_math::SharedMathModule
    + common_accounting::SharedAccountingModule
    + common_rates::InterestRates
    + multiversx_sc_modules::pause::PauseModule
{
    /// Initializes the Trove manager for a single collateral token.
    ///
    /// Risk parameters start at their defaults and can be changed with
    /// `updateRiskParams`. The stablecoin gas compensation cannot.
    ///
    /// # Arguments
    /// - `collateral_token`: Token accepted as Trove collateral.
    /// - `price_oracle`: Address allowed to call `submitPrice`.
    /// - `interest_recipient`: Address receiving minted interest.
    /// - `bold_gas_compensation`: Stablecoin reserved per Trove for its liquidator (18 decimals).
    #[init]
    fn init(
        &self,
        collateral_token: EgldOrEsdtTokenIdentifier,
        price_oracle: ManagedAddress,
        interest_recipient: ManagedAddress,
        bold_gas_compensation: BigUint,
    ) {
        self.require_non_zero_address(&price_oracle);
        self.require_non_zero_address(&interest_recipient);

        self.collateral_token().set(&collateral_token);
        self.price_oracle_address().set(&price_oracle);
        self.interest_recipient().set(&interest_recipient);

        let params = ProtocolParams {
            mcr: self.to_decimal_wad(BigUint::from(DEFAULT_MCR)),
            min_debt: self.to_decimal_wad(BigUint::from(DEFAULT_MIN_DEBT)),
            bold_gas_compensation: self.to_decimal_wad(bold_gas_compensation),
            coll_gas_compensation: self
                .to_decimal_wad(BigUint::from(DEFAULT_COLL_GAS_COMPENSATION)),
            liquidation_penalty_sp: self
                .to_decimal_wad(BigUint::from(DEFAULT_LIQUIDATION_PENALTY_SP)),
            liquidation_penalty_redistribution: self
                .to_decimal_wad(BigUint::from(DEFAULT_LIQUIDATION_PENALTY_REDISTRIBUTION)),
            redemption_fee: self.to_decimal_wad(BigUint::from(DEFAULT_REDEMPTION_FEE)),
            max_annual_interest_rate: self
                .to_decimal_wad(BigUint::from(DEFAULT_MAX_ANNUAL_INTEREST_RATE)),
            max_price_stale_seconds: DEFAULT_MAX_PRICE_STALE_SECONDS,
        };
        self.validate_risk_params(&params);
        self.protocol_params().set(&params);

        // Every singleton ledger value gets an explicit zero so the cache can
        // load it unconditionally.
        let zero = self.wad_zero();
        let error_zero = self.double_wad_zero();
        self.l_coll().set(&zero);
        self.l_bold_debt().set(&zero);
        self.last_coll_error_redistribution().set(&error_zero);
        self.last_bold_debt_error_redistribution().set(&error_zero);
        self.total_stakes().set(&zero);
        self.total_stakes_snapshot().set(&zero);
        self.total_collateral_snapshot().set(&zero);
        self.active_coll().set(&zero);
        self.active_debt().set(&zero);
        self.default_coll().set(&zero);
        self.default_debt().set(&zero);
        self.stability_pool_coll().set(&zero);
        self.coll_surplus_total().set(&zero);
        self.gas_pool_bold().set(&zero);
        self.bold_total_supply().set(&zero);
        self.total_bold_deposits().set(&zero);
        self.p().set(self.wad());
        self.current_scale().set(0u64);
        self.current_epoch().set(0u64);
        self.last_coll_error_offset().set(&error_zero);
        self.last_bold_loss_error_offset().set(&error_zero);
    }

    #[upgrade]
    fn upgrade(&self) {}

    /// Opens a Trove with the attached collateral.
    ///
    /// # Arguments
    /// - `debt`: Stablecoin to mint to the caller (18 decimals).
    /// - `annual_interest_rate`: Yearly simple interest on the debt (18 decimals).
    ///
    /// # Payment
    /// - The collateral token.
    #[payable]
    #[endpoint(openTrove)]
    fn open_trove(&self, debt: BigUint, annual_interest_rate: BigUint) -> u64 {
        self.require_active_contract();
        let mut cache = Cache::new(self);
        let caller = self.blockchain().get_caller();
        let coll = self.get_collateral_payment();

        self.process_open_trove(
            &caller,
            coll,
            self.to_decimal_wad(debt),
            self.to_decimal_wad(annual_interest_rate),
            &mut cache,
        )
    }

    /// Adjusts collateral and debt of one of the caller's Troves.
    ///
    /// # Arguments
    /// - `trove_id`: Trove to adjust.
    /// - `coll_withdrawal`: Collateral to take out. Zero when topping up.
    /// - `debt_change`: Stablecoin to borrow or repay.
    /// - `is_debt_increase`: Borrow when true, repay when false.
    ///
    /// # Payment
    /// - Optional collateral top-up.
    #[payable]
    #[endpoint(adjustTrove)]
    fn adjust_trove(
        &self,
        trove_id: u64,
        coll_withdrawal: BigUint,
        debt_change: BigUint,
        is_debt_increase: bool,
    ) {
        let mut cache = Cache::new(self);
        let caller = self.blockchain().get_caller();
        let adjustment = TroveAdjustment {
            coll_top_up: self.get_collateral_payment(),
            coll_withdrawal: self.to_decimal_wad(coll_withdrawal),
            debt_change: self.to_decimal_wad(debt_change),
            is_debt_increase,
        };

        self.process_adjust_trove(&caller, trove_id, adjustment, &mut cache);
    }

    #[endpoint(adjustTroveInterestRate)]
    fn adjust_trove_interest_rate(&self, trove_id: u64, new_annual_interest_rate: BigUint) {
        let mut cache = Cache::new(self);
        let caller = self.blockchain().get_caller();
        self.process_adjust_interest_rate(
            &caller,
            trove_id,
            self.to_decimal_wad(new_annual_interest_rate),
            &mut cache,
        );
    }

    /// Repays the Trove's debt from the caller's balance and returns its collateral.
    #[endpoint(closeTrove)]
    fn close_trove(&self, trove_id: u64) {
        let mut cache = Cache::new(self);
        let caller = self.blockchain().get_caller();
        self.process_close_trove(&caller, trove_id, &mut cache);
    }

    /// Liquidates the listed Troves that are under the minimum collateral ratio.
    #[endpoint(liquidate)]
    fn liquidate(&self, trove_ids: MultiValueEncoded<u64>) -> usize {
        let mut cache = Cache::new(self);
        let caller = self.blockchain().get_caller();
        self.process_liquidate(&caller, &trove_ids.to_vec(), &mut cache)
    }

    /// Redeems `amount` stablecoin for collateral against the listed Troves, in order.
    #[endpoint(redeemCollateral)]
    fn redeem_collateral(&self, amount: BigUint, trove_ids: MultiValueEncoded<u64>) -> BigUint {
        let mut cache = Cache::new(self);
        let caller = self.blockchain().get_caller();
        let redeemed = self.process_redeem(
            &caller,
            &self.to_decimal_wad(amount),
            &trove_ids.to_vec(),
            &mut cache,
        );

        redeemed.into_raw_units().clone()
    }

    #[endpoint(claimCollateral)]
    fn claim_collateral(&self) -> BigUint {
        let mut cache = Cache::new(self);
        let caller = self.blockchain().get_caller();
        let claimed = self.process_claim_collateral(&caller, &mut cache);

        claimed.into_raw_units().clone()
    }

    #[endpoint(provideToSP)]
    fn provide_to_sp(&self, amount: BigUint) {
        let mut cache = Cache::new(self);
        let caller = self.blockchain().get_caller();
        self.process_provide_to_sp(&caller, &self.to_decimal_wad(amount), &mut cache);
    }

    /// Withdraws up to `amount` from the caller's compounded deposit.
    /// Collateral gains are always paid out.
    #[endpoint(withdrawFromSP)]
    fn withdraw_from_sp(&self, amount: BigUint) -> BigUint {
        let mut cache = Cache::new(self);
        let caller = self.blockchain().get_caller();
        let withdrawn =
            self.process_withdraw_from_sp(&caller, &self.to_decimal_wad(amount), &mut cache);

        withdrawn.into_raw_units().clone()
    }

    #[endpoint(withdrawCollateralGainToTrove)]
    fn withdraw_collateral_gain_to_trove(&self, trove_id: u64) {
        let mut cache = Cache::new(self);
        let caller = self.blockchain().get_caller();
        self.process_redirect_gain_to_trove(&caller, trove_id, &mut cache);
    }

    /// Transfers stablecoin between ledger accounts.
    #[endpoint(transferBold)]
    fn transfer_bold(&self, to: ManagedAddress, amount: BigUint) {
        self.require_non_zero_address(&to);
        let caller = self.blockchain().get_caller();
        self.move_bold(&caller, &to, &self.to_decimal_wad(amount));
    }
}
