use crate::constants::*;

use std::{cell::Cell, rc::Rc};

use multiversx_sc::{
    contract_base::ContractBase,
    types::{BigUint, EgldOrEsdtTokenIdentifier, ManagedDecimal, MultiValueEncoded, NumDecimals},
};
use multiversx_sc_scenario::{
    api::StaticApi,
    imports::{ExpectMessage, TestAddress},
    DebugApi, ScenarioTxWhitebox, ScenarioWorld,
};

use multiversx_sc_modules::pause::PauseModule;
use trove_manager::{
    cache::Cache, config::ConfigModule, oracle::OracleModule, storage::Storage,
    views::ViewsModule, TroveManager, TroveStatus,
};

pub fn world() -> ScenarioWorld {
    let mut blockchain = ScenarioWorld::new();

    blockchain.register_contract(TROVE_MANAGER_PATH, trove_manager::ContractBuilder);

    blockchain
}

/// Raw units of a `BigUint` built inside a whitebox call.
pub fn to_u128(value: &BigUint<DebugApi>) -> u128 {
    value
        .to_bytes_be()
        .as_slice()
        .iter()
        .fold(0u128, |acc, byte| (acc << 8) | *byte as u128)
}

pub fn raw(value: &ManagedDecimal<DebugApi, NumDecimals>) -> u128 {
    to_u128(value.into_raw_units())
}

fn error_text(error: &[u8]) -> &str {
    core::str::from_utf8(error).unwrap()
}

pub struct TroveManagerTestState {
    pub world: ScenarioWorld,
}

impl Default for TroveManagerTestState {
    fn default() -> Self {
        Self::new()
    }
}

impl TroveManagerTestState {
    /// Deployed contract without stablecoin gas compensation and without a
    /// minimum debt, price at 2,000 and block time 0.
    pub fn new() -> Self {
        Self::with_gas_compensation(0)
    }

    pub fn with_gas_compensation(bold_gas_compensation: u128) -> Self {
        let mut world = world();
        world.current_block().block_timestamp(0);

        world.account(OWNER_ADDRESS).nonce(1);
        world.account(ORACLE_ADDRESS).nonce(1);
        world.account(INTEREST_RECIPIENT).nonce(1);
        world
            .account(LIQUIDATOR)
            .nonce(1)
            .esdt_balance(COLL_TOKEN, BigUint::<StaticApi>::from(INITIAL_COLL_BALANCE));
        for user in USERS.iter() {
            world
                .account(*user)
                .nonce(1)
                .esdt_balance(COLL_TOKEN, BigUint::<StaticApi>::from(INITIAL_COLL_BALANCE));
        }

        world
            .tx()
            .from(OWNER_ADDRESS)
            .raw_deploy()
            .code(TROVE_MANAGER_PATH)
            .new_address(TROVE_MANAGER_ADDRESS)
            .whitebox(trove_manager::contract_obj, |sc| {
                sc.init(
                    EgldOrEsdtTokenIdentifier::esdt(COLL_TOKEN.to_token_identifier()),
                    ORACLE_ADDRESS.to_managed_address(),
                    INTEREST_RECIPIENT.to_managed_address(),
                    BigUint::from(bold_gas_compensation),
                );
            });

        let mut state = Self { world };
        state.set_min_debt(0);
        state.set_price(2_000 * WAD);

        state
    }

    pub fn change_timestamp(&mut self, timestamp: u64) {
        self.world.current_block().block_timestamp(timestamp);
    }

    pub fn set_price(&mut self, price: u128) {
        self.world
            .tx()
            .from(ORACLE_ADDRESS)
            .to(TROVE_MANAGER_ADDRESS)
            .whitebox(trove_manager::contract_obj, |sc| {
                sc.submit_price(BigUint::from(price));
            });
    }

    pub fn set_price_error(&mut self, from: &TestAddress, price: u128, error: &[u8]) {
        self.world
            .tx()
            .from(*from)
            .to(TROVE_MANAGER_ADDRESS)
            .returns(ExpectMessage(error_text(error)))
            .whitebox(trove_manager::contract_obj, |sc| {
                sc.submit_price(BigUint::from(price));
            });
    }

    /// Default risk parameters with the given minimum debt.
    pub fn set_min_debt(&mut self, min_debt: u128) {
        self.update_risk_params(min_debt, COLL_GAS_COMPENSATION, REDEMPTION_FEE);
    }

    pub fn update_risk_params(
        &mut self,
        min_debt: u128,
        coll_gas_compensation: u128,
        redemption_fee: u128,
    ) {
        self.world
            .tx()
            .from(OWNER_ADDRESS)
            .to(TROVE_MANAGER_ADDRESS)
            .whitebox(trove_manager::contract_obj, |sc| {
                sc.update_risk_params(
                    BigUint::from(MCR),
                    BigUint::from(min_debt),
                    BigUint::from(coll_gas_compensation),
                    BigUint::from(LIQUIDATION_PENALTY_SP),
                    BigUint::from(LIQUIDATION_PENALTY_REDISTRIBUTION),
                    BigUint::from(redemption_fee),
                    BigUint::from(MAX_ANNUAL_INTEREST_RATE),
                    MAX_PRICE_STALE_SECONDS,
                );
            });
    }

    pub fn pause(&mut self) {
        self.world
            .tx()
            .from(OWNER_ADDRESS)
            .to(TROVE_MANAGER_ADDRESS)
            .whitebox(trove_manager::contract_obj, |sc| {
                sc.pause_endpoint();
            });
    }

    // Troves

    pub fn open_trove(&mut self, owner: &TestAddress, coll: u128, debt: u128, rate: u128) -> u64 {
        let trove_id = Rc::new(Cell::new(0u64));
        let sink = trove_id.clone();
        self.world
            .tx()
            .from(*owner)
            .to(TROVE_MANAGER_ADDRESS)
            .single_esdt(
                &COLL_TOKEN.to_token_identifier(),
                0,
                &BigUint::from(coll),
            )
            .whitebox(trove_manager::contract_obj, move |sc| {
                sink.set(sc.open_trove(BigUint::from(debt), BigUint::from(rate)));
            });

        trove_id.get()
    }

    pub fn open_trove_error(
        &mut self,
        owner: &TestAddress,
        coll: u128,
        debt: u128,
        rate: u128,
        error: &[u8],
    ) {
        self.world
            .tx()
            .from(*owner)
            .to(TROVE_MANAGER_ADDRESS)
            .single_esdt(
                &COLL_TOKEN.to_token_identifier(),
                0,
                &BigUint::from(coll),
            )
            .returns(ExpectMessage(error_text(error)))
            .whitebox(trove_manager::contract_obj, |sc| {
                sc.open_trove(BigUint::from(debt), BigUint::from(rate));
            });
    }

    /// Adjusts a Trove. A non-zero `coll_top_up` is attached as payment.
    pub fn adjust_trove(
        &mut self,
        owner: &TestAddress,
        trove_id: u64,
        coll_top_up: u128,
        coll_withdrawal: u128,
        debt_change: u128,
        is_debt_increase: bool,
    ) {
        self.adjust_trove_result(
            owner,
            trove_id,
            coll_top_up,
            coll_withdrawal,
            debt_change,
            is_debt_increase,
            None,
        );
    }

    #[allow(clippy::too_many_arguments)]
    pub fn adjust_trove_error(
        &mut self,
        owner: &TestAddress,
        trove_id: u64,
        coll_top_up: u128,
        coll_withdrawal: u128,
        debt_change: u128,
        is_debt_increase: bool,
        error: &[u8],
    ) {
        self.adjust_trove_result(
            owner,
            trove_id,
            coll_top_up,
            coll_withdrawal,
            debt_change,
            is_debt_increase,
            Some(error),
        );
    }

    #[allow(clippy::too_many_arguments)]
    fn adjust_trove_result(
        &mut self,
        owner: &TestAddress,
        trove_id: u64,
        coll_top_up: u128,
        coll_withdrawal: u128,
        debt_change: u128,
        is_debt_increase: bool,
        error: Option<&[u8]>,
    ) {
        let endpoint = move |sc: trove_manager::ContractObj<DebugApi>| {
            sc.adjust_trove(
                trove_id,
                BigUint::from(coll_withdrawal),
                BigUint::from(debt_change),
                is_debt_increase,
            );
        };

        let tx = self.world.tx().from(*owner).to(TROVE_MANAGER_ADDRESS);
        match (coll_top_up > 0, error) {
            (true, Some(error)) => {
                tx.single_esdt(
                    &COLL_TOKEN.to_token_identifier(),
                    0,
                    &BigUint::from(coll_top_up),
                )
                .returns(ExpectMessage(error_text(error)))
                .whitebox(trove_manager::contract_obj, endpoint);
            },
            (true, None) => {
                tx.single_esdt(
                    &COLL_TOKEN.to_token_identifier(),
                    0,
                    &BigUint::from(coll_top_up),
                )
                .whitebox(trove_manager::contract_obj, endpoint);
            },
            (false, Some(error)) => {
                tx.returns(ExpectMessage(error_text(error)))
                    .whitebox(trove_manager::contract_obj, endpoint);
            },
            (false, None) => {
                tx.whitebox(trove_manager::contract_obj, endpoint);
            },
        }
    }

    pub fn adjust_interest_rate(&mut self, owner: &TestAddress, trove_id: u64, rate: u128) {
        self.world
            .tx()
            .from(*owner)
            .to(TROVE_MANAGER_ADDRESS)
            .whitebox(trove_manager::contract_obj, |sc| {
                sc.adjust_trove_interest_rate(trove_id, BigUint::from(rate));
            });
    }

    pub fn close_trove(&mut self, owner: &TestAddress, trove_id: u64) {
        self.world
            .tx()
            .from(*owner)
            .to(TROVE_MANAGER_ADDRESS)
            .whitebox(trove_manager::contract_obj, |sc| {
                sc.close_trove(trove_id);
            });
    }

    pub fn close_trove_error(&mut self, owner: &TestAddress, trove_id: u64, error: &[u8]) {
        self.world
            .tx()
            .from(*owner)
            .to(TROVE_MANAGER_ADDRESS)
            .returns(ExpectMessage(error_text(error)))
            .whitebox(trove_manager::contract_obj, |sc| {
                sc.close_trove(trove_id);
            });
    }

    pub fn transfer_bold(&mut self, from: &TestAddress, to: &TestAddress, amount: u128) {
        let to = *to;
        self.world
            .tx()
            .from(*from)
            .to(TROVE_MANAGER_ADDRESS)
            .whitebox(trove_manager::contract_obj, move |sc| {
                sc.transfer_bold(to.to_managed_address(), BigUint::from(amount));
            });
    }

    // Liquidations and redemptions

    pub fn liquidate(&mut self, caller: &TestAddress, trove_ids: &[u64]) -> usize {
        let count = Rc::new(Cell::new(0usize));
        let sink = count.clone();
        let ids = trove_ids.to_vec();
        self.world
            .tx()
            .from(*caller)
            .to(TROVE_MANAGER_ADDRESS)
            .whitebox(trove_manager::contract_obj, move |sc| {
                sink.set(sc.liquidate(encoded_ids(&ids)));
            });

        count.get()
    }

    pub fn liquidate_error(&mut self, caller: &TestAddress, trove_ids: &[u64], error: &[u8]) {
        let ids = trove_ids.to_vec();
        self.world
            .tx()
            .from(*caller)
            .to(TROVE_MANAGER_ADDRESS)
            .returns(ExpectMessage(error_text(error)))
            .whitebox(trove_manager::contract_obj, move |sc| {
                sc.liquidate(encoded_ids(&ids));
            });
    }

    pub fn redeem(&mut self, redeemer: &TestAddress, amount: u128, trove_ids: &[u64]) -> u128 {
        let redeemed = Rc::new(Cell::new(0u128));
        let sink = redeemed.clone();
        let ids = trove_ids.to_vec();
        self.world
            .tx()
            .from(*redeemer)
            .to(TROVE_MANAGER_ADDRESS)
            .whitebox(trove_manager::contract_obj, move |sc| {
                let result = sc.redeem_collateral(BigUint::from(amount), encoded_ids(&ids));
                sink.set(to_u128(&result));
            });

        redeemed.get()
    }

    pub fn redeem_error(
        &mut self,
        redeemer: &TestAddress,
        amount: u128,
        trove_ids: &[u64],
        error: &[u8],
    ) {
        let ids = trove_ids.to_vec();
        self.world
            .tx()
            .from(*redeemer)
            .to(TROVE_MANAGER_ADDRESS)
            .returns(ExpectMessage(error_text(error)))
            .whitebox(trove_manager::contract_obj, move |sc| {
                sc.redeem_collateral(BigUint::from(amount), encoded_ids(&ids));
            });
    }

    pub fn claim_collateral(&mut self, owner: &TestAddress) {
        self.world
            .tx()
            .from(*owner)
            .to(TROVE_MANAGER_ADDRESS)
            .whitebox(trove_manager::contract_obj, |sc| {
                sc.claim_collateral();
            });
    }

    pub fn claim_collateral_error(&mut self, owner: &TestAddress, error: &[u8]) {
        self.world
            .tx()
            .from(*owner)
            .to(TROVE_MANAGER_ADDRESS)
            .returns(ExpectMessage(error_text(error)))
            .whitebox(trove_manager::contract_obj, |sc| {
                sc.claim_collateral();
            });
    }

    // Stability Pool

    pub fn provide_to_sp(&mut self, depositor: &TestAddress, amount: u128) {
        self.world
            .tx()
            .from(*depositor)
            .to(TROVE_MANAGER_ADDRESS)
            .whitebox(trove_manager::contract_obj, |sc| {
                sc.provide_to_sp(BigUint::from(amount));
            });
    }

    pub fn provide_to_sp_error(&mut self, depositor: &TestAddress, amount: u128, error: &[u8]) {
        self.world
            .tx()
            .from(*depositor)
            .to(TROVE_MANAGER_ADDRESS)
            .returns(ExpectMessage(error_text(error)))
            .whitebox(trove_manager::contract_obj, |sc| {
                sc.provide_to_sp(BigUint::from(amount));
            });
    }

    pub fn withdraw_from_sp(&mut self, depositor: &TestAddress, amount: u128) -> u128 {
        let withdrawn = Rc::new(Cell::new(0u128));
        let sink = withdrawn.clone();
        self.world
            .tx()
            .from(*depositor)
            .to(TROVE_MANAGER_ADDRESS)
            .whitebox(trove_manager::contract_obj, move |sc| {
                sink.set(to_u128(&sc.withdraw_from_sp(BigUint::from(amount))));
            });

        withdrawn.get()
    }

    pub fn withdraw_from_sp_error(&mut self, depositor: &TestAddress, amount: u128, error: &[u8]) {
        self.world
            .tx()
            .from(*depositor)
            .to(TROVE_MANAGER_ADDRESS)
            .returns(ExpectMessage(error_text(error)))
            .whitebox(trove_manager::contract_obj, |sc| {
                sc.withdraw_from_sp(BigUint::from(amount));
            });
    }

    pub fn withdraw_gain_to_trove(&mut self, depositor: &TestAddress, trove_id: u64) {
        self.world
            .tx()
            .from(*depositor)
            .to(TROVE_MANAGER_ADDRESS)
            .whitebox(trove_manager::contract_obj, |sc| {
                sc.withdraw_collateral_gain_to_trove(trove_id);
            });
    }

    pub fn withdraw_gain_to_trove_error(
        &mut self,
        depositor: &TestAddress,
        trove_id: u64,
        error: &[u8],
    ) {
        self.world
            .tx()
            .from(*depositor)
            .to(TROVE_MANAGER_ADDRESS)
            .returns(ExpectMessage(error_text(error)))
            .whitebox(trove_manager::contract_obj, |sc| {
                sc.withdraw_collateral_gain_to_trove(trove_id);
            });
    }

    /// Applies pending rewards to a Trove twice within one call and checks
    /// the second application changes nothing.
    pub fn apply_pending_rewards_twice(&mut self, trove_id: u64) {
        self.world
            .tx()
            .from(OWNER_ADDRESS)
            .to(TROVE_MANAGER_ADDRESS)
            .whitebox(trove_manager::contract_obj, |sc| {
                use trove_manager::redistribution::RedistributionModule;

                let mut trove = sc.troves(trove_id).get();
                let mut cache = Cache::new(&sc);

                sc.apply_pending_rewards(&mut trove, &mut cache);
                let once = trove.clone();
                let default_coll = cache.default_coll.clone();
                let default_debt = cache.default_debt.clone();
                let total_stakes = cache.total_stakes.clone();

                sc.apply_pending_rewards(&mut trove, &mut cache);
                assert_eq!(raw(&trove.coll), raw(&once.coll));
                assert_eq!(raw(&trove.debt), raw(&once.debt));
                assert_eq!(raw(&trove.stake), raw(&once.stake));
                assert_eq!(raw(&cache.default_coll), raw(&default_coll));
                assert_eq!(raw(&cache.default_debt), raw(&default_debt));
                assert_eq!(raw(&cache.total_stakes), raw(&total_stakes));
                drop(cache);

                sc.troves(trove_id).set(&trove);
            });
    }

    // Reads

    fn read<F>(&mut self, f: F) -> u128
    where
        F: FnOnce(&trove_manager::ContractObj<DebugApi>) -> ManagedDecimal<DebugApi, NumDecimals>
            + 'static,
    {
        let value = Rc::new(Cell::new(0u128));
        let sink = value.clone();
        self.world
            .query()
            .to(TROVE_MANAGER_ADDRESS)
            .whitebox(trove_manager::contract_obj, move |sc| {
                sink.set(raw(&f(&sc)));
            });

        value.get()
    }

    pub fn pending_coll_reward(&mut self, trove_id: u64) -> u128 {
        self.read(move |sc| sc.get_pending_collateral_reward(trove_id))
    }

    pub fn pending_debt_reward(&mut self, trove_id: u64) -> u128 {
        self.read(move |sc| sc.get_pending_debt_reward(trove_id))
    }

    pub fn entire_debt(&mut self, trove_id: u64) -> u128 {
        self.read(move |sc| sc.get_entire_debt_and_coll_view(trove_id).debt)
    }

    pub fn entire_coll(&mut self, trove_id: u64) -> u128 {
        self.read(move |sc| sc.get_entire_debt_and_coll_view(trove_id).coll)
    }

    pub fn trove_coll(&mut self, trove_id: u64) -> u128 {
        self.read(move |sc| sc.get_trove(trove_id).coll)
    }

    pub fn trove_debt(&mut self, trove_id: u64) -> u128 {
        self.read(move |sc| sc.get_trove(trove_id).debt)
    }

    pub fn trove_stake(&mut self, trove_id: u64) -> u128 {
        self.read(move |sc| sc.get_trove(trove_id).stake)
    }

    pub fn trove_status(&mut self, trove_id: u64) -> TroveStatus {
        let status = Rc::new(Cell::new(TroveStatus::NonExistent));
        let sink = status.clone();
        self.world
            .query()
            .to(TROVE_MANAGER_ADDRESS)
            .whitebox(trove_manager::contract_obj, move |sc| {
                sink.set(sc.get_trove(trove_id).status);
            });

        status.get()
    }

    pub fn open_trove_count(&mut self) -> usize {
        let count = Rc::new(Cell::new(0usize));
        let sink = count.clone();
        self.world
            .query()
            .to(TROVE_MANAGER_ADDRESS)
            .whitebox(trove_manager::contract_obj, move |sc| {
                sink.set(sc.open_troves().len());
            });

        count.get()
    }

    pub fn trove_icr(&mut self, trove_id: u64) -> u128 {
        self.read(move |sc| sc.get_trove_icr_view(trove_id))
    }

    pub fn compounded_deposit(&mut self, depositor: &TestAddress<'static>) -> u128 {
        let depositor = *depositor;
        self.read(move |sc| sc.get_compounded_deposit(&depositor.to_managed_address()))
    }

    pub fn collateral_gain(&mut self, depositor: &TestAddress<'static>) -> u128 {
        let depositor = *depositor;
        self.read(move |sc| sc.get_depositor_collateral_gain(&depositor.to_managed_address()))
    }

    pub fn bold_balance(&mut self, account: &TestAddress<'static>) -> u128 {
        let account = *account;
        self.read(move |sc| sc.get_bold_balance_view(&account.to_managed_address()))
    }

    pub fn coll_surplus(&mut self, owner: &TestAddress<'static>) -> u128 {
        let owner = *owner;
        self.read(move |sc| sc.get_coll_surplus_view(&owner.to_managed_address()))
    }

    pub fn total_stakes(&mut self) -> u128 {
        self.read(|sc| sc.get_total_stakes())
    }

    pub fn total_system_coll(&mut self) -> u128 {
        self.read(|sc| sc.get_total_system_collateral())
    }

    pub fn total_system_debt(&mut self) -> u128 {
        self.read(|sc| sc.get_total_system_debt())
    }

    pub fn total_bold_deposits(&mut self) -> u128 {
        self.read(|sc| sc.total_bold_deposits().get())
    }

    pub fn bold_total_supply(&mut self) -> u128 {
        self.read(|sc| sc.bold_total_supply().get())
    }

    pub fn gas_pool_bold(&mut self) -> u128 {
        self.read(|sc| sc.get_system_state().gas_pool_bold)
    }

    pub fn stability_pool_coll(&mut self) -> u128 {
        self.read(|sc| sc.get_system_state().stability_pool_coll)
    }

    pub fn default_coll(&mut self) -> u128 {
        self.read(|sc| sc.default_coll().get())
    }

    pub fn default_debt(&mut self) -> u128 {
        self.read(|sc| sc.default_debt().get())
    }

    pub fn p(&mut self) -> u128 {
        self.read(|sc| sc.p().get())
    }

    pub fn scale_and_epoch(&mut self) -> (u64, u64) {
        let scale = Rc::new(Cell::new((0u64, 0u64)));
        let sink = scale.clone();
        self.world
            .query()
            .to(TROVE_MANAGER_ADDRESS)
            .whitebox(trove_manager::contract_obj, move |sc| {
                sink.set((sc.current_scale().get(), sc.current_epoch().get()));
            });

        scale.get()
    }

    /// Collateral token balance of the contract.
    pub fn contract_coll_balance(&mut self) -> u128 {
        let balance = Rc::new(Cell::new(0u128));
        let sink = balance.clone();
        self.world
            .query()
            .to(TROVE_MANAGER_ADDRESS)
            .whitebox(trove_manager::contract_obj, move |sc| {
                let token = sc.collateral_token().get();
                sink.set(to_u128(&sc.blockchain().get_sc_balance(&token, 0)));
            });

        balance.get()
    }

    pub fn check_coll_balance(&mut self, account: &TestAddress, expected: u128) {
        self.world
            .check_account(*account)
            .esdt_balance(COLL_TOKEN, BigUint::<StaticApi>::from(expected));
    }

    /// Ledger identities that hold after every call:
    /// - supply = user balances + pool deposits + gas pool,
    /// - supply = active debt + default debt,
    /// - held collateral = active + default + pool gains + claimable surplus.
    pub fn check_conservation(&mut self, accounts: &[TestAddress<'static>]) {
        let mut balances = 0u128;
        for account in accounts.iter() {
            balances += self.bold_balance(account);
        }
        balances += self.bold_balance(&INTEREST_RECIPIENT);
        balances += self.bold_balance(&LIQUIDATOR);

        let supply = self.bold_total_supply();
        assert_eq!(
            supply,
            balances + self.total_bold_deposits() + self.gas_pool_bold()
        );
        assert_eq!(supply, self.total_system_debt());

        let held = Rc::new(Cell::new(0u128));
        let sink = held.clone();
        self.world
            .query()
            .to(TROVE_MANAGER_ADDRESS)
            .whitebox(trove_manager::contract_obj, move |sc| {
                let state = sc.get_system_state();
                sink.set(
                    raw(&state.active_coll)
                        + raw(&state.default_coll)
                        + raw(&state.stability_pool_coll)
                        + raw(&state.coll_surplus),
                );
            });
        assert_eq!(held.get(), self.contract_coll_balance());
    }

    pub fn is_paused(&mut self) -> bool {
        let paused = Rc::new(Cell::new(false));
        let sink = paused.clone();
        self.world
            .query()
            .to(TROVE_MANAGER_ADDRESS)
            .whitebox(trove_manager::contract_obj, move |sc| {
                sink.set(sc.is_paused());
            });

        paused.get()
    }
}

fn encoded_ids(ids: &[u64]) -> MultiValueEncoded<DebugApi, u64> {
    let mut encoded = MultiValueEncoded::new();
    for id in ids {
        encoded.push(*id);
    }
    encoded
}
