// Product/sum compounding, scale changes and epoch resets

use common_accounting::SharedAccountingModule;
use common_constants::{SCALE_FACTOR, WAD};
use common_math::SharedMathModule;
use common_structs::DepositSnapshot;
use multiversx_sc::types::{BigUint, ManagedDecimal, ManagedVec};
use multiversx_sc_scenario::api::StaticApi;

pub struct AccountingTester;
impl multiversx_sc::contract_base::ContractBase for AccountingTester {
    type Api = StaticApi;
}
impl SharedMathModule for AccountingTester {}
impl SharedAccountingModule for AccountingTester {}

fn wad(raw: u128) -> ManagedDecimal<StaticApi, usize> {
    ManagedDecimal::from_raw_units(BigUint::from(raw), 18)
}

fn double_wad(raw: u128) -> ManagedDecimal<StaticApi, usize> {
    ManagedDecimal::from_raw_units(BigUint::from(raw), 36)
}

fn snapshot(p: u128, s: u128, scale: u64, epoch: u64) -> DepositSnapshot<StaticApi> {
    DepositSnapshot {
        p: wad(p),
        s: double_wad(s),
        scale,
        epoch,
    }
}

#[test]
fn loss_per_unit_rounds_up_and_carries_the_overcharge() {
    let tester = AccountingTester;

    // 1,000 debt against 10,000 deposits
    let loss = tester.compute_offset_loss_per_unit(
        &wad(1_000 * WAD),
        &double_wad(0),
        &wad(10_000 * WAD),
    );
    assert_eq!(
        loss.per_unit.into_raw_units(),
        &BigUint::from(100_000_000_000_000_001u128)
    );
    assert_eq!(loss.error.into_raw_units(), &BigUint::from(10_000 * WAD));

    // The over-charge is deducted from the next loss
    let next = tester.compute_offset_loss_per_unit(
        &wad(1_000 * WAD),
        &loss.error,
        &wad(10_000 * WAD),
    );
    assert_eq!(
        next.per_unit.into_raw_units(),
        &BigUint::from(100_000_000_000_000_000u128)
    );
    assert_eq!(next.error.into_raw_units(), &BigUint::from(10_000 * WAD));
}

#[test]
fn absorbing_the_whole_pool_is_a_full_loss() {
    let tester = AccountingTester;
    let loss = tester.compute_offset_loss_per_unit(
        &wad(10_000 * WAD),
        &double_wad(12_345),
        &wad(10_000 * WAD),
    );
    assert_eq!(loss.per_unit.into_raw_units(), &BigUint::from(WAD));
    assert_eq!(loss.error.into_raw_units(), &BigUint::zero());

    let update = tester.compute_product_update(&wad(WAD / 2), &loss.per_unit);
    assert!(update.depleted);
    assert_eq!(update.p.into_raw_units(), &BigUint::from(WAD));
    assert_eq!(update.scale_increase, 0);
}

#[test]
fn gain_per_unit_carries_its_remainder() {
    let tester = AccountingTester;

    // 1 collateral over 3 deposited
    let gain = tester.compute_offset_gain_per_unit(&wad(WAD), &double_wad(0), &wad(3 * WAD));
    assert_eq!(
        gain.per_unit.into_raw_units(),
        &BigUint::from(333_333_333_333_333_333u128)
    );
    assert_eq!(gain.error.into_raw_units(), &BigUint::from(WAD));
}

#[test]
fn product_shrinks_without_scale_change() {
    let tester = AccountingTester;
    let update = tester.compute_product_update(&wad(WAD), &wad(100_000_000_000_000_001));

    assert!(!update.depleted);
    assert_eq!(update.scale_increase, 0);
    assert_eq!(
        update.p.into_raw_units(),
        &BigUint::from(899_999_999_999_999_999u128)
    );
}

#[test]
fn each_deep_offset_increments_the_scale_once() {
    let tester = AccountingTester;

    // Leaves 1e-10 of the pool: P would fall to ~1e8
    let first = tester.compute_product_update(&wad(WAD), &wad(WAD - 100_000_000 + 1));
    assert_eq!(first.scale_increase, 1);
    assert_eq!(
        first.p.into_raw_units(),
        &BigUint::from(99_999_999u128 * SCALE_FACTOR)
    );

    // Leaves 1e-10 again
    let second = tester.compute_product_update(&first.p, &wad(WAD - 100_000_000));
    assert_eq!(second.scale_increase, 1);
    assert_eq!(
        second.p.into_raw_units(),
        &BigUint::from(9_999_999_900_000_000u128)
    );
}

#[test]
fn compounded_deposit_reads_agree_incrementally_and_at_once() {
    let tester = AccountingTester;
    let initial = wad(10_000 * WAD);
    let original = snapshot(WAD, 0, 0, 0);

    let first = tester.compute_product_update(&wad(WAD), &wad(WAD - 100_000_000 + 1));
    let second = tester.compute_product_update(&first.p, &wad(WAD - 100_000_000));
    let final_scale = first.scale_increase + second.scale_increase;

    // Settled after the first offset, then read again at the end
    let after_first =
        tester.compute_compounded_deposit(&initial, &original, &first.p, first.scale_increase, 0);
    let resnapshot = DepositSnapshot {
        p: first.p.clone(),
        s: double_wad(0),
        scale: first.scale_increase,
        epoch: 0,
    };
    let incremental =
        tester.compute_compounded_deposit(&after_first, &resnapshot, &second.p, final_scale, 0);

    // Read once, from the original snapshot
    let one_shot =
        tester.compute_compounded_deposit(&initial, &original, &second.p, final_scale, 0);

    assert_eq!(
        after_first.into_raw_units(),
        &BigUint::from(999_999_990_000u128)
    );
    assert_eq!(incremental.into_raw_units(), one_shot.into_raw_units());
    assert_eq!(one_shot.into_raw_units(), &BigUint::from(99u64));
}

#[test]
fn compounded_deposit_never_grows() {
    let tester = AccountingTester;
    let initial = wad(5_000 * WAD);
    let original = snapshot(WAD, 0, 0, 0);

    let mut p = wad(WAD);
    let mut scale = 0u64;
    let mut previous = initial.clone();
    for loss in [
        1_000_000_000_000_000u128,
        250_000_000_000_000_000,
        999_999_000_000_000_000,
        500_000_000_000_000_000,
    ] {
        let update = tester.compute_product_update(&p, &wad(loss));
        p = update.p;
        scale += update.scale_increase;

        let current = tester.compute_compounded_deposit(&initial, &original, &p, scale, 0);
        assert!(current <= previous);
        previous = current;
    }
}

#[test]
fn deposits_from_older_epochs_are_worth_nothing() {
    let tester = AccountingTester;
    let compounded = tester.compute_compounded_deposit(
        &wad(1_000 * WAD),
        &snapshot(WAD, 0, 0, 0),
        &wad(WAD),
        0,
        1,
    );
    assert_eq!(compounded.into_raw_units(), &BigUint::zero());
}

#[test]
fn deposits_too_many_scales_behind_are_worth_nothing() {
    let tester = AccountingTester;
    let compounded = tester.compute_compounded_deposit(
        &wad(1_000 * WAD),
        &snapshot(WAD, 0, 0, 0),
        &wad(WAD),
        9,
        0,
    );
    assert_eq!(compounded.into_raw_units(), &BigUint::zero());
}

#[test]
fn collateral_gain_spans_a_scale_change() {
    let tester = AccountingTester;
    let initial = wad(10_000 * WAD);

    // Gains of 0.1 and 0.2 per unit recorded before and after a scale change
    let p0 = BigUint::<StaticApi>::from(WAD);
    let p1 = BigUint::<StaticApi>::from(99_999_999u128 * SCALE_FACTOR);
    let s0 = BigUint::<StaticApi>::from(WAD / 10) * &p0;
    let s1 = BigUint::<StaticApi>::from(WAD / 5) * &p1;

    let mut sums = ManagedVec::<StaticApi, BigUint<StaticApi>>::new();
    sums.push(s0.clone());
    sums.push(s1.clone());

    let gain = tester.compute_depositor_collateral_gain(&initial, &snapshot(WAD, 0, 0, 0), &sums);

    let expected = (BigUint::<StaticApi>::from(10_000 * WAD)
        * (s0 + s1 / BigUint::from(SCALE_FACTOR))
        / p0)
        / BigUint::from(WAD);
    assert_eq!(gain.into_raw_units(), &expected);
}

#[test]
fn collateral_gain_excludes_rewards_before_the_snapshot() {
    let tester = AccountingTester;
    let mut sums = ManagedVec::<StaticApi, BigUint<StaticApi>>::new();
    sums.push(BigUint::from(WAD) * BigUint::from(WAD));

    // Snapshot taken after the only reward
    let gain = tester.compute_depositor_collateral_gain(
        &wad(1_000 * WAD),
        &snapshot(WAD, WAD * WAD, 0, 0),
        &sums,
    );
    assert_eq!(gain.into_raw_units(), &BigUint::zero());
}
