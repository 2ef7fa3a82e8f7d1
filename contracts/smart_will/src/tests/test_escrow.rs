#![cfg(test)]

use crate::errors::WillError;
use crate::escrow::{validate_terms, Will, WillState, NEVER};
use soroban_sdk::{testutils::Address as _, Address, Env, String};

const START: u64 = 1_000;

fn will(env: &Env, transfer_amount: i128, limit: i128, deposit: i128) -> Will {
    Will::create(
        1,
        Address::generate(env),
        Address::generate(env),
        String::from_str(env, "Alice"),
        String::from_str(env, "daughter"),
        transfer_amount,
        300,
        600,
        limit,
        deposit,
        START,
    )
    .unwrap()
}

#[test]
fn test_create_sets_initial_state() {
    let env = Env::default();
    let will = will(&env, 100, 500, 500);

    assert_eq!(will.balance, 500);
    assert_eq!(will.total_paid, 0);
    assert_eq!(will.last_activity(), START);
    assert_eq!(will.waiting_period(), 600);
    assert_eq!(will.last_transfer_time, 0);
    assert_eq!(will.created_at, START);
    assert_eq!(will.state(START), WillState::Active);
}

#[test]
fn test_validate_terms_rejects_bad_parameters() {
    assert_eq!(validate_terms(0, 300, 600, 500, 500), Err(WillError::InvalidParameters));
    assert_eq!(validate_terms(-5, 300, 600, 500, 500), Err(WillError::InvalidParameters));
    assert_eq!(validate_terms(100, 0, 600, 500, 500), Err(WillError::InvalidParameters));
    assert_eq!(validate_terms(100, 300, 0, 500, 500), Err(WillError::InvalidParameters));
    // limit below the per-payout amount
    assert_eq!(validate_terms(100, 300, 600, 99, 500), Err(WillError::InvalidParameters));
    // deposit below the limit
    assert_eq!(validate_terms(100, 300, 600, 500, 499), Err(WillError::InvalidParameters));

    assert_eq!(validate_terms(100, 300, 600, 100, 100), Ok(()));
    assert_eq!(validate_terms(100, 300, 600, 500, 900), Ok(()));
}

#[test]
fn test_owner_activity_blocks_payout_regardless_of_balance() {
    let env = Env::default();
    let will = will(&env, 100, 500, 500);

    for t in START..START + 600 {
        assert!(!will.can_transfer_now(t));
    }
    assert_eq!(will.check_payout(START + 599), Err(WillError::OwnerStillActive));
    assert!(will.can_transfer_now(START + 600));
}

#[test]
fn test_payout_books_amount_and_time() {
    let env = Env::default();
    let mut will = will(&env, 100, 500, 500);

    let paid = will.record_payout(START + 601).unwrap();
    assert_eq!(paid, 100);
    assert_eq!(will.balance, 400);
    assert_eq!(will.total_paid, 100);
    assert_eq!(will.last_transfer_time, START + 601);
}

#[test]
fn test_failed_payout_leaves_record_untouched() {
    let env = Env::default();
    let mut will = will(&env, 100, 500, 500);
    let before = will.clone();

    assert_eq!(will.record_payout(START + 10), Err(WillError::OwnerStillActive));
    assert_eq!(will, before);

    will.record_payout(START + 601).unwrap();
    let after_first = will.clone();
    assert_eq!(
        will.record_payout(START + 700),
        Err(WillError::TransferFrequencyLimit)
    );
    assert_eq!(will, after_first);
}

#[test]
fn test_state_transitions() {
    let env = Env::default();
    let mut will = will(&env, 100, 200, 200);

    assert_eq!(will.state(START), WillState::Active);
    assert_eq!(will.state(START + 600), WillState::Payable);

    will.record_payout(START + 600).unwrap();
    assert_eq!(will.state(START + 600), WillState::InactiveWaiting);
    assert_eq!(will.state(START + 900), WillState::Payable);

    will.confirm_activity(START + 900);
    assert_eq!(will.state(START + 900), WillState::Active);

    will.record_payout(START + 1_500).unwrap();
    assert_eq!(will.balance, 0);
    assert_eq!(will.state(START + 1_500), WillState::Depleted);
    assert_eq!(will.state(START + 100_000), WillState::Depleted);
}

#[test]
fn test_next_possible_transfer_time() {
    let env = Env::default();
    let mut will = will(&env, 100, 500, 500);

    // Only the liveness window matters before the first payout.
    assert_eq!(will.next_possible_transfer_time(START), START + 600);
    assert_eq!(will.next_possible_transfer_time(START + 600), 0);

    will.record_payout(START + 601).unwrap();
    assert_eq!(will.next_possible_transfer_time(START + 601), START + 901);

    // A ping pushes the liveness expiry past the rate window.
    will.confirm_activity(START + 700);
    assert_eq!(will.next_possible_transfer_time(START + 700), START + 1_300);
}

#[test]
fn test_next_possible_transfer_time_never_when_depleted() {
    let env = Env::default();
    let mut will = will(&env, 100, 100, 100);

    will.record_payout(START + 600).unwrap();
    assert_eq!(will.next_possible_transfer_time(START + 600), NEVER);
    assert_eq!(will.next_possible_transfer_time(START + 10_000), NEVER);
}

#[test]
fn test_limit_caps_total_paid_when_overfunded() {
    let env = Env::default();
    let mut will = will(&env, 100, 200, 1_000);
    let mut now = START + 600;

    will.record_payout(now).unwrap();
    now += 300;
    will.record_payout(now).unwrap();
    now += 300;

    assert_eq!(will.total_paid, 200);
    assert_eq!(will.balance, 800);
    assert_eq!(will.check_payout(now), Err(WillError::LimitReached));
    assert_eq!(will.state(now), WillState::Depleted);
}

#[test]
fn test_insufficient_balance_reported_before_limit() {
    let env = Env::default();
    let mut will = will(&env, 100, 100, 100);

    will.record_payout(START + 600).unwrap();
    assert_eq!(
        will.check_payout(START + 900),
        Err(WillError::InsufficientBalance)
    );
}

#[test]
fn test_surplus_is_deposit_above_commitment() {
    let env = Env::default();
    let mut will = will(&env, 100, 300, 1_000);
    assert_eq!(will.surplus(), 700);

    will.record_payout(START + 600).unwrap();
    // 900 left, 200 still owed to the heir
    assert_eq!(will.surplus(), 700);

    assert_eq!(will.take_surplus(), Ok(700));
    assert_eq!(will.balance, 200);
    assert_eq!(will.remaining_limit(), 200);
    assert_eq!(will.take_surplus(), Err(WillError::InsufficientBalance));
}

#[test]
fn test_repeated_pings_keep_owner_active() {
    let env = Env::default();
    let mut will = will(&env, 100, 500, 500);

    will.confirm_activity(START + 500);
    will.confirm_activity(START + 500);
    will.confirm_activity(START + 500);

    assert!(will.is_owner_active(START + 1_099));
    assert!(!will.is_owner_active(START + 1_100));
}
