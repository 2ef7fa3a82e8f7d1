use soroban_sdk::{contracttype, Address, String};

use crate::errors::WillError;
use crate::liveness::LivenessClock;

/// Returned by [`Will::next_possible_transfer_time`] when no payout can ever
/// happen again.
pub const NEVER: u64 = u64::MAX;

/// Phase of a will, derived from stored timestamps and balances on every read.
#[contracttype]
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum WillState {
    /// Owner proved liveness within the waiting period.
    Active,
    /// Owner lapsed but the last payout is too recent.
    InactiveWaiting,
    /// Heir may withdraw now.
    Payable,
    /// Balance or remaining limit cannot cover another payout.
    Depleted,
}

/// One owner's escrowed inheritance for one heir.
///
/// The record stores parameters and timestamps only. Whether the heir may be
/// paid is recomputed from `now` every time it is asked.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Will {
    pub id: u64,
    pub owner: Address,
    pub heir: Address,
    pub heir_name: String,
    pub heir_role: String,
    pub transfer_amount: i128,
    pub transfer_frequency: u64,
    pub limit: i128,
    pub balance: i128,
    pub total_paid: i128,
    pub clock: LivenessClock,
    pub last_transfer_time: u64,
    pub created_at: u64,
}

/// Checks the creation constraints shared by every will.
pub fn validate_terms(
    transfer_amount: i128,
    transfer_frequency: u64,
    waiting_period: u64,
    limit: i128,
    initial_deposit: i128,
) -> Result<(), WillError> {
    if transfer_amount <= 0 || transfer_frequency == 0 || waiting_period == 0 {
        return Err(WillError::InvalidParameters);
    }
    if limit < transfer_amount || initial_deposit < limit {
        return Err(WillError::InvalidParameters);
    }
    Ok(())
}

impl Will {
    #[allow(clippy::too_many_arguments)]
    pub fn create(
        id: u64,
        owner: Address,
        heir: Address,
        heir_name: String,
        heir_role: String,
        transfer_amount: i128,
        transfer_frequency: u64,
        waiting_period: u64,
        limit: i128,
        initial_deposit: i128,
        now: u64,
    ) -> Result<Self, WillError> {
        validate_terms(
            transfer_amount,
            transfer_frequency,
            waiting_period,
            limit,
            initial_deposit,
        )?;

        Ok(Self {
            id,
            owner,
            heir,
            heir_name,
            heir_role,
            transfer_amount,
            transfer_frequency,
            limit,
            balance: initial_deposit,
            total_paid: 0,
            clock: LivenessClock::start(now, waiting_period),
            last_transfer_time: 0,
            created_at: now,
        })
    }

    pub fn waiting_period(&self) -> u64 {
        self.clock.waiting_period
    }

    pub fn last_activity(&self) -> u64 {
        self.clock.last_activity
    }

    pub fn is_owner_active(&self, now: u64) -> bool {
        self.clock.is_alive(now)
    }

    /// Owner proof of life.
    pub fn confirm_activity(&mut self, now: u64) {
        self.clock.reset(now);
    }

    /// Amount the heir may still receive over the will's lifetime.
    pub fn remaining_limit(&self) -> i128 {
        self.limit - self.total_paid
    }

    /// Deposit above what future payouts can ever consume.
    pub fn surplus(&self) -> i128 {
        (self.balance - self.remaining_limit()).max(0)
    }

    fn frequency_gate_open(&self, now: u64) -> bool {
        self.last_transfer_time == 0
            || now.saturating_sub(self.last_transfer_time) >= self.transfer_frequency
    }

    fn is_depleted(&self) -> bool {
        self.balance < self.transfer_amount || self.remaining_limit() < self.transfer_amount
    }

    /// Reports the first unmet payout condition, in a fixed order: liveness,
    /// rate limit, balance, lifetime limit.
    pub fn check_payout(&self, now: u64) -> Result<(), WillError> {
        if self.is_owner_active(now) {
            return Err(WillError::OwnerStillActive);
        }
        if !self.frequency_gate_open(now) {
            return Err(WillError::TransferFrequencyLimit);
        }
        if self.balance < self.transfer_amount {
            return Err(WillError::InsufficientBalance);
        }
        if self.remaining_limit() < self.transfer_amount {
            return Err(WillError::LimitReached);
        }
        Ok(())
    }

    pub fn can_transfer_now(&self, now: u64) -> bool {
        self.check_payout(now).is_ok()
    }

    /// `0` when a payout is possible right now, [`NEVER`] when it never will
    /// be again, otherwise the later of liveness expiry and the end of the
    /// rate-limit window.
    pub fn next_possible_transfer_time(&self, now: u64) -> u64 {
        if self.is_depleted() {
            return NEVER;
        }
        if self.can_transfer_now(now) {
            return 0;
        }
        let rate_ready = if self.last_transfer_time == 0 {
            0
        } else {
            self.last_transfer_time
                .saturating_add(self.transfer_frequency)
        };
        self.clock.expires_at().max(rate_ready)
    }

    pub fn state(&self, now: u64) -> WillState {
        if self.is_depleted() {
            WillState::Depleted
        } else if self.is_owner_active(now) {
            WillState::Active
        } else if self.frequency_gate_open(now) {
            WillState::Payable
        } else {
            WillState::InactiveWaiting
        }
    }

    /// Re-validates eligibility and books one payout. Returns the amount to
    /// send to the heir. On error the record is untouched.
    pub fn record_payout(&mut self, now: u64) -> Result<i128, WillError> {
        self.check_payout(now)?;

        let balance = self
            .balance
            .checked_sub(self.transfer_amount)
            .ok_or(WillError::ArithmeticOverflow)?;
        let total_paid = self
            .total_paid
            .checked_add(self.transfer_amount)
            .ok_or(WillError::ArithmeticOverflow)?;

        self.balance = balance;
        self.total_paid = total_paid;
        self.last_transfer_time = now;
        Ok(self.transfer_amount)
    }

    /// Removes the surplus from the balance and returns it.
    pub fn take_surplus(&mut self) -> Result<i128, WillError> {
        let surplus = self.surplus();
        if surplus <= 0 {
            return Err(WillError::InsufficientBalance);
        }
        self.balance -= surplus;
        Ok(surplus)
    }
}
