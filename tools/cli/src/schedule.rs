//! Offline payout timeline for a will, assuming the owner stops pinging at
//! time zero and the heir withdraws as soon as each payout unlocks.

use thiserror::Error;

/// Longest timeline the preview will print.
pub const MAX_INSTALLMENTS: i128 = 10_000;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WillTerms {
    pub deposit: i128,
    pub transfer_amount: i128,
    pub transfer_frequency: u64,
    pub waiting_period: u64,
    pub limit: i128,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Installment {
    /// 1-based payout number
    pub index: u32,
    /// Seconds after the owner's last ping
    pub due_after: u64,
    pub amount: i128,
    pub remaining_balance: i128,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ScheduleError {
    #[error("transfer amount must be positive")]
    NonPositiveAmount,
    #[error("transfer frequency and waiting period must be positive")]
    ZeroDuration,
    #[error("limit {limit} is below the transfer amount {amount}")]
    LimitBelowAmount { limit: i128, amount: i128 },
    #[error("deposit {deposit} is below the limit {limit}")]
    DepositBelowLimit { deposit: i128, limit: i128 },
    #[error("{0} payouts is too many to preview")]
    TooManyInstallments(i128),
}

impl WillTerms {
    /// Same creation constraints the contract enforces.
    pub fn validate(&self) -> Result<(), ScheduleError> {
        if self.transfer_amount <= 0 {
            return Err(ScheduleError::NonPositiveAmount);
        }
        if self.transfer_frequency == 0 || self.waiting_period == 0 {
            return Err(ScheduleError::ZeroDuration);
        }
        if self.limit < self.transfer_amount {
            return Err(ScheduleError::LimitBelowAmount {
                limit: self.limit,
                amount: self.transfer_amount,
            });
        }
        if self.deposit < self.limit {
            return Err(ScheduleError::DepositBelowLimit {
                deposit: self.deposit,
                limit: self.limit,
            });
        }
        Ok(())
    }

    pub fn installments(&self) -> Result<Vec<Installment>, ScheduleError> {
        self.validate()?;

        let count = self.limit / self.transfer_amount;
        if count > MAX_INSTALLMENTS {
            return Err(ScheduleError::TooManyInstallments(count));
        }
        let mut balance = self.deposit;
        let mut due_after = self.waiting_period;
        let mut result = Vec::new();

        for index in 1..=count {
            balance -= self.transfer_amount;
            result.push(Installment {
                index: u32::try_from(index).unwrap_or(u32::MAX),
                due_after,
                amount: self.transfer_amount,
                remaining_balance: balance,
            });
            due_after = due_after.saturating_add(self.transfer_frequency);
        }
        Ok(result)
    }

    /// Deposit above the payout commitment, which the owner can reclaim.
    /// A limit remainder smaller than one installment stays committed.
    pub fn surplus(&self) -> i128 {
        self.deposit - self.limit
    }
}
