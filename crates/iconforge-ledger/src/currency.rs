//! Coin balance with a passive-income accrual timestamp.
//!
//! The account itself does no time arithmetic. The accrual clock in
//! `iconforge-core` decides how many whole intervals have elapsed and hands
//! back the units earned plus the advanced timestamp, which are applied here
//! together via [`CurrencyAccount::apply_accrual`].

/// A non-negative coin balance and the instant passive income was last
/// accrued from (Unix seconds).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CurrencyAccount {
    /// Coins owned.
    balance: u64,
    /// Unix timestamp (seconds) that passive income is measured from.
    last_accrual_timestamp: i64,
}

impl CurrencyAccount {
    /// Create an empty account whose accrual clock starts at `now_unix`.
    pub const fn new(now_unix: i64) -> Self {
        Self {
            balance: 0,
            last_accrual_timestamp: now_unix,
        }
    }

    /// Restore an account from persisted parts.
    pub const fn from_parts(balance: u64, last_accrual_timestamp: i64) -> Self {
        Self {
            balance,
            last_accrual_timestamp,
        }
    }

    /// Return the current balance.
    pub const fn balance(&self) -> u64 {
        self.balance
    }

    /// Return the timestamp passive income is measured from.
    pub const fn last_accrual_timestamp(&self) -> i64 {
        self.last_accrual_timestamp
    }

    /// Add `amount` coins, saturating at `u64::MAX`. Returns the new balance.
    pub const fn deposit(&mut self, amount: u64) -> u64 {
        self.balance = self.balance.saturating_add(amount);
        self.balance
    }

    /// Spend `amount` coins if the balance covers it.
    ///
    /// Returns `false` and leaves the balance untouched otherwise.
    pub const fn try_spend(&mut self, amount: u64) -> bool {
        match self.balance.checked_sub(amount) {
            Some(remaining) => {
                self.balance = remaining;
                true
            }
            None => false,
        }
    }

    /// Credit accrued units and move the accrual timestamp forward.
    ///
    /// Earlier timestamps are ignored so a skewed clock can never rewind
    /// the account and pay the same interval twice. Returns the new balance.
    pub const fn apply_accrual(&mut self, units: u64, new_timestamp: i64) -> u64 {
        if new_timestamp > self.last_accrual_timestamp {
            self.last_accrual_timestamp = new_timestamp;
        }
        self.deposit(units)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_account_is_empty() {
        let account = CurrencyAccount::new(1_000);
        assert_eq!(account.balance(), 0);
        assert_eq!(account.last_accrual_timestamp(), 1_000);
    }

    #[test]
    fn spend_never_goes_negative() {
        let mut account = CurrencyAccount::from_parts(5, 0);
        assert!(!account.try_spend(6));
        assert_eq!(account.balance(), 5);
        assert!(account.try_spend(5));
        assert_eq!(account.balance(), 0);
    }

    #[test]
    fn deposit_saturates() {
        let mut account = CurrencyAccount::from_parts(u64::MAX, 0);
        assert_eq!(account.deposit(10), u64::MAX);
    }

    #[test]
    fn accrual_never_rewinds_timestamp() {
        let mut account = CurrencyAccount::from_parts(0, 7_200);
        account.apply_accrual(1, 3_600);
        assert_eq!(account.last_accrual_timestamp(), 7_200);
        assert_eq!(account.balance(), 1);
        account.apply_accrual(2, 10_800);
        assert_eq!(account.last_accrual_timestamp(), 10_800);
        assert_eq!(account.balance(), 3);
    }
}
