//! The one balance rule. Both the saldo recomputation and the report's
//! net flow go through [`BalanceComponents::total`].

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Admin fee charged on a credit-card cash advance, in percent.
pub const CREDIT_ADVANCE_FEE_PERCENT: i64 = 3;

/// Per-table sums for one user, in rupiah.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct BalanceComponents {
    /// Σ modal.nominal
    pub deposits: i64,
    /// Σ (transfer.nominal + transfer.biaya), setor admin rows included
    pub transfers: i64,
    /// Σ transfer_debit.biaya
    pub debit_fees: i64,
    /// Σ tarik_tunai.nominal_tarik
    pub withdrawal_amounts: i64,
    /// Σ tarik_tunai.biaya_tarik
    pub withdrawal_fees: i64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("balance arithmetic overflowed")]
pub struct BalanceOverflow;

impl BalanceComponents {
    pub fn withdrawal_net(&self) -> Result<i64, BalanceOverflow> {
        self.withdrawal_fees
            .checked_sub(self.withdrawal_amounts)
            .ok_or(BalanceOverflow)
    }

    pub fn total(&self) -> Result<i64, BalanceOverflow> {
        let withdrawal_net = self.withdrawal_net()?;

        self.deposits
            .checked_add(self.transfers)
            .and_then(|sum| sum.checked_add(self.debit_fees))
            .and_then(|sum| sum.checked_add(withdrawal_net))
            .ok_or(BalanceOverflow)
    }
}

/// 3% of the nominal, rounded half-up to the whole rupiah.
pub fn credit_advance_fee(nominal: i64) -> Result<i64, BalanceOverflow> {
    nominal
        .checked_mul(CREDIT_ADVANCE_FEE_PERCENT)
        .and_then(|v| v.checked_add(50))
        .map(|v| v.div_euclid(100))
        .ok_or(BalanceOverflow)
}

/// What the customer receives after the admin fee.
pub fn credit_advance_net(nominal: i64) -> Result<i64, BalanceOverflow> {
    let fee = credit_advance_fee(nominal)?;
    nominal.checked_sub(fee).ok_or(BalanceOverflow)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn total_follows_the_ledger_formula() {
        let components = BalanceComponents {
            deposits: 1_000_000,
            transfers: 502_500,
            debit_fees: 7_500,
            withdrawal_amounts: 300_000,
            withdrawal_fees: 5_000,
        };

        assert_eq!(components.withdrawal_net().unwrap(), -295_000);
        assert_eq!(components.total().unwrap(), 1_215_000);
    }

    #[test]
    fn empty_ledger_is_zero() {
        assert_eq!(BalanceComponents::default().total().unwrap(), 0);
    }

    #[test]
    fn withdrawals_can_push_balance_negative() {
        let components = BalanceComponents {
            withdrawal_amounts: 200_000,
            withdrawal_fees: 2_500,
            ..Default::default()
        };

        assert_eq!(components.total().unwrap(), -197_500);
    }

    #[test]
    fn overflow_is_reported_not_wrapped() {
        let components = BalanceComponents {
            deposits: i64::MAX,
            transfers: 1,
            ..Default::default()
        };
        assert_eq!(components.total(), Err(BalanceOverflow));

        let components = BalanceComponents {
            withdrawal_amounts: i64::MAX,
            withdrawal_fees: -2,
            ..Default::default()
        };
        assert_eq!(components.total(), Err(BalanceOverflow));
    }

    #[test]
    fn credit_advance_fee_rounds_half_up() {
        assert_eq!(credit_advance_fee(1_000_000).unwrap(), 30_000);
        // 3% of 150 is 4.5
        assert_eq!(credit_advance_fee(150).unwrap(), 5);
        // 3% of 149 is 4.47
        assert_eq!(credit_advance_fee(149).unwrap(), 4);
        assert_eq!(credit_advance_net(1_000_000).unwrap(), 970_000);
        assert_eq!(credit_advance_net(150).unwrap(), 145);
        assert!(credit_advance_fee(i64::MAX).is_err());
    }
}
