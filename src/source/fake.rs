#![allow(clippy::unwrap_used)]

use std::sync::Mutex;

use rust_decimal::Decimal;

use super::{SourceError, TransactionSource};
use crate::models::{Transaction, TransactionDetail, TransactionId};

/// In-memory stand-in for the remote service.
pub(crate) struct FakeSource {
    transactions: Mutex<Vec<Transaction>>,
    pub(crate) fail_list: bool,
    pub(crate) fail_updates: bool,
}

impl FakeSource {
    pub(crate) fn new(transactions: Vec<Transaction>) -> Self {
        Self {
            transactions: Mutex::new(transactions),
            fail_list: false,
            fail_updates: false,
        }
    }

    pub(crate) fn snapshot(&self) -> Vec<Transaction> {
        self.transactions.lock().unwrap().clone()
    }
}

pub(crate) fn make_txn(id: i64, description: &str, amount: Decimal, category: &str) -> Transaction {
    Transaction {
        id,
        description: description.into(),
        amount,
        category: category.into(),
        internal: false,
        created_at: "2024-03-01T08:00:00Z".into(),
    }
}

impl TransactionSource for FakeSource {
    fn list(&self) -> Result<Vec<Transaction>, SourceError> {
        if self.fail_list {
            return Err(SourceError::Network("service unavailable".into()));
        }
        Ok(self.snapshot())
    }

    fn detail(&self, id: TransactionId) -> Result<TransactionDetail, SourceError> {
        let summary = self
            .snapshot()
            .into_iter()
            .find(|t| t.id == id)
            .ok_or_else(|| SourceError::NotFound(format!("transaction {id}")))?;
        Ok(TransactionDetail {
            summary,
            notes: None,
            payment_method: "bank_transfer".into(),
            merchant: None,
            reference_number: format!("REF-{id}"),
        })
    }

    fn set_internal(&self, id: TransactionId, internal: bool) -> Result<(), SourceError> {
        if self.fail_updates {
            return Err(SourceError::Network("service unavailable".into()));
        }
        let mut list = self.transactions.lock().unwrap();
        let txn = list
            .iter_mut()
            .find(|t| t.id == id)
            .ok_or_else(|| SourceError::NotFound(format!("transaction {id}")))?;
        txn.internal = internal;
        Ok(())
    }
}
