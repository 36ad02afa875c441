mod transaction;

pub use transaction::{Transaction, TransactionDetail, TransactionId};
