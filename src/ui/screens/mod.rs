pub(crate) mod detail;
pub(crate) mod transactions;
