use crate::models::Transaction;

/// Case-insensitive substring match against description, category and the
/// printed amount.
fn matches(txn: &Transaction, needle: &str) -> bool {
    txn.description.to_lowercase().contains(needle)
        || txn.category.to_lowercase().contains(needle)
        || txn.amount_text().contains(needle)
}

/// Order-preserving subsequence of `transactions` matching `query`. The query
/// is matched as given; callers decide what an empty query means.
pub(crate) fn filter(transactions: &[Transaction], query: &str) -> Vec<Transaction> {
    let needle = query.to_lowercase();
    transactions
        .iter()
        .filter(|txn| matches(txn, &needle))
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests;
