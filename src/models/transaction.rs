use rust_decimal::Decimal;
use serde::Deserialize;

/// Identifier assigned by the remote transaction service.
pub type TransactionId = i64;

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    pub id: TransactionId,
    pub description: String,
    pub amount: Decimal,
    pub category: String,
    pub internal: bool,
    pub created_at: String,
}

impl Transaction {
    /// Non-negative amounts are credits.
    pub fn is_credit(&self) -> bool {
        self.amount >= Decimal::ZERO
    }

    /// The amount as it is printed by the service, without trailing zeros
    /// (`-4.50` prints as `-4.5`, `2000.00` as `2000`).
    pub fn amount_text(&self) -> String {
        self.amount.normalize().to_string()
    }

    pub fn kind(&self) -> TransactionKind {
        TransactionKind::from_flag(self.internal)
    }
}

/// Full record for a single transaction, fetched on demand.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionDetail {
    #[serde(flatten)]
    pub summary: Transaction,
    #[serde(default)]
    pub notes: Option<String>,
    pub payment_method: String,
    #[serde(default)]
    pub merchant: Option<String>,
    pub reference_number: String,
}

impl TransactionDetail {
    pub fn id(&self) -> TransactionId {
        self.summary.id
    }

    pub fn merchant_label(&self) -> &str {
        match self.merchant.as_deref() {
            Some(m) if !m.is_empty() => m,
            _ => "N/A",
        }
    }

    /// Notes worth showing; empty annotations count as absent.
    pub fn notes(&self) -> Option<&str> {
        self.notes.as_deref().filter(|n| !n.is_empty())
    }

    pub fn payment_method_label(&self) -> String {
        humanize_token(&self.payment_method)
    }
}

/// `bank_transfer` → `BANK TRANSFER`. Every underscore is replaced, not just
/// the first.
pub fn humanize_token(token: &str) -> String {
    token.replace('_', " ").to_uppercase()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransactionKind {
    Internal,
    External,
}

impl TransactionKind {
    pub fn from_flag(internal: bool) -> Self {
        if internal {
            Self::Internal
        } else {
            Self::External
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Internal => "Internal Transfer",
            Self::External => "External Transaction",
        }
    }
}

impl std::fmt::Display for TransactionKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
