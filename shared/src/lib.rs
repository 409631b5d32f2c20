use serde::{Deserialize, Serialize};

/// Transaction polarity. The backend encodes this as a numeric code on the
/// wire: 0 = Credit (increases the balance), 1 = Debit (decreases it).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum TransactionType {
    Credit,
    Debit,
}

impl From<TransactionType> for u8 {
    fn from(value: TransactionType) -> Self {
        match value {
            TransactionType::Credit => 0,
            TransactionType::Debit => 1,
        }
    }
}

impl TryFrom<u8> for TransactionType {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(TransactionType::Credit),
            1 => Ok(TransactionType::Debit),
            other => Err(format!("unknown transaction type code: {}", other)),
        }
    }
}

/// A single cash-flow movement. Created by the store on insert and never
/// mutated afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    /// Unique positive identifier assigned by the store
    pub id: u64,
    pub description: Option<String>,
    /// Non-negative amount in currency units; the sign of its effect on the
    /// balance comes from `transaction_type`, not from the amount itself
    pub amount: f64,
    #[serde(rename = "type")]
    pub transaction_type: TransactionType,
    pub origin: Option<String>,
    /// RFC 3339 timestamp; only the date portion is semantically significant
    pub transaction_date: String,
    /// Audit-only creation timestamp (RFC 3339)
    pub created_at: String,
}

impl Transaction {
    /// Date portion (YYYY-MM-DD) of the transaction date, ignoring
    /// time-of-day and any embedded timezone offset.
    pub fn date_part(&self) -> &str {
        date_part(&self.transaction_date)
    }
}

/// Extract the YYYY-MM-DD portion of an ISO/RFC 3339 timestamp without
/// timezone conversion. A bare date passes through unchanged.
pub fn date_part(timestamp: &str) -> &str {
    timestamp.split('T').next().unwrap_or(timestamp)
}

/// Payload for creating a new transaction. The store assigns the id and
/// fills `transaction_date` with the current time when it is omitted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionInput {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub amount: f64,
    #[serde(rename = "type")]
    pub transaction_type: TransactionType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub origin: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub transaction_date: Option<String>,
}

/// End-of-day balance derived from a day's transactions. Recomputable at
/// any time; `final_balance = previous_balance + total_credits - total_debits`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DailyBalance {
    pub id: u64,
    /// Calendar date this balance covers (YYYY-MM-DD)
    pub balance_date: String,
    /// Prior day's final balance
    pub previous_balance: f64,
    /// Sum of the day's Credit transactions
    pub total_credits: f64,
    /// Sum of the day's Debit transactions
    pub total_debits: f64,
    pub final_balance: f64,
    pub created_at: String,
    pub updated_at: String,
}

/// Uniform page of items, normalized out of whichever envelope convention
/// the backend happened to respond with.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaginatedResult<T> {
    pub items: Vec<T>,
    /// 1-based page number
    pub page: u32,
    pub page_size: u32,
    pub total_items: u64,
    pub total_pages: u64,
}

/// Credentials for the OAuth password-grant login flow
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoginCredentials {
    pub username: String,
    pub password: String,
}

/// Token response from the auth endpoint (snake_case OAuth wire format)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoginResponse {
    pub access_token: String,
    pub token_type: String,
    pub expires_in: u64,
    pub scope: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transaction_type_wire_codes() {
        assert_eq!(serde_json::to_string(&TransactionType::Credit).unwrap(), "0");
        assert_eq!(serde_json::to_string(&TransactionType::Debit).unwrap(), "1");

        let credit: TransactionType = serde_json::from_str("0").unwrap();
        assert_eq!(credit, TransactionType::Credit);
        let debit: TransactionType = serde_json::from_str("1").unwrap();
        assert_eq!(debit, TransactionType::Debit);

        // Unknown codes must be rejected, not silently coerced
        assert!(serde_json::from_str::<TransactionType>("2").is_err());
    }

    #[test]
    fn test_transaction_serde_field_names() {
        let transaction = Transaction {
            id: 1,
            description: Some("Salary".to_string()),
            amount: 5000.0,
            transaction_type: TransactionType::Credit,
            origin: Some("Employer".to_string()),
            transaction_date: "2025-05-10T00:00:00".to_string(),
            created_at: "2025-05-10T10:30:00".to_string(),
        };

        let json = serde_json::to_value(&transaction).unwrap();
        assert_eq!(json["type"], 0);
        assert_eq!(json["transactionDate"], "2025-05-10T00:00:00");
        assert_eq!(json["createdAt"], "2025-05-10T10:30:00");

        let back: Transaction = serde_json::from_value(json).unwrap();
        assert_eq!(back, transaction);
    }

    #[test]
    fn test_date_part() {
        assert_eq!(date_part("2025-05-10T23:59:00"), "2025-05-10");
        assert_eq!(date_part("2025-05-10T00:00:01-03:00"), "2025-05-10");
        assert_eq!(date_part("2025-05-10"), "2025-05-10");
        assert_eq!(date_part(""), "");
    }

    #[test]
    fn test_transaction_input_omits_absent_fields() {
        let input = TransactionInput {
            description: None,
            amount: 10.0,
            transaction_type: TransactionType::Debit,
            origin: None,
            transaction_date: None,
        };

        let json = serde_json::to_value(&input).unwrap();
        let object = json.as_object().unwrap();
        assert!(!object.contains_key("description"));
        assert!(!object.contains_key("transactionDate"));
        assert_eq!(json["type"], 1);
    }

    #[test]
    fn test_login_response_wire_format() {
        let body = r#"{
            "access_token": "abc123",
            "token_type": "Bearer",
            "expires_in": 3600,
            "scope": "openid profile email"
        }"#;

        let response: LoginResponse = serde_json::from_str(body).unwrap();
        assert_eq!(response.access_token, "abc123");
        assert_eq!(response.token_type, "Bearer");
        assert_eq!(response.expires_in, 3600);
    }
}
