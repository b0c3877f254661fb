use bson::oid::ObjectId;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Quotation lifecycle. Created as `Draft`, sent to the client as `Sent`,
/// then resolved into one of the terminal states.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QuotationStatus {
    Draft,
    Sent,
    Accepted,
    Rejected,
    Expired,
}

impl QuotationStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            QuotationStatus::Draft => "draft",
            QuotationStatus::Sent => "sent",
            QuotationStatus::Accepted => "accepted",
            QuotationStatus::Rejected => "rejected",
            QuotationStatus::Expired => "expired",
        }
    }

    /// Legal transitions: draft -> sent -> {accepted, rejected, expired}.
    /// Terminal states admit no further transitions.
    pub fn can_transition_to(&self, next: QuotationStatus) -> bool {
        use QuotationStatus::*;
        matches!(
            (self, next),
            (Draft, Sent) | (Sent, Accepted) | (Sent, Rejected) | (Sent, Expired)
        )
    }

    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            QuotationStatus::Accepted | QuotationStatus::Rejected | QuotationStatus::Expired
        )
    }
}

impl std::fmt::Display for QuotationStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for QuotationStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "draft" => Ok(QuotationStatus::Draft),
            "sent" => Ok(QuotationStatus::Sent),
            "accepted" => Ok(QuotationStatus::Accepted),
            "rejected" => Ok(QuotationStatus::Rejected),
            "expired" => Ok(QuotationStatus::Expired),
            other => Err(format!("Unknown quotation status: {}", other)),
        }
    }
}

/// One row of a quotation. `line_total` is derived and recomputed on save.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuotationItem {
    pub description: String,
    pub quantity: u32,
    pub unit_price: Decimal,
    pub line_total: Decimal,
}

/// A priced proposal document. The derived fields (`subtotal`, `tax_amount`,
/// `total` and every `line_total`) are recomputed from the items on every
/// save; stored values are never trusted from the client.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Quotation {
    #[serde(rename = "_id")]
    pub id: Option<ObjectId>,
    pub number: String,
    pub client_id: ObjectId,
    pub items: Vec<QuotationItem>,
    pub status: QuotationStatus,
    pub subtotal: Decimal,
    /// Tax rate as a percentage (18 = 18%).
    pub tax_rate: Decimal,
    pub tax_amount: Decimal,
    pub discount: Decimal,
    pub total: Decimal,
    pub valid_until: Option<String>,
    pub notes: Option<String>,
    pub created_at: Option<String>,
    pub updated_at: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_draft_can_only_be_sent() {
        let draft = QuotationStatus::Draft;
        assert!(draft.can_transition_to(QuotationStatus::Sent));
        assert!(!draft.can_transition_to(QuotationStatus::Accepted));
        assert!(!draft.can_transition_to(QuotationStatus::Rejected));
        assert!(!draft.can_transition_to(QuotationStatus::Expired));
        assert!(!draft.can_transition_to(QuotationStatus::Draft));
    }

    #[test]
    fn test_sent_resolves_to_terminal_states() {
        let sent = QuotationStatus::Sent;
        assert!(sent.can_transition_to(QuotationStatus::Accepted));
        assert!(sent.can_transition_to(QuotationStatus::Rejected));
        assert!(sent.can_transition_to(QuotationStatus::Expired));
        assert!(!sent.can_transition_to(QuotationStatus::Draft));
    }

    #[test]
    fn test_terminal_states_are_frozen() {
        for terminal in [
            QuotationStatus::Accepted,
            QuotationStatus::Rejected,
            QuotationStatus::Expired,
        ] {
            assert!(terminal.is_terminal());
            for next in [
                QuotationStatus::Draft,
                QuotationStatus::Sent,
                QuotationStatus::Accepted,
                QuotationStatus::Rejected,
                QuotationStatus::Expired,
            ] {
                assert!(!terminal.can_transition_to(next));
            }
        }
    }

    #[test]
    fn test_status_round_trip() {
        for s in ["draft", "sent", "accepted", "rejected", "expired"] {
            let status = QuotationStatus::from_str(s).unwrap();
            assert_eq!(status.as_str(), s);
        }
        assert!(QuotationStatus::from_str("archived").is_err());
    }
}
