use crate::error::ApiError;
use diesel_derive_enum::DbEnum;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use strum::{Display, EnumIter, EnumString};
use utoipa::ToSchema;

#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    DbEnum,
    Display,
    EnumString,
    EnumIter,
    ToSchema,
)]
#[ExistingTypePath = "crate::schema::sql_types::CurrencyCode"]
#[DbValueStyle = "verbatim"]
#[strum(serialize_all = "UPPERCASE")]
pub enum CurrencyCode {
    IDR,
    USD,
    AUD,
    EUR,
    GBP,
    SGD,
    JPY,
    CNY,
    MYR,
    NZD,
}

impl CurrencyCode {
    pub fn parse(input: &str) -> Result<Self, ApiError> {
        let normalized = input.trim().to_uppercase();

        CurrencyCode::from_str(&normalized)
            .map_err(|_| ApiError::BadRequest(format!("Unsupported currency: {}", input)))
    }

    /// Number of decimal places used when presenting amounts.
    pub fn minor_units(self) -> u32 {
        match self {
            CurrencyCode::IDR | CurrencyCode::JPY => 0,
            _ => 2,
        }
    }

    pub fn is_base(self) -> bool {
        self == CurrencyCode::IDR
    }
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, DbEnum, Display, EnumString, ToSchema,
)]
#[ExistingTypePath = "crate::schema::sql_types::QuoteStatus"]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum QuoteStatus {
    Draft,
    Sent,
    Approved,
    Paid,
    Expired,
    Void,
}

impl QuoteStatus {
    pub fn can_transition_to(self, next: QuoteStatus) -> bool {
        use QuoteStatus::*;

        matches!(
            (self, next),
            (Draft, Sent)
                | (Draft, Void)
                | (Sent, Draft)
                | (Sent, Approved)
                | (Sent, Paid)
                | (Sent, Expired)
                | (Sent, Void)
                | (Approved, Paid)
                | (Approved, Expired)
                | (Approved, Void)
                | (Expired, Void)
        )
    }

    pub fn transition(self, next: QuoteStatus) -> Result<QuoteStatus, ApiError> {
        if self.can_transition_to(next) {
            Ok(next)
        } else {
            Err(ApiError::InvalidTransition(format!(
                "Quote cannot move from {} to {}",
                self, next
            )))
        }
    }

    /// Statuses in which a client can be asked to pay.
    pub fn is_payable(self) -> bool {
        matches!(self, QuoteStatus::Sent | QuoteStatus::Approved)
    }

    pub fn is_editable(self) -> bool {
        matches!(self, QuoteStatus::Draft | QuoteStatus::Sent)
    }

    pub fn is_terminal(self) -> bool {
        matches!(self, QuoteStatus::Paid | QuoteStatus::Void)
    }
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, DbEnum, Display, EnumString, ToSchema,
)]
#[ExistingTypePath = "crate::schema::sql_types::TripStatus"]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum TripStatus {
    Planning,
    Confirmed,
    InProgress,
    Completed,
    Cancelled,
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, DbEnum, Display, EnumString, ToSchema,
)]
#[ExistingTypePath = "crate::schema::sql_types::PaymentStatus"]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum PaymentStatus {
    Pending,
    PendingVerification,
    Succeeded,
    Failed,
}

impl PaymentStatus {
    pub const IN_FLIGHT: [PaymentStatus; 2] =
        [PaymentStatus::Pending, PaymentStatus::PendingVerification];

    pub fn can_transition_to(self, next: PaymentStatus) -> bool {
        use PaymentStatus::*;

        matches!(
            (self, next),
            (Pending, Succeeded)
                | (Pending, Failed)
                | (PendingVerification, Succeeded)
                | (PendingVerification, Failed)
        )
    }

    pub fn transition(self, next: PaymentStatus) -> Result<PaymentStatus, ApiError> {
        if self.can_transition_to(next) {
            Ok(next)
        } else {
            Err(ApiError::InvalidTransition(format!(
                "Payment cannot move from {} to {}",
                self, next
            )))
        }
    }

    pub fn is_terminal(self) -> bool {
        matches!(self, PaymentStatus::Succeeded | PaymentStatus::Failed)
    }

    pub fn is_in_flight(self) -> bool {
        Self::IN_FLIGHT.contains(&self)
    }
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, DbEnum, Display, EnumString, ToSchema,
)]
#[ExistingTypePath = "crate::schema::sql_types::PaymentMethod"]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum PaymentMethod {
    Card,
    BankTransfer,
    Cash,
    Other,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, DbEnum, Display, ToSchema)]
#[ExistingTypePath = "crate::schema::sql_types::NotificationAudience"]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum NotificationAudience {
    Agent,
    Admin,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, DbEnum, Display, ToSchema)]
#[ExistingTypePath = "crate::schema::sql_types::NotificationKind"]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum NotificationKind {
    QuoteSent,
    QuoteExpired,
    PaymentReceived,
    PaymentFailed,
    ManualPaymentSubmitted,
    PaymentApproved,
    PaymentRejected,
    AgentApproved,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn draft_can_only_be_sent_or_voided() {
        assert!(QuoteStatus::Draft.can_transition_to(QuoteStatus::Sent));
        assert!(QuoteStatus::Draft.can_transition_to(QuoteStatus::Void));
        assert!(!QuoteStatus::Draft.can_transition_to(QuoteStatus::Paid));
        assert!(!QuoteStatus::Draft.can_transition_to(QuoteStatus::Approved));
    }

    #[test]
    fn paid_and_void_are_terminal() {
        for next in [
            QuoteStatus::Draft,
            QuoteStatus::Sent,
            QuoteStatus::Approved,
            QuoteStatus::Expired,
            QuoteStatus::Void,
        ] {
            assert!(!QuoteStatus::Paid.can_transition_to(next));
        }
        assert!(!QuoteStatus::Void.can_transition_to(QuoteStatus::Draft));
        assert!(QuoteStatus::Paid.is_terminal());
    }

    #[test]
    fn only_sent_and_approved_quotes_are_payable() {
        assert!(QuoteStatus::Sent.is_payable());
        assert!(QuoteStatus::Approved.is_payable());
        assert!(!QuoteStatus::Draft.is_payable());
        assert!(!QuoteStatus::Expired.is_payable());
        assert!(!QuoteStatus::Paid.is_payable());
    }

    #[test]
    fn rejected_quote_transition_reports_both_ends() {
        let err = QuoteStatus::Paid.transition(QuoteStatus::Draft).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Invalid status transition: Quote cannot move from paid to draft"
        );
    }

    #[test]
    fn payment_terminal_states_do_not_move() {
        assert!(PaymentStatus::PendingVerification.can_transition_to(PaymentStatus::Succeeded));
        assert!(PaymentStatus::Pending.can_transition_to(PaymentStatus::Failed));
        assert!(!PaymentStatus::Succeeded.can_transition_to(PaymentStatus::Failed));
        assert!(!PaymentStatus::Failed.can_transition_to(PaymentStatus::Succeeded));
        assert!(!PaymentStatus::Pending.can_transition_to(PaymentStatus::PendingVerification));
    }

    #[test]
    fn only_unsettled_payments_are_in_flight() {
        assert!(PaymentStatus::Pending.is_in_flight());
        assert!(PaymentStatus::PendingVerification.is_in_flight());
        assert!(!PaymentStatus::Succeeded.is_in_flight());
        assert!(!PaymentStatus::Failed.is_in_flight());
    }

    #[test]
    fn currency_parse_is_case_insensitive() {
        assert_eq!(CurrencyCode::parse(" usd ").unwrap(), CurrencyCode::USD);
        assert!(CurrencyCode::parse("XYZ").is_err());
        assert_eq!(CurrencyCode::IDR.minor_units(), 0);
        assert_eq!(CurrencyCode::AUD.minor_units(), 2);
    }

    #[test]
    fn payment_status_uses_snake_case_on_the_wire() {
        let json = serde_json::to_string(&PaymentStatus::PendingVerification).unwrap();
        assert_eq!(json, "\"pending_verification\"");
        assert_eq!(PaymentStatus::PendingVerification.to_string(), "pending_verification");
    }
}
