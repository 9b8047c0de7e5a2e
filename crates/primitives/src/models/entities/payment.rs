use crate::models::entities::enum_types::{CurrencyCode, PaymentMethod, PaymentStatus};
use chrono::{DateTime, Utc};
use diesel::prelude::*;
use serde::Serialize;
use uuid::Uuid;

#[derive(Debug, Clone, Queryable, Selectable, Identifiable, Associations, Serialize)]
#[diesel(table_name = crate::schema::payments)]
#[diesel(belongs_to(crate::models::entities::quote::Quote))]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct Payment {
    pub id: Uuid,
    pub quote_id: Uuid,
    pub agent_id: Uuid,
    pub amount_idr: i64,
    pub currency: CurrencyCode,
    pub amount_display: f64,
    pub status: PaymentStatus,
    pub is_manual: bool,
    pub method: PaymentMethod,
    pub gateway_reference: Option<String>,
    pub proof_url: Option<String>,
    pub reference_note: Option<String>,
    pub rejection_reason: Option<String>,
    pub verified_by: Option<Uuid>,
    pub verified_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Payment {
    pub fn awaits_verification(&self) -> bool {
        self.is_manual && self.status == PaymentStatus::PendingVerification
    }
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::payments)]
pub struct NewPayment<'a> {
    pub quote_id: Uuid,
    pub agent_id: Uuid,
    pub amount_idr: i64,
    pub currency: CurrencyCode,
    pub amount_display: f64,
    pub status: PaymentStatus,
    pub is_manual: bool,
    pub method: PaymentMethod,
    pub gateway_reference: Option<&'a str>,
    pub proof_url: Option<&'a str>,
    pub reference_note: Option<&'a str>,
}
