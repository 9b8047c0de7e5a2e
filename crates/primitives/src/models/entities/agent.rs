use chrono::{DateTime, Utc};
use diesel::prelude::*;
use serde::Serialize;
use uuid::Uuid;

#[derive(Debug, Clone, Queryable, Selectable, Identifiable, Serialize)]
#[diesel(table_name = crate::schema::agents)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct Agent {
    pub id: Uuid,
    pub email: String,
    pub full_name: String,
    pub company_name: Option<String>,
    pub phone: Option<String>,
    pub is_approved: bool,
    pub is_admin: bool,
    pub default_markup_bps: Option<i32>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::agents)]
pub struct NewAgent<'a> {
    pub id: Uuid,
    pub email: &'a str,
    pub full_name: &'a str,
    pub company_name: Option<&'a str>,
    pub phone: Option<&'a str>,
    pub default_markup_bps: Option<i32>,
}

#[derive(Debug, Default, AsChangeset)]
#[diesel(table_name = crate::schema::agents)]
pub struct AgentChanges {
    pub full_name: Option<String>,
    pub company_name: Option<String>,
    pub phone: Option<String>,
    pub default_markup_bps: Option<i32>,
}
