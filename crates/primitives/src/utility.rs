use validator::ValidationError;

pub const MAX_PAGE_SIZE: i64 = 200;
pub const DEFAULT_PAGE_SIZE: i64 = 50;

pub fn validate_not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::new("blank"));
    }
    Ok(())
}

pub fn validate_phone(phone: &str) -> Result<(), ValidationError> {
    let digits = phone.chars().filter(|c| c.is_ascii_digit()).count();
    let allowed = phone
        .chars()
        .all(|c| c.is_ascii_digit() || matches!(c, '+' | ' ' | '-' | '(' | ')'));

    if !allowed || !(6..=15).contains(&digits) {
        let mut err = ValidationError::new("invalid_phone");
        err.add_param("min_digits".into(), &6);
        err.add_param("max_digits".into(), &15);
        return Err(err);
    }
    Ok(())
}

/// Percent with up to two decimals, stored as basis points.
pub fn percent_to_bps(percent: f64) -> i32 {
    (percent * 100.0).round() as i32
}

pub fn bps_to_percent(bps: i32) -> f64 {
    bps as f64 / 100.0
}

pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

/// Trims and drops empty optional text fields.
pub fn clean_optional(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

pub fn page_bounds(limit: Option<i64>, offset: Option<i64>) -> (i64, i64) {
    let limit = limit.unwrap_or(DEFAULT_PAGE_SIZE).clamp(1, MAX_PAGE_SIZE);
    let offset = offset.unwrap_or(0).max(0);
    (limit, offset)
}
