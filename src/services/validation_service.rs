use crate::models::{
    bookings::{BookingRequest, FieldError},
    review::ReviewRequest,
};
use chrono::NaiveDate;
use once_cell::sync::Lazy;
use regex::Regex;
use url::Url;

static EMAIL_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").unwrap());
static PHONE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\+?[0-9\s\-()]{10,}$").unwrap());

/// Per-type cap on tickets in one booking
pub const MAX_TICKETS: u32 = 50;

const ALLOWED_STATUSES: [&str; 8] = [
    "active",
    "inactive",
    "pending",
    "confirmed",
    "completed",
    "cancelled",
    "draft",
    "published",
];

pub fn validate_name(name: &str) -> Result<(), FieldError> {
    if name.trim().chars().count() < 2 {
        return Err(FieldError::new(
            "customerName",
            "Name must be at least 2 characters",
        ));
    }
    Ok(())
}

pub fn validate_email(email: &str) -> Result<(), FieldError> {
    if !EMAIL_RE.is_match(email.trim()) {
        return Err(FieldError::new("customerEmail", "Enter a valid email address"));
    }
    Ok(())
}

pub fn validate_phone(phone: &str) -> Result<(), FieldError> {
    if !PHONE_RE.is_match(phone.trim()) {
        return Err(FieldError::new("customerPhone", "Enter a valid phone number"));
    }
    Ok(())
}

/// The tour date must be strictly after `today`
pub fn validate_date(date: Option<NaiveDate>, today: NaiveDate) -> Result<(), FieldError> {
    match date {
        None => Err(FieldError::new("date", "Choose a tour date")),
        Some(date) if date <= today => Err(FieldError::new("date", "Choose a date in the future")),
        Some(_) => Ok(()),
    }
}

pub fn validate_time(time: Option<&str>) -> Result<(), FieldError> {
    match time.map(str::trim) {
        Some(time) if !time.is_empty() => Ok(()),
        _ => Err(FieldError::new("time", "Choose a tour time")),
    }
}

pub fn validate_tickets(adults: u32) -> Result<(), FieldError> {
    if adults < 1 {
        return Err(FieldError::new("adults", "At least one adult ticket is required"));
    }
    if adults > MAX_TICKETS {
        return Err(FieldError::new(
            "adults",
            &format!("No more than {} adult tickets per booking", MAX_TICKETS),
        ));
    }
    Ok(())
}

pub fn validate_children(children: u32) -> Result<(), FieldError> {
    if children > MAX_TICKETS {
        return Err(FieldError::new(
            "children",
            &format!("No more than {} child tickets per booking", MAX_TICKETS),
        ));
    }
    Ok(())
}

/// Run every booking form check, collecting all failures instead of
/// stopping at the first one.
pub fn validate_booking(request: &BookingRequest, today: NaiveDate) -> Result<(), Vec<FieldError>> {
    let errors: Vec<FieldError> = [
        validate_name(&request.customer_name),
        validate_email(&request.customer_email),
        validate_phone(&request.customer_phone),
        validate_date(request.date, today),
        validate_time(request.time.as_deref()),
        validate_tickets(request.adults),
        validate_children(request.children),
    ]
    .into_iter()
    .filter_map(Result::err)
    .collect();

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

pub fn validate_review(request: &ReviewRequest) -> Result<(), Vec<FieldError>> {
    let mut errors = Vec::new();
    if let Err(error) = validate_name(&request.customer_name) {
        errors.push(error);
    }
    if !(1..=5).contains(&request.rating) {
        errors.push(FieldError::new("rating", "Rating must be between 1 and 5"));
    }
    if request.comment.trim().is_empty() {
        errors.push(FieldError::new("comment", "Write a few words about the tour"));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

pub fn validate_price(price: f64) -> bool {
    price.is_finite() && price >= 0.0
}

pub fn validate_id(id: i64) -> bool {
    id > 0
}

/// Map a free-form status onto the known set, defaulting to `pending`
pub fn normalize_status(status: &str) -> &'static str {
    let normalized = status.trim().to_lowercase();
    ALLOWED_STATUSES
        .iter()
        .find(|allowed| **allowed == normalized)
        .copied()
        .unwrap_or("pending")
}

/// Accept http(s) URLs, site-relative paths and inline image data only
pub fn validate_image_url(raw: &str) -> Result<String, String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err("URL cannot be empty".to_string());
    }

    if trimmed.starts_with('/')
        || trimmed.starts_with("./")
        || trimmed.starts_with("../")
        || trimmed.starts_with("data:image/")
    {
        return Ok(trimmed.to_string());
    }

    match Url::parse(trimmed) {
        Ok(url) if matches!(url.scheme(), "http" | "https") => Ok(trimmed.to_string()),
        Ok(_) => Err("Only HTTP, HTTPS, and relative URLs are allowed".to_string()),
        Err(_) => Err("Invalid URL format".to_string()),
    }
}
