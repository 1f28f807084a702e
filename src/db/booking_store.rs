use std::{fmt, path::PathBuf};

use chrono::Utc;
use serde::{de::DeserializeOwned, Serialize};
use serde_json::{Map, Value};
use tokio::sync::Mutex;

use crate::models::{
    bookings::{Booking, BookingQuote, BookingRequest, BookingStatus},
    review::{Review, ReviewRequest, ReviewStatus},
};

pub const LAST_BOOKING_KEY: &str = "lastBooking";
pub const BOOKINGS_KEY: &str = "bookings";
pub const LAST_REVIEW_KEY: &str = "lastReview";
pub const REVIEWS_KEY: &str = "reviews";

#[derive(Debug)]
pub enum BookingStoreError {
    Io(std::io::Error),
    Serialization(serde_json::Error),
}

impl fmt::Display for BookingStoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BookingStoreError::Io(err) => write!(f, "Storage error: {}", err),
            BookingStoreError::Serialization(err) => write!(f, "Serialization error: {}", err),
        }
    }
}

impl std::error::Error for BookingStoreError {}

impl From<std::io::Error> for BookingStoreError {
    fn from(err: std::io::Error) -> Self {
        BookingStoreError::Io(err)
    }
}

impl From<serde_json::Error> for BookingStoreError {
    fn from(err: serde_json::Error) -> Self {
        BookingStoreError::Serialization(err)
    }
}

/// Key-value store kept as a single JSON object on disk.
pub struct BookingStore {
    path: PathBuf,
    lock: Mutex<()>,
}

impl BookingStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            lock: Mutex::new(()),
        }
    }

    async fn read_all(&self) -> Result<Map<String, Value>, BookingStoreError> {
        match tokio::fs::read(&self.path).await {
            Ok(raw) if raw.iter().all(u8::is_ascii_whitespace) => Ok(Map::new()),
            Ok(raw) => Ok(serde_json::from_slice(&raw)?),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(Map::new()),
            Err(e) => Err(e.into()),
        }
    }

    async fn write_all(&self, items: &Map<String, Value>) -> Result<(), BookingStoreError> {
        if let Some(parent) = self.path.parent().filter(|dir| !dir.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent).await?;
        }
        tokio::fs::write(&self.path, serde_json::to_vec_pretty(items)?).await?;
        Ok(())
    }

    pub async fn set_item<T: Serialize>(&self, key: &str, value: &T) -> Result<(), BookingStoreError> {
        let _guard = self.lock.lock().await;

        let mut items = self.read_all().await?;
        items.insert(key.to_string(), serde_json::to_value(value)?);
        self.write_all(&items).await
    }

    /// Store `value` under `last_key` and append it to the list under
    /// `list_key`, in one write.
    async fn record<T: Serialize>(
        &self,
        last_key: &str,
        list_key: &str,
        value: &T,
    ) -> Result<(), BookingStoreError> {
        let _guard = self.lock.lock().await;

        let mut items = self.read_all().await?;
        let value = serde_json::to_value(value)?;
        match items.get_mut(list_key) {
            Some(Value::Array(list)) => list.push(value.clone()),
            _ => {
                items.insert(list_key.to_string(), Value::Array(vec![value.clone()]));
            }
        }
        items.insert(last_key.to_string(), value);
        self.write_all(&items).await
    }

    pub async fn get_item<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>, BookingStoreError> {
        let _guard = self.lock.lock().await;

        match self.read_all().await?.remove(key) {
            Some(value) => Ok(Some(serde_json::from_value(value)?)),
            None => Ok(None),
        }
    }

    /// Stamp the request with an id and creation time, store it as the
    /// last booking and hand it back.
    pub async fn create_booking(
        &self,
        request: &BookingRequest,
        tour_name: String,
        pricing: BookingQuote,
    ) -> Result<Booking, BookingStoreError> {
        let created_at = Utc::now();
        let booking = Booking {
            id: created_at.timestamp_millis(),
            tour_id: request.tour_id,
            tour_name,
            date: request.date,
            time: request.time.clone(),
            participants: request.adults.saturating_add(request.children),
            customer_name: request.customer_name.trim().to_string(),
            customer_email: request.customer_email.trim().to_string(),
            customer_phone: request.customer_phone.trim().to_string(),
            special_requests: request.special_requests.clone(),
            promo_code: pricing.promo_code.clone(),
            pricing,
            status: BookingStatus::Pending,
            created_at,
        };

        self.record(LAST_BOOKING_KEY, BOOKINGS_KEY, &booking).await?;
        log::info!("Booking {} stored for tour {:?}", booking.id, booking.tour_id);
        Ok(booking)
    }

    pub async fn last_booking(&self) -> Result<Option<Booking>, BookingStoreError> {
        self.get_item(LAST_BOOKING_KEY).await
    }

    pub async fn all_bookings(&self) -> Result<Vec<Booking>, BookingStoreError> {
        Ok(self.get_item::<Vec<Booking>>(BOOKINGS_KEY).await?.unwrap_or_default())
    }

    /// New reviews start out pending moderation
    pub async fn create_review(
        &self,
        request: &ReviewRequest,
        tour_name: String,
    ) -> Result<Review, BookingStoreError> {
        let created_at = Utc::now();
        let review = Review {
            id: created_at.timestamp_millis(),
            tour_id: request.tour_id,
            tour_name,
            customer_name: request.customer_name.trim().to_string(),
            rating: request.rating,
            comment: request.comment.trim().to_string(),
            status: ReviewStatus::Pending,
            created_at,
        };

        self.record(LAST_REVIEW_KEY, REVIEWS_KEY, &review).await?;
        log::info!("Review {} stored for tour {:?}", review.id, review.tour_id);
        Ok(review)
    }

    pub async fn all_reviews(&self) -> Result<Vec<Review>, BookingStoreError> {
        Ok(self.get_item::<Vec<Review>>(REVIEWS_KEY).await?.unwrap_or_default())
    }
}
