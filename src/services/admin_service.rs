use crate::models::{
    bookings::{Booking, BookingStatus},
    review::{DashboardStats, Review, ReviewStatus},
};
use std::collections::HashSet;

fn contains_any(fields: &[&str], needle: &str) -> bool {
    needle.is_empty() || fields.iter().any(|field| field.to_lowercase().contains(needle))
}

/// Bookings with the given status whose customer name, tour name or
/// customer email contains `search`, ignoring case.
pub fn filter_bookings(
    bookings: &[Booking],
    status: Option<BookingStatus>,
    search: &str,
) -> Vec<Booking> {
    let needle = search.to_lowercase();

    bookings
        .iter()
        .filter(|booking| status.map_or(true, |status| booking.status == status))
        .filter(|booking| {
            contains_any(
                &[
                    booking.customer_name.as_str(),
                    booking.tour_name.as_str(),
                    booking.customer_email.as_str(),
                ],
                &needle,
            )
        })
        .cloned()
        .collect()
}

pub fn filter_reviews(
    reviews: &[Review],
    status: Option<ReviewStatus>,
    rating: Option<u8>,
    search: &str,
) -> Vec<Review> {
    let needle = search.to_lowercase();

    reviews
        .iter()
        .filter(|review| status.map_or(true, |status| review.status == status))
        .filter(|review| rating.map_or(true, |rating| review.rating == rating))
        .filter(|review| {
            contains_any(
                &[
                    review.customer_name.as_str(),
                    review.comment.as_str(),
                    review.tour_name.as_str(),
                ],
                &needle,
            )
        })
        .cloned()
        .collect()
}

pub fn reviews_for_tour(reviews: &[Review], tour_id: u32) -> Vec<Review> {
    reviews
        .iter()
        .filter(|review| review.tour_id == Some(tour_id))
        .cloned()
        .collect()
}

/// Dashboard totals. The average rating is formatted to one decimal and
/// reads "0.0" when there are no reviews.
pub fn calculate_stats(bookings: &[Booking], reviews: &[Review]) -> DashboardStats {
    let revenue: f64 = bookings.iter().map(|booking| booking.pricing.total).sum();
    let customers: HashSet<String> = bookings
        .iter()
        .map(|booking| booking.customer_email.trim().to_lowercase())
        .collect();

    let average_rating = if reviews.is_empty() {
        "0.0".to_string()
    } else {
        let sum: u64 = reviews.iter().map(|review| u64::from(review.rating)).sum();
        format!("{:.1}", sum as f64 / reviews.len() as f64)
    };

    DashboardStats {
        total_bookings: bookings.len(),
        revenue,
        active_customers: customers.len(),
        average_rating,
    }
}
