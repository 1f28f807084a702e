pub mod booking_store;
pub mod tour_store;
