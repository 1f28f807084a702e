pub mod bookings;
pub mod destination;
pub mod filter;
pub mod promo;
pub mod review;
pub mod search_response;
pub mod tour;
