pub mod admin_service;
pub mod debounce;
pub mod pricing_service;
pub mod rate_limiter;
pub mod recommendation_service;
pub mod tour_filter_service;
pub mod validation_service;
