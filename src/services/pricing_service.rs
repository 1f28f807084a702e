use crate::models::{
    bookings::BookingQuote,
    promo::{DiscountType, PromoCode, PromoOutcome},
};

/// Adult ticket price used when a booking isn't tied to a known tour
pub const DEFAULT_ADULT_PRICE: f64 = 49.0;

static PROMO_CODES: [PromoCode; 4] = [
    PromoCode {
        code: "WELCOME10",
        discount_type: DiscountType::Percentage,
        discount_value: 10.0,
    },
    PromoCode {
        code: "SAVE20",
        discount_type: DiscountType::Percentage,
        discount_value: 20.0,
    },
    PromoCode {
        code: "FIRST5",
        discount_type: DiscountType::Fixed,
        discount_value: 5.0,
    },
    PromoCode {
        code: "FAMILY15",
        discount_type: DiscountType::Percentage,
        discount_value: 15.0,
    },
];

pub struct PricingService;

impl PricingService {
    /// Children pay half the adult price, rounded to whole dollars
    pub fn child_price(adult_price: f64) -> f64 {
        (adult_price * 0.5).round()
    }

    pub fn calculate_subtotal(adult_price: f64, adults: u32, children: u32) -> f64 {
        adults as f64 * adult_price + children as f64 * Self::child_price(adult_price)
    }

    /// Look up a promo code. Codes are matched trimmed and upper-cased.
    pub fn find_promo(code: &str) -> Option<&'static PromoCode> {
        let code = code.trim().to_uppercase();
        PROMO_CODES.iter().find(|promo| promo.code == code)
    }

    /// Resolve `code` against `subtotal`. Anything but a known code leaves
    /// the subtotal untouched.
    pub fn apply_promo(code: &str, subtotal: f64) -> PromoOutcome {
        let normalized = code.trim().to_uppercase();
        if normalized.is_empty() {
            return PromoOutcome::MissingCode;
        }

        match Self::find_promo(&normalized) {
            Some(promo) => PromoOutcome::Applied {
                code: normalized,
                discount: promo.discount_for(subtotal),
            },
            None => PromoOutcome::NotFound { code: normalized },
        }
    }

    /// Full price breakdown for a ticket selection
    pub fn quote(
        adult_price: f64,
        adults: u32,
        children: u32,
        promo_code: Option<&str>,
    ) -> BookingQuote {
        let child_price = Self::child_price(adult_price);
        let adult_total = adults as f64 * adult_price;
        let child_total = children as f64 * child_price;
        let subtotal = adult_total + child_total;

        let outcome = promo_code
            .map(str::trim)
            .filter(|code| !code.is_empty())
            .map(|code| Self::apply_promo(code, subtotal));
        let discount = outcome.as_ref().map_or(0.0, PromoOutcome::discount);

        BookingQuote {
            adult_price,
            child_price,
            adults,
            children,
            adult_total,
            child_total,
            subtotal,
            discount,
            total: subtotal - discount,
            promo_code: outcome
                .as_ref()
                .and_then(|outcome| outcome.applied_code().map(str::to_string)),
            promo_error: outcome.as_ref().and_then(PromoOutcome::error),
        }
    }
}
