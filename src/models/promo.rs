use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DiscountType {
    Percentage,
    Fixed,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PromoCode {
    pub code: &'static str,
    pub discount_type: DiscountType,
    pub discount_value: f64,
}

impl PromoCode {
    /// Discount in dollars for the given subtotal
    pub fn discount_for(&self, subtotal: f64) -> f64 {
        match self.discount_type {
            DiscountType::Percentage => (subtotal * self.discount_value / 100.0).round(),
            DiscountType::Fixed => self.discount_value.min(subtotal),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum PromoOutcome {
    Applied { code: String, discount: f64 },
    MissingCode,
    NotFound { code: String },
}

impl PromoOutcome {
    pub fn discount(&self) -> f64 {
        match self {
            PromoOutcome::Applied { discount, .. } => *discount,
            _ => 0.0,
        }
    }

    pub fn applied_code(&self) -> Option<&str> {
        match self {
            PromoOutcome::Applied { code, .. } => Some(code),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<String> {
        match self {
            PromoOutcome::Applied { .. } => None,
            PromoOutcome::MissingCode => Some("Enter a promo code".to_string()),
            PromoOutcome::NotFound { code } => Some(format!("Invalid promo code: {}", code)),
        }
    }
}
