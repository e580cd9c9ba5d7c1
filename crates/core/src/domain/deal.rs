use serde::{Deserialize, Serialize};

pub const EXCELLENT_DISCOUNT_PCT: f64 = 50.0;
pub const GREAT_DISCOUNT_PCT: f64 = 30.0;
pub const GOOD_DISCOUNT_PCT: f64 = 20.0;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DealRecord {
    pub product_name: String,
    pub original_price: f64,
    pub sale_price: f64,
    pub savings: f64,
    pub discount_pct: f64,
    /// Category page the record was extracted from, not the product page.
    pub url: String,
    pub source: String,
}

impl DealRecord {
    pub fn quality(&self) -> DealQuality {
        DealQuality::for_discount(self.discount_pct)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DealQuality {
    Excellent,
    Great,
    Good,
    Fair,
}

impl DealQuality {
    pub fn for_discount(discount_pct: f64) -> Self {
        if discount_pct >= EXCELLENT_DISCOUNT_PCT {
            Self::Excellent
        } else if discount_pct >= GREAT_DISCOUNT_PCT {
            Self::Great
        } else if discount_pct >= GOOD_DISCOUNT_PCT {
            Self::Good
        } else {
            Self::Fair
        }
    }

    pub fn css_class(self) -> &'static str {
        match self {
            Self::Excellent => "excellent",
            Self::Great => "great",
            Self::Good => "good",
            Self::Fair => "fair",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Excellent => "🔥 EXCELLENT",
            Self::Great => "🔥 GREAT",
            Self::Good => "Good",
            Self::Fair => "Fair",
        }
    }
}

/// Aggregate written once per worker run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DealsDocument {
    pub timestamp: String,
    pub total_deals: usize,
    pub deals: Vec<DealRecord>,
}

impl DealsDocument {
    pub fn new(timestamp: chrono::DateTime<chrono::Utc>, deals: Vec<DealRecord>) -> Self {
        Self {
            timestamp: timestamp.to_rfc3339(),
            total_deals: deals.len(),
            deals,
        }
    }
}
