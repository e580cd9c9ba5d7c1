//! Deal extraction from loosely structured listing text.
//!
//! Each vendor has its own layout; both produce [`DealRecord`]s with the same
//! schema. Every regex match is a candidate that either becomes a record or
//! is skipped with a [`SkipReason`]. Skips never abort the pass.

mod clearance_warehouse;
mod golf_town;

use crate::domain::catalog::Vendor;
use crate::domain::deal::DealRecord;
use regex::Regex;

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SkipReason {
    #[error("{field} is not a number: {raw:?}")]
    Numeric { field: &'static str, raw: String },

    #[error("product name is empty after cleanup")]
    EmptyName,

    #[error("original price must be positive (got {0})")]
    NonPositivePrice(f64),
}

pub type Candidate = Result<DealRecord, SkipReason>;

/// All deals found in `text`, in order of appearance.
pub fn extract(text: &str, source_url: &str, vendor: Vendor) -> Vec<DealRecord> {
    extract_candidates(text, source_url, vendor)
        .into_iter()
        .filter_map(|candidate| match candidate {
            Ok(deal) => Some(deal),
            Err(reason) => {
                tracing::debug!(vendor = vendor.label(), %source_url, %reason, "skipping deal candidate");
                None
            }
        })
        .collect()
}

/// Like [`extract`] but keeps the skipped candidates and why they were dropped.
pub fn extract_candidates(text: &str, source_url: &str, vendor: Vendor) -> Vec<Candidate> {
    match vendor {
        Vendor::ClearanceWarehouse => clearance_warehouse::candidates(text, source_url),
        Vendor::GolfTown => golf_town::candidates(text, source_url),
    }
}

fn clean_name(raw: &str, noise: &Regex) -> Result<String, SkipReason> {
    let name = noise.replace_all(raw.trim(), "");
    let name = name.trim();
    if name.is_empty() {
        return Err(SkipReason::EmptyName);
    }
    Ok(name.to_string())
}

fn parse_amount(field: &'static str, raw: &str) -> Result<f64, SkipReason> {
    let digits: String = raw.chars().filter(|c| *c != ',').collect();
    digits
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .ok_or_else(|| SkipReason::Numeric {
            field,
            raw: raw.to_string(),
        })
}

fn require_positive(original_price: f64) -> Result<(), SkipReason> {
    if original_price > 0.0 {
        Ok(())
    } else {
        Err(SkipReason::NonPositivePrice(original_price))
    }
}

/// Percent of `original_price` saved, one decimal place. Zero when the original is zero.
pub fn discount_from_savings(savings: f64, original_price: f64) -> f64 {
    if original_price > 0.0 {
        round_one_decimal(savings / original_price * 100.0)
    } else {
        0.0
    }
}

fn round_one_decimal(value: f64) -> f64 {
    (value * 10.0).round_ties_even() / 10.0
}
