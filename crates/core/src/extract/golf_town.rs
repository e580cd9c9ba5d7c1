use super::{clean_name, parse_amount, require_positive, Candidate};
use crate::domain::catalog::Vendor;
use crate::domain::deal::DealRecord;
use regex::{Captures, Regex};
use std::sync::LazyLock;

static DEAL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"([^·]+?)·\s*\$([0-9,]+\.?[0-9]*)\s+\$([0-9,]+\.?[0-9]*)\s+\(([0-9]+)%\s+off\)")
        .expect("valid regex")
});

static NAME_NOISE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"Clearance|Final Sale|Waterproof").expect("valid regex"));

pub(super) fn candidates(text: &str, source_url: &str) -> Vec<Candidate> {
    DEAL_RE
        .captures_iter(text)
        .map(|caps| build(&caps, source_url))
        .collect()
}

fn build(caps: &Captures<'_>, source_url: &str) -> Candidate {
    let product_name = clean_name(&caps[1], &NAME_NOISE_RE)?;
    let original_price = parse_amount("original_price", &caps[2])?;
    let sale_price = parse_amount("sale_price", &caps[3])?;
    let discount_pct = parse_amount("discount_pct", &caps[4])?;
    require_positive(original_price)?;

    Ok(DealRecord {
        product_name,
        original_price,
        sale_price,
        savings: original_price - sale_price,
        discount_pct,
        url: source_url.to_string(),
        source: Vendor::GolfTown.label().to_string(),
    })
}
