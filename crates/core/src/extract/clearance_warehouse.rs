use super::{clean_name, discount_from_savings, parse_amount, require_positive, Candidate};
use crate::domain::catalog::Vendor;
use crate::domain::deal::DealRecord;
use regex::{Captures, Regex};
use std::sync::LazyLock;

static DEAL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)([^·]+?)·\s*Our Price[:\s]*\$([0-9,]+\.?[0-9]*)\s*·\s*Sale Price[:\s]*\$([0-9,]+\.?[0-9]*)\s*·\s*You save \$([0-9,]+\.?[0-9]*)",
    )
    .expect("valid regex")
});

// The lazy name group can reach back over the tail of the previous listing,
// so "You save ..." through end of line is noise too.
static NAME_NOISE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"Deal of the Day Price:|You save.*").expect("valid regex"));

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
    let savings = parse_amount("savings", &caps[4])?;
    require_positive(original_price)?;

    Ok(DealRecord {
        product_name,
        original_price,
        sale_price,
        savings,
        discount_pct: discount_from_savings(savings, original_price),
        url: source_url.to_string(),
        source: Vendor::ClearanceWarehouse.label().to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extract::{extract, SkipReason};

    const URL: &str = "https://www.golfclearancewarehouse.com/golf-shoes-s/11.htm";

    #[test]
    fn parses_single_listing() {
        let text = "Widget · Our Price: $100.00 · Sale Price: $60.00 · You save $40.00";
        let deals = extract(text, URL, Vendor::ClearanceWarehouse);
        assert_eq!(
            deals,
            vec![DealRecord {
                product_name: "Widget".to_string(),
                original_price: 100.0,
                sale_price: 60.0,
                savings: 40.0,
                discount_pct: 40.0,
                url: URL.to_string(),
                source: "Golf Clearance Warehouse".to_string(),
            }]
        );
    }

    #[test]
    fn tied_discount_rounds_to_even() {
        let text = "Tee Pack · Our Price: $16.00 · Sale Price: $15.00 · You save $1.00";
        let deals = extract(text, URL, Vendor::ClearanceWarehouse);
        assert_eq!(deals.len(), 1);
        assert_eq!(deals[0].discount_pct, 6.2);
    }

    #[test]
    fn keyword_anchors_are_case_insensitive() {
        let text = "Widget · OUR PRICE: $100.00 · sale price $80.00 · YOU SAVE $20.00";
        let deals = extract(text, URL, Vendor::ClearanceWarehouse);
        assert_eq!(deals.len(), 1);
        assert_eq!(deals[0].discount_pct, 20.0);
    }

    #[test]
    fn strips_deal_of_the_day_prefix_and_thousands_separators() {
        let text = "Deal of the Day Price: Tour Driver · Our Price: $1,199.99 · Sale Price: $899.99 · You save $300.00";
        let deals = extract(text, URL, Vendor::ClearanceWarehouse);
        assert_eq!(deals.len(), 1);
        assert_eq!(deals[0].product_name, "Tour Driver");
        assert_eq!(deals[0].original_price, 1199.99);
        assert_eq!(deals[0].discount_pct, 25.0);
    }

    #[test]
    fn finds_every_listing_in_page_order() {
        let text = "Alpha Glove · Our Price: $20.00 · Sale Price: $10.00 · You save $10.00\n\
                    Bravo Shoe · Our Price: $150.00 · Sale Price: $99.00 · You save $51.00\n";
        let deals = extract(text, URL, Vendor::ClearanceWarehouse);
        let names: Vec<_> = deals.iter().map(|d| d.product_name.as_str()).collect();
        assert_eq!(names, ["Alpha Glove", "Bravo Shoe"]);
        assert_eq!(deals[1].discount_pct, 34.0);
    }

    #[test]
    fn malformed_price_skips_only_that_listing() {
        let text = "Broken · Our Price: $abc · Sale Price: $1.00 · You save $1.00\n\
                    Widget · Our Price: $100.00 · Sale Price: $60.00 · You save $40.00";
        let deals = extract(text, URL, Vendor::ClearanceWarehouse);
        assert_eq!(deals.len(), 1);
        assert_eq!(deals[0].product_name, "Widget");
        assert_eq!(deals[0].savings, 40.0);
    }

    #[test]
    fn separator_only_amount_is_reported_as_skip() {
        let text = "Widget · Our Price: $, · Sale Price: $1.00 · You save $1.00";
        let out = candidates(text, URL);
        assert_eq!(out.len(), 1);
        assert!(matches!(
            &out[0],
            Err(SkipReason::Numeric { field: "original_price", .. })
        ));
    }

    #[test]
    fn zero_original_price_is_dropped_without_fault() {
        let text = "Freebie · Our Price: $0.00 · Sale Price: $0.00 · You save $0.00";
        let out = candidates(text, URL);
        assert_eq!(out, vec![Err(SkipReason::NonPositivePrice(0.0))]);
        assert!(extract(text, URL, Vendor::ClearanceWarehouse).is_empty());
    }

    #[test]
    fn name_of_only_noise_is_dropped() {
        let text = "Deal of the Day Price: · Our Price: $10.00 · Sale Price: $5.00 · You save $5.00";
        assert_eq!(candidates(text, URL), vec![Err(SkipReason::EmptyName)]);
    }
}
