pub mod html;

use crate::aggregate::summarize;
use crate::domain::deal::DealRecord;

#[derive(Debug, Clone, PartialEq)]
pub struct DashboardStats {
    pub total_deals: usize,
    pub avg_discount: f64,
    pub max_discount: f64,
    pub total_savings: f64,
    pub excellent: usize,
    pub great: usize,
}

impl DashboardStats {
    pub fn from_deals(deals: &[DealRecord]) -> Self {
        let summary = summarize(deals);
        let avg_discount = if deals.is_empty() {
            0.0
        } else {
            deals.iter().map(|d| d.discount_pct).sum::<f64>() / deals.len() as f64
        };
        let max_discount = deals
            .iter()
            .map(|d| d.discount_pct)
            .fold(0.0_f64, f64::max);

        Self {
            total_deals: summary.total,
            avg_discount,
            max_discount,
            total_savings: deals.iter().map(|d| d.savings).sum(),
            excellent: summary.excellent,
            great: summary.great,
        }
    }
}

/// Best discount first. Ties keep their stored order.
pub fn sort_by_discount(deals: &[DealRecord]) -> Vec<DealRecord> {
    let mut sorted = deals.to_vec();
    sorted.sort_by(|a, b| b.discount_pct.total_cmp(&a.discount_pct));
    sorted
}

#[cfg(test)]
mod tests {
    use super::*;

    fn deal(name: &str, pct: f64, savings: f64) -> DealRecord {
        DealRecord {
            product_name: name.to_string(),
            original_price: 100.0,
            sale_price: 100.0 - savings,
            savings,
            discount_pct: pct,
            url: "https://www.golftown.com/en-CA/sale/clearance/clubs/".to_string(),
            source: "Golf Town".to_string(),
        }
    }

    #[test]
    fn stats_cover_discount_and_savings() {
        let deals = vec![deal("a", 20.0, 20.0), deal("b", 55.0, 55.0), deal("c", 35.0, 35.0)];
        let stats = DashboardStats::from_deals(&deals);
        assert_eq!(stats.total_deals, 3);
        assert!((stats.avg_discount - 36.666).abs() < 0.01);
        assert_eq!(stats.max_discount, 55.0);
        assert_eq!(stats.total_savings, 110.0);
        assert_eq!(stats.excellent, 1);
        assert_eq!(stats.great, 1);
    }

    #[test]
    fn stats_for_no_deals_are_zero() {
        let stats = DashboardStats::from_deals(&[]);
        assert_eq!(stats.total_deals, 0);
        assert_eq!(stats.avg_discount, 0.0);
        assert_eq!(stats.max_discount, 0.0);
        assert_eq!(stats.total_savings, 0.0);
    }

    #[test]
    fn sorting_is_descending_and_stable() {
        let deals = vec![
            deal("first-25", 25.0, 25.0),
            deal("top", 60.0, 60.0),
            deal("second-25", 25.0, 25.0),
        ];
        let names: Vec<_> = sort_by_discount(&deals)
            .into_iter()
            .map(|d| d.product_name)
            .collect();
        assert_eq!(names, ["top", "first-25", "second-25"]);
    }
}
