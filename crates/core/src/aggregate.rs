use crate::domain::catalog::Category;
use crate::domain::deal::{DealRecord, EXCELLENT_DISCOUNT_PCT, GREAT_DISCOUNT_PCT};
use crate::extract::extract;
use crate::fetch::PageSource;

/// Fetches and extracts every category in order, one at a time.
///
/// A category whose fetch fails contributes no deals; the run carries on.
pub async fn collect_deals(source: &dyn PageSource, categories: &[Category]) -> Vec<DealRecord> {
    let mut deals = Vec::new();
    for category in categories {
        deals = collect_category(source, category, deals).await;
    }

    tracing::info!(
        source = source.source_name(),
        categories = categories.len(),
        total = deals.len(),
        "deal search complete"
    );
    deals
}

async fn collect_category(
    source: &dyn PageSource,
    category: &Category,
    mut acc: Vec<DealRecord>,
) -> Vec<DealRecord> {
    tracing::info!(
        vendor = category.vendor.label(),
        category = category.name,
        "searching category"
    );

    let text = match source.fetch_category(category).await {
        Ok(text) => text,
        Err(err) => {
            tracing::warn!(
                category = category.key,
                url = category.url,
                error = %format!("{err:#}"),
                "fetch failed; treating category as empty"
            );
            return acc;
        }
    };

    let found = extract(&text, category.url, category.vendor);
    tracing::info!(category = category.key, deals = found.len(), "category extracted");
    acc.extend(found);
    acc
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DealSummary {
    pub total: usize,
    pub excellent: usize,
    pub great: usize,
}

pub fn summarize(deals: &[DealRecord]) -> DealSummary {
    deals.iter().fold(
        DealSummary {
            total: deals.len(),
            ..DealSummary::default()
        },
        |mut summary, deal| {
            if deal.discount_pct >= EXCELLENT_DISCOUNT_PCT {
                summary.excellent += 1;
            } else if deal.discount_pct >= GREAT_DISCOUNT_PCT {
                summary.great += 1;
            }
            summary
        },
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::catalog::{find_category, CATALOG};
    use std::collections::HashMap;

    struct CannedSource {
        pages: HashMap<&'static str, Result<&'static str, &'static str>>,
    }

    #[async_trait::async_trait]
    impl PageSource for CannedSource {
        fn source_name(&self) -> &'static str {
            "canned"
        }

        async fn fetch_category(&self, category: &Category) -> anyhow::Result<String> {
            match self.pages.get(category.key) {
                Some(Ok(text)) => Ok(text.to_string()),
                Some(Err(msg)) => Err(anyhow::anyhow!(*msg)),
                None => Ok(String::new()),
            }
        }
    }

    #[tokio::test]
    async fn keeps_catalog_order_and_survives_fetch_failures() {
        let source = CannedSource {
            pages: HashMap::from([
                (
                    "golf_town_clubs",
                    Ok("Driver · $500.00 $250.00 (50% off)"),
                ),
                (
                    "gcw_shoes",
                    Ok("Spikeless · Our Price: $120.00 · Sale Price: $84.00 · You save $36.00"),
                ),
                ("gcw_gloves", Err("connection reset")),
                (
                    "gcw_bags",
                    Ok("Stand Bag · Our Price: $200.00 · Sale Price: $120.00 · You save $80.00"),
                ),
            ]),
        };

        let deals = collect_deals(&source, CATALOG).await;
        let names: Vec<_> = deals.iter().map(|d| d.product_name.as_str()).collect();
        assert_eq!(names, ["Spikeless", "Stand Bag", "Driver"]);

        let bags = find_category("gcw_bags").unwrap();
        assert_eq!(deals[1].url, bags.url);
        assert_eq!(deals[2].source, "Golf Town");
    }

    #[tokio::test]
    async fn all_failures_yield_empty_sequence() {
        let pages = CATALOG
            .iter()
            .map(|c| (c.key, Err("timed out")))
            .collect();
        let deals = collect_deals(&CannedSource { pages }, CATALOG).await;
        assert!(deals.is_empty());
    }

    #[test]
    fn summary_buckets_by_discount() {
        let deal = |pct: f64| DealRecord {
            product_name: "X".to_string(),
            original_price: 100.0,
            sale_price: 100.0 - pct,
            savings: pct,
            discount_pct: pct,
            url: String::new(),
            source: "Golf Town".to_string(),
        };
        let deals = vec![deal(60.0), deal(50.0), deal(49.9), deal(30.0), deal(10.0)];
        assert_eq!(
            summarize(&deals),
            DealSummary {
                total: 5,
                excellent: 2,
                great: 2,
            }
        );
    }
}
