use crate::domain::catalog::CATALOG;
use crate::domain::deal::{DealRecord, DealsDocument};
use crate::extract::extract;
use crate::storage::write_json;
use anyhow::Context;
use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::Path;

pub fn write_document(path: &Path, doc: &DealsDocument) -> anyhow::Result<()> {
    anyhow::ensure!(
        doc.total_deals == doc.deals.len(),
        "total_deals ({}) does not match deals ({})",
        doc.total_deals,
        doc.deals.len()
    );
    write_json(path, doc)
}

/// Plain array of records for consumers that don't want the envelope.
pub fn write_deals_array(path: &Path, deals: &[DealRecord]) -> anyhow::Result<()> {
    write_json(path, deals)
}

/// Reads the aggregate document.
///
/// Older producers stored raw listing text per category key instead of records;
/// those documents are run through the extractor on the way in.
pub fn read_document(path: &Path) -> anyhow::Result<DealsDocument> {
    let body = match std::fs::read_to_string(path) {
        Ok(body) => body,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
            anyhow::bail!(
                "{} not found; run golfdeals_worker first",
                path.display()
            );
        }
        Err(err) => {
            return Err(err).with_context(|| format!("failed to read {}", path.display()));
        }
    };

    let stored = serde_json::from_str::<StoredDocument>(&body)
        .with_context(|| format!("{} is not a deals document", path.display()))?;
    Ok(stored.into_document())
}

#[derive(Debug, Deserialize)]
struct StoredDocument {
    timestamp: String,
    #[serde(default)]
    total_deals: Option<usize>,
    deals: StoredDeals,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum StoredDeals {
    Records(Vec<DealRecord>),
    RawText(BTreeMap<String, String>),
}

impl StoredDocument {
    fn into_document(self) -> DealsDocument {
        let deals = match self.deals {
            StoredDeals::Records(deals) => {
                if let Some(total) = self.total_deals.filter(|t| *t != deals.len()) {
                    tracing::warn!(
                        total_deals = total,
                        deals = deals.len(),
                        "stored total_deals disagrees with deals; using deals length"
                    );
                }
                deals
            }
            StoredDeals::RawText(texts) => extract_raw_text(&texts),
        };

        DealsDocument {
            timestamp: self.timestamp,
            total_deals: deals.len(),
            deals,
        }
    }
}

fn extract_raw_text(texts: &BTreeMap<String, String>) -> Vec<DealRecord> {
    for key in texts.keys() {
        if !CATALOG.iter().any(|c| c.key == key.as_str()) {
            tracing::warn!(%key, "unknown category key in raw deals document; skipping");
        }
    }

    CATALOG
        .iter()
        .filter_map(|category| {
            texts
                .get(category.key)
                .map(|text| extract(text, category.url, category.vendor))
        })
        .flatten()
        .collect()
}
