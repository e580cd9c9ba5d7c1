use serde::{Deserialize, Serialize};

/// Retailer whose listing layout the extractor knows how to read.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Vendor {
    /// "Name · Our Price: $X · Sale Price: $Y · You save $Z"
    ClearanceWarehouse,
    /// "Name · $X $Y (N% off)"
    GolfTown,
}

impl Vendor {
    pub fn label(self) -> &'static str {
        match self {
            Self::ClearanceWarehouse => "Golf Clearance Warehouse",
            Self::GolfTown => "Golf Town",
        }
    }

    pub fn domain(self) -> &'static str {
        match self {
            Self::ClearanceWarehouse => "golfclearancewarehouse.com",
            Self::GolfTown => "golftown.com",
        }
    }

    pub fn all() -> [Vendor; 2] {
        [Self::ClearanceWarehouse, Self::GolfTown]
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Category {
    pub vendor: Vendor,
    /// Stable key, also used by the legacy raw-text document shape.
    pub key: &'static str,
    pub name: &'static str,
    pub url: &'static str,
    pub search_query: &'static str,
}

// Order matters: the aggregate lists deals in this order.
pub const CATALOG: &[Category] = &[
    Category {
        vendor: Vendor::ClearanceWarehouse,
        key: "gcw_shoes",
        name: "Shoes",
        url: "https://www.golfclearancewarehouse.com/golf-shoes-s/11.htm",
        search_query: "site:golfclearancewarehouse.com golf shoes price sale",
    },
    Category {
        vendor: Vendor::ClearanceWarehouse,
        key: "gcw_gloves",
        name: "Gloves",
        url: "https://www.golfclearancewarehouse.com/category-s/99.htm",
        search_query: "site:golfclearancewarehouse.com golf gloves price sale",
    },
    Category {
        vendor: Vendor::ClearanceWarehouse,
        key: "gcw_clubs",
        name: "Clubs",
        url: "https://www.golfclearancewarehouse.com/discount-golf-clubs-canada-s/656.htm",
        search_query: "site:golfclearancewarehouse.com golf clubs clearance price",
    },
    // Search covers bags as well, one category more than the scrape-era search
    // list had; the query follows the clearance warehouse pattern above.
    Category {
        vendor: Vendor::ClearanceWarehouse,
        key: "gcw_bags",
        name: "Bags",
        url: "https://www.golfclearancewarehouse.com/golf-bags-s/1.htm",
        search_query: "site:golfclearancewarehouse.com golf bags price sale",
    },
    Category {
        vendor: Vendor::GolfTown,
        key: "golf_town_clubs",
        name: "Clubs",
        url: "https://www.golftown.com/en-CA/sale/clearance/clubs/",
        search_query: "site:golftown.com clearance clubs price off",
    },
    Category {
        vendor: Vendor::GolfTown,
        key: "golf_town_shoes",
        name: "Shoes",
        url: "https://www.golftown.com/en-CA/sale/clearance/shoes/",
        search_query: "site:golftown.com clearance golf shoes price off",
    },
    Category {
        vendor: Vendor::GolfTown,
        key: "golf_town_gloves",
        name: "Gloves",
        url: "https://www.golftown.com/en-CA/sale/clearance/golf-gloves/",
        search_query: "site:golftown.com clearance golf gloves price off",
    },
];

pub fn find_category(key: &str) -> Option<&'static Category> {
    CATALOG.iter().find(|c| c.key == key)
}
