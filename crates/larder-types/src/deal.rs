use serde::{Deserialize, Serialize};

use crate::record::{Fields, Record};

/// Store name used when a deal is added without one.
pub const UNKNOWN_STORE: &str = "TBD";

/// A discounted product spotted at a store. Prices are in whole won.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Deal {
    pub name: String,
    pub price: u64,
    pub weight: String,
    pub store: String,
    /// Percent off, `0..=100`.
    pub discount: u8,
    pub original_price: u64,
}

impl Deal {
    pub fn tier(&self) -> DiscountTier {
        DiscountTier::of(self.discount)
    }

    pub fn savings(&self) -> u64 {
        self.original_price.saturating_sub(self.price)
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewDeal {
    pub name: String,
    pub price: u64,
    pub weight: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub store: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub discount: Option<u8>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub original_price: Option<u64>,
}

impl NewDeal {
    pub fn new(name: impl Into<String>, price: u64, weight: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            price,
            weight: weight.into(),
            store: None,
            discount: None,
            original_price: None,
        }
    }

    pub fn at_store(mut self, store: impl Into<String>) -> Self {
        self.store = Some(store.into());
        self
    }

    pub fn discounted(mut self, discount: u8, original_price: u64) -> Self {
        self.discount = Some(discount);
        self.original_price = Some(original_price);
        self
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DealPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weight: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub store: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub discount: Option<u8>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub original_price: Option<u64>,
}

impl Fields for Deal {
    const NAMESPACE: &'static str = "deal";

    type Draft = NewDeal;
    type Patch = DealPatch;

    fn from_draft(draft: NewDeal) -> Self {
        Self {
            name: draft.name,
            price: draft.price,
            weight: draft.weight,
            store: draft
                .store
                .filter(|s| !s.is_empty())
                .unwrap_or_else(|| UNKNOWN_STORE.to_string()),
            discount: draft.discount.unwrap_or(0).min(100),
            original_price: draft.original_price.unwrap_or(draft.price),
        }
    }

    fn merge(&mut self, patch: &DealPatch) {
        if let Some(name) = &patch.name {
            self.name = name.clone();
        }
        if let Some(price) = patch.price {
            self.price = price;
        }
        if let Some(weight) = &patch.weight {
            self.weight = weight.clone();
        }
        if let Some(store) = &patch.store {
            self.store = store.clone();
        }
        if let Some(discount) = patch.discount {
            self.discount = discount.min(100);
        }
        if let Some(original_price) = patch.original_price {
            self.original_price = original_price;
        }
    }
}

/// How loudly a deal should be advertised.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DiscountTier {
    Minor,
    Good,
    Great,
    Hot,
}

impl DiscountTier {
    pub fn of(discount: u8) -> Self {
        match discount {
            30..=u8::MAX => Self::Hot,
            20..=29 => Self::Great,
            10..=19 => Self::Good,
            _ => Self::Minor,
        }
    }
}

/// Totals shown above the deal list.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct DealSummary {
    pub count: usize,
    /// Mean discount rounded half up; 0 for an empty list.
    pub average_discount: u8,
    pub total_savings: u64,
}

impl DealSummary {
    pub fn of(deals: &[Record<Deal>]) -> Self {
        let count = deals.len();
        let discount_sum: u64 = deals.iter().map(|d| u64::from(d.fields.discount)).sum();
        let average_discount = match count as u64 {
            0 => 0,
            n => ((discount_sum + n / 2) / n) as u8,
        };
        Self {
            count,
            average_discount,
            total_savings: deals.iter().map(|d| d.fields.savings()).sum(),
        }
    }
}
