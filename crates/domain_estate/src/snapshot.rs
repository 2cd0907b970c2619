//! Estate snapshot value objects

use serde::{Deserialize, Serialize};

use core_kernel::{Currency, Money};

/// Kind of asset held by the deceased
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AssetKind {
    Cash,
    Property,
    Investment,
    Business,
    Other,
}

/// A single asset line item
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssetItem {
    pub kind: AssetKind,
    pub description: String,
    /// Value in minor units of the estate currency
    pub value: i64,
}

impl AssetItem {
    pub fn new(kind: AssetKind, description: impl Into<String>, value: i64) -> Self {
        Self {
            kind,
            description: description.into(),
            value,
        }
    }
}

/// The financial position of an estate at the time of death
///
/// All amounts are integer minor units of `currency`. A snapshot is a plain
/// value; validation happens in [`crate::preprocess`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EstateSnapshot {
    pub currency: Currency,
    pub gross_assets: i64,
    pub debts: i64,
    pub funeral_cost: i64,
    pub wasiyyah: i64,
    /// All heirs unanimously consent to a bequest above one third
    #[serde(default)]
    pub wasiyyah_consent: bool,
    /// Optional itemisation of `gross_assets`
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub assets: Vec<AssetItem>,
}

impl EstateSnapshot {
    /// Creates a snapshot with only gross assets set
    pub fn new(currency: Currency, gross_assets: i64) -> Self {
        Self {
            currency,
            gross_assets,
            debts: 0,
            funeral_cost: 0,
            wasiyyah: 0,
            wasiyyah_consent: false,
            assets: Vec::new(),
        }
    }

    /// Creates a snapshot whose gross assets are the sum of the given items
    ///
    /// The sum saturates; an overflowing itemisation is reported by the
    /// preprocessor as an inconsistent total.
    pub fn from_assets(currency: Currency, assets: Vec<AssetItem>) -> Self {
        let gross_assets = assets
            .iter()
            .fold(0i64, |acc, item| acc.saturating_add(item.value));
        Self {
            assets,
            ..Self::new(currency, gross_assets)
        }
    }

    pub fn with_debts(mut self, debts: i64) -> Self {
        self.debts = debts;
        self
    }

    pub fn with_funeral_cost(mut self, funeral_cost: i64) -> Self {
        self.funeral_cost = funeral_cost;
        self
    }

    pub fn with_wasiyyah(mut self, wasiyyah: i64) -> Self {
        self.wasiyyah = wasiyyah;
        self
    }

    /// Records unanimous heir consent to a bequest above the one-third cap
    pub fn with_wasiyyah_consent(mut self, consent: bool) -> Self {
        self.wasiyyah_consent = consent;
        self
    }

    pub fn gross_assets_money(&self) -> Money {
        Money::from_minor(self.gross_assets, self.currency)
    }

    pub fn debts_money(&self) -> Money {
        Money::from_minor(self.debts, self.currency)
    }

    pub fn funeral_cost_money(&self) -> Money {
        Money::from_minor(self.funeral_cost, self.currency)
    }

    pub fn wasiyyah_money(&self) -> Money {
        Money::from_minor(self.wasiyyah, self.currency)
    }
}
