//! Test Data Builders
//!
//! Provides builder patterns for constructing test data with sensible defaults.
//! These builders allow tests to specify only the relevant fields while using
//! defaults for everything else.

use core_kernel::{Currency, HeirId};
use domain_estate::{AssetItem, EstateSnapshot};
use domain_faraid::{Gender, HeirInput, Relationship};

/// Heir id used by builders for the `n`th heir (1-based)
pub fn heir_id(n: u128) -> HeirId {
    HeirId::from_u128(n)
}

/// Builder for estate snapshots
pub struct EstateBuilder {
    currency: Currency,
    gross_assets: i64,
    assets: Vec<AssetItem>,
    debts: i64,
    funeral_cost: i64,
    wasiyyah: i64,
    wasiyyah_consent: bool,
}

impl Default for EstateBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl EstateBuilder {
    /// Creates a new builder for an IDR estate of 1,200,000 with no deductions
    pub fn new() -> Self {
        Self {
            currency: Currency::IDR,
            gross_assets: 1_200_000,
            assets: Vec::new(),
            debts: 0,
            funeral_cost: 0,
            wasiyyah: 0,
            wasiyyah_consent: false,
        }
    }

    pub fn with_currency(mut self, currency: Currency) -> Self {
        self.currency = currency;
        self
    }

    /// Sets the gross assets in minor units
    pub fn with_gross_assets(mut self, gross_assets: i64) -> Self {
        self.gross_assets = gross_assets;
        self
    }

    /// Adds an itemised asset; itemised assets replace the gross amount
    pub fn with_asset(mut self, asset: AssetItem) -> Self {
        self.assets.push(asset);
        self
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

    /// Marks the bequest as consented to by all heirs
    pub fn with_consent(mut self) -> Self {
        self.wasiyyah_consent = true;
        self
    }

    /// Builds the estate snapshot
    pub fn build(self) -> EstateSnapshot {
        let snapshot = if self.assets.is_empty() {
            EstateSnapshot::new(self.currency, self.gross_assets)
        } else {
            EstateSnapshot::from_assets(self.currency, self.assets)
        };
        snapshot
            .with_debts(self.debts)
            .with_funeral_cost(self.funeral_cost)
            .with_wasiyyah(self.wasiyyah)
            .with_wasiyyah_consent(self.wasiyyah_consent)
    }
}

/// Builder for heir lists with sequential ids starting at 1
#[derive(Default)]
pub struct HeirSetBuilder {
    heirs: Vec<HeirInput>,
}

impl HeirSetBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    fn next_id(&self) -> HeirId {
        heir_id(self.heirs.len() as u128 + 1)
    }

    /// Adds an heir by raw tag
    pub fn with_tag(mut self, tag: &str, gender: Gender) -> Self {
        let id = self.next_id();
        self.heirs.push(HeirInput::new(id, tag, gender));
        self
    }

    /// Adds `count` living heirs of `relationship`
    pub fn with(mut self, relationship: Relationship, count: usize) -> Self {
        for _ in 0..count {
            self = self.with_tag(relationship.tag(), relationship.gender());
        }
        self
    }

    /// Adds a predeceased heir of `relationship`
    pub fn with_predeceased(mut self, relationship: Relationship) -> Self {
        let id = self.next_id();
        self.heirs
            .push(HeirInput::new(id, relationship.tag(), relationship.gender()).predeceased());
        self
    }

    /// Names the most recently added heir
    pub fn named(mut self, name: &str) -> Self {
        if let Some(last) = self.heirs.pop() {
            self.heirs.push(last.with_name(name));
        }
        self
    }

    pub fn husband(self) -> Self {
        self.with(Relationship::Husband, 1)
    }

    pub fn wives(self, count: usize) -> Self {
        self.with(Relationship::Wife, count)
    }

    pub fn father(self) -> Self {
        self.with(Relationship::Father, 1)
    }

    pub fn mother(self) -> Self {
        self.with(Relationship::Mother, 1)
    }

    pub fn sons(self, count: usize) -> Self {
        self.with(Relationship::Son, count)
    }

    pub fn daughters(self, count: usize) -> Self {
        self.with(Relationship::Daughter, count)
    }

    pub fn build(self) -> Vec<HeirInput> {
        self.heirs
    }
}
