//! Pre-built Test Fixtures
//!
//! Provides ready-to-use estates and heir scenarios covering the classic
//! textbook cases. These fixtures are consistent and predictable for unit
//! tests.

use core_kernel::{Currency, DeceasedId, Money};
use domain_estate::EstateSnapshot;
use domain_faraid::{Deceased, Gender, HeirInput, Relationship};

use crate::builders::{EstateBuilder, HeirSetBuilder};

/// Fixture for Money test data
pub struct MoneyFixtures;

impl MoneyFixtures {
    pub fn idr(minor_units: i64) -> Money {
        Money::from_minor(minor_units, Currency::IDR)
    }

    pub fn myr(minor_units: i64) -> Money {
        Money::from_minor(minor_units, Currency::MYR)
    }
}

/// Fixture for estates
pub struct EstateFixtures;

impl EstateFixtures {
    /// Net estate of 1,200,000 IDR minor units with no deductions
    pub fn idr_1_200_000() -> EstateSnapshot {
        EstateBuilder::new().build()
    }

    /// 1,500,000 gross, 200,000 debts and 100,000 funeral cost
    pub fn with_liabilities() -> EstateSnapshot {
        EstateBuilder::new()
            .with_gross_assets(1_500_000)
            .with_debts(200_000)
            .with_funeral_cost(100_000)
            .build()
    }

    /// A bequest of 40% of the estate after liabilities
    pub fn excessive_wasiyyah() -> EstateSnapshot {
        EstateBuilder::new()
            .with_gross_assets(1_000_000)
            .with_wasiyyah(400_000)
            .build()
    }

    /// A net estate of 100 units, for rounding cases
    pub fn small(currency: Currency) -> EstateSnapshot {
        EstateBuilder::new()
            .with_currency(currency)
            .with_gross_assets(100)
            .build()
    }
}

/// Fixture for deceased persons
pub struct DeceasedFixtures;

impl DeceasedFixtures {
    pub fn male() -> Deceased {
        Deceased::new(Gender::Male)
            .with_id(DeceasedId::from_u128(1_000))
            .with_name("Ahmad")
    }

    pub fn female() -> Deceased {
        Deceased::new(Gender::Female)
            .with_id(DeceasedId::from_u128(2_000))
            .with_name("Aisyah")
    }
}

/// Classic heir scenarios
pub struct HeirScenarios;

impl HeirScenarios {
    /// Wife and son: 1/8 and 7/8
    pub fn wife_and_son() -> Vec<HeirInput> {
        HeirSetBuilder::new().wives(1).sons(1).build()
    }

    /// Husband, two daughters and mother: 13/12 before awl
    pub fn awl_husband_daughters_mother() -> Vec<HeirInput> {
        HeirSetBuilder::new().husband().mother().daughters(2).build()
    }

    /// A single daughter takes everything by radd
    pub fn sole_daughter() -> Vec<HeirInput> {
        HeirSetBuilder::new().daughters(1).build()
    }

    /// Husband, mother, two maternal half brothers and a full brother
    pub fn mushtarakah() -> Vec<HeirInput> {
        HeirSetBuilder::new()
            .husband()
            .mother()
            .with(Relationship::MaternalHalfBrother, 2)
            .with(Relationship::FullBrother, 1)
            .build()
    }

    /// Husband, father and mother
    pub fn umariyyatayn_husband() -> Vec<HeirInput> {
        HeirSetBuilder::new().husband().father().mother().build()
    }

    /// Wife, father and mother
    pub fn umariyyatayn_wife() -> Vec<HeirInput> {
        HeirSetBuilder::new().wives(1).father().mother().build()
    }

    /// Son, daughter and a full brother who is excluded
    pub fn children_with_brother() -> Vec<HeirInput> {
        HeirSetBuilder::new()
            .sons(1)
            .daughters(1)
            .with(Relationship::FullBrother, 1)
            .build()
    }
}
