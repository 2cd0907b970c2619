//! Property-Based Test Generators
//!
//! Provides proptest strategies for generating random estates and heir sets
//! that the registry accepts.

use core_kernel::{Currency, HeirId};
use domain_estate::EstateSnapshot;
use domain_faraid::{Gender, HeirInput, Relationship};
use proptest::prelude::*;

/// Relationships of which at most one record is generated
const SINGULAR: [Relationship; 5] = [
    Relationship::Father,
    Relationship::Mother,
    Relationship::PaternalGrandfather,
    Relationship::PaternalGrandmother,
    Relationship::MaternalGrandmother,
];

/// Relationships generated zero to two times
const MULTIPLE: [Relationship; 16] = [
    Relationship::Son,
    Relationship::Daughter,
    Relationship::SonsSon,
    Relationship::SonsDaughter,
    Relationship::FullBrother,
    Relationship::FullSister,
    Relationship::PaternalHalfBrother,
    Relationship::PaternalHalfSister,
    Relationship::MaternalHalfBrother,
    Relationship::MaternalHalfSister,
    Relationship::FullBrothersSon,
    Relationship::PaternalHalfBrothersSon,
    Relationship::FullPaternalUncle,
    Relationship::PaternalHalfUncle,
    Relationship::FullPaternalUnclesSon,
    Relationship::PaternalHalfUnclesSon,
];

/// Largest heir set the generators can produce
const MAX_GENERATED: usize = 4 + SINGULAR.len() + 2 * MULTIPLE.len();

/// Strategy for generating valid Currency values
pub fn currency_strategy() -> impl Strategy<Value = Currency> {
    prop_oneof![
        Just(Currency::IDR),
        Just(Currency::MYR),
        Just(Currency::USD),
        Just(Currency::SAR),
        Just(Currency::KWD),
        Just(Currency::JPY),
    ]
}

/// Strategy for generating HeirId
pub fn heir_id_strategy() -> impl Strategy<Value = HeirId> {
    any::<[u8; 16]>().prop_map(|bytes| HeirId::from_uuid(uuid::Uuid::from_bytes(bytes)))
}

/// Strategy for generating any relationship
pub fn relationship_strategy() -> impl Strategy<Value = Relationship> {
    proptest::sample::select(Relationship::ALL.to_vec())
}

/// Strategy for generating estates that pass preprocessing
///
/// Debts stay under half of the gross assets, the funeral cost under a tenth
/// and the bequest within the one-third cap.
pub fn estate_strategy() -> impl Strategy<Value = EstateSnapshot> {
    (
        currency_strategy(),
        0i64..1_000_000_000_000i64,
        0u32..50u32,
        0u32..10u32,
        0u32..=100u32,
    )
        .prop_map(|(currency, gross, debt_pct, funeral_pct, bequest_pct)| {
            let debts = gross / 100 * debt_pct as i64;
            let funeral = gross / 100 * funeral_pct as i64;
            let after = gross - debts - funeral;
            let wasiyyah = after / 3 / 100 * bequest_pct as i64;
            EstateSnapshot::new(currency, gross)
                .with_debts(debts)
                .with_funeral_cost(funeral)
                .with_wasiyyah(wasiyyah)
        })
}

/// Strategy for generating structurally valid heir sets
///
/// Ids are sequential from 1. Roughly one heir in ten is predeceased.
pub fn heir_set_strategy() -> impl Strategy<Value = Vec<HeirInput>> {
    (
        any::<bool>(),
        0usize..=4,
        proptest::collection::vec(any::<bool>(), SINGULAR.len()),
        proptest::collection::vec(0usize..=2, MULTIPLE.len()),
        proptest::collection::vec(proptest::bool::weighted(0.9), MAX_GENERATED),
    )
        .prop_map(|(deceased_male, spouses, singular, counts, alive)| {
            let mut relationships = Vec::new();
            if deceased_male {
                relationships.extend(std::iter::repeat(Relationship::Wife).take(spouses));
            } else if spouses > 0 {
                relationships.push(Relationship::Husband);
            }
            for (relationship, present) in SINGULAR.iter().zip(&singular) {
                if *present {
                    relationships.push(*relationship);
                }
            }
            for (relationship, count) in MULTIPLE.iter().zip(&counts) {
                relationships.extend(std::iter::repeat(*relationship).take(*count));
            }

            relationships
                .into_iter()
                .zip(alive)
                .enumerate()
                .map(|(index, (relationship, is_alive))| {
                    let input = HeirInput::new(
                        HeirId::from_u128(index as u128 + 1),
                        relationship.tag(),
                        relationship.gender(),
                    );
                    if is_alive {
                        input
                    } else {
                        input.predeceased()
                    }
                })
                .collect()
        })
}

/// Strategy for generating a non-empty heir set with at least one living heir
pub fn living_heir_set_strategy() -> impl Strategy<Value = Vec<HeirInput>> {
    heir_set_strategy().prop_filter("needs a living heir", |heirs| {
        heirs.iter().any(|h| h.is_alive)
    })
}

/// Strategy for generating a gender
pub fn gender_strategy() -> impl Strategy<Value = Gender> {
    prop_oneof![Just(Gender::Male), Just(Gender::Female)]
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeSet;

    proptest! {
        #[test]
        fn heir_ids_are_unique(heirs in heir_set_strategy()) {
            let ids: BTreeSet<_> = heirs.iter().map(|h| h.id).collect();
            prop_assert_eq!(ids.len(), heirs.len());
        }

        #[test]
        fn never_husband_and_wife(heirs in heir_set_strategy()) {
            let husbands = heirs.iter().filter(|h| h.relationship == "husband").count();
            let wives = heirs.iter().filter(|h| h.relationship == "wife").count();
            prop_assert!(husbands == 0 || wives == 0);
            prop_assert!(wives <= 4);
        }

        #[test]
        fn estate_respects_bequest_cap(estate in estate_strategy()) {
            let after = estate.gross_assets - estate.debts - estate.funeral_cost;
            prop_assert!(after >= 0);
            prop_assert!(3 * estate.wasiyyah as i128 <= after as i128);
        }
    }
}
