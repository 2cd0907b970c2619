//! End-to-end tests for the faraid engine
//!
//! Tests cover the classic textbook cases, exclusion, awl and radd, amount
//! rounding, estate errors, stage reporting and the audit trail.

use core_kernel::{Currency, DeceasedId, Fraction, Money};
use domain_faraid::engine::run;
use domain_faraid::{
    calculate, calculate_with, CalculationOptions, CalculationStage, EngineError, Gender,
    HeirInput, Normalization, Relationship, RuleId, ShareKind, Warning,
};
use rust_decimal_macros::dec;
use test_utils::{
    assert_amount, assert_amounts_sum_to_net, assert_excluded, assert_fractions_sum_to_one,
    assert_kind, assert_percentage, assert_share, heir_id, DeceasedFixtures, EstateBuilder,
    EstateFixtures, HeirScenarios, HeirSetBuilder,
};

mod textbook_cases {
    use super::*;

    #[test]
    fn test_wife_and_son() {
        let result = calculate(&EstateFixtures::idr_1_200_000(), &HeirScenarios::wife_and_son())
            .unwrap();

        assert_share(&result, heir_id(1), Fraction::of(1, 8));
        assert_share(&result, heir_id(2), Fraction::of(7, 8));
        assert_amount(&result, heir_id(1), 150_000);
        assert_amount(&result, heir_id(2), 1_050_000);
        assert_percentage(&result, heir_id(1), dec!(12.5));
        assert_percentage(&result, heir_id(2), dec!(87.5));
        assert_kind(&result, heir_id(1), ShareKind::Fixed);
        assert_kind(&result, heir_id(2), ShareKind::Residuary);
        assert_eq!(result.normalization(), Normalization::None);
        assert_eq!(result.stage(), CalculationStage::Done);
        assert!(result.warnings().is_empty());
        assert_amounts_sum_to_net(&result);
    }

    #[test]
    fn test_son_and_daughter_two_to_one() {
        let heirs = HeirSetBuilder::new().sons(1).daughters(2).build();
        let result = calculate(&EstateFixtures::idr_1_200_000(), &heirs).unwrap();

        assert_share(&result, heir_id(1), Fraction::of(1, 2));
        assert_share(&result, heir_id(2), Fraction::of(1, 4));
        assert_share(&result, heir_id(3), Fraction::of(1, 4));
        assert_fractions_sum_to_one(&result);
    }

    #[test]
    fn test_father_with_daughter_takes_sixth_and_residue() {
        let heirs = HeirSetBuilder::new().father().daughters(1).build();
        let result = calculate(&EstateFixtures::idr_1_200_000(), &heirs).unwrap();

        assert_share(&result, heir_id(1), Fraction::of(1, 2));
        assert_share(&result, heir_id(2), Fraction::of(1, 2));
        let father = result.assignment_for(heir_id(1)).unwrap();
        assert_eq!(father.fixed_portion, Fraction::of(1, 6));
        assert_eq!(father.residuary_portion, Fraction::of(1, 3));
        assert_eq!(
            father.basis,
            vec![RuleId::FardFatherWithDaughter, RuleId::AsabahFather]
        );
    }

    #[test]
    fn test_umariyyatayn_with_husband() {
        let result = calculate(
            &EstateFixtures::idr_1_200_000(),
            &HeirScenarios::umariyyatayn_husband(),
        )
        .unwrap();

        assert_share(&result, heir_id(1), Fraction::of(1, 2));
        assert_share(&result, heir_id(2), Fraction::of(1, 3));
        assert_share(&result, heir_id(3), Fraction::of(1, 6));
        assert!(result.applied_rules().contains(&RuleId::FardMotherUmariyyatayn));
    }

    #[test]
    fn test_umariyyatayn_with_wife() {
        let result = calculate(
            &EstateFixtures::idr_1_200_000(),
            &HeirScenarios::umariyyatayn_wife(),
        )
        .unwrap();

        assert_share(&result, heir_id(1), Fraction::of(1, 4));
        assert_share(&result, heir_id(2), Fraction::of(1, 2));
        assert_share(&result, heir_id(3), Fraction::of(1, 4));
    }

    #[test]
    fn test_mushtarakah_full_brother_gets_nothing() {
        let result =
            calculate(&EstateFixtures::idr_1_200_000(), &HeirScenarios::mushtarakah()).unwrap();

        assert_share(&result, heir_id(1), Fraction::of(1, 2));
        assert_share(&result, heir_id(2), Fraction::of(1, 6));
        assert_share(&result, heir_id(3), Fraction::of(1, 6));
        assert_share(&result, heir_id(4), Fraction::of(1, 6));
        assert_share(&result, heir_id(5), Fraction::ZERO);
        assert_kind(&result, heir_id(5), ShareKind::Residuary);
        assert!(result.warnings().contains(&Warning::ResidueExhausted {
            rule: RuleId::AsabahFullBrother
        }));
        assert_fractions_sum_to_one(&result);
        assert_amounts_sum_to_net(&result);
    }

    #[test]
    fn test_takmilah_for_sons_daughter() {
        let heirs = HeirSetBuilder::new()
            .daughters(1)
            .with(Relationship::SonsDaughter, 1)
            .with(Relationship::FullPaternalUncle, 1)
            .build();
        let result = calculate(&EstateFixtures::idr_1_200_000(), &heirs).unwrap();

        assert_share(&result, heir_id(1), Fraction::of(1, 2));
        assert_share(&result, heir_id(2), Fraction::of(1, 6));
        assert_share(&result, heir_id(3), Fraction::of(1, 3));
    }

    #[test]
    fn test_full_sister_residuary_with_daughters() {
        let heirs = HeirSetBuilder::new()
            .daughters(2)
            .with(Relationship::FullSister, 1)
            .with(Relationship::PaternalHalfBrother, 1)
            .build();
        let result = calculate(&EstateFixtures::idr_1_200_000(), &heirs).unwrap();

        assert_share(&result, heir_id(1), Fraction::of(1, 3));
        assert_share(&result, heir_id(2), Fraction::of(1, 3));
        assert_share(&result, heir_id(3), Fraction::of(1, 3));
        assert_excluded(&result, heir_id(4));
    }
}

mod exclusion {
    use super::*;

    #[test]
    fn test_son_excludes_full_brother() {
        let result = calculate(
            &EstateFixtures::idr_1_200_000(),
            &HeirScenarios::children_with_brother(),
        )
        .unwrap();

        assert_excluded(&result, heir_id(3));
        let brother = result.assignment_for(heir_id(3)).unwrap();
        assert_eq!(brother.basis, vec![RuleId::HajbFullSiblingByAgnate]);
        assert_eq!(result.excluded_count(), 1);
        assert_fractions_sum_to_one(&result);
    }

    #[test]
    fn test_grandfather_excludes_siblings() {
        let heirs = HeirSetBuilder::new()
            .with(Relationship::PaternalGrandfather, 1)
            .with(Relationship::FullBrother, 2)
            .build();
        let result = calculate(&EstateFixtures::idr_1_200_000(), &heirs).unwrap();

        assert_share(&result, heir_id(1), Fraction::ONE);
        assert_excluded(&result, heir_id(2));
        assert_excluded(&result, heir_id(3));
    }

    #[test]
    fn test_predeceased_son_lets_grandson_inherit() {
        let heirs = HeirSetBuilder::new()
            .with_predeceased(Relationship::Son)
            .with(Relationship::SonsSon, 1)
            .build();
        let result = calculate(&EstateFixtures::idr_1_200_000(), &heirs).unwrap();

        assert_excluded(&result, heir_id(1));
        assert_eq!(
            result.assignment_for(heir_id(1)).unwrap().basis,
            vec![RuleId::HajbPredeceased]
        );
        assert_share(&result, heir_id(2), Fraction::ONE);
    }

    #[test]
    fn test_adding_son_excludes_brother() {
        let without = HeirSetBuilder::new()
            .wives(1)
            .with(Relationship::FullBrother, 1)
            .build();
        let result = calculate(&EstateFixtures::idr_1_200_000(), &without).unwrap();
        assert_kind(&result, heir_id(2), ShareKind::Residuary);

        let with = HeirSetBuilder::new()
            .wives(1)
            .with(Relationship::FullBrother, 1)
            .sons(1)
            .build();
        let result = calculate(&EstateFixtures::idr_1_200_000(), &with).unwrap();
        assert_excluded(&result, heir_id(2));
    }
}

mod normalization {
    use super::*;

    #[test]
    fn test_awl_rescales_to_thirteenths() {
        let result = calculate(
            &EstateFixtures::idr_1_200_000(),
            &HeirScenarios::awl_husband_daughters_mother(),
        )
        .unwrap();

        // husband 1, mother 2, daughters 3 and 4
        assert_eq!(
            result.normalization(),
            Normalization::Awl {
                total_fixed: Fraction::of(13, 12)
            }
        );
        assert_share(&result, heir_id(1), Fraction::of(3, 13));
        assert_share(&result, heir_id(2), Fraction::of(2, 13));
        assert_share(&result, heir_id(3), Fraction::of(4, 13));
        assert_share(&result, heir_id(4), Fraction::of(4, 13));
        assert_amount(&result, heir_id(1), 276_923);
        assert_amount(&result, heir_id(2), 184_615);
        assert_amount(&result, heir_id(3), 369_231);
        assert_amount(&result, heir_id(4), 369_231);
        assert_eq!(result.applied_rules().last(), Some(&RuleId::Awl));
        assert_fractions_sum_to_one(&result);
        assert_amounts_sum_to_net(&result);
    }

    #[test]
    fn test_radd_sole_daughter() {
        let result =
            calculate(&EstateFixtures::idr_1_200_000(), &HeirScenarios::sole_daughter()).unwrap();

        assert_share(&result, heir_id(1), Fraction::ONE);
        assert_amount(&result, heir_id(1), 1_200_000);
        assert_eq!(
            result.normalization(),
            Normalization::Radd {
                surplus: Fraction::of(1, 2),
                to_spouse: false
            }
        );
        assert_eq!(
            result.assignment_for(heir_id(1)).unwrap().basis,
            vec![RuleId::FardDaughterSingle, RuleId::Radd]
        );
    }

    #[test]
    fn test_radd_leaves_wife_unchanged() {
        let heirs = HeirSetBuilder::new().wives(1).daughters(1).build();
        let result = calculate(&EstateFixtures::idr_1_200_000(), &heirs).unwrap();

        assert_share(&result, heir_id(1), Fraction::of(1, 8));
        assert_share(&result, heir_id(2), Fraction::of(7, 8));
    }

    #[test]
    fn test_radd_to_sole_spouse() {
        let heirs = HeirSetBuilder::new().husband().build();
        let result = calculate(&EstateFixtures::idr_1_200_000(), &heirs).unwrap();

        assert_share(&result, heir_id(1), Fraction::ONE);
        assert!(result.warnings().contains(&Warning::RaddToSpouse));
        assert_eq!(result.normalization().rule(), Some(RuleId::RaddToSpouse));
    }
}

mod amounts {
    use super::*;

    #[test]
    fn test_rounding_remainder_goes_to_lowest_id() {
        let heirs = HeirSetBuilder::new().sons(3).build();
        let result = calculate(&EstateFixtures::small(Currency::USD), &heirs).unwrap();

        assert_amount(&result, heir_id(1), 34);
        assert_amount(&result, heir_id(2), 33);
        assert_amount(&result, heir_id(3), 33);
        assert_eq!(result.rounding_remainder().minor_units(), 1);
        assert_eq!(result.remainder_recipient(), Some(heir_id(1)));
        assert_amounts_sum_to_net(&result);
    }

    #[test]
    fn test_liabilities_deducted_before_distribution() {
        let result = calculate(&EstateFixtures::with_liabilities(), &HeirScenarios::wife_and_son())
            .unwrap();

        assert_eq!(result.net_estate().distributable.minor_units(), 1_200_000);
        assert_amount(&result, heir_id(1), 150_000);
    }

    #[test]
    fn test_no_eligible_heir_leaves_estate_undistributed() {
        let heirs = HeirSetBuilder::new()
            .with_predeceased(Relationship::Son)
            .build();
        let result = calculate(&EstateFixtures::idr_1_200_000(), &heirs).unwrap();

        assert_excluded(&result, heir_id(1));
        assert_eq!(
            result.warnings(),
            &[Warning::NoEligibleHeir {
                undistributed: Money::from_minor(1_200_000, Currency::IDR)
            }]
        );
        assert_eq!(result.remainder_recipient(), None);
        assert!(result.total_amount().unwrap().is_zero());
    }

    #[test]
    fn test_empty_heir_list_is_not_an_error() {
        let result = calculate(&EstateFixtures::idr_1_200_000(), &[]).unwrap();
        assert!(result.assignments().is_empty());
        assert!(result.has_warning(|w| matches!(w, Warning::NoEligibleHeir { .. })));
    }
}

mod estate_errors {
    use super::*;

    #[test]
    fn test_wasiyyah_over_cap() {
        let err = calculate(&EstateFixtures::excessive_wasiyyah(), &HeirScenarios::wife_and_son())
            .unwrap_err();
        assert_eq!(
            err,
            EngineError::WasiyyahExceedsLimit {
                wasiyyah: 400_000,
                limit: 333_333
            }
        );
    }

    #[test]
    fn test_wasiyyah_with_consent_is_recorded() {
        let estate = EstateBuilder::new()
            .with_gross_assets(1_000_000)
            .with_wasiyyah(400_000)
            .with_consent()
            .build();
        let result = calculate(&estate, &HeirScenarios::wife_and_son()).unwrap();

        assert_eq!(result.applied_rules().first(), Some(&RuleId::WasiyyahConsentOverride));
        assert!(result.has_warning(|w| matches!(w, Warning::WasiyyahConsentOverride { .. })));
        assert_eq!(result.net_estate().distributable.minor_units(), 600_000);
    }

    #[test]
    fn test_negative_estate() {
        let estate = EstateBuilder::new()
            .with_gross_assets(100)
            .with_debts(150)
            .build();
        let err = calculate(&estate, &HeirScenarios::wife_and_son()).unwrap_err();
        assert!(matches!(err, EngineError::NegativeEstate { .. }));
    }
}

mod heir_errors {
    use super::*;

    #[test]
    fn test_unrecognized_relationship() {
        let heirs = HeirSetBuilder::new().with_tag("cousin", Gender::Male).build();
        let err = calculate(&EstateFixtures::idr_1_200_000(), &heirs).unwrap_err();
        assert_eq!(err, EngineError::UnrecognizedRelationship("cousin".to_string()));
    }

    #[test]
    fn test_spouse_same_gender_as_deceased() {
        let heirs = HeirSetBuilder::new().wives(1).build();
        let err = calculate_with(
            &EstateFixtures::idr_1_200_000(),
            &heirs,
            Some(&DeceasedFixtures::female()),
            &CalculationOptions::default(),
        )
        .unwrap_err();
        assert!(matches!(err, EngineError::InvalidHeirSet(_)));
    }

    #[test]
    fn test_heir_cannot_be_the_deceased() {
        let deceased = DeceasedFixtures::male().with_id(DeceasedId::from_u128(1));
        let err = calculate_with(
            &EstateFixtures::idr_1_200_000(),
            &HeirScenarios::wife_and_son(),
            Some(&deceased),
            &CalculationOptions::default(),
        )
        .unwrap_err();
        assert!(matches!(err, EngineError::InvalidHeirSet(_)));
    }

    #[test]
    fn test_source_form_aliases() {
        let heirs = HeirSetBuilder::new()
            .with_tag("spouse", Gender::Female)
            .with_tag("child", Gender::Male)
            .build();
        let result = calculate_with(
            &EstateFixtures::idr_1_200_000(),
            &heirs,
            Some(&DeceasedFixtures::male()),
            &CalculationOptions::default(),
        )
        .unwrap();
        assert_eq!(result.assignments()[0].relationship, Relationship::Wife);
        assert_eq!(result.assignments()[1].relationship, Relationship::Son);
        assert_eq!(result.deceased().and_then(|d| d.name.as_deref()), Some("Ahmad"));
    }
}

mod stages {
    use super::*;

    #[test]
    fn test_failure_reports_validating_stage() {
        let heirs = vec![HeirInput::new(heir_id(1), "stepson", Gender::Male)];
        let failed = run(
            &EstateFixtures::idr_1_200_000(),
            &heirs,
            None,
            &CalculationOptions::default(),
        )
        .unwrap_err();
        assert_eq!(failed.stage, CalculationStage::Validating);
        assert!(matches!(failed.error, EngineError::UnrecognizedRelationship(_)));
    }

    #[test]
    fn test_failure_reports_preprocessing_stage() {
        let failed = run(
            &EstateFixtures::excessive_wasiyyah(),
            &HeirScenarios::wife_and_son(),
            None,
            &CalculationOptions::default(),
        )
        .unwrap_err();
        assert_eq!(failed.stage, CalculationStage::Preprocessing);
        assert!(failed.to_string().contains("preprocessing"));
    }
}

mod determinism {
    use super::*;

    #[test]
    fn test_identical_input_gives_identical_json() {
        let estate = EstateFixtures::idr_1_200_000();
        let heirs = HeirScenarios::awl_husband_daughters_mother();
        let first = serde_json::to_string(&calculate(&estate, &heirs).unwrap()).unwrap();
        let second = serde_json::to_string(&calculate(&estate, &heirs).unwrap()).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_input_order_does_not_matter() {
        let estate = EstateFixtures::idr_1_200_000();
        let heirs = HeirScenarios::mushtarakah();
        let mut reversed = heirs.clone();
        reversed.reverse();
        assert_eq!(
            calculate(&estate, &heirs).unwrap(),
            calculate(&estate, &reversed).unwrap()
        );
    }

    #[test]
    fn test_result_round_trips_through_json() {
        let result = calculate(&EstateFixtures::idr_1_200_000(), &HeirScenarios::wife_and_son())
            .unwrap();
        let json = serde_json::to_string(&result).unwrap();
        let back = serde_json::from_str(&json).unwrap();
        assert_eq!(result, back);
    }
}
