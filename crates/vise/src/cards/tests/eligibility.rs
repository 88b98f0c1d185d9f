use super::common::*;
use crate::cards::domain::{CardType, RestrictedCountries};
use crate::cards::eligibility::{
    EligibilityConfig, EligibilityDecision, EligibilityEvaluator, RejectionReason, TierGroup,
};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

#[test]
fn classic_is_always_eligible() {
    let evaluator = evaluator();
    for (income, vise_club, country) in [
        (None, None, "China"),
        (Some(Decimal::ZERO), Some(false), "Peru"),
        (Some(dec!(10000)), Some(true), "Iran"),
    ] {
        let decision = evaluator.evaluate(income, vise_club, "CLASSIC", country);
        assert_eq!(decision, EligibilityDecision::Eligible(CardType::Classic));
        assert!(decision.reason().is_none());
    }
}

#[test]
fn eligible_decision_carries_the_parsed_card_type() {
    let decision = evaluator().evaluate(Some(dec!(1500)), Some(true), " pLaTiNuM ", "Peru");
    assert_eq!(decision, EligibilityDecision::Eligible(CardType::Platinum));
}

#[test]
fn gold_requires_five_hundred_inclusive() {
    let evaluator = evaluator();
    assert!(evaluator
        .evaluate(Some(dec!(500)), Some(false), "gold", "Peru")
        .is_eligible());

    let decision = evaluator.evaluate(Some(dec!(499.99)), Some(true), "Gold", "Peru");
    match decision {
        EligibilityDecision::Rejected(RejectionReason::InsufficientIncome { tier, required }) => {
            assert_eq!(tier, TierGroup::Gold);
            assert_eq!(required, dec!(500));
        }
        other => panic!("expected income rejection, got {other:?}"),
    }
    let reason = decision.reason().expect("rejections carry a reason");
    assert!(reason.contains("500 USD"), "reason was {reason}");
}

#[test]
fn missing_income_counts_as_zero() {
    let decision = evaluator().evaluate(None, Some(true), "gold", "Peru");
    assert!(matches!(
        decision,
        EligibilityDecision::Rejected(RejectionReason::InsufficientIncome { .. })
    ));
}

#[test]
fn platinum_reports_income_before_subscription() {
    let evaluator = evaluator();

    let both_missing = evaluator.evaluate(Some(dec!(999)), Some(false), "platinum", "Peru");
    assert!(matches!(
        both_missing,
        EligibilityDecision::Rejected(RejectionReason::InsufficientIncome {
            tier: TierGroup::Platinum,
            ..
        })
    ));

    let no_club = evaluator.evaluate(Some(dec!(1000)), Some(false), "platinum", "Peru");
    assert_eq!(
        no_club,
        EligibilityDecision::Rejected(RejectionReason::MissingViseClub {
            tier: TierGroup::Platinum
        })
    );
    assert!(no_club
        .reason()
        .unwrap_or_default()
        .contains("VISE CLUB"));

    let missing_flag = evaluator.evaluate(Some(dec!(1500)), None, "platinum", "Peru");
    assert!(!missing_flag.is_eligible());

    assert!(evaluator
        .evaluate(Some(dec!(1000)), Some(true), "PlAtInUm", "Peru")
        .is_eligible());
}

#[test]
fn premium_tiers_check_income_then_subscription_then_country() {
    let evaluator = evaluator();
    for card in ["black", "WHITE"] {
        let all_failing = evaluator.evaluate(Some(dec!(1999.99)), Some(false), card, "China");
        assert!(matches!(
            all_failing,
            EligibilityDecision::Rejected(RejectionReason::InsufficientIncome {
                tier: TierGroup::BlackWhite,
                ..
            })
        ));

        let club_and_country = evaluator.evaluate(Some(dec!(2000)), Some(false), card, "China");
        assert_eq!(
            club_and_country,
            EligibilityDecision::Rejected(RejectionReason::MissingViseClub {
                tier: TierGroup::BlackWhite
            })
        );

        let country_only = evaluator.evaluate(Some(dec!(2500)), Some(true), card, "china");
        match &country_only {
            EligibilityDecision::Rejected(RejectionReason::RestrictedCountry {
                card_type,
                country,
            }) => {
                assert_eq!(Some(*card_type), CardType::parse(card));
                assert_eq!(country, "china");
            }
            other => panic!("expected country rejection, got {other:?}"),
        }

        assert!(evaluator
            .evaluate(Some(dec!(2000)), Some(true), card, "Peru")
            .is_eligible());
    }
}

#[test]
fn restricted_country_matching_ignores_case_and_accents_as_listed() {
    let evaluator = evaluator();
    for country in ["IRÁN", "iran", "Vietnam", "INDIA"] {
        assert!(
            !evaluator
                .evaluate(Some(dec!(5000)), Some(true), "white", country)
                .is_eligible(),
            "{country} should be restricted"
        );
    }
}

#[test]
fn unknown_card_types_are_rejected_generically() {
    let decision = evaluator().evaluate(Some(dec!(9000)), Some(true), "diamond", "Peru");
    assert_eq!(
        decision,
        EligibilityDecision::Rejected(RejectionReason::InvalidCardType("diamond".to_string()))
    );
    assert!(decision
        .reason()
        .unwrap_or_default()
        .contains("invalid card type"));
}

#[test]
fn restricted_set_can_be_replaced() {
    let config = EligibilityConfig::default()
        .with_restricted_countries(RestrictedCountries::new(["Atlantis"]));
    let evaluator = EligibilityEvaluator::new(config);

    assert!(evaluator
        .evaluate(Some(dec!(3000)), Some(true), "black", "China")
        .is_eligible());
    assert!(!evaluator
        .evaluate(Some(dec!(3000)), Some(true), "black", "atlantis")
        .is_eligible());
}
