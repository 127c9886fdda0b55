use super::breakdown::calculate_breakdown;
use super::config::AdvisorConfig;
use super::eligibility::{explain_exclusions, filter_eligible};
use super::error::{AdvisorError, Result};
use super::ranking::{rank_cards, Recommendation};
use super::split::{optimize_split, SplitStrategy};
use super::validation::{validate_config, validate_inputs};
use crate::catalog::CardRecord;
use crate::criteria::MatchingCriteria;
use serde::Serialize;
use tracing::debug;

/// Engine output: ranked cards plus an optional split plan.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RecommendationSet {
    pub recommendations: Vec<Recommendation>,
    pub split_strategy: Option<SplitStrategy>,
}

impl RecommendationSet {
    pub fn empty() -> Self {
        Self {
            recommendations: Vec::new(),
            split_strategy: None,
        }
    }

    pub fn best(&self) -> Option<&Recommendation> {
        self.recommendations.first()
    }
}

/// Recommend cards for paying `criteria.tuition_amount`.
///
/// Pure and deterministic: identical inputs always give identical output.
/// No eligible cards (or an empty catalog) is an `Ok` with an empty list; only
/// structurally invalid input is rejected.
pub fn recommend(
    catalog: &[CardRecord],
    criteria: &MatchingCriteria,
    config: &AdvisorConfig,
) -> Result<RecommendationSet> {
    validate_config(config).map_err(AdvisorError::InvalidConfig)?;
    validate_inputs(catalog, criteria)?;

    if catalog.is_empty() {
        debug!("catalog is empty, nothing to recommend");
        return Ok(RecommendationSet::empty());
    }

    for (card, reason) in explain_exclusions(catalog, criteria, config) {
        debug!(card = %card.name, issuer = %card.issuer, "excluded: {}", reason);
    }

    let eligible = filter_eligible(catalog, criteria, config);
    debug!(
        eligible = eligible.len(),
        catalog = catalog.len(),
        "eligibility filter applied"
    );

    let valued = eligible
        .into_iter()
        .map(|card| {
            let breakdown = calculate_breakdown(
                &card,
                criteria.tuition_amount,
                criteria,
                &config.processing_fee,
            );
            (card, breakdown)
        })
        .collect();

    let recommendations = rank_cards(valued, criteria.preferred_rewards);
    let split_strategy = optimize_split(&recommendations, criteria, config);

    Ok(RecommendationSet {
        recommendations,
        split_strategy,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{CreditTier, RewardsType};
    use crate::criteria::RecentApplications;
    use crate::money::{Cents, Rate};

    fn sample_card(
        name: &str,
        issuer: &str,
        bonus: i64,
        requirement: Option<i64>,
        rate_bp: u32,
    ) -> CardRecord {
        CardRecord {
            name: name.to_string(),
            issuer: issuer.to_string(),
            signup_bonus_value: Cents(bonus),
            signup_bonus_spend_requirement: requirement.map(Cents),
            signup_bonus_timeframe_months: 3,
            annual_fee: Cents::ZERO,
            first_year_fee_waived: false,
            rewards_rate: Some(Rate(rate_bp)),
            rewards_type: RewardsType::CashBack,
            min_credit_tier: None,
            is_business_card: false,
            active: true,
        }
    }

    fn sample_criteria(tuition: i64, monthly_spend: i64) -> MatchingCriteria {
        MatchingCriteria {
            credit_tier: CreditTier::Excellent,
            current_cards: vec![],
            monthly_spend: Cents(monthly_spend),
            preferred_rewards: RewardsType::CashBack,
            open_to_business_cards: false,
            tuition_amount: Cents(tuition),
            recent_applications: RecentApplications::None,
            travel_partners: vec![],
        }
    }

    fn mixed_catalog() -> Vec<CardRecord> {
        let mut premium = sample_card("Sapphire Reserve", "Chase", 100_000, Some(400_000), 300);
        premium.annual_fee = Cents(55_000);
        premium.min_credit_tier = Some(CreditTier::Excellent);
        let mut business = sample_card("Ink Business Cash", "Chase", 75_000, Some(600_000), 100);
        business.is_business_card = true;
        let mut retired = sample_card("Retired Card", "Acme", 99_900, None, 500);
        retired.active = false;

        vec![
            sample_card("Double Cash", "Citi", 20_000, Some(150_000), 200),
            premium,
            business,
            sample_card("Venture", "Capital One", 75_000, Some(400_000), 200),
            sample_card("Blue Cash", "American Express", 25_000, Some(200_000), 150),
            retired,
            sample_card("Quicksilver", "Capital One", 20_000, Some(50_000), 150),
            sample_card("Discover It", "Discover", 0, None, 100),
        ]
    }

    #[test]
    fn test_scenario_single_card_bonus_credited() {
        let mut card = sample_card("Everyday Preferred", "Acme", 50_000, Some(300_000), 200);
        card.annual_fee = Cents(9_500);
        card.first_year_fee_waived = true;
        let criteria = sample_criteria(1_000_000, 150_000);

        let result = recommend(&[card], &criteria, &AdvisorConfig::default()).unwrap();

        assert_eq!(result.recommendations.len(), 1);
        let top = &result.recommendations[0];
        assert_eq!(top.rank, 1);
        assert_eq!(top.breakdown.signup_bonus, Cents(50_000));
        assert_eq!(top.breakdown.ongoing_rewards, Cents(20_000));
        assert_eq!(top.breakdown.annual_fee, Cents::ZERO);
        assert_eq!(top.breakdown.processing_fee, Cents(29_030));
        assert_eq!(top.estimated_savings, Cents(50_000 + 20_000 - 29_030));
        assert!(result.split_strategy.is_none());
    }

    #[test]
    fn test_scenario_requirement_out_of_reach() {
        let card = sample_card("Everyday", "Acme", 50_000, Some(300_000), 200);
        let criteria = sample_criteria(200_000, 0);

        let result = recommend(&[card], &criteria, &AdvisorConfig::default()).unwrap();

        let top = &result.recommendations[0];
        assert!(!top.breakdown.bonus_attained);
        assert_eq!(top.breakdown.signup_bonus, Cents::ZERO);
        assert_eq!(top.breakdown.ongoing_rewards, Cents(4_000));
    }

    #[test]
    fn test_scenario_split_across_two_bonuses() {
        let catalog = vec![
            sample_card("Alpha", "Acme", 50_000, Some(400_000), 200),
            sample_card("Bravo", "Beta Bank", 40_000, Some(400_000), 150),
        ];
        let criteria = sample_criteria(1_500_000, 0);

        let result = recommend(&catalog, &criteria, &AdvisorConfig::default()).unwrap();
        let split = result.split_strategy.as_ref().unwrap();

        assert_eq!(split.cards[0].card.name, result.recommendations[0].card.name);
        assert!(split.cards.iter().all(|c| c.allocated_amount >= Cents(400_000)));
        assert_eq!(split.cards[0].allocated_amount, Cents(1_100_000));
        assert_eq!(split.total_allocated(), criteria.tuition_amount);
        assert!(split.total_savings > result.recommendations[0].estimated_savings);
    }

    #[test]
    fn test_scenario_empty_catalog() {
        let criteria = sample_criteria(1_000_000, 0);
        let result = recommend(&[], &criteria, &AdvisorConfig::default()).unwrap();
        assert!(result.recommendations.is_empty());
        assert!(result.split_strategy.is_none());
        assert!(result.best().is_none());
    }

    #[test]
    fn test_all_cards_filtered_is_not_an_error() {
        let mut card = sample_card("Platinum", "Amex", 100_000, None, 100);
        card.min_credit_tier = Some(CreditTier::Excellent);
        let mut criteria = sample_criteria(1_000_000, 0);
        criteria.credit_tier = CreditTier::Fair;

        let result = recommend(&[card], &criteria, &AdvisorConfig::default()).unwrap();
        assert!(result.recommendations.is_empty());
        assert!(result.split_strategy.is_none());
    }

    #[test]
    fn test_invalid_tuition_rejected() {
        let result = recommend(&mixed_catalog(), &sample_criteria(0, 0), &AdvisorConfig::default());
        assert!(matches!(result, Err(AdvisorError::InvalidTuition(_))));
    }

    #[test]
    fn test_invalid_config_rejected() {
        let mut config = AdvisorConfig::default();
        config.split.max_cards = 7;
        let result = recommend(&mixed_catalog(), &sample_criteria(1_000_000, 0), &config);
        assert!(matches!(result, Err(AdvisorError::InvalidConfig(_))));
    }

    #[test]
    fn test_ranked_output_properties() {
        let mut criteria = sample_criteria(2_000_000, 50_000);
        criteria.credit_tier = CreditTier::Good;

        let result = recommend(&mixed_catalog(), &criteria, &AdvisorConfig::default()).unwrap();
        let recs = &result.recommendations;

        // Premium (needs excellent), business and inactive cards are gone
        assert_eq!(recs.len(), 5);
        assert!(recs
            .iter()
            .all(|r| r.card.min_credit_tier.map_or(true, |t| t <= criteria.credit_tier)));
        assert!(recs.iter().all(|r| !r.card.is_business_card));
        assert!(recs.iter().all(|r| r.card.active));

        for (i, r) in recs.iter().enumerate() {
            assert_eq!(r.rank, i + 1);
        }
        for pair in recs.windows(2) {
            assert!(pair[0].estimated_savings >= pair[1].estimated_savings);
        }

        if let Some(split) = &result.split_strategy {
            assert_eq!(split.total_allocated(), criteria.tuition_amount);
            assert!(split.total_savings > recs[0].estimated_savings);
            assert!(split.cards.len() >= 2 && split.cards.len() <= 3);
        }
    }

    #[test]
    fn test_identical_inputs_give_identical_output() {
        let criteria = sample_criteria(2_500_000, 100_000);
        let config = AdvisorConfig::default();

        let first = recommend(&mixed_catalog(), &criteria, &config).unwrap();
        let second = recommend(&mixed_catalog(), &criteria, &config).unwrap();
        assert_eq!(first, second);

        let first_json = serde_json::to_string(&first).unwrap();
        let second_json = serde_json::to_string(&second).unwrap();
        assert_eq!(first_json, second_json);
    }

    #[test]
    fn test_catalog_order_does_not_change_ranking() {
        let criteria = sample_criteria(2_500_000, 100_000);
        let config = AdvisorConfig::default();
        let mut reversed = mixed_catalog();
        reversed.reverse();

        let forward = recommend(&mixed_catalog(), &criteria, &config).unwrap();
        let backward = recommend(&reversed, &criteria, &config).unwrap();
        assert_eq!(forward, backward);
    }
}
