use super::config::AdvisorConfig;
use crate::catalog::{CardRecord, CreditTier};
use crate::criteria::{MatchingCriteria, RecentApplications};
use std::fmt;

/// Why a card was dropped before scoring.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExclusionReason {
    Inactive,
    CreditTier { required: CreditTier, actual: CreditTier },
    AlreadyHeld { matched: String },
    BusinessCard,
    ApplicationVelocity { issuer: String },
}

impl fmt::Display for ExclusionReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExclusionReason::Inactive => write!(f, "card is not active"),
            ExclusionReason::CreditTier { required, actual } => {
                write!(f, "requires {} credit, user has {}", required, actual)
            }
            ExclusionReason::AlreadyHeld { matched } => {
                write!(f, "user already holds '{}'", matched)
            }
            ExclusionReason::BusinessCard => write!(f, "business card not accepted"),
            ExclusionReason::ApplicationVelocity { issuer } => {
                write!(f, "{} limits applicants with 5+ recent accounts", issuer)
            }
        }
    }
}

/// Return the first rule that excludes `card`, or None if the card is eligible.
pub fn exclusion_reason(
    card: &CardRecord,
    criteria: &MatchingCriteria,
    config: &AdvisorConfig,
) -> Option<ExclusionReason> {
    if !card.active {
        return Some(ExclusionReason::Inactive);
    }

    // Required tier must be at or below the user's tier
    if let Some(required) = card.min_credit_tier {
        if required > criteria.credit_tier {
            return Some(ExclusionReason::CreditTier {
                required,
                actual: criteria.credit_tier,
            });
        }
    }

    if let Some(matched) = held_match(card, &criteria.current_cards) {
        return Some(ExclusionReason::AlreadyHeld { matched });
    }

    if card.is_business_card && !criteria.open_to_business_cards {
        return Some(ExclusionReason::BusinessCard);
    }

    if criteria.recent_applications == RecentApplications::FivePlus
        && is_strict_velocity_issuer(&card.issuer, &config.strict_velocity_issuers)
    {
        return Some(ExclusionReason::ApplicationVelocity {
            issuer: card.issuer.clone(),
        });
    }

    None
}

/// Keep only the cards the user can realistically obtain and use.
/// An empty result is valid.
pub fn filter_eligible(
    cards: &[CardRecord],
    criteria: &MatchingCriteria,
    config: &AdvisorConfig,
) -> Vec<CardRecord> {
    cards
        .iter()
        .filter(|card| exclusion_reason(card, criteria, config).is_none())
        .cloned()
        .collect()
}

/// Every excluded card paired with the rule that dropped it, in catalog order.
pub fn explain_exclusions<'a>(
    cards: &'a [CardRecord],
    criteria: &MatchingCriteria,
    config: &AdvisorConfig,
) -> Vec<(&'a CardRecord, ExclusionReason)> {
    cards
        .iter()
        .filter_map(|card| exclusion_reason(card, criteria, config).map(|reason| (card, reason)))
        .collect()
}

/// Name matches exactly (case-insensitive) or the issuer contains the held entry.
fn held_match(card: &CardRecord, current_cards: &[String]) -> Option<String> {
    let issuer = card.issuer.to_lowercase();
    current_cards
        .iter()
        .map(|held| held.trim())
        .filter(|held| !held.is_empty())
        .find(|held| {
            card.name.trim().eq_ignore_ascii_case(held) || issuer.contains(&held.to_lowercase())
        })
        .map(|held| held.to_string())
}

fn is_strict_velocity_issuer(issuer: &str, strict: &[String]) -> bool {
    let issuer = issuer.to_lowercase();
    strict
        .iter()
        .map(|s| s.trim().to_lowercase())
        .any(|s| !s.is_empty() && issuer.contains(&s))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::RewardsType;
    use crate::money::{Cents, Rate};

    fn sample_card(name: &str, issuer: &str) -> CardRecord {
        CardRecord {
            name: name.to_string(),
            issuer: issuer.to_string(),
            signup_bonus_value: Cents(50_000),
            signup_bonus_spend_requirement: Some(Cents(300_000)),
            signup_bonus_timeframe_months: 3,
            annual_fee: Cents::ZERO,
            first_year_fee_waived: false,
            rewards_rate: Some(Rate(150)),
            rewards_type: RewardsType::CashBack,
            min_credit_tier: None,
            is_business_card: false,
            active: true,
        }
    }

    fn sample_criteria() -> MatchingCriteria {
        MatchingCriteria {
            credit_tier: CreditTier::Good,
            current_cards: vec![],
            monthly_spend: Cents::ZERO,
            preferred_rewards: RewardsType::CashBack,
            open_to_business_cards: false,
            tuition_amount: Cents(1_000_000),
            recent_applications: RecentApplications::None,
            travel_partners: vec![],
        }
    }

    fn names(cards: &[CardRecord]) -> Vec<&str> {
        cards.iter().map(|c| c.name.as_str()).collect()
    }

    #[test]
    fn test_all_cards_pass_with_no_constraints() {
        let cards = vec![
            sample_card("Freedom Unlimited", "Chase"),
            sample_card("Double Cash", "Citi"),
        ];
        let eligible = filter_eligible(&cards, &sample_criteria(), &AdvisorConfig::default());
        assert_eq!(eligible.len(), 2);
    }

    #[test]
    fn test_credit_tier_gate() {
        let mut premium = sample_card("Platinum", "Amex");
        premium.min_credit_tier = Some(CreditTier::Excellent);
        let mut entry = sample_card("Secured", "Capital One");
        entry.min_credit_tier = Some(CreditTier::Fair);
        let mut exact = sample_card("Gold", "Amex");
        exact.min_credit_tier = Some(CreditTier::Good);

        let cards = vec![premium, entry, exact];
        let eligible = filter_eligible(&cards, &sample_criteria(), &AdvisorConfig::default());
        assert_eq!(names(&eligible), vec!["Secured", "Gold"]);
    }

    #[test]
    fn test_stricter_tier_never_eligible_for_any_user_tier() {
        let tiers = [CreditTier::Below, CreditTier::Fair, CreditTier::Good, CreditTier::Excellent];
        for &required in &tiers {
            for &actual in &tiers {
                let mut card = sample_card("Gated", "Acme");
                card.min_credit_tier = Some(required);
                let mut criteria = sample_criteria();
                criteria.credit_tier = actual;

                let eligible =
                    filter_eligible(&[card], &criteria, &AdvisorConfig::default());
                assert_eq!(eligible.is_empty(), required > actual);
            }
        }
    }

    #[test]
    fn test_already_held_by_name() {
        let mut criteria = sample_criteria();
        criteria.current_cards = vec!["double cash".to_string()];

        let cards = vec![
            sample_card("Double Cash", "Citi Bank"),
            sample_card("Venture", "Capital One"),
        ];
        let eligible = filter_eligible(&cards, &criteria, &AdvisorConfig::default());
        assert_eq!(names(&eligible), vec!["Venture"]);
    }

    #[test]
    fn test_already_held_by_issuer_substring() {
        let mut criteria = sample_criteria();
        criteria.current_cards = vec!["chase".to_string()];

        let cards = vec![
            sample_card("Sapphire Preferred", "JPMorgan Chase"),
            sample_card("Venture", "Capital One"),
        ];
        let reasons = explain_exclusions(&cards, &criteria, &AdvisorConfig::default());
        assert_eq!(reasons.len(), 1);
        assert_eq!(reasons[0].0.name, "Sapphire Preferred");
        assert_eq!(
            reasons[0].1,
            ExclusionReason::AlreadyHeld {
                matched: "chase".to_string()
            }
        );
    }

    #[test]
    fn test_blank_held_entries_ignored() {
        let mut criteria = sample_criteria();
        criteria.current_cards = vec!["".to_string(), "   ".to_string()];

        let cards = vec![sample_card("Venture", "Capital One")];
        let eligible = filter_eligible(&cards, &criteria, &AdvisorConfig::default());
        assert_eq!(eligible.len(), 1);
    }

    #[test]
    fn test_business_card_gate() {
        let mut ink = sample_card("Ink Business Cash", "Chase");
        ink.is_business_card = true;
        let cards = vec![ink, sample_card("Double Cash", "Citi")];

        let mut criteria = sample_criteria();
        let eligible = filter_eligible(&cards, &criteria, &AdvisorConfig::default());
        assert_eq!(names(&eligible), vec!["Double Cash"]);

        criteria.open_to_business_cards = true;
        let eligible = filter_eligible(&cards, &criteria, &AdvisorConfig::default());
        assert_eq!(eligible.len(), 2);
    }

    #[test]
    fn test_velocity_gate_only_at_five_plus() {
        let cards = vec![
            sample_card("Sapphire Preferred", "Chase"),
            sample_card("Double Cash", "Citi"),
        ];
        let config = AdvisorConfig::default();
        let mut criteria = sample_criteria();

        criteria.recent_applications = RecentApplications::ThreeToFour;
        assert_eq!(filter_eligible(&cards, &criteria, &config).len(), 2);

        criteria.recent_applications = RecentApplications::FivePlus;
        let eligible = filter_eligible(&cards, &criteria, &config);
        assert_eq!(names(&eligible), vec!["Double Cash"]);
    }

    #[test]
    fn test_velocity_gate_respects_config() {
        let cards = vec![sample_card("Sapphire Preferred", "Chase")];
        let config = AdvisorConfig {
            strict_velocity_issuers: vec![],
            ..AdvisorConfig::default()
        };
        let mut criteria = sample_criteria();
        criteria.recent_applications = RecentApplications::FivePlus;

        assert_eq!(filter_eligible(&cards, &criteria, &config).len(), 1);
    }

    #[test]
    fn test_inactive_card_excluded() {
        let mut retired = sample_card("Retired", "Acme");
        retired.active = false;
        let reason = exclusion_reason(&retired, &sample_criteria(), &AdvisorConfig::default());
        assert_eq!(reason, Some(ExclusionReason::Inactive));
    }

    #[test]
    fn test_empty_catalog_is_empty_result() {
        let eligible = filter_eligible(&[], &sample_criteria(), &AdvisorConfig::default());
        assert!(eligible.is_empty());
    }

    #[test]
    fn test_exclusion_reason_display() {
        let reason = ExclusionReason::CreditTier {
            required: CreditTier::Excellent,
            actual: CreditTier::Fair,
        };
        assert_eq!(reason.to_string(), "requires excellent credit, user has fair");
    }
}
