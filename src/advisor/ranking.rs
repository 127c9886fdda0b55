use super::breakdown::ValueBreakdown;
use crate::catalog::{CardRecord, RewardsType};
use crate::money::Cents;
use serde::Serialize;
use std::cmp::Ordering;

/// One ranked card.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Recommendation {
    pub rank: usize,
    pub card: CardRecord,
    /// Breakdown with the full tuition amount on this card
    pub breakdown: ValueBreakdown,
    pub estimated_savings: Cents,
    /// Card earns the kind of rewards the user asked for (flexible always matches)
    pub matches_preferred_rewards: bool,
}

/// Order valued cards by net value descending, then name, then issuer, and
/// assign contiguous 1-based ranks.
pub fn rank_cards(
    mut valued: Vec<(CardRecord, ValueBreakdown)>,
    preferred: RewardsType,
) -> Vec<Recommendation> {
    valued.sort_by(compare_valued);

    valued
        .into_iter()
        .enumerate()
        .map(|(idx, (card, breakdown))| Recommendation {
            rank: idx + 1,
            estimated_savings: breakdown.net_value,
            matches_preferred_rewards: card.rewards_type == preferred
                || card.rewards_type == RewardsType::Flexible,
            card,
            breakdown,
        })
        .collect()
}

fn compare_valued(a: &(CardRecord, ValueBreakdown), b: &(CardRecord, ValueBreakdown)) -> Ordering {
    // Primary: net value descending
    b.1.net_value
        .cmp(&a.1.net_value)
        // Tie-breakers keep the order independent of catalog order
        .then_with(|| a.0.name.cmp(&b.0.name))
        .then_with(|| a.0.issuer.cmp(&b.0.issuer))
}
