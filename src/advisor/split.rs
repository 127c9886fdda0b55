use super::breakdown::{calculate_breakdown, ValueBreakdown};
use super::config::AdvisorConfig;
use super::ranking::Recommendation;
use crate::catalog::CardRecord;
use crate::criteria::MatchingCriteria;
use crate::money::Cents;
use serde::Serialize;
use tracing::debug;

/// One card's share of a split payment.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SplitAllocation {
    pub card: CardRecord,
    pub allocated_amount: Cents,
    /// Breakdown against `allocated_amount`, not the full tuition
    pub breakdown: ValueBreakdown,
}

/// A payment divided across several cards to unlock several bonuses.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SplitStrategy {
    pub cards: Vec<SplitAllocation>,
    pub total_savings: Cents,
}

impl SplitStrategy {
    pub fn total_allocated(&self) -> Cents {
        self.cards.iter().map(|c| c.allocated_amount).sum()
    }
}

/// Decide whether splitting the tuition across cards beats the best single card.
///
/// Greedy over the top `candidate_limit` ranked cards: the top card is always
/// used, each following card with a bonus requirement that still fits gets
/// exactly that requirement, and whatever is left goes to the top card. The
/// user's monthly spend over the bonus window is credited once, against the
/// top card's requirement. At most `max_cards` cards are used. Returns None
/// unless the split's total net value is strictly greater than the top card's
/// single-card value.
pub fn optimize_split(
    ranked: &[Recommendation],
    criteria: &MatchingCriteria,
    config: &AdvisorConfig,
) -> Option<SplitStrategy> {
    if ranked.len() < 2 {
        debug!("split skipped: fewer than two eligible cards");
        return None;
    }

    let tuition = criteria.tuition_amount;
    let candidates = &ranked[..config.split.candidate_limit.min(ranked.len())];

    let top_reserve = top_card_reserve(&candidates[0].card, criteria);

    // Only worth trying when at least two bonuses could be cleared from tuition
    let reachable = top_reserve.map_or(0, |req| usize::from(req <= tuition))
        + candidates[1..]
            .iter()
            .filter(|r| matches!(r.card.bonus_requirement(), Some(req) if req <= tuition))
            .count();
    if reachable < 2 {
        debug!(reachable, "split skipped: fewer than two reachable bonus requirements");
        return None;
    }

    let plan = allocate(candidates, top_reserve, tuition, config.split.max_cards);
    if plan.len() < 2 {
        debug!("split skipped: allocation fits only one card");
        return None;
    }

    let cards: Vec<SplitAllocation> = plan
        .into_iter()
        .map(|(card, allocated_amount)| SplitAllocation {
            breakdown: calculate_breakdown(
                card,
                allocated_amount,
                criteria,
                &config.processing_fee,
            ),
            card: card.clone(),
            allocated_amount,
        })
        .collect();

    // Every gated card in the plan has to clear its own bonus
    if let Some(miss) = cards
        .iter()
        .find(|c| c.card.bonus_requirement().is_some() && !c.breakdown.bonus_attained)
    {
        debug!(card = %miss.card.name, "split rejected: allocation misses bonus requirement");
        return None;
    }

    let total_savings: Cents = cards.iter().map(|c| c.breakdown.net_value).sum();
    let best_single = ranked[0].estimated_savings;

    if total_savings > best_single {
        debug!(
            cards = cards.len(),
            total = %total_savings,
            single = %best_single,
            "split beats best single card"
        );
        Some(SplitStrategy {
            cards,
            total_savings,
        })
    } else {
        debug!(
            total = %total_savings,
            single = %best_single,
            "split does not beat best single card"
        );
        None
    }
}

/// Tuition the top card needs to clear its bonus once organic spend over its
/// bonus window is counted. None when the bonus is ungated.
fn top_card_reserve(card: &CardRecord, criteria: &MatchingCriteria) -> Option<Cents> {
    let organic = criteria.monthly_spend * card.signup_bonus_timeframe_months;
    card.bonus_requirement().map(|req| req.saturating_sub(organic))
}

/// Greedy allocation in rank order. Amounts always sum to `tuition`; entries
/// with a zero allocation are dropped.
fn allocate(
    candidates: &[Recommendation],
    top_reserve: Option<Cents>,
    tuition: Cents,
    max_cards: usize,
) -> Vec<(&CardRecord, Cents)> {
    let mut remaining = tuition;
    let mut plan: Vec<(&CardRecord, Cents)> = Vec::new();

    let top = &candidates[0].card;
    let top_amount = match top_reserve {
        Some(reserve) if reserve <= remaining => reserve,
        _ => Cents::ZERO,
    };
    remaining -= top_amount;
    plan.push((top, top_amount));

    for rec in &candidates[1..] {
        if plan.len() >= max_cards {
            break;
        }
        // A card with an ungated bonus gains nothing from its own slice
        let Some(req) = rec.card.bonus_requirement() else {
            continue;
        };
        if req > remaining {
            debug!(
                card = %rec.card.name,
                requirement = %req,
                remaining = %remaining,
                "requirement does not fit"
            );
            continue;
        }
        remaining -= req;
        plan.push((&rec.card, req));
    }

    plan[0].1 += remaining;
    plan.retain(|(_, amount)| *amount > Cents::ZERO);
    plan
}
