use super::config::ProcessingFeeConfig;
use crate::catalog::CardRecord;
use crate::criteria::MatchingCriteria;
use crate::money::Cents;
use serde::Serialize;
use tracing::trace;

/// Monetary components of paying `allocated_amount` with one card.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValueBreakdown {
    pub allocated_amount: Cents,
    pub bonus_attained: bool,
    pub signup_bonus: Cents,
    pub ongoing_rewards: Cents,
    pub processing_fee: Cents,
    pub annual_fee: Cents,
    /// bonus + rewards - annual fee - processing fee
    pub net_value: Cents,
}

/// Compute the first-year value of putting `allocated_amount` on `card`.
///
/// The bonus counts only when the allocation plus the user's monthly spend over
/// the bonus window reaches the card's requirement. Each component is rounded
/// to the cent before it is summed.
pub fn calculate_breakdown(
    card: &CardRecord,
    allocated_amount: Cents,
    criteria: &MatchingCriteria,
    fee: &ProcessingFeeConfig,
) -> ValueBreakdown {
    let processing_fee = fee.fee_for(allocated_amount);

    let bonus_attained = match card.bonus_requirement() {
        None => true,
        Some(requirement) => {
            let organic = criteria.monthly_spend * card.signup_bonus_timeframe_months;
            allocated_amount.saturating_add(organic) >= requirement
        }
    };
    let signup_bonus = if bonus_attained {
        card.signup_bonus_value
    } else {
        Cents::ZERO
    };

    let ongoing_rewards = card.effective_rewards_rate().apply(allocated_amount);

    let annual_fee = if card.first_year_fee_waived {
        Cents::ZERO
    } else {
        card.annual_fee
    };

    let net_value = signup_bonus + ongoing_rewards - annual_fee - processing_fee;

    trace!(
        card = %card.name,
        allocated = %allocated_amount,
        bonus = %signup_bonus,
        rewards = %ongoing_rewards,
        fee = %processing_fee,
        net = %net_value,
        "valued card"
    );

    ValueBreakdown {
        allocated_amount,
        bonus_attained,
        signup_bonus,
        ongoing_rewards,
        processing_fee,
        annual_fee,
        net_value,
    }
}
