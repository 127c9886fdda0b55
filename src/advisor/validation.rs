use super::config::AdvisorConfig;
use super::error::{AdvisorError, Result};
use crate::catalog::CardRecord;
use crate::criteria::MatchingCriteria;
use crate::money::Cents;

/// Validate advisor configuration at startup.
/// Returns all validation errors at once (not just the first).
pub fn validate_config(config: &AdvisorConfig) -> std::result::Result<(), Vec<String>> {
    let mut errors = Vec::new();

    if config.processing_fee.fixed.is_negative() {
        errors.push(format!(
            "advisor.processing_fee.fixed: must be non-negative, got {}",
            config.processing_fee.fixed
        ));
    } else if config.processing_fee.fixed > Cents::MAX_INPUT {
        errors.push(format!(
            "advisor.processing_fee.fixed: must be at most {}, got {}",
            Cents::MAX_INPUT,
            config.processing_fee.fixed
        ));
    }

    // 100% or more would eat the whole payment
    if config.processing_fee.percent.0 >= 10_000 {
        errors.push(format!(
            "advisor.processing_fee.percent: must be below 100%, got {}",
            config.processing_fee.percent
        ));
    }

    if !(2..=3).contains(&config.split.max_cards) {
        errors.push(format!(
            "advisor.split.max_cards: must be 2 or 3, got {}",
            config.split.max_cards
        ));
    }

    if config.split.candidate_limit < 2 {
        errors.push(format!(
            "advisor.split.candidate_limit: must be at least 2, got {}",
            config.split.candidate_limit
        ));
    }

    for (i, issuer) in config.strict_velocity_issuers.iter().enumerate() {
        if issuer.trim().is_empty() {
            errors.push(format!("advisor.strict_velocity_issuers[{}]: must not be empty", i));
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

/// Reject structurally invalid engine input. Fails on the first problem.
pub fn validate_inputs(catalog: &[CardRecord], criteria: &MatchingCriteria) -> Result<()> {
    if criteria.tuition_amount <= Cents::ZERO {
        return Err(AdvisorError::InvalidTuition(criteria.tuition_amount));
    }

    if criteria.monthly_spend.is_negative() {
        return Err(AdvisorError::NegativeAmount {
            field: "monthly_spend",
            amount: criteria.monthly_spend,
        });
    }

    for (field, amount) in [
        ("tuition_amount", criteria.tuition_amount),
        ("monthly_spend", criteria.monthly_spend),
    ] {
        if amount > Cents::MAX_INPUT {
            return Err(AdvisorError::AmountTooLarge { field, amount });
        }
    }

    for card in catalog {
        card.validate().map_err(|reason| AdvisorError::InvalidCard {
            name: card.name.clone(),
            reason,
        })?;
    }

    Ok(())
}
