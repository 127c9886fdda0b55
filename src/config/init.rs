use anyhow::{Context, Result};
use atomic_write_file::AtomicWriteFile;
use std::io::{BufRead, Write};
use std::path::Path;

use crate::advisor::{validate_config, AdvisorConfig};
use crate::catalog::{save_catalog, CardRecord, CatalogFile, CreditTier, RewardsType};
use crate::config::Config;
use crate::money::{Cents, Rate};

/// Prompt user with a message and return their trimmed input.
fn prompt(message: &str) -> Result<String> {
    print!("{}", message);
    std::io::stdout()
        .flush()
        .context("Failed to flush stdout")?;
    let mut input = String::new();
    std::io::stdin()
        .lock()
        .read_line(&mut input)
        .context("Failed to read input")?;
    Ok(input.trim().to_string())
}

/// Prompt user with a message and a default value. Returns default if input is empty.
fn prompt_with_default(message: &str, default: &str) -> Result<String> {
    let input = prompt(&format!("{} [{}]: ", message, default))?;
    if input.is_empty() {
        Ok(default.to_string())
    } else {
        Ok(input)
    }
}

/// Ask for the processing fee and velocity-limited issuers, re-prompting on bad input.
fn prompt_advisor_config() -> Result<AdvisorConfig> {
    let defaults = AdvisorConfig::default();

    println!("Processing fee charged when tuition is paid by card (e.g. 2.9% + $0.30).");
    let percent = loop {
        let input = prompt_with_default(
            "Fee percent",
            &defaults.processing_fee.percent.as_percent().to_string(),
        )?;
        match input.parse::<f64>().ok().and_then(Rate::from_percent) {
            Some(rate) => break rate,
            None => println!("  Invalid: must be a non-negative number. Try again."),
        }
    };
    let fixed = loop {
        let input = prompt_with_default(
            "Fixed fee per payment ($)",
            &format!("{:.2}", defaults.processing_fee.fixed.as_dollars()),
        )?;
        match input.parse::<f64>().ok().and_then(Cents::from_dollars) {
            Some(c) if !c.is_negative() => break c,
            _ => println!("  Invalid: must be a non-negative amount. Try again."),
        }
    };

    println!();
    println!("Issuers that turn down applicants with 5+ new accounts in 24 months.");
    let issuers = prompt_with_default(
        "Strict issuers (comma separated)",
        &defaults.strict_velocity_issuers.join(", "),
    )?;
    let strict_velocity_issuers = issuers
        .split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect();

    let mut config = defaults;
    config.processing_fee.percent = percent;
    config.processing_fee.fixed = fixed;
    config.strict_velocity_issuers = strict_velocity_issuers;
    Ok(config)
}

/// Write a config file, prompting for values unless `use_defaults` is set.
///
/// Refuses to overwrite an existing file unless `force` is set.
pub fn write_default_config(path: &Path, use_defaults: bool, force: bool) -> Result<()> {
    if path.exists() && !force {
        anyhow::bail!(
            "Config file already exists at {}. Use --force to overwrite",
            path.display()
        );
    }

    let advisor = if use_defaults {
        AdvisorConfig::default()
    } else {
        prompt_advisor_config()?
    };

    if let Err(errors) = validate_config(&advisor) {
        anyhow::bail!("Invalid advisor config: {}", errors.join("; "));
    }

    let config = Config {
        catalog: None,
        advisor,
    };

    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory {}", parent.display()))?;
        }
    }

    let yaml = serde_saphyr::to_string(&config).context("Failed to serialize config")?;

    let mut file = AtomicWriteFile::open(path)
        .with_context(|| format!("Failed to open atomic write file at {}", path.display()))?;
    file.write_all(yaml.as_bytes())
        .context("Failed to write config")?;
    file.commit().context("Failed to save config")?;

    Ok(())
}

/// A small catalog to edit from. Values are illustrative, not current offers.
pub fn starter_catalog() -> CatalogFile {
    fn card(name: &str, issuer: &str, rewards_type: RewardsType) -> CardRecord {
        CardRecord {
            name: name.to_string(),
            issuer: issuer.to_string(),
            signup_bonus_value: Cents::ZERO,
            signup_bonus_spend_requirement: None,
            signup_bonus_timeframe_months: 3,
            annual_fee: Cents::ZERO,
            first_year_fee_waived: false,
            rewards_rate: None,
            rewards_type,
            min_credit_tier: None,
            is_business_card: false,
            active: true,
        }
    }

    let mut travel = card("Example Travel Card", "Example Bank", RewardsType::TravelPoints);
    travel.signup_bonus_value = Cents(75_000);
    travel.signup_bonus_spend_requirement = Some(Cents(400_000));
    travel.annual_fee = Cents(9_500);
    travel.rewards_rate = Some(Rate(200));
    travel.min_credit_tier = Some(CreditTier::Good);

    let mut cash = card("Example Cash Card", "Sample Credit Union", RewardsType::CashBack);
    cash.signup_bonus_value = Cents(20_000);
    cash.signup_bonus_spend_requirement = Some(Cents(150_000));
    cash.rewards_rate = Some(Rate(150));

    let mut business = card("Example Business Card", "Example Bank", RewardsType::Flexible);
    business.signup_bonus_value = Cents(90_000);
    business.signup_bonus_spend_requirement = Some(Cents(600_000));
    business.annual_fee = Cents(9_500);
    business.first_year_fee_waived = true;
    business.rewards_rate = Some(Rate(100));
    business.min_credit_tier = Some(CreditTier::Excellent);
    business.is_business_card = true;

    CatalogFile::new(vec![travel, cash, business])
}

/// Write the starter catalog, refusing to overwrite unless `force` is set.
pub fn write_starter_catalog(path: &Path, force: bool) -> Result<()> {
    if path.exists() && !force {
        anyhow::bail!(
            "Catalog file already exists at {}. Use --force to overwrite",
            path.display()
        );
    }
    save_catalog(path, &starter_catalog())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::load_catalog;
    use crate::config::load_config;
    use std::env;
    use std::fs;

    #[test]
    fn test_write_default_config_roundtrip() {
        let temp_path = env::temp_dir().join("tuition_advisor_test_init_config.yaml");
        let _ = fs::remove_file(&temp_path);

        write_default_config(&temp_path, true, false).unwrap();
        let loaded = load_config(Some(temp_path.clone())).unwrap();
        assert_eq!(loaded, Config::default());

        let _ = fs::remove_file(&temp_path);
    }

    #[test]
    fn test_write_default_config_refuses_overwrite() {
        let temp_path = env::temp_dir().join("tuition_advisor_test_init_existing.yaml");
        fs::write(&temp_path, "{}\n").unwrap();

        let err = write_default_config(&temp_path, true, false).unwrap_err();
        assert!(err.to_string().contains("already exists"));

        write_default_config(&temp_path, true, true).unwrap();

        let _ = fs::remove_file(&temp_path);
    }

    #[test]
    fn test_starter_catalog_is_valid() {
        let catalog = starter_catalog();
        assert_eq!(catalog.version, 1);
        assert_eq!(catalog.cards.len(), 3);
        assert!(catalog.cards.iter().all(|c| c.validate().is_ok()));
    }

    #[test]
    fn test_write_starter_catalog_roundtrip() {
        let temp_path = env::temp_dir().join("tuition_advisor_test_starter_cards.yaml");
        let _ = fs::remove_file(&temp_path);

        write_starter_catalog(&temp_path, false).unwrap();
        let loaded = load_catalog(&temp_path).unwrap();
        assert_eq!(loaded.cards, starter_catalog().cards);

        let _ = fs::remove_file(&temp_path);
    }
}
