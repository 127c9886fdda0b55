use std::io::IsTerminal;
use anyhow::{Context, Result};
use owo_colors::OwoColorize;
use terminal_size::{Width, terminal_size};

use crate::advisor::{Recommendation, RecommendationSet, SplitStrategy};
use crate::catalog::CardRecord;
use crate::money::Cents;

/// Check if stdout is a TTY (for auto-detecting color support)
pub fn should_use_colors() -> bool {
    std::io::stdout().is_terminal()
}

/// Get terminal width, defaulting to None for pipes (unlimited)
fn get_terminal_width() -> Option<usize> {
    terminal_size().map(|(Width(w), _)| w as usize)
}

/// Truncate a card label to fit available width, accounting for Unicode
fn truncate_label(label: &str, max_width: usize) -> String {
    let chars: Vec<char> = label.chars().collect();
    if chars.len() <= max_width {
        label.to_string()
    } else if max_width > 3 {
        format!("{}...", chars[..max_width - 3].iter().collect::<String>())
    } else {
        chars[..max_width].iter().collect()
    }
}

fn card_label(card: &CardRecord) -> String {
    format!("{} ({})", card.name, card.issuer)
}

/// Format ranked cards as a table with columns: Rank, Net value, Card, Bonus
/// Rank column: 3 chars (fits "99."), right-aligned
/// Value column is right-aligned, 12 chars wide (fits "-$99,999.99")
pub fn format_recommendation_table(recs: &[Recommendation], use_colors: bool) -> String {
    if recs.is_empty() {
        return "No eligible cards found.".to_string();
    }

    let term_width = get_terminal_width();
    let rank_width = 3;
    let value_width = 12;
    let separator = "  ";

    recs.iter()
        .map(|rec| {
            let rank_str = format!("{:>2}.", rec.rank);
            let value_str = format!(
                "{:>width$}",
                rec.estimated_savings.to_string(),
                width = value_width
            );
            let bonus_str = if rec.breakdown.bonus_attained {
                format!("bonus {}", rec.breakdown.signup_bonus)
            } else {
                "bonus missed".to_string()
            };

            let fixed_width = rank_width + 1 + value_width + separator.len() * 2 + bonus_str.len();
            let label = card_label(&rec.card);
            let label = match term_width {
                Some(width) if width > fixed_width + 10 => {
                    truncate_label(&label, width - fixed_width)
                }
                // Very narrow terminal, show truncated
                Some(_) => truncate_label(&label, 20),
                // No terminal (pipe), don't truncate
                None => label,
            };

            if use_colors {
                let value = if rec.estimated_savings.is_negative() {
                    value_str.red().bold().to_string()
                } else {
                    value_str.green().bold().to_string()
                };
                let bonus = if rec.breakdown.bonus_attained {
                    bonus_str.cyan().to_string()
                } else {
                    bonus_str.dimmed().to_string()
                };
                format!(
                    "{} {}{}{}{}{}",
                    rank_str.dimmed(),
                    value,
                    separator,
                    label,
                    separator,
                    bonus
                )
            } else {
                format!(
                    "{} {}{}{}{}{}",
                    rank_str, value_str, separator, label, separator, bonus_str
                )
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Format one recommendation with its full breakdown (for verbose mode)
pub fn format_recommendation_detail(rec: &Recommendation, use_colors: bool) -> String {
    let b = &rec.breakdown;
    let preferred = if rec.matches_preferred_rewards { "yes" } else { "no" };
    let bonus = if b.bonus_attained {
        b.signup_bonus.to_string()
    } else {
        format!("{} (requirement not met)", b.signup_bonus)
    };
    let rate = rec
        .card
        .rewards_rate
        .map(|r| r.to_string())
        .unwrap_or_else(|| "none".to_string());

    let header = format!("{}. {}", rec.rank, card_label(&rec.card));
    let net = rec.estimated_savings.to_string();
    let (header, net) = if use_colors {
        (header.bold().to_string(), net.green().bold().to_string())
    } else {
        (header, net)
    };

    format!(
        concat!(
            "{}\n",
            "  Rewards: {} {}  (preferred: {})\n",
            "  Signup bonus: {}\n",
            "  Ongoing rewards: {}\n",
            "  Annual fee: {}\n",
            "  Processing fee: {}\n",
            "  Net first-year value: {}",
        ),
        header,
        rate,
        rec.card.rewards_type,
        preferred,
        bonus,
        b.ongoing_rewards,
        b.annual_fee,
        b.processing_fee,
        net
    )
}

/// Format a split plan, one line per card plus a total line
pub fn format_split(split: &SplitStrategy, best_single: Cents, use_colors: bool) -> String {
    let mut lines = Vec::with_capacity(split.cards.len() + 2);

    let title = format!("Split payment across {} cards:", split.cards.len());
    lines.push(if use_colors { title.bold().to_string() } else { title });

    for entry in &split.cards {
        let amount = format!("{:>12}", entry.allocated_amount.to_string());
        let net = entry.breakdown.net_value.to_string();
        let label = card_label(&entry.card);
        if use_colors {
            lines.push(format!("  {}  {}  net {}", amount.bold(), label, net.green()));
        } else {
            lines.push(format!("  {}  {}  net {}", amount, label, net));
        }
    }

    let gain = split.total_savings - best_single;
    let total = format!(
        "Total net value: {} ({} more than the best single card)",
        split.total_savings, gain
    );
    lines.push(if use_colors { total.green().bold().to_string() } else { total });

    lines.join("\n")
}

/// Format the full result: ranked table, then the split plan if there is one
pub fn format_recommendations(set: &RecommendationSet, use_colors: bool) -> String {
    let mut output = format_recommendation_table(&set.recommendations, use_colors);
    if let (Some(split), Some(best)) = (&set.split_strategy, set.best()) {
        output.push_str("\n\n");
        output.push_str(&format_split(split, best.estimated_savings, use_colors));
    }
    output
}

/// Format recommendations as tab-separated values for scripting
/// Columns: rank, net value, name, issuer, bonus (no headers, no colors)
/// Split rows follow with "split" in the first column and the allocation in the second.
pub fn format_tsv(set: &RecommendationSet) -> String {
    let mut rows: Vec<String> = set
        .recommendations
        .iter()
        .map(|rec| {
            format!(
                "{}\t{:.2}\t{}\t{}\t{:.2}",
                rec.rank,
                rec.estimated_savings.as_dollars(),
                rec.card.name,
                rec.card.issuer,
                rec.breakdown.signup_bonus.as_dollars()
            )
        })
        .collect();

    if let Some(split) = &set.split_strategy {
        rows.extend(split.cards.iter().map(|entry| {
            format!(
                "split\t{:.2}\t{}\t{}\t{:.2}",
                entry.allocated_amount.as_dollars(),
                entry.card.name,
                entry.card.issuer,
                entry.breakdown.net_value.as_dollars()
            )
        }));
    }

    rows.join("\n")
}

/// Format the result as pretty-printed JSON
pub fn format_json(set: &RecommendationSet) -> Result<String> {
    serde_json::to_string_pretty(set).context("Failed to serialize recommendations")
}

/// Format catalog entries one per line: "{name} | {issuer} | {bonus} on {requirement} | {fee}"
pub fn format_catalog(cards: &[CardRecord], use_colors: bool) -> String {
    if cards.is_empty() {
        return "Catalog is empty.".to_string();
    }

    cards
        .iter()
        .map(|card| {
            let requirement = card
                .bonus_requirement()
                .map(|r| format!("{} spend", r))
                .unwrap_or_else(|| "no spend".to_string());
            let status = if card.active { "" } else { " [inactive]" };
            let line = format!(
                "{} | {} | {} on {} | fee {}{}",
                card.name,
                card.issuer,
                card.signup_bonus_value,
                requirement,
                card.annual_fee,
                status
            );
            if use_colors && !card.active {
                line.dimmed().to_string()
            } else {
                line
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}
