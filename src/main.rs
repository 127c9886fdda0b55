use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;
use std::time::Instant;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

const EXIT_SUCCESS: i32 = 0;
const EXIT_INPUT: i32 = 2;
const EXIT_CONFIG: i32 = 4;
const EXIT_REJECTED: i32 = 5;

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
enum OutputFormat {
    /// Ranked table (colored on a terminal)
    Table,
    /// Tab-separated values for scripting
    Tsv,
    /// Pretty-printed JSON
    Json,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Rank cards for a tuition payment and suggest a split if it pays more
    Recommend {
        /// Criteria file (YAML)
        #[arg(long)]
        criteria: PathBuf,

        /// Catalog file (defaults to config `catalog`, then ~/.config/tuition-advisor/cards.yaml)
        #[arg(long)]
        catalog: Option<PathBuf>,

        #[arg(long, value_enum, default_value_t = OutputFormat::Table)]
        format: OutputFormat,
    },
    /// Validate and list the card catalog
    Catalog {
        #[arg(long)]
        catalog: Option<PathBuf>,
    },
    /// Write a config file (and optionally a starter catalog)
    Init {
        /// Accept all defaults without prompting
        #[arg(long)]
        defaults: bool,

        /// Also write a starter catalog next to the config
        #[arg(long = "with-catalog")]
        with_catalog: bool,

        /// Overwrite existing files
        #[arg(long)]
        force: bool,
    },
}

#[derive(Parser, Debug)]
#[command(name = "tuition-advisor")]
#[command(
    about = "Find the credit card(s) that return the most on a tuition bill",
    long_about = None
)]
#[command(version)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to config file (defaults to ~/.config/tuition-advisor/config.yaml)
    #[arg(short, long, global = true)]
    config: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("tuition_advisor={}", default_level)));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn resolve_catalog_path(
    flag: Option<PathBuf>,
    config: &tuition_advisor::config::Config,
) -> anyhow::Result<PathBuf> {
    match flag.or_else(|| config.catalog.clone()) {
        Some(p) => Ok(p),
        None => tuition_advisor::catalog::get_catalog_path(),
    }
}

fn load_catalog_or_exit(path: &std::path::Path) -> tuition_advisor::catalog::CatalogFile {
    match tuition_advisor::catalog::load_catalog(path) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Catalog error: {:#}", e);
            std::process::exit(EXIT_INPUT);
        }
    }
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);
    let start_time = Instant::now();

    let config_path = cli.config.map(PathBuf::from);

    if let Commands::Init {
        defaults,
        with_catalog,
        force,
    } = cli.command
    {
        let path = match config_path
            .map(Ok)
            .unwrap_or_else(tuition_advisor::config::get_config_path)
        {
            Ok(p) => p,
            Err(e) => {
                eprintln!("Config error: {:#}", e);
                std::process::exit(EXIT_CONFIG);
            }
        };
        if let Err(e) = tuition_advisor::config::write_default_config(&path, defaults, force) {
            eprintln!("Init failed: {:#}", e);
            std::process::exit(EXIT_CONFIG);
        }
        println!("Wrote config to {}", path.display());

        if with_catalog {
            let catalog_path = path.with_file_name("cards.yaml");
            if let Err(e) = tuition_advisor::config::write_starter_catalog(&catalog_path, force) {
                eprintln!("Init failed: {:#}", e);
                std::process::exit(EXIT_CONFIG);
            }
            println!("Wrote starter catalog to {}", catalog_path.display());
        }
        std::process::exit(EXIT_SUCCESS);
    }

    // Load config
    let config = match tuition_advisor::config::load_config(config_path) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Config error: {:#}", e);
            std::process::exit(EXIT_CONFIG);
        }
    };

    // Validate advisor config at startup
    if let Err(errors) = tuition_advisor::advisor::validate_config(&config.advisor) {
        eprintln!("Advisor config errors:");
        for error in errors {
            eprintln!("  - {}", error);
        }
        std::process::exit(EXIT_CONFIG);
    }

    let use_colors = tuition_advisor::output::should_use_colors();

    match cli.command {
        Commands::Recommend {
            criteria,
            catalog,
            format,
        } => {
            let catalog_path = match resolve_catalog_path(catalog, &config) {
                Ok(p) => p,
                Err(e) => {
                    eprintln!("Catalog error: {:#}", e);
                    std::process::exit(EXIT_INPUT);
                }
            };
            let catalog = load_catalog_or_exit(&catalog_path);
            let criteria = match tuition_advisor::criteria::load_criteria(&criteria) {
                Ok(c) => c,
                Err(e) => {
                    eprintln!("Criteria error: {:#}", e);
                    std::process::exit(EXIT_INPUT);
                }
            };

            let cards = catalog.active_cards();
            info!(
                cards = cards.len(),
                catalog = %catalog_path.display(),
                "loaded catalog"
            );

            let result = match tuition_advisor::advisor::recommend(
                &cards,
                &criteria,
                &config.advisor,
            ) {
                Ok(r) => r,
                Err(e) => {
                    eprintln!("Cannot compute recommendation: {}", e);
                    std::process::exit(EXIT_REJECTED);
                }
            };

            match format {
                OutputFormat::Table => {
                    if cli.verbose && !result.recommendations.is_empty() {
                        for rec in &result.recommendations {
                            let detail = tuition_advisor::output::format_recommendation_detail(
                                rec,
                                use_colors,
                            );
                            println!("{}", detail);
                            println!();
                        }
                        if let (Some(split), Some(best)) = (&result.split_strategy, result.best()) {
                            let plan = tuition_advisor::output::format_split(
                                split,
                                best.estimated_savings,
                                use_colors,
                            );
                            println!("{}", plan);
                        }
                    } else {
                        println!(
                            "{}",
                            tuition_advisor::output::format_recommendations(&result, use_colors)
                        );
                    }
                }
                OutputFormat::Tsv => {
                    let output = tuition_advisor::output::format_tsv(&result);
                    if !output.is_empty() {
                        println!("{}", output);
                    }
                }
                OutputFormat::Json => match tuition_advisor::output::format_json(&result) {
                    Ok(json) => println!("{}", json),
                    Err(e) => {
                        eprintln!("Output error: {:#}", e);
                        std::process::exit(EXIT_INPUT);
                    }
                },
            }

            debug!(
                recommendations = result.recommendations.len(),
                split = result.split_strategy.is_some(),
                elapsed = ?start_time.elapsed(),
                "done"
            );
        }
        Commands::Catalog { catalog } => {
            let catalog_path = match resolve_catalog_path(catalog, &config) {
                Ok(p) => p,
                Err(e) => {
                    eprintln!("Catalog error: {:#}", e);
                    std::process::exit(EXIT_INPUT);
                }
            };
            let catalog = load_catalog_or_exit(&catalog_path);

            let mut invalid = 0;
            for card in &catalog.cards {
                if let Err(reason) = card.validate() {
                    eprintln!("Invalid card '{}': {}", card.name, reason);
                    invalid += 1;
                }
            }

            println!(
                "{}",
                tuition_advisor::output::format_catalog(&catalog.cards, use_colors)
            );

            if invalid > 0 {
                std::process::exit(EXIT_INPUT);
            }
        }
        Commands::Init { .. } => unreachable!("init handled before config load"),
    }

    std::process::exit(EXIT_SUCCESS);
}
