pub mod breakdown;
pub mod config;
pub mod eligibility;
pub mod engine;
pub mod error;
pub mod ranking;
pub mod split;
pub mod validation;

pub use breakdown::{calculate_breakdown, ValueBreakdown};
pub use config::{AdvisorConfig, ProcessingFeeConfig, SplitConfig};
pub use eligibility::{explain_exclusions, filter_eligible, ExclusionReason};
pub use engine::{recommend, RecommendationSet};
pub use error::AdvisorError;
pub use ranking::{rank_cards, Recommendation};
pub use split::{optimize_split, SplitAllocation, SplitStrategy};
pub use validation::{validate_config, validate_inputs};
