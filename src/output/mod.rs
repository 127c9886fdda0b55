pub mod formatter;

pub use formatter::{
    format_catalog, format_json, format_recommendation_detail, format_recommendation_table,
    format_recommendations, format_split, format_tsv, should_use_colors,
};
