use crate::advisor::AdvisorConfig;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Catalog used when --catalog is not given
    #[serde(default)]
    pub catalog: Option<PathBuf>,

    #[serde(default)]
    pub advisor: AdvisorConfig,
}
