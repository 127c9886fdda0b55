pub mod storage;
pub mod types;

pub use storage::{get_catalog_path, load_catalog, save_catalog};
pub use types::{CardRecord, CatalogFile, CreditTier, RewardsType};
