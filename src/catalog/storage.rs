use super::types::CatalogFile;
use anyhow::{Context, Result};
use atomic_write_file::AtomicWriteFile;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

/// Get the default catalog file path (~/.config/tuition-advisor/cards.yaml)
pub fn get_catalog_path() -> Result<PathBuf> {
    Ok(crate::config::get_config_dir()?.join("cards.yaml"))
}

/// Load a card catalog from a YAML file
///
/// Unlike the config file, a missing catalog is an error: there is nothing to
/// recommend without one.
pub fn load_catalog(path: &Path) -> Result<CatalogFile> {
    if !path.exists() {
        anyhow::bail!(
            "Catalog file not found at {}. Pass --catalog or run \
             `tuition-advisor init --with-catalog`",
            path.display()
        );
    }

    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read catalog file at {}", path.display()))?;

    let catalog: CatalogFile = serde_saphyr::from_str(&content)
        .with_context(|| format!("Failed to parse catalog: invalid YAML in {}", path.display()))?;

    if catalog.version != 1 {
        anyhow::bail!("Unsupported catalog version: {}", catalog.version);
    }

    Ok(catalog)
}

/// Save a catalog to a YAML file atomically
pub fn save_catalog(path: &Path, catalog: &CatalogFile) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory {}", parent.display()))?;
        }
    }

    let yaml = serde_saphyr::to_string(catalog).context("Failed to serialize catalog")?;

    let mut file = AtomicWriteFile::open(path)
        .with_context(|| format!("Failed to open atomic write file at {}", path.display()))?;
    file.write_all(yaml.as_bytes())
        .context("Failed to write catalog")?;
    file.commit().context("Failed to save catalog")?;

    Ok(())
}
