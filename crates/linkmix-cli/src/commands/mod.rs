pub mod convert;
pub mod generate;
pub mod layers;

use crate::error::{CliError, Result};
use linkmix::core::io::chk::ChkFile;
use linkmix::core::io::traits::StructureFile;
use linkmix::core::models::structure::Structure;
use std::path::Path;
use tracing::info;

pub(crate) fn load_structure(path: &Path) -> Result<Structure> {
    info!("Loading structure from {:?}", path);
    let (structure, _) = ChkFile::read_from_path(path).map_err(|e| CliError::FileParsing {
        path: path.to_path_buf(),
        source: e.into(),
    })?;
    info!(atoms = structure.natom(), "Structure loaded.");
    Ok(structure)
}

pub(crate) fn save_structure(structure: &Structure, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }
    ChkFile::write_system_to_path(structure, path).map_err(|e| CliError::FileWriting {
        path: path.to_path_buf(),
        source: e.into(),
    })?;
    info!(atoms = structure.natom(), "Wrote {:?}", path);
    Ok(())
}
