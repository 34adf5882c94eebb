//! Model discovery: a single model file or a directory of them

use anyhow::Context;
use fixturegen_ir::{TypeUniverse, load_model, serialization::MODEL_EXTENSION};
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use crate::error::{CliError, CliResult};

/// Model files under `path`, sorted; `path` itself if it is a file
pub fn model_files(path: &Path) -> CliResult<Vec<PathBuf>> {
    if path.is_file() {
        return Ok(vec![path.to_path_buf()]);
    }

    let mut files = Vec::new();
    for entry in WalkDir::new(path).follow_links(true) {
        let entry = entry.with_context(|| format!("Failed to walk '{}'", path.display()))?;
        let is_model = entry.file_type().is_file()
            && entry.path().extension().and_then(|e| e.to_str()) == Some(MODEL_EXTENSION);
        if is_model {
            files.push(entry.into_path());
        }
    }
    files.sort();

    if files.is_empty() {
        return Err(CliError::NoModels(path.to_path_buf()).into());
    }
    Ok(files)
}

/// Load every model under `path` into one universe
pub fn load_models(path: &Path) -> CliResult<TypeUniverse> {
    let mut universe = TypeUniverse::new();
    for file in model_files(path)? {
        let model =
            load_model(&file).with_context(|| format!("Failed to load model '{}'", file.display()))?;
        for element in model.elements() {
            universe
                .insert(element.clone())
                .with_context(|| format!("Merging '{}'", file.display()))?;
        }
    }
    tracing::debug!(path = %path.display(), types = universe.len(), "models loaded");
    Ok(universe)
}
