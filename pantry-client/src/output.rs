use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use pantry::basic_models::DishResult;

/// The file a dish's result is saved under: spaces become underscores.
pub fn output_file_name(dish: &str) -> String {
    format!("{}.json", dish.replace(' ', "_"))
}

/// Save a result as pretty-printed UTF-8 JSON inside `results_dir`, returning the path written.
pub fn save_result(results_dir: &Path, result: &DishResult) -> Result<PathBuf> {
    let out_path = results_dir.join(output_file_name(&result.dish));
    let json = serde_json::to_string_pretty(result)?;
    std::fs::write(&out_path, json)
        .with_context(|| format!("Writing result to {}", out_path.display()))?;
    Ok(out_path)
}

/// Read back a result previously written by [`save_result`].
pub fn load_result(path: &Path) -> Result<DishResult> {
    let json = std::fs::read_to_string(path)
        .with_context(|| format!("Reading result from {}", path.display()))?;
    Ok(serde_json::from_str(&json)?)
}
