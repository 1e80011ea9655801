use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde_json::Error as SerdeError;

use crate::models::lecture::Lecture;

/// Read a schedule file: a JSON array of lectures in schedule order.
pub fn load_lectures(path: &Path) -> Result<Vec<Lecture>> {
    let data = fs::read_to_string(path)
        .with_context(|| format!("failed to read schedule from {}", path.display()))?;
    let lectures: Vec<Lecture> =
        serde_json::from_str(&data).map_err(|err| map_deser_error(err, path))?;
    log::info!("Loaded {} lectures from {}", lectures.len(), path.display());
    Ok(lectures)
}

pub fn save_lectures(path: &Path, lectures: &[Lecture]) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("failed to create dir {}", parent.display()))?;
    }

    let data = serde_json::to_string_pretty(lectures)?;
    fs::write(path, data)
        .with_context(|| format!("failed to write schedule to {}", path.display()))?;
    Ok(())
}

fn map_deser_error(err: SerdeError, path: &Path) -> anyhow::Error {
    anyhow::Error::new(err).context(format!(
        "failed to deserialize schedule from {}",
        path.display()
    ))
}
