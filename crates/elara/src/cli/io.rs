//! File helpers shared by the command handlers.

use elara::{ElaraResult, StorageError, StorageErrorKind};
use serde::Serialize;
use std::io::Read;
use std::path::Path;

/// Read a whole file, or stdin when `path` is `-`.
pub fn read_input(path: &Path) -> ElaraResult<String> {
    if path == Path::new("-") {
        let mut text = String::new();
        std::io::stdin().read_to_string(&mut text).map_err(|e| {
            StorageError::new(StorageErrorKind::FileRead(format!("stdin: {}", e)))
        })?;
        return Ok(text);
    }

    std::fs::read_to_string(path).map_err(|e| {
        StorageError::new(StorageErrorKind::FileRead(format!(
            "{}: {}",
            path.display(),
            e
        )))
        .into()
    })
}

/// Pretty JSON for a record.
pub fn to_pretty_json<T: Serialize>(value: &T) -> ElaraResult<String> {
    serde_json::to_string_pretty(value)
        .map_err(|e| StorageError::new(StorageErrorKind::Serialization(e.to_string())).into())
}

/// Write `text` to `output`, creating parent directories, or print it.
pub fn emit(text: &str, output: Option<&Path>) -> ElaraResult<()> {
    let Some(path) = output else {
        println!("{}", text);
        return Ok(());
    };

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(|e| {
            StorageError::new(StorageErrorKind::DirectoryCreation(format!(
                "{}: {}",
                parent.display(),
                e
            )))
        })?;
    }

    std::fs::write(path, text).map_err(|e| {
        StorageError::new(StorageErrorKind::FileWrite(format!(
            "{}: {}",
            path.display(),
            e
        )))
    })?;
    tracing::info!(path = %path.display(), "Wrote output");
    Ok(())
}
