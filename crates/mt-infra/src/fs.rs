//! File system helpers shared by the JSON-file adapters.

use std::path::{Path, PathBuf};

use anyhow::{anyhow, Context, Result};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tokio::fs;
use tokio::io::AsyncWriteExt;

/// Get the MyTribe application data root directory.
///
/// # Platform-specific Paths
/// - macOS: ~/Library/Application Support/MyTribe
/// - Windows: %APPDATA%\MyTribe
/// - Linux: $XDG_DATA_HOME/MyTribe or ~/.local/share/MyTribe
///
/// Does not create the directory.
pub fn app_data_dir() -> Result<PathBuf> {
    let base_dir = dirs::data_dir().context("Failed to get platform-specific data directory")?;
    Ok(base_dir.join("MyTribe"))
}

/// Reads and parses a JSON document. A missing or blank file yields `None`.
pub async fn read_json<T: DeserializeOwned>(path: &Path) -> Result<Option<T>> {
    if !path.exists() {
        return Ok(None);
    }

    let content = fs::read_to_string(path)
        .await
        .map_err(|e| anyhow!("Failed to read {}: {e}", path.display()))?;
    if content.trim().is_empty() {
        return Ok(None);
    }

    let value = serde_json::from_str(&content)
        .map_err(|e| anyhow!("Failed to parse {}: {e}", path.display()))?;
    Ok(Some(value))
}

/// Serializes `value` as pretty JSON, creating parent directories as needed.
pub async fn write_json<T: Serialize + ?Sized>(path: &Path, value: &T) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).await?;
    }

    let json = serde_json::to_string_pretty(value)
        .map_err(|e| anyhow!("Failed to serialize {}: {e}", path.display()))?;

    let mut file = fs::File::create(path)
        .await
        .map_err(|e| anyhow!("Failed to create {}: {e}", path.display()))?;
    file.write_all(json.as_bytes())
        .await
        .map_err(|e| anyhow!("Failed to write {}: {e}", path.display()))?;
    file.sync_all()
        .await
        .map_err(|e| anyhow!("Failed to sync {}: {e}", path.display()))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn missing_and_blank_files_read_as_none() {
        let temp_dir = TempDir::new().unwrap();
        let missing = temp_dir.path().join("missing.json");
        let blank = temp_dir.path().join("blank.json");
        fs::write(&blank, "  \n").await.unwrap();

        assert!(read_json::<serde_json::Value>(&missing).await.unwrap().is_none());
        assert!(read_json::<serde_json::Value>(&blank).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn write_creates_nested_directories() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("a").join("b").join("doc.json");

        write_json(&path, &vec![1, 2, 3]).await.unwrap();

        let stored: Vec<u8> = read_json(&path).await.unwrap().unwrap();
        assert_eq!(stored, vec![1, 2, 3]);
    }

    #[tokio::test]
    async fn invalid_json_names_the_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("broken.json");
        fs::write(&path, "{invalid json").await.unwrap();

        let err = read_json::<serde_json::Value>(&path).await.unwrap_err();
        assert!(err.to_string().contains("Failed to parse"));
        assert!(err.to_string().contains("broken.json"));
    }
}
