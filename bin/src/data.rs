//! Loading collector documents from a data directory.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use displacement::{SignalDocuments, SignalId};
use serde_json::Value;
use tokio::task::JoinSet;
use tracing::{debug, warn};

/// Raw earnings document, read when the normalized one is absent.
const RAW_EARNINGS_PATH: &str = "earnings/processed/revenue.json";

/// Default location of the computed index under the data directory.
pub(crate) const COMPOSITE_PATH: &str = "composite/displacement_index.json";

/// Candidate files for a signal, in preference order.
pub(crate) fn candidate_paths(data_dir: &Path, id: SignalId) -> Vec<PathBuf> {
    let mut paths = Vec::with_capacity(2);
    if let Some(info) = displacement::signals::registry::get_signal_info(id) {
        paths.push(data_dir.join(info.source_path));
    }
    if id == SignalId::RevPerEmployee {
        paths.push(data_dir.join(RAW_EARNINGS_PATH));
    }
    paths
}

/// Reads and parses a JSON file, `None` if it does not exist.
pub(crate) async fn read_json(path: &Path) -> Result<Option<Value>> {
    let text = match tokio::fs::read_to_string(path).await {
        Ok(text) => text,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
        Err(e) => return Err(e).with_context(|| format!("reading {}", path.display())),
    };
    let value = serde_json::from_str(&text).with_context(|| format!("parsing {}", path.display()))?;
    Ok(Some(value))
}

/// Reads the first existing candidate for one signal.
async fn load_signal(data_dir: PathBuf, id: SignalId) -> (SignalId, Option<(PathBuf, Value)>) {
    for path in candidate_paths(&data_dir, id) {
        match read_json(&path).await {
            Ok(Some(value)) => return (id, Some((path, value))),
            Ok(None) => debug!(signal = %id, path = %path.display(), "no file"),
            Err(e) => warn!(signal = %id, "{e:#}"),
        }
    }
    (id, None)
}

/// Loads every signal's document concurrently.
///
/// Absent and unreadable files leave the signal without a document; the
/// engine reports those as missing sources.
pub(crate) async fn load_documents(data_dir: &Path) -> Result<SignalDocuments> {
    let mut tasks = JoinSet::new();
    for id in SignalId::ALL {
        tasks.spawn(load_signal(data_dir.to_path_buf(), id));
    }

    let mut documents = SignalDocuments::new();
    while let Some(joined) = tasks.join_next().await {
        let (id, loaded) = joined.context("document loader task failed")?;
        if let Some((path, value)) = loaded {
            debug!(signal = %id, path = %path.display(), "loaded document");
            documents.insert(id, value);
        }
    }
    Ok(documents)
}

/// Writes pretty JSON, creating parent directories as needed.
pub(crate) async fn write_json(path: &Path, json: &str) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        tokio::fs::create_dir_all(parent)
            .await
            .with_context(|| format!("creating {}", parent.display()))?;
    }
    tokio::fs::write(path, format!("{json}\n"))
        .await
        .with_context(|| format!("writing {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn scratch_dir(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("displacement-{name}-{}", std::process::id()));
        let _ = std::fs::remove_dir_all(&dir);
        dir
    }

    #[test]
    fn test_candidate_paths() {
        let root = Path::new("/data");
        assert_eq!(
            candidate_paths(root, SignalId::Employment),
            [root.join("bls/processed/employment.json")]
        );
        assert_eq!(
            candidate_paths(root, SignalId::RevPerEmployee),
            [
                root.join("earnings/processed/normalized.json"),
                root.join("earnings/processed/revenue.json")
            ]
        );
    }

    #[tokio::test]
    async fn test_load_documents_with_fallback() {
        let dir = scratch_dir("load");
        write_json(
            &dir.join("earnings/processed/revenue.json"),
            &json!({"firms": {}}).to_string(),
        )
        .await
        .unwrap();
        write_json(
            &dir.join("vc/processed/funding.json"),
            &json!({"aggregate": []}).to_string(),
        )
        .await
        .unwrap();
        std::fs::create_dir_all(dir.join("github/processed")).unwrap();
        std::fs::write(dir.join("github/processed/activity.json"), "{not json").unwrap();

        let documents = load_documents(&dir).await.unwrap();
        assert_eq!(documents.len(), 2);
        assert_eq!(documents.get(SignalId::RevPerEmployee), Some(&json!({"firms": {}})));
        assert!(documents.get(SignalId::VcFunding).is_some());
        assert!(documents.get(SignalId::Github).is_none());

        std::fs::remove_dir_all(&dir).unwrap();
    }

    #[tokio::test]
    async fn test_read_json_missing_file() {
        let dir = scratch_dir("missing");
        assert!(read_json(&dir.join("nope.json")).await.unwrap().is_none());
    }
}
