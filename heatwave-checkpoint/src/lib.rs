//! heatwave-checkpoint
//!
//! A durable, content-addressed record of completed query fingerprints, so
//! an interrupted run can resume without re-issuing external requests
//! already accounted for. Content lives in one newline-delimited JSON file;
//! writes are append-only with periodic write-temp-then-rename compaction,
//! the durability rule §4.6/§6 require.

use heatwave_types::{CheckpointRecord, Fingerprint, HeatwaveError, Outcome};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::fs::{self, File, OpenOptions};
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tokio::sync::Mutex;
use tracing::{debug, warn};

/// Durable, content-addressed checkpoint store.
///
/// `load` is called once at startup; after that, every write goes through
/// `mark`, which appends one newline-delimited JSON record and flushes to
/// stable storage before returning — a crash after `mark` returns leaves
/// the fingerprint durably recorded, a crash before leaves it durably
/// absent, never torn. An in-memory mirror lets the Executor consult
/// already-loaded state without re-reading the file on every check.
pub struct FileCheckpointStore {
    path: PathBuf,
    mirror: Arc<Mutex<HashMap<Fingerprint, CheckpointRecord>>>,
}

impl FileCheckpointStore {
    /// Point a store at `path`. Does not touch the filesystem until
    /// [`FileCheckpointStore::load`] is called.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            mirror: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    /// Load every record from the checkpoint file into the in-memory
    /// mirror and return a snapshot. A missing file is treated as an empty
    /// store (first run of the day), not an error. Malformed lines are
    /// logged and skipped rather than aborting the load — one corrupted
    /// record must not cost the whole resume.
    ///
    /// # Errors
    /// Returns [`HeatwaveError::CheckpointIo`] if the file exists but
    /// cannot be opened or read.
    pub async fn load(&self) -> Result<HashMap<Fingerprint, CheckpointRecord>, HeatwaveError> {
        let file = match File::open(&self.path).await {
            Ok(f) => f,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                return Ok(HashMap::new());
            }
            Err(err) => {
                return Err(HeatwaveError::CheckpointIo(format!(
                    "opening checkpoint file {}: {err}",
                    self.path.display()
                )));
            }
        };

        let mut reader = BufReader::new(file).lines();
        let mut loaded = HashMap::new();
        let mut line_no = 0usize;
        while let Some(line) = reader
            .next_line()
            .await
            .map_err(|err| HeatwaveError::CheckpointIo(format!("reading checkpoint: {err}")))?
        {
            line_no += 1;
            if line.trim().is_empty() {
                continue;
            }
            match serde_json::from_str::<CheckpointRecord>(&line) {
                Ok(record) => {
                    loaded.insert(record.fingerprint.clone(), record);
                }
                Err(err) => {
                    warn!(line_no, %err, "skipping malformed checkpoint record");
                }
            }
        }

        debug!(count = loaded.len(), path = %self.path.display(), "loaded checkpoint store");
        *self.mirror.lock().await = loaded.clone();
        Ok(loaded)
    }

    /// Whether `fingerprint` already has a terminal outcome recorded —
    /// consulted by the Executor before every dispatch to decide whether a
    /// query can be skipped as a replay rather than a network call.
    pub async fn is_complete(&self, fingerprint: &Fingerprint) -> bool {
        self.mirror.lock().await.contains_key(fingerprint)
    }

    /// Record a terminal outcome for `fingerprint`, appending one record to
    /// the durable file and updating the in-memory mirror. Writes through
    /// before returning; implementations may still batch several `mark`
    /// calls within a short window at the I/O layer, but the call here
    /// does not return until its own record is durable.
    ///
    /// # Errors
    /// Returns [`HeatwaveError::CheckpointIo`] if the append fails.
    pub async fn mark(
        &self,
        fingerprint: Fingerprint,
        outcome: Outcome,
        article_count: usize,
        completed_at: chrono::DateTime<chrono::Utc>,
    ) -> Result<(), HeatwaveError> {
        let record = CheckpointRecord {
            fingerprint: fingerprint.clone(),
            outcome,
            article_count,
            completed_at,
        };
        let line = serde_json::to_string(&record)
            .map_err(|err| HeatwaveError::CheckpointIo(format!("encoding record: {err}")))?;

        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).await.map_err(|err| {
                    HeatwaveError::CheckpointIo(format!("creating checkpoint dir: {err}"))
                })?;
            }
        }

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .await
            .map_err(|err| HeatwaveError::CheckpointIo(format!("opening for append: {err}")))?;
        file.write_all(line.as_bytes())
            .await
            .map_err(|err| HeatwaveError::CheckpointIo(format!("appending record: {err}")))?;
        file.write_all(b"\n")
            .await
            .map_err(|err| HeatwaveError::CheckpointIo(format!("appending newline: {err}")))?;
        file.flush()
            .await
            .map_err(|err| HeatwaveError::CheckpointIo(format!("flushing record: {err}")))?;
        file.sync_data()
            .await
            .map_err(|err| HeatwaveError::CheckpointIo(format!("syncing record: {err}")))?;

        self.mirror.lock().await.insert(fingerprint, record);
        Ok(())
    }

    /// Compact the store: rewrite it from the in-memory mirror via
    /// write-temp-then-rename, collapsing any duplicate lines a crash
    /// mid-append may have left behind. Safe to call periodically; a crash
    /// during compaction leaves the original file untouched since the
    /// rename is the only visible mutation.
    ///
    /// # Errors
    /// Returns [`HeatwaveError::CheckpointIo`] on any I/O failure.
    pub async fn compact(&self) -> Result<(), HeatwaveError> {
        let mirror = self.mirror.lock().await;
        let tmp_path = tmp_path_for(&self.path);
        let mut buf = String::new();
        for record in mirror.values() {
            buf.push_str(
                &serde_json::to_string(record)
                    .map_err(|err| HeatwaveError::CheckpointIo(format!("encoding record: {err}")))?,
            );
            buf.push('\n');
        }
        fs::write(&tmp_path, buf.as_bytes())
            .await
            .map_err(|err| HeatwaveError::CheckpointIo(format!("writing temp file: {err}")))?;
        fs::rename(&tmp_path, &self.path)
            .await
            .map_err(|err| HeatwaveError::CheckpointIo(format!("renaming temp file: {err}")))?;
        Ok(())
    }

    /// Clear the store on clean end-of-run, so the next invocation doesn't
    /// resume a stale day's fingerprints. A no-op, not an error, if the
    /// file never existed.
    ///
    /// # Errors
    /// Returns [`HeatwaveError::CheckpointIo`] if removal fails for a
    /// reason other than the file already being absent.
    pub async fn clear(&self) -> Result<(), HeatwaveError> {
        self.mirror.lock().await.clear();
        match fs::remove_file(&self.path).await {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(err) => Err(HeatwaveError::CheckpointIo(format!(
                "clearing checkpoint file {}: {err}",
                self.path.display()
            ))),
        }
    }

    /// How many records are currently held in the in-memory mirror.
    pub async fn len(&self) -> usize {
        self.mirror.lock().await.len()
    }

    /// Whether the in-memory mirror is empty.
    pub async fn is_empty(&self) -> bool {
        self.mirror.lock().await.is_empty()
    }
}

fn tmp_path_for(path: &Path) -> PathBuf {
    let mut tmp = path.as_os_str().to_owned();
    tmp.push(".tmp");
    PathBuf::from(tmp)
}

#[cfg(test)]
mod tests {
    use super::*;
    use heatwave_types::Outcome;

    fn fp(s: &str) -> Fingerprint {
        Fingerprint(s.to_string())
    }

    fn now() -> chrono::DateTime<chrono::Utc> {
        chrono::DateTime::from_timestamp(1_700_000_000, 0).expect("valid fixed timestamp")
    }

    #[tokio::test]
    async fn missing_file_loads_as_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileCheckpointStore::new(dir.path().join("checkpoint.ndjson"));
        let loaded = store.load().await.unwrap();
        assert!(loaded.is_empty());
    }

    #[tokio::test]
    async fn mark_then_reload_recovers_the_record() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("checkpoint.ndjson");
        let store = FileCheckpointStore::new(&path);
        store.load().await.unwrap();
        store.mark(fp("abc123"), Outcome::Ok, 3, now()).await.unwrap();

        let reopened = FileCheckpointStore::new(&path);
        let loaded = reopened.load().await.unwrap();
        assert_eq!(loaded.len(), 1);
        assert!(loaded.contains_key(&fp("abc123")));
        assert_eq!(loaded[&fp("abc123")].article_count, 3);
    }

    #[tokio::test]
    async fn is_complete_reflects_in_memory_mirror_without_rereading() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileCheckpointStore::new(dir.path().join("checkpoint.ndjson"));
        store.load().await.unwrap();
        assert!(!store.is_complete(&fp("x")).await);
        store.mark(fp("x"), Outcome::FailedPermanent, 0, now()).await.unwrap();
        assert!(store.is_complete(&fp("x")).await);
    }

    #[tokio::test]
    async fn clear_removes_file_and_mirror() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("checkpoint.ndjson");
        let store = FileCheckpointStore::new(&path);
        store.load().await.unwrap();
        store.mark(fp("x"), Outcome::Ok, 1, now()).await.unwrap();
        store.clear().await.unwrap();
        assert!(store.is_empty().await);
        assert!(!path.exists());
    }

    #[tokio::test]
    async fn clear_on_absent_file_is_not_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileCheckpointStore::new(dir.path().join("never-written.ndjson"));
        store.clear().await.unwrap();
    }

    #[tokio::test]
    async fn compact_collapses_to_one_record_per_fingerprint() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("checkpoint.ndjson");
        let store = FileCheckpointStore::new(&path);
        store.load().await.unwrap();
        store.mark(fp("x"), Outcome::FailedTransient, 0, now()).await.unwrap();
        store.mark(fp("x"), Outcome::Ok, 5, now()).await.unwrap();
        store.compact().await.unwrap();

        let reopened = FileCheckpointStore::new(&path);
        let loaded = reopened.load().await.unwrap();
        assert_eq!(loaded.len(), 1);
        assert_eq!(loaded[&fp("x")].article_count, 5);
    }
}
