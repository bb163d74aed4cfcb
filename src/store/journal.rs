//! Append-only document journal
//!
//! One JSON line per inserted document:
//!
//! ```text
//! {"checksum":<crc32 of the document bytes>,"document":{...}}
//! ```
//!
//! - Every append is flushed and fsynced before it is acknowledged
//! - A failed append is truncated back to the last acknowledged entry; if
//!   that truncation fails too, the journal refuses further appends
//! - Replay reads the whole file in order on open
//! - Any unparsable line or checksum mismatch fails the open; there is no
//!   partial replay and no repair

use std::fs::{self, File, OpenOptions};
use std::io::{BufRead, BufReader, ErrorKind, Write};
use std::path::{Path, PathBuf};

use crc32fast::Hasher;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::errors::{StoreError, StoreResult};

/// File name of the hotel journal inside the data directory
pub const JOURNAL_FILE_NAME: &str = "hotels.journal";

#[derive(Debug, Serialize, Deserialize)]
struct JournalEntry {
    checksum: u32,
    document: Value,
}

/// Computes the CRC32 of a document's canonical encoding
pub fn document_checksum(document: &Value) -> StoreResult<u32> {
    let bytes = serde_json::to_vec(document)?;
    let mut hasher = Hasher::new();
    hasher.update(&bytes);
    Ok(hasher.finalize())
}

/// Journal writer
pub struct Journal {
    path: PathBuf,
    file: File,
    entries: u64,

    /// File length covering every acknowledged entry
    committed_len: u64,

    /// Set when a failed append could not be rolled back
    failed: Option<String>,
}

impl Journal {
    /// Opens (or creates) the journal in `data_dir` and replays it.
    ///
    /// Returns the journal positioned for appending, together with every
    /// document it already holds, in append order.
    ///
    /// # Errors
    ///
    /// - `StoreError::Io` if the directory or file cannot be created or read
    /// - `StoreError::Corruption` if any line fails verification
    pub fn open(data_dir: &Path) -> StoreResult<(Self, Vec<Value>)> {
        fs::create_dir_all(data_dir).map_err(|e| StoreError::io(data_dir, e))?;

        let path = data_dir.join(JOURNAL_FILE_NAME);
        let documents = Self::replay(&path)?;

        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
            .map_err(|e| StoreError::io(&path, e))?;

        let committed_len = file
            .metadata()
            .map_err(|e| StoreError::io(&path, e))?
            .len();

        tracing::debug!(path = %path.display(), documents = documents.len(), "journal opened");

        let entries = documents.len() as u64;
        Ok((
            Self {
                path,
                file,
                entries,
                committed_len,
                failed: None,
            },
            documents,
        ))
    }

    /// Reads every document from an existing journal file.
    ///
    /// A missing file is an empty journal.
    pub fn replay(path: &Path) -> StoreResult<Vec<Value>> {
        let file = match File::open(path) {
            Ok(f) => f,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(StoreError::io(path, e)),
        };

        let mut documents = Vec::new();
        for (index, line) in BufReader::new(file).lines().enumerate() {
            let line_number = index + 1;
            let line = line.map_err(|e| StoreError::io(path, e))?;
            if line.trim().is_empty() {
                continue;
            }

            let entry: JournalEntry = serde_json::from_str(&line)
                .map_err(|e| StoreError::corruption(line_number, format!("unparsable entry: {}", e)))?;

            let actual = document_checksum(&entry.document)?;
            if actual != entry.checksum {
                return Err(StoreError::corruption(
                    line_number,
                    format!("checksum mismatch: expected {}, computed {}", entry.checksum, actual),
                ));
            }

            documents.push(entry.document);
        }

        Ok(documents)
    }

    /// Appends a document and fsyncs before returning.
    ///
    /// On failure nothing of the entry remains in the file, so the next
    /// append and the next replay both start from a clean line boundary.
    ///
    /// # Errors
    ///
    /// - `StoreError::Io` if the write or fsync fails
    /// - `StoreError::Internal` if an earlier rollback failed
    pub fn append(&mut self, document: &Value) -> StoreResult<()> {
        if let Some(reason) = &self.failed {
            return Err(StoreError::Internal(format!(
                "journal {} is unusable after a failed rollback: {}",
                self.path.display(),
                reason
            )));
        }

        let entry = JournalEntry {
            checksum: document_checksum(document)?,
            document: document.clone(),
        };

        let mut line = serde_json::to_vec(&entry)?;
        line.push(b'\n');

        let written = self.write_line(&line);
        self.finish_append(written, line.len() as u64)
    }

    fn write_line(&mut self, line: &[u8]) -> StoreResult<()> {
        self.file
            .write_all(line)
            .map_err(|e| StoreError::io(&self.path, e))?;
        self.file.flush().map_err(|e| StoreError::io(&self.path, e))?;
        self.file
            .sync_all()
            .map_err(|e| StoreError::io(&self.path, e))
    }

    /// Acknowledges a written entry, or rolls the file back to the last
    /// acknowledged length.
    fn finish_append(&mut self, written: StoreResult<()>, line_len: u64) -> StoreResult<()> {
        match written {
            Ok(()) => {
                self.committed_len += line_len;
                self.entries += 1;
                Ok(())
            }
            Err(err) => {
                self.rollback();
                Err(err)
            }
        }
    }

    fn rollback(&mut self) {
        let truncated = self
            .file
            .set_len(self.committed_len)
            .and_then(|_| self.file.sync_all());

        match truncated {
            Ok(()) => {
                tracing::warn!(
                    path = %self.path.display(),
                    len = self.committed_len,
                    "journal append failed; truncated to last entry"
                );
            }
            Err(e) => {
                tracing::error!(
                    path = %self.path.display(),
                    error = %e,
                    "journal rollback failed; refusing further appends"
                );
                self.failed = Some(e.to_string());
            }
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Number of documents in the journal, replayed ones included
    pub fn len(&self) -> u64 {
        self.entries
    }

    pub fn is_empty(&self) -> bool {
        self.entries == 0
    }
}
