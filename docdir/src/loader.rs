//! Content loading for resolved records.
//!
//! Files are read concurrently, at most `max_concurrent_reads` at a time, and
//! records come back in their input order. The first failure aborts the whole
//! load; remaining reads are cancelled. Each read is bounded by
//! `max_file_size` so one oversized file cannot exhaust memory.

use std::path::Path;
use std::sync::Arc;

use tokio::io::AsyncReadExt;
use tokio::sync::Semaphore;
use tokio::task::JoinSet;

use crate::document::DocumentRecord;
use crate::error::{DirectoryError, Result};

/// Limits applied while loading one batch of records.
#[derive(Debug, Clone, Copy)]
pub struct LoadLimits {
    pub max_concurrent_reads: usize,
    pub max_file_size: u64,
}

/// Attach file content to every record.
///
/// # Errors
///
/// Returns [`DirectoryError::Io`] if any file cannot be opened or read
/// (including one removed since it was scanned), and
/// [`DirectoryError::FileTooLarge`] if any file exceeds the size limit.
pub async fn load(records: Vec<DocumentRecord>, limits: LoadLimits) -> Result<Vec<DocumentRecord>> {
    if records.is_empty() {
        return Ok(records);
    }

    let semaphore = Arc::new(Semaphore::new(limits.max_concurrent_reads.max(1)));
    let mut tasks = JoinSet::new();
    let mut slots: Vec<Option<DocumentRecord>> = Vec::with_capacity(records.len());

    for (index, mut record) in records.into_iter().enumerate() {
        slots.push(None);
        let semaphore = Arc::clone(&semaphore);
        tasks.spawn(async move {
            let _permit = semaphore
                .acquire_owned()
                .await
                .map_err(|e| DirectoryError::Task(e.to_string()))?;
            record.content = Some(read_text(&record.path, limits.max_file_size).await?);
            Ok::<_, DirectoryError>((index, record))
        });
    }

    // Dropping `tasks` on an early return aborts the reads still in flight.
    while let Some(joined) = tasks.join_next().await {
        let (index, record) = joined??;
        slots[index] = Some(record);
    }

    slots
        .into_iter()
        .map(|slot| slot.ok_or_else(|| DirectoryError::Task("read task vanished".to_owned())))
        .collect()
}

/// Read a file as text, failing if it exceeds `max_file_size` bytes.
///
/// Reads at most `max_file_size + 1` bytes so the size check and the read are
/// the same operation. Invalid UTF-8 is replaced rather than rejected, since
/// pdf and xls documents are binary.
async fn read_text(path: &Path, max_file_size: u64) -> Result<String> {
    let io_err = |source| DirectoryError::Io {
        path: path.to_path_buf(),
        source,
    };

    let file = tokio::fs::File::open(path).await.map_err(io_err)?;
    let mut buffer = Vec::new();
    file.take(max_file_size.saturating_add(1))
        .read_to_end(&mut buffer)
        .await
        .map_err(io_err)?;

    if buffer.len() as u64 > max_file_size {
        return Err(DirectoryError::FileTooLarge {
            path: path.to_path_buf(),
            limit: max_file_size,
        });
    }

    tracing::trace!("Read {} bytes from {}", buffer.len(), path.display());
    Ok(String::from_utf8(buffer)
        .unwrap_or_else(|e| String::from_utf8_lossy(e.as_bytes()).into_owned()))
}
