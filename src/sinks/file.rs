//! Buffered file sink implementation
//!
//! Rendered lines collect in a pending buffer and reach the file in one
//! batched write once `flush_every_n_logs` lines are waiting, or when
//! [`AsyncSink::flush`] / [`AsyncSink::close`] is called.
//!
//! # Important: Explicit Flush Required
//!
//! A failed batch write keeps only the lines whose calls already returned
//! [`WriteOutcome::Buffered`]; the record whose call failed is dropped, so
//! the buffer never holds more than `flush_every_n_logs` lines.
//!
//! Lines still pending when the process exits are lost. Lower
//! `flush_every_n_logs` toward 1, or call `flush()`, when durability matters
//! more than throughput.

use crate::core::{
    AsyncSink, FileConfig, Formatter, LoggerError, Record, Result, WriteOutcome,
};
use async_trait::async_trait;
use chrono::Local;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};
use tokio::fs::{File, OpenOptions};
use tokio::io::AsyncWriteExt;
use tokio::sync::Mutex;

#[derive(Default)]
struct FileState {
    /// Opened lazily by the first accepted record
    file: Option<File>,
    path: Option<PathBuf>,
    /// Rendered lines not yet persisted; its length is the flush counter
    pending: Vec<String>,
    closed: bool,
}

pub struct FileSink {
    config: FileConfig,
    formatter: Formatter,
    state: Mutex<FileState>,
    flushes: AtomicU64,
}

impl FileSink {
    /// Validates the configuration; nothing touches the filesystem until
    /// the first record passes the level gate.
    pub fn new(config: &FileConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            config: config.clone(),
            formatter: Formatter::new(config.colored, config.time.clone(), config.level.clone())?,
            state: Mutex::new(FileState::default()),
            flushes: AtomicU64::new(0),
        })
    }

    pub fn is_enabled(&self) -> bool {
        self.config.enabled
    }

    pub fn config(&self) -> &FileConfig {
        &self.config
    }

    pub fn formatter(&self) -> &Formatter {
        &self.formatter
    }

    /// Path of the opened log file, `None` before the first write
    pub async fn path(&self) -> Option<PathBuf> {
        self.state.lock().await.path.clone()
    }

    /// Number of lines waiting for the next flush
    pub async fn pending(&self) -> usize {
        self.state.lock().await.pending.len()
    }

    /// Number of batched writes performed so far
    pub fn flush_count(&self) -> u64 {
        self.flushes.load(Ordering::Relaxed)
    }

    async fn open(&self, state: &mut FileState) -> Result<()> {
        let path = self.config.path(&Local::now());

        // Create parent directories if they don't exist
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent).await.map_err(|e| {
                LoggerError::io_operation("creating log directory", parent.display().to_string(), e)
            })?;
        }

        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
            .await
            .map_err(|e| {
                LoggerError::io_operation("opening log file", path.display().to_string(), e)
            })?;

        state.file = Some(file);
        state.path = Some(path);
        Ok(())
    }

    async fn flush_locked(&self, state: &mut FileState) -> Result<()> {
        if state.pending.is_empty() {
            return Ok(());
        }
        let batch = state.pending.concat();
        let path = state
            .path
            .as_deref()
            .map(Path::display)
            .map(|p| p.to_string())
            .unwrap_or_default();
        let file = state
            .file
            .as_mut()
            .ok_or_else(|| LoggerError::io_operation(
                "flushing log file",
                path.clone(),
                std::io::Error::new(std::io::ErrorKind::NotFound, "log file not open"),
            ))?;

        // On failure the lines stay pending so a later flush can retry
        file.write_all(batch.as_bytes())
            .await
            .map_err(|e| LoggerError::io_operation("flushing log file", path.clone(), e))?;
        file.flush()
            .await
            .map_err(|e| LoggerError::io_operation("flushing log file", path.clone(), e))?;
        if self.config.sync_on_flush {
            file.sync_data()
                .await
                .map_err(|e| LoggerError::io_operation("syncing log file", path, e))?;
        }

        state.pending.clear();
        self.flushes.fetch_add(1, Ordering::Relaxed);
        Ok(())
    }
}

#[async_trait]
impl AsyncSink for FileSink {
    async fn write(&self, record: &Record) -> Result<WriteOutcome> {
        if !self.config.enabled {
            return Ok(WriteOutcome::Disabled);
        }
        if record.level() < self.config.log_level {
            return Ok(WriteOutcome::Filtered);
        }

        let line = self.formatter.render(record);

        let mut state = self.state.lock().await;
        if state.closed {
            return Err(LoggerError::LoggerStopped);
        }
        if state.file.is_none() {
            self.open(&mut state).await?;
        }

        state.pending.push(line);
        if state.pending.len() >= self.config.flush_every_n_logs {
            if let Err(e) = self.flush_locked(&mut state).await {
                // This record is reported as failed, so it must not be
                // persisted by a later flush; earlier buffered lines stay.
                state.pending.pop();
                return Err(e);
            }
            return Ok(WriteOutcome::Written);
        }
        Ok(WriteOutcome::Buffered)
    }

    async fn flush(&self) -> Result<()> {
        let mut state = self.state.lock().await;
        self.flush_locked(&mut state).await
    }

    async fn close(&self) -> Result<()> {
        let mut state = self.state.lock().await;
        self.flush_locked(&mut state).await?;
        state.file = None;
        state.closed = true;
        Ok(())
    }

    fn name(&self) -> &str {
        "file"
    }
}

impl Drop for FileSink {
    fn drop(&mut self) {
        let state = self.state.get_mut();
        if state.pending.is_empty() {
            return;
        }

        // Drop cannot await; fall back to a blocking write of what is left
        let path = state.path.clone().unwrap_or_default();
        let written = state
            .file
            .take()
            .and_then(|file| file.try_into_std().ok())
            .map(|mut file| {
                std::io::Write::write_all(&mut file, state.pending.concat().as_bytes())
                    .and_then(|_| std::io::Write::flush(&mut file))
            });

        match written {
            Some(Ok(())) => state.pending.clear(),
            Some(Err(e)) => eprintln!(
                "[LOGGER ERROR] Failed to write {} pending lines to '{}' on drop: {}",
                state.pending.len(),
                path.display(),
                e
            ),
            None => eprintln!(
                "[LOGGER WARNING] File sink dropped with {} unflushed lines for '{}'",
                state.pending.len(),
                path.display()
            ),
        }
    }
}
