use crate::{
    Result,
    error::error::{SourceNotFoundSnafu, SourceReadSnafu},
};
use async_channel::{Receiver, Sender};
use fare_core::RawBatch;
use snafu::{ResultExt, ensure};
use std::path::Path;
use tokio::{
    fs::File,
    io::{AsyncBufReadExt, BufReader},
    task::JoinHandle,
};
use tracing::{debug, error, instrument, warn};

pub static DELIMITER: char = ',';

/// Groups contiguous lines sharing the same trip id token into batches.
///
/// The token is compared as text, so a trip id showing up again further down the input starts
/// a new batch instead of extending the earlier one.
#[derive(Debug, Default)]
pub struct Segmenter {
    previous_id: Option<String>,
    batch: String,
}

impl Segmenter {
    /// Feeds the next input line, returning the batch it completed if any.
    pub fn push_line(&mut self, line: &str) -> Option<RawBatch> {
        let line = line.trim();
        if line.is_empty() {
            return None;
        }

        let id = line
            .split_once(DELIMITER)
            .map(|(id, _)| id)
            .unwrap_or(line);

        match &self.previous_id {
            Some(previous) if previous == id => {
                self.batch.push('\n');
                self.batch.push_str(line);
                None
            }
            Some(_) => {
                let completed = self.take_batch();
                self.start_batch(id, line);
                completed
            }
            None => {
                self.start_batch(id, line);
                None
            }
        }
    }

    /// Returns the batch still in progress once the input is exhausted.
    pub fn finish(mut self) -> Option<RawBatch> {
        self.take_batch()
    }

    fn start_batch(&mut self, id: &str, line: &str) {
        self.previous_id = Some(id.to_string());
        self.batch.push_str(line);
    }

    fn take_batch(&mut self) -> Option<RawBatch> {
        let batch = std::mem::take(&mut self.batch);
        let batch = batch.trim();
        (!batch.is_empty()).then(|| RawBatch::new(batch))
    }
}

/// Opens `path` and streams its batches through a bounded channel of `queue_size`.
///
/// Fails before producing anything if `path` is not a readable regular file. The returned
/// channel closes once the whole file has been read or every receiver has been dropped. The
/// returned handle resolves to the number of batches sent, or to the read error that ended the
/// input early.
#[instrument(skip_all, fields(path = %path.as_ref().display()))]
pub async fn generate_batches(
    path: impl AsRef<Path>,
    queue_size: usize,
) -> Result<(Receiver<RawBatch>, JoinHandle<Result<usize>>)> {
    let path = path.as_ref().to_path_buf();

    let is_file = tokio::fs::metadata(&path)
        .await
        .map(|m| m.is_file())
        .unwrap_or(false);
    ensure!(is_file, SourceNotFoundSnafu { path: path.clone() });

    let file = match File::open(&path).await {
        Ok(file) => file,
        Err(e) => {
            warn!("failed to open source file: {e:?}");
            return SourceNotFoundSnafu { path }.fail();
        }
    };

    let (sender, receiver) = async_channel::bounded(queue_size);

    let reader = tokio::spawn(async move {
        let res = read_batches(&path, file, &sender).await;
        match &res {
            Ok(num_batches) => debug!("read {num_batches} batches from '{}'", path.display()),
            Err(e) => error!("stopped reading batches early: {e:?}"),
        }
        res
    });

    Ok((receiver, reader))
}

async fn read_batches(path: &Path, file: File, sender: &Sender<RawBatch>) -> Result<usize> {
    let mut reader = BufReader::new(file);
    let mut segmenter = Segmenter::default();
    let mut line = Vec::new();
    let mut num_batches = 0;

    let res = loop {
        line.clear();
        match reader.read_until(b'\n', &mut line).await {
            Ok(0) => break Ok(()),
            Ok(_) => {
                // Invalid bytes end up in the record and fail only its own trip
                let batch = segmenter.push_line(&String::from_utf8_lossy(&line));
                if let Some(batch) = batch {
                    // Only errors when every receiver is gone, nobody is left to read further batches
                    if sender.send(batch).await.is_err() {
                        return Ok(num_batches);
                    }
                    num_batches += 1;
                }
            }
            Err(e) => break Err(e),
        }
    };

    if let Some(batch) = segmenter.finish() {
        if sender.send(batch).await.is_ok() {
            num_batches += 1;
        }
    }

    res.context(SourceReadSnafu { path })?;

    Ok(num_batches)
}
