use crate::{Result, error::error::DestinationWriteFailureSnafu};
use async_channel::Receiver;
use fare_core::FareRecord;
use snafu::ResultExt;
use std::path::Path;
use tokio::{
    fs::{File, OpenOptions},
    io::{AsyncWriteExt, BufWriter},
};
use tracing::instrument;

/// Writes every fare received on `fares` to `path`, one `id,fare` line each, and returns how
/// many were written.
///
/// Any file already at `path` is replaced.
#[instrument(skip_all, fields(path = %path.as_ref().display()))]
pub async fn store_fares(path: impl AsRef<Path>, fares: Receiver<FareRecord>) -> Result<usize> {
    let path = path.as_ref();

    let file = create_destination(path)
        .await
        .context(DestinationWriteFailureSnafu { path })?;

    let mut writer = BufWriter::new(file);
    let mut num_written = 0;

    while let Ok(fare) = fares.recv().await {
        writer
            .write_all(format!("{fare}\n").as_bytes())
            .await
            .context(DestinationWriteFailureSnafu { path })?;
        num_written += 1;
    }

    writer
        .flush()
        .await
        .context(DestinationWriteFailureSnafu { path })?;

    Ok(num_written)
}

async fn create_destination(path: &Path) -> std::io::Result<File> {
    if tokio::fs::metadata(path).await.is_ok_and(|m| m.is_file()) {
        tokio::fs::remove_file(path).await?;
    }

    OpenOptions::new()
        .create_new(true)
        .write(true)
        .open(path)
        .await
}
