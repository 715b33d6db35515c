use config::ConfigError;
use snafu::{Location, Snafu};
use std::path::PathBuf;
use tokio::task::JoinError;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Snafu)]
#[snafu(module, visibility(pub))]
pub enum Error {
    #[snafu(display("Source file '{}' is not a readable regular file", path.display()))]
    SourceNotFound {
        #[snafu(implicit)]
        location: Location,
        path: PathBuf,
    },
    #[snafu(display("Failed to read source file '{}'", path.display()))]
    SourceRead {
        #[snafu(implicit)]
        location: Location,
        path: PathBuf,
        #[snafu(source)]
        error: std::io::Error,
    },
    #[snafu(display("Batch reader task did not complete"))]
    ReaderTask {
        #[snafu(implicit)]
        location: Location,
        #[snafu(source)]
        error: JoinError,
    },
    #[snafu(display("Failed to write to destination file '{}'", path.display()))]
    DestinationWriteFailure {
        #[snafu(implicit)]
        location: Location,
        path: PathBuf,
        #[snafu(source)]
        error: std::io::Error,
    },
    #[snafu(display("Failed to load configuration"))]
    Config {
        #[snafu(implicit)]
        location: Location,
        #[snafu(source)]
        error: ConfigError,
    },
}
