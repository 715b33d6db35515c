use crate::{RawBatch, Result, Trip};

/// Reads the raw records of a single batch into a [`Trip`].
///
/// Implementations must abort on the first record they cannot read. Whatever was read before
/// the failing record stays in `trip`, which the caller must then discard.
pub trait TripLoader: Send + Sync + 'static {
    fn load(&self, trip: &mut Trip, batch: &RawBatch) -> Result<()>;
}
