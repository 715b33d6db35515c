use crate::{
    CsvLoader, FareCalculator, PricingEngine, Result, Settings, TripPricer, UnrealisticSpeed,
    error::error::ReaderTaskSnafu, generate_batches, store_fares,
};
use snafu::ResultExt;
use std::path::Path;
use tracing::{debug, info, instrument};

pub struct App {
    engine: PricingEngine,
    queue_size: usize,
}

impl App {
    pub fn build(settings: &Settings) -> Self {
        let pricer = TripPricer::new(
            Box::new(CsvLoader),
            UnrealisticSpeed::new(settings.fare.max_speed_kmh),
            FareCalculator::new(settings.fare.clone(), settings.timezone),
        );

        Self {
            engine: PricingEngine::new(pricer, settings.num_workers, settings.queue_size),
            queue_size: settings.queue_size,
        }
    }

    /// Prices every trip in `dataset` and writes the fares to `output`, returning the number of
    /// fares written.
    ///
    /// If reading `dataset` fails midway, the fares of everything read up to that point are
    /// still written before the read error is returned.
    #[instrument(skip_all)]
    pub async fn run(self, dataset: impl AsRef<Path>, output: impl AsRef<Path>) -> Result<usize> {
        let (batches, reader) = generate_batches(dataset, self.queue_size).await?;

        let fares = self.engine.run(batches);

        let num_written = store_fares(output.as_ref(), fares).await?;

        let num_batches = reader.await.context(ReaderTaskSnafu)??;
        debug!("priced {num_written} of {num_batches} batches");

        info!(
            "stored {num_written} fares in '{}'",
            output.as_ref().display()
        );

        Ok(num_written)
    }
}
