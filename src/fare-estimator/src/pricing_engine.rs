use crate::{FareCalculator, UnrealisticSpeed};
use async_channel::{Receiver, Sender};
use fare_core::{FareRecord, RawBatch, Result, Trip, TripLoader};
use std::sync::Arc;
use tokio::task::JoinSet;
use tracing::{debug, error, instrument, warn};

/// Parses, normalizes and prices batches on a fixed number of workers.
#[derive(Clone)]
pub struct PricingEngine {
    pricer: Arc<TripPricer>,
    num_workers: u32,
    queue_size: usize,
}

/// The per-batch work done by a single worker.
pub struct TripPricer {
    loader: Box<dyn TripLoader>,
    unrealistic_speed: UnrealisticSpeed,
    calculator: FareCalculator,
}

impl TripPricer {
    pub fn new(
        loader: Box<dyn TripLoader>,
        unrealistic_speed: UnrealisticSpeed,
        calculator: FareCalculator,
    ) -> Self {
        Self {
            loader,
            unrealistic_speed,
            calculator,
        }
    }

    pub fn price_batch(&self, batch: &RawBatch) -> Result<FareRecord> {
        let mut trip = Trip::default();

        // A partially loaded trip is dropped here together with the error
        self.loader.load(&mut trip, batch)?;

        self.unrealistic_speed.prune_trip(&mut trip);

        let fare = self.calculator.ride_fare(trip.points())?;
        trip.set_fare(fare);

        debug!("total fare for trip {} is {fare}", trip.id());

        Ok(FareRecord::from(&trip))
    }
}

impl PricingEngine {
    pub fn new(pricer: TripPricer, num_workers: u32, queue_size: usize) -> Self {
        Self {
            pricer: Arc::new(pricer),
            num_workers: num_workers.max(1),
            queue_size: queue_size.max(1),
        }
    }

    /// Spawns the workers and returns the channel their fares are sent to.
    ///
    /// Fares arrive in the order workers finish them, not in the order of `batches`. The
    /// returned channel is closed once every worker has exited.
    #[instrument(skip_all)]
    pub fn run(&self, batches: Receiver<RawBatch>) -> Receiver<FareRecord> {
        let (sender, receiver) = async_channel::bounded(self.queue_size);
        let mut set = JoinSet::new();

        for _ in 0..self.num_workers {
            set.spawn(trip_task(
                batches.clone(),
                sender.clone(),
                self.pricer.clone(),
            ));
        }

        tokio::spawn(async move {
            while let Some(res) = set.join_next().await {
                if let Err(e) = res {
                    error!("pricing worker failed: {e:?}");
                }
            }

            // Every worker has drained the batch queue at this point
            sender.close();
        });

        receiver
    }
}

async fn trip_task(
    batches: Receiver<RawBatch>,
    fares: Sender<FareRecord>,
    pricer: Arc<TripPricer>,
) {
    while let Ok(batch) = batches.recv().await {
        match pricer.price_batch(&batch) {
            Ok(fare) => {
                // Only errors when the receiving end is gone, nothing left to price for
                if fares.send(fare).await.is_err() {
                    break;
                }
            }
            Err(e) => {
                warn!("discarding trip batch: {e:?}");
            }
        }
    }
}
