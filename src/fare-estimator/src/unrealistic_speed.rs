use fare_core::{Point, Trip};
use tracing::{debug, warn};

/// Removes points that could only be reached from the previously kept point by moving faster
/// than `max_speed_kmh`.
#[derive(Debug, Clone)]
pub struct UnrealisticSpeed {
    pub max_speed_kmh: f64,
}

impl UnrealisticSpeed {
    pub fn new(max_speed_kmh: f64) -> Self {
        Self { max_speed_kmh }
    }

    /// Replaces the points of `trip` with the ones that were kept and returns how many were
    /// removed.
    pub fn prune_trip(&self, trip: &mut Trip) -> usize {
        let (points, removed) = self.prune_points(trip.take_points());
        trip.set_points(points);

        debug!("removed {removed} points from trip {}", trip.id());

        removed
    }

    /// Returns the kept points and the number of removed ones.
    ///
    /// Candidates are always compared with the last kept point, never with a removed one. A
    /// single point has nothing to be validated against and is removed as well.
    pub fn prune_points(&self, points: Vec<Point>) -> (Vec<Point>, usize) {
        let num_points = points.len();
        if num_points <= 1 {
            return (Vec::new(), num_points);
        }

        let mut iter = points.into_iter();
        let mut kept = Vec::with_capacity(num_points);
        kept.extend(iter.next());

        for next in iter {
            let Some(&current) = kept.last() else {
                break;
            };

            match current.speed_to(&next) {
                Ok(speed) if speed <= self.max_speed_kmh => kept.push(next),
                Ok(speed) => {
                    debug!(
                        "removing point {next}, reaching it from {current} requires {speed} km/h, limit is {} km/h",
                        self.max_speed_kmh
                    );
                }
                Err(e) => {
                    warn!("removing point {next}, failed to compute speed: {e:?}");
                }
            }
        }

        let removed = num_points - kept.len();

        (kept, removed)
    }
}
