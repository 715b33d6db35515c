use crate::{
    ComputationError, Result,
    error::{
        computation_error::{NonFiniteSnafu, RoundingSnafu},
        error::ComputationFailureSnafu,
    },
};
use chrono::{DateTime, Utc};
use snafu::{ResultExt, ensure};
use std::{
    f64::consts::PI,
    fmt::{self, Display},
};

static EARTH_RADIUS_MILES: f64 = 3958.;
static EARTH_RADIUS_KM: f64 = 6371.;
static SECONDS_PER_HOUR: i64 = 3600;

static ELAPSED_HOURS_DIGITS: usize = 6;
static SPEED_DIGITS: usize = 2;

/// A single timestamped location sample.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    latitude: f64,
    longitude: f64,
    timestamp: DateTime<Utc>,
}

/// Great-circle distance between two points.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Distance {
    pub miles: f64,
    pub kilometers: f64,
}

impl Point {
    pub fn new(latitude: f64, longitude: f64, timestamp: DateTime<Utc>) -> Self {
        Self {
            latitude,
            longitude,
            timestamp,
        }
    }

    pub fn latitude(&self) -> f64 {
        self.latitude
    }

    pub fn longitude(&self) -> f64 {
        self.longitude
    }

    pub fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }

    /// Haversine distance to `other`.
    pub fn distance_to(&self, other: &Point) -> Result<Distance> {
        let angle = self
            .central_angle(other)
            .context(ComputationFailureSnafu {
                from: *self,
                to: *other,
            })?;

        Ok(Distance {
            miles: angle * EARTH_RADIUS_MILES,
            kilometers: angle * EARTH_RADIUS_KM,
        })
    }

    /// Absolute time between the two samples in hours, rounded to 6 decimal digits.
    pub fn elapsed_hours(&self, other: &Point) -> Result<f64> {
        let seconds = (other.timestamp - self.timestamp).abs().num_seconds();

        let hours = (seconds / SECONDS_PER_HOUR) as f64
            + (seconds % SECONDS_PER_HOUR) as f64 / SECONDS_PER_HOUR as f64;

        round_to(hours, ELAPSED_HOURS_DIGITS).context(ComputationFailureSnafu {
            from: *self,
            to: *other,
        })
    }

    /// Implied speed in km/h needed to move from `self` to `other`, rounded to 2 decimal digits.
    /// Zero elapsed time yields a speed of zero.
    pub fn speed_to(&self, other: &Point) -> Result<f64> {
        let hours = self.elapsed_hours(other)?;
        if hours == 0. {
            return Ok(0.);
        }

        let distance = self.distance_to(other)?;

        round_to(distance.kilometers / hours, SPEED_DIGITS).context(ComputationFailureSnafu {
            from: *self,
            to: *other,
        })
    }

    fn central_angle(&self, other: &Point) -> std::result::Result<f64, ComputationError> {
        let (lat1, lng1) = self.to_radians();
        let (lat2, lng2) = other.to_radians();

        let diff_lat = lat2 - lat1;
        let diff_lng = lng2 - lng1;

        let a = (diff_lat / 2.).sin().powi(2)
            + lat1.cos() * lat2.cos() * (diff_lng / 2.).sin().powi(2);

        // Rounding can push `a` just past 1 for antipodal points
        let a = if a > 1. { 1. } else { a };

        let angle = 2. * a.sqrt().atan2((1. - a).sqrt());

        ensure!(
            angle.is_finite(),
            NonFiniteSnafu {
                quantity: "distance",
                value: angle,
            }
        );

        Ok(angle)
    }

    // Multiply before dividing, `f64::to_radians` is one ulp off for some inputs
    fn to_radians(self) -> (f64, f64) {
        (self.latitude * PI / 180., self.longitude * PI / 180.)
    }
}

impl Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "({}, {}, {})",
            self.latitude,
            self.longitude,
            self.timestamp.to_rfc3339()
        )
    }
}

// Formatting and reading back matches the published fare tables exactly, which a
// multiply-round-divide does not.
fn round_to(value: f64, digits: usize) -> std::result::Result<f64, ComputationError> {
    ensure!(
        value.is_finite(),
        NonFiniteSnafu {
            quantity: "value",
            value,
        }
    );

    format!("{value:.digits$}")
        .parse()
        .context(RoundingSnafu { value, digits })
}
