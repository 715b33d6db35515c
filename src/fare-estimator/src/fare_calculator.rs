use crate::FareSettings;
use chrono::Timelike;
use chrono_tz::Tz;
use fare_core::{Point, Result};
use std::ops::RangeInclusive;
use tracing::debug;

/// Hours of the day, in the configured time zone, priced with the day rate.
static DAY_HOURS: RangeInclusive<u32> = 5..=23;

#[derive(Debug, Clone)]
pub struct FareCalculator {
    settings: FareSettings,
    timezone: Tz,
}

impl FareCalculator {
    pub fn new(settings: FareSettings, timezone: Tz) -> Self {
        Self { settings, timezone }
    }

    /// Prices a whole ride: the standard fee plus every segment between consecutive points,
    /// raised to the minimum fare if it falls below it.
    pub fn ride_fare(&self, points: &[Point]) -> Result<f64> {
        let mut total = self.settings.standard_fee;

        for segment in points.windows(2) {
            let (from, to) = (&segment[0], &segment[1]);

            let fare = self.segment_fare(from, to)?;
            debug!("segment fare from {from} to {to} is {fare}");

            total += fare;
        }

        if total < self.settings.minimum {
            total = self.settings.minimum;
        }

        Ok(total)
    }

    /// Moving segments are priced per km, idle ones per hour.
    pub fn segment_fare(&self, from: &Point, to: &Point) -> Result<f64> {
        let speed = from.speed_to(to)?;

        if speed > self.settings.idle_speed_kmh {
            let distance = from.distance_to(to)?;

            let hour = from.timestamp().with_timezone(&self.timezone).hour();
            let rate = if DAY_HOURS.contains(&hour) {
                self.settings.day_rate_per_km
            } else {
                self.settings.night_rate_per_km
            };

            Ok(distance.kilometers * rate)
        } else {
            let hours = from.elapsed_hours(to)?;
            Ok(hours * self.settings.idle_price_per_hour)
        }
    }
}
