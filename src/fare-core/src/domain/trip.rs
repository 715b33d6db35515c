use crate::Point;
use std::{
    fmt::{self, Display},
    num::ParseIntError,
    str::FromStr,
};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TripId(i64);

/// A trip and its location samples in the order they were read, no sorting is applied.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Trip {
    id: TripId,
    points: Vec<Point>,
    fare: f64,
}

/// The unparsed records of one contiguous run of input lines sharing a trip id token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawBatch(String);

/// The priced outcome of a trip, rendered as `id,fare` with two decimal digits.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FareRecord {
    pub trip_id: TripId,
    pub fare: f64,
}

impl TripId {
    pub fn new(value: i64) -> Self {
        Self(value)
    }

    pub fn into_inner(self) -> i64 {
        self.0
    }
}

impl Trip {
    pub fn new(id: TripId) -> Self {
        Self {
            id,
            ..Default::default()
        }
    }

    pub fn id(&self) -> TripId {
        self.id
    }

    pub fn set_id(&mut self, id: TripId) {
        self.id = id;
    }

    pub fn points(&self) -> &[Point] {
        &self.points
    }

    pub fn push_point(&mut self, point: Point) {
        self.points.push(point);
    }

    /// Takes the points out of the trip, leaving it without any.
    pub fn take_points(&mut self) -> Vec<Point> {
        std::mem::take(&mut self.points)
    }

    pub fn set_points(&mut self, points: Vec<Point>) {
        self.points = points;
    }

    pub fn fare(&self) -> f64 {
        self.fare
    }

    pub fn set_fare(&mut self, fare: f64) {
        self.fare = fare;
    }
}

impl RawBatch {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

impl From<&Trip> for FareRecord {
    fn from(value: &Trip) -> Self {
        Self {
            trip_id: value.id,
            fare: value.fare,
        }
    }
}

impl FromStr for TripId {
    type Err = ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.parse().map(Self)
    }
}

impl From<TripId> for i64 {
    fn from(value: TripId) -> Self {
        value.0
    }
}

impl Display for TripId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl Display for RawBatch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl Display for FareRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{:.2}", self.trip_id, self.fare)
    }
}
