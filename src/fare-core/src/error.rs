use crate::Point;
use snafu::{Location, Snafu};
use std::num::{ParseFloatError, ParseIntError};

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Snafu)]
#[snafu(module, visibility(pub))]
pub enum Error {
    #[snafu(display("Malformed record on line {line_number}: '{line}'"))]
    MalformedRecord {
        #[snafu(implicit)]
        location: Location,
        line_number: u64,
        line: String,
        source: FieldError,
    },
    #[snafu(display("Failed to compute segment from {from} to {to}"))]
    ComputationFailure {
        #[snafu(implicit)]
        location: Location,
        from: Point,
        to: Point,
        source: ComputationError,
    },
}

#[derive(Debug, Snafu)]
#[snafu(module, visibility(pub))]
pub enum FieldError {
    #[snafu(display("Expected {expected} fields, found {found}"))]
    FieldCount {
        #[snafu(implicit)]
        location: Location,
        expected: usize,
        found: usize,
    },
    #[snafu(display("Failed to parse integer field '{value}'"))]
    Integer {
        #[snafu(implicit)]
        location: Location,
        value: String,
        #[snafu(source)]
        error: ParseIntError,
    },
    #[snafu(display("Failed to parse float field '{value}'"))]
    Float {
        #[snafu(implicit)]
        location: Location,
        value: String,
        #[snafu(source)]
        error: ParseFloatError,
    },
    #[snafu(display("Timestamp '{value}' is out of range"))]
    TimestampRange {
        #[snafu(implicit)]
        location: Location,
        value: i64,
    },
    #[snafu(display("CSV error"))]
    Csv {
        #[snafu(implicit)]
        location: Location,
        #[snafu(source)]
        error: csv::Error,
    },
}

#[derive(Debug, Snafu)]
#[snafu(module, visibility(pub))]
pub enum ComputationError {
    #[snafu(display("Computed a non-finite {quantity}: {value}"))]
    NonFinite {
        #[snafu(implicit)]
        location: Location,
        quantity: &'static str,
        value: f64,
    },
    #[snafu(display("Failed to round '{value}' to {digits} decimal digits"))]
    Rounding {
        #[snafu(implicit)]
        location: Location,
        value: f64,
        digits: usize,
        #[snafu(source)]
        error: ParseFloatError,
    },
}
