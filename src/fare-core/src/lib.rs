#![deny(rust_2018_idioms)]

//! Domain types and geospatial primitives shared by the fare estimation pipeline

mod domain;
mod ports;

pub mod error;

pub use domain::*;
pub use error::{ComputationError, Error, FieldError, Result};
pub use ports::*;
