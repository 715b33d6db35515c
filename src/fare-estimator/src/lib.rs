#![deny(rust_2018_idioms)]

mod fare_calculator;
mod loader;
mod pricing_engine;
mod segmenter;
mod sink;
mod unrealistic_speed;

pub mod error;
pub mod settings;
pub mod startup;

pub use error::{Error, Result};
pub use fare_calculator::*;
pub use loader::*;
pub use pricing_engine::*;
pub use segmenter::*;
pub use settings::*;
pub use sink::*;
pub use unrealistic_speed::*;
