mod point;
mod trip;

pub use point::*;
pub use trip::*;
