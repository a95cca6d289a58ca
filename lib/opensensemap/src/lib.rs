mod client;
pub use client::{Client, DEFAULT_API_URL};

mod error;
pub use error::Error;

mod sense_box;
pub use sense_box::{LastMeasurement, SenseBox, Sensor};

pub type Result<T> = std::result::Result<T, Error>;
