mod adapter;
pub use adapter::Adapter;

mod config;
pub use config::{AdapterConfig, ApiConfig, Config, MqttConfig, Profile};

mod device;
pub use device::{BoxDevice, PollHandle, PollReport};

mod error;
pub use error::Error;

mod host;
pub use host::{Host, MqttHost, Publication};

pub mod mapping;

mod source;
pub use source::{ApiSource, BoxSource};

pub type ErasedError = Box<dyn std::error::Error + Send + Sync>;
pub type Result<T> = std::result::Result<T, Error>;
