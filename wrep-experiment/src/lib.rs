pub mod builder;
pub mod config;
pub mod generate;
pub mod response;
pub mod session;

pub use builder::{build_block, build_trial};
pub use config::{ConfigError, ExperimentConfig};
pub use response::{Cancelled, EngineTick, ResponseEngine, TickOutcome, WheelTarget};
pub use session::{Session, SessionError};
