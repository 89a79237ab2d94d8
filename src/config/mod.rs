//! Configuration module

mod matter;

pub use matter::MatterConfig;
pub use matter::CONFIG_FILE;
