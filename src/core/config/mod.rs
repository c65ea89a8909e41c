pub mod data;
pub mod io;
pub mod printing;

pub use data::{Config, CONFIG_KEYS};
pub use io::ConfigError;
