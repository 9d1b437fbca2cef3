pub mod config;
pub mod note;
pub mod preferences;

pub use config::*;
pub use note::*;
pub use preferences::*;
