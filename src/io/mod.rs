pub mod config_io;
pub mod data_dir;
pub mod recovery;
pub mod slots;
pub mod watcher;
