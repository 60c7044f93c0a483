mod requirements_file;

pub use requirements_file::{LoadError, inspect, load, load_or_empty};
