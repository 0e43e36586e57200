mod dirs;
mod settings;
mod validation;

pub use dirs::Directories;
pub use settings::{Config, DEFAULT_TERMINAL, default_terminal};
pub use validation::warn_unknown_fields;
