pub mod environment;
pub mod settings;

pub use environment::{parse_bool, Environment};
pub use settings::Settings;
