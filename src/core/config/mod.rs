pub mod data;
pub mod defaults;
pub mod io;
pub mod orchestrator;
pub mod printing;


pub use data::Settings;
pub use io::SettingsError;
pub use orchestrator::SettingsStore;
