pub mod config;
pub mod constants;
pub mod gate;
pub mod logging;
pub mod prompt;
pub mod session;
pub mod transcript;
