pub mod config;
pub mod extract;
pub mod manifest;
pub mod model;
pub mod runner;
pub mod scorer;

/// Application name for XDG paths
pub const APP_NAME: &str = "fretscore";

/// Default model identifier sent to the chat-completions endpoint.
pub const DEFAULT_MODEL: &str = "gpt-4-turbo-2024-04-09";
