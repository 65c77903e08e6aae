use std::path::PathBuf;

/// Application-level constants
pub const APP_NAME: &str = "CardioTwin";
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Storage key for the persisted chat transcript.
pub const CHAT_HISTORY_KEY: &str = "chatHistory";
/// Storage key for the first-visit flag.
pub const FIRST_VISIT_KEY: &str = "isFirstVisit";

/// Default tracing filter when RUST_LOG is unset.
pub fn default_log_filter() -> &'static str {
    "cardiotwin=info"
}

/// Get the application data directory
/// ~/CardioTwin/ on all platforms (user-visible)
pub fn app_data_dir() -> PathBuf {
    let home = dirs::home_dir().expect("Cannot determine home directory");
    home.join("CardioTwin")
}

/// Directory holding persisted assistant state.
pub fn storage_dir() -> PathBuf {
    app_data_dir().join("storage")
}
