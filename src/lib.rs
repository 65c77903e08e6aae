pub mod assistant; // Chat controller over the collaborator ports
pub mod chat; // Scripted health responses
pub mod config;
pub mod dialogue; // Appointment scheduling dialogues + date/time parsing
pub mod llm; // Language-model port
pub mod models;
pub mod risk; // Risk score engine
pub mod schedule; // Appointment book, calendar, reminders
pub mod speech; // Transcription / text-to-speech ports
pub mod store; // Persistence port

use tracing_subscriber::EnvFilter;

/// Initialize tracing for a host binary. Honors RUST_LOG, falling back to
/// the crate default filter.
pub fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(config::default_log_filter())),
        )
        .init();

    tracing::info!("{} core v{}", config::APP_NAME, config::APP_VERSION);
}
