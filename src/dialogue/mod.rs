pub mod datetime;
pub mod directives;
pub mod envelope;
pub mod orchestrator;
pub mod prompt;
pub mod scripted;
pub mod session;
pub mod types;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum DialogueError {
    #[error("An exchange is already in flight for this session")]
    Busy,

    #[error("Session is closed")]
    SessionClosed,
}
