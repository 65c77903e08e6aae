pub mod appointment;
pub mod enums;
pub mod event;
pub mod message;

pub use appointment::*;
pub use enums::*;
pub use event::*;
pub use message::*;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ModelError {
    #[error("Invalid {field} value: {value}")]
    InvalidEnum { field: String, value: String },
}
