pub mod aggregate;
pub mod validation;

pub use aggregate::{TinField, TinRecord, TinRecordDto, TinRecordId};
pub use validation::{normalize_tin_number, validate_tin_number, ValidationError};
