//! Citizen petition intake: field checks, identity checksums and address cleanup.

mod address;
mod form;
mod validation;

pub use address::normalize_address;
pub use form::{PetitionFields, PetitionForm, PetitionPreview, PetitionViolation};
pub use validation::{is_valid_mobile_number, is_valid_national_id};
