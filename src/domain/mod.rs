//! Core domain layer. No external I/O dependencies.
//!
//! Entities and validation rules live here. Dependencies flow inward.

pub mod entities;
pub mod errors;
pub mod validation;

pub use entities::{
    AuthSession, BusinessProfile, BusinessProfileUpdate, ImageAttachment, RegistrationRecord, Role,
};
pub use errors::DomainError;
pub use validation::{GENERAL, StepErrors, WizardStep, validate_step};
