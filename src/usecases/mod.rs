//! Application use cases. Orchestrate domain logic via ports.

pub mod wizard;

pub use wizard::{StepOutcome, WizardService};
