pub mod assertions;
pub mod env;
pub mod scenario;

pub use assertions::GlobalExpectation;
pub use env::{setup_environment, TestKeys};
pub use scenario::{initialize_global, wait_for_trigger, TriggerObservation};
