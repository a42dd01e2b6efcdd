// Core test modules
pub mod assertions;
pub mod constants;
pub mod setup;

pub use assertions::*;
pub use constants::*;
pub use setup::*;
