pub mod crank;
pub mod params;
pub mod switchboard;

pub use params::ContainerParams;
pub use switchboard::{FunctionRequest, SwitchboardAccounts};
