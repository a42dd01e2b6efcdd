pub mod config;
pub mod constant;
pub mod error;
pub mod harness;
pub mod log;
pub mod oracle;
pub mod program;
pub mod rpc;
pub mod sanitize;
pub mod signer;
pub mod token;
pub mod transaction;
pub use config::Config;
pub use error::{L2Error, L2Result};
pub use signer::KeypairUtil;

#[cfg(test)]
pub mod tests;
