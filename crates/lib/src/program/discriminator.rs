//! Anchor-style discriminators.
//!
//! Instructions are prefixed with `sha256("global:<snake_case_name>")[..8]` and
//! accounts start with `sha256("account:<TypeName>")[..8]`.

use sha2::{Digest, Sha256};

pub const DISCRIMINATOR_LEN: usize = 8;

fn hash_prefix(namespace: &str, name: &str) -> [u8; DISCRIMINATOR_LEN] {
    let hash = Sha256::digest(format!("{namespace}:{name}").as_bytes());
    let mut discriminator = [0u8; DISCRIMINATOR_LEN];
    discriminator.copy_from_slice(&hash[..DISCRIMINATOR_LEN]);
    discriminator
}

pub fn instruction_discriminator(name: &str) -> [u8; DISCRIMINATOR_LEN] {
    hash_prefix("global", name)
}

pub fn account_discriminator(name: &str) -> [u8; DISCRIMINATOR_LEN] {
    hash_prefix("account", name)
}
