pub mod keypair_util;

pub use keypair_util::KeypairUtil;
