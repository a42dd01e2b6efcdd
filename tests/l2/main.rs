// Integration tests. Those marked #[ignore] need a local validator with the fee-schedule
// program deployed; run them with `cargo test -p tests -- --ignored`.
#[path = "../src/common/mod.rs"]
mod common;

mod context_test;
mod environment_test;
mod global_test;
