#[cfg(test)]
pub mod account_mock;
