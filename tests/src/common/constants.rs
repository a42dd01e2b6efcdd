// ============================================================================
// Network
// ============================================================================

/// Overrides `cluster.rpc_url` from the test config
pub const RPC_URL_ENV: &str = "RPC_URL";

// ============================================================================
// Test Configuration
// ============================================================================

/// Environment variable pointing at the harness config used by live tests
pub const TEST_CONFIG_ENV: &str = "L2_TEST_CONFIG";

/// Config file used when `L2_TEST_CONFIG` is unset
pub const DEFAULT_TEST_CONFIG: &str = "l2.toml";

/// Short trigger window so live tests do not wait the full default
pub const TEST_TRIGGER_WAIT_MS: u64 = 2_000;
