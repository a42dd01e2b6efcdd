use crate::common::*;
use l2_lib::Config;

#[test]
fn test_rpc_url_prefers_env_over_config() {
    let mut config = Config::default();
    config.cluster.rpc_url = "http://validator.internal:8899".to_string();

    assert_eq!(resolve_rpc_url(None, &config), "http://validator.internal:8899");
    assert_eq!(
        resolve_rpc_url(Some("http://127.0.0.1:9999".to_string()), &config),
        "http://127.0.0.1:9999"
    );
}
