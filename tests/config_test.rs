use fairq::config::{Config, DEFAULT_WORKERS};

// Env vars are process-wide, so every case runs in one test.
#[test]
fn config_from_env() {
    unsafe {
        std::env::remove_var("FAIRQ_WORKERS");
        std::env::remove_var("LOG_LEVEL");
        std::env::remove_var("OTEL_ENDPOINT");
    }
    let config = Config::from_env().unwrap();
    assert_eq!(config.workers, DEFAULT_WORKERS);
    assert_eq!(config.log_level, "info");
    assert!(config.otel_endpoint.is_none());

    unsafe {
        std::env::set_var("FAIRQ_WORKERS", "8");
        std::env::set_var("LOG_LEVEL", "debug");
        std::env::set_var("OTEL_ENDPOINT", "http://localhost:4317");
    }
    let config = Config::from_env().unwrap();
    assert_eq!(config.workers, 8);
    assert_eq!(config.log_level, "debug");
    assert_eq!(config.otel_endpoint.as_deref(), Some("http://localhost:4317"));

    for bad in ["0", "-1", "many"] {
        unsafe {
            std::env::set_var("FAIRQ_WORKERS", bad);
        }
        let result = Config::from_env();
        assert!(result.is_err(), "FAIRQ_WORKERS={bad} should be rejected");
    }

    // Clean up
    unsafe {
        std::env::remove_var("FAIRQ_WORKERS");
        std::env::remove_var("LOG_LEVEL");
        std::env::remove_var("OTEL_ENDPOINT");
    }
}
