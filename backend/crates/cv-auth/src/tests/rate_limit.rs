use crate::{AuthError, ClientRateLimiter, RateLimitConfig};

#[test]
fn given_rate_limiter_when_under_limit_then_allows_requests() {
    let limiter = ClientRateLimiter::new(RateLimitConfig {
        max_requests: 10,
        window_ms: 60_000,
    });

    for _ in 0..10 {
        assert!(limiter.check("10.0.0.1").is_ok());
    }
}

#[test]
fn given_rate_limiter_when_burst_exceeds_limit_then_rejects() {
    let limiter = ClientRateLimiter::new(RateLimitConfig {
        max_requests: 2,
        window_ms: 60_000,
    });

    assert!(limiter.check("10.0.0.1").is_ok());
    assert!(limiter.check("10.0.0.1").is_ok());

    let result = limiter.check("10.0.0.1");

    assert!(matches!(
        result,
        Err(AuthError::RateLimitExceeded {
            limit: 2,
            window_ms: 60_000,
            retry_after_secs,
            ..
        }) if retry_after_secs >= 1
    ));
}

#[test]
fn given_exhausted_client_when_other_client_checks_then_it_is_unaffected() {
    let limiter = ClientRateLimiter::new(RateLimitConfig {
        max_requests: 1,
        window_ms: 60_000,
    });

    assert!(limiter.check("10.0.0.1").is_ok());
    assert!(limiter.check("10.0.0.1").is_err());

    assert!(limiter.check("10.0.0.2").is_ok());
    assert_eq!(limiter.tracked_clients(), 2);
}

#[test]
fn given_default_config_when_inspected_then_matches_fifteen_minute_window() {
    let config = RateLimitConfig::default();

    assert_eq!(config.max_requests, 100);
    assert_eq!(config.window().as_secs(), 900);
}
