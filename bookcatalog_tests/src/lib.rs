

/// Address of the service under test, `BOOKCATALOG_URL` or the default local port
#[cfg(all(test, any(feature = "system_tests", feature = "load_tests")))]
fn bookcatalog_url() -> String {
    std::env::var("BOOKCATALOG_URL").unwrap_or_else(|_| "http://127.0.0.1:5000".to_string())
}
