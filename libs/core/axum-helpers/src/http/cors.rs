use axum::http::{HeaderValue, Method, header};
use std::io;
use std::time::Duration;
use tower_http::cors::{AllowOrigin, CorsLayer};

pub const CORS_ORIGIN_VAR: &str = "CORS_ALLOWED_ORIGIN";

/// Parse a comma-separated origin list such as
/// `http://localhost:3000, https://inventario.example.com`.
pub fn parse_origins(raw: &str) -> io::Result<Vec<HeaderValue>> {
    let origins = raw
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(HeaderValue::from_str)
        .collect::<Result<Vec<_>, _>>()
        .map_err(|e| {
            io::Error::new(
                io::ErrorKind::InvalidInput,
                format!("Invalid {} value: {}", CORS_ORIGIN_VAR, e),
            )
        })?;

    if origins.is_empty() {
        return Err(io::Error::new(
            io::ErrorKind::InvalidInput,
            format!("{} cannot be empty", CORS_ORIGIN_VAR),
        ));
    }

    Ok(origins)
}

/// Origins from the required `CORS_ALLOWED_ORIGIN` variable.
pub fn cors_origins_from_env() -> io::Result<Vec<HeaderValue>> {
    let raw = std::env::var(CORS_ORIGIN_VAR).map_err(|_| {
        io::Error::new(
            io::ErrorKind::InvalidInput,
            format!(
                "{} environment variable is required. Example: {}=http://localhost:3000",
                CORS_ORIGIN_VAR, CORS_ORIGIN_VAR
            ),
        )
    })?;
    parse_origins(&raw)
}

/// CORS for the API: the given origins, the verbs the routes use, JSON
/// headers, one hour preflight cache.
pub fn create_cors_layer(origins: Vec<HeaderValue>) -> CorsLayer {
    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::PATCH,
            Method::OPTIONS,
        ])
        .allow_headers([header::CONTENT_TYPE, header::ACCEPT])
        .max_age(Duration::from_secs(3600))
}

/// Any origin. Local development only.
pub fn create_permissive_cors_layer() -> CorsLayer {
    CorsLayer::permissive()
}
