//! HTTP method constants and utilities

/// HTTP GET method
pub const GET: &str = "GET";

/// HTTP POST method
pub const POST: &str = "POST";

/// HTTP HEAD method
pub const HEAD: &str = "HEAD";

/// Infer HTTP method based on whether the request has data
pub fn infer(has_data: bool) -> &'static str {
    if has_data {
        POST
    } else {
        GET
    }
}
