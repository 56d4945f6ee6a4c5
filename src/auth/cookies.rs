//! Session cookie construction
//!
//! Both credentials travel only as cookies; `SameSite=None; Secure` because
//! the frontend is served from a separate origin and sends them cross-site.
//! Removal cookies must repeat the exact attribute set used at set-time or
//! browsers will not drop them.

use axum_extra::extract::cookie::{Cookie, SameSite};
use time::Duration;

pub const ACCESS_COOKIE: &str = "jwt";
pub const REFRESH_COOKIE: &str = "jwtRefresh";

fn session_cookie(name: &'static str, token: String, max_age: Duration) -> Cookie<'static> {
    Cookie::build((name, token))
        .http_only(true)
        .secure(true)
        .same_site(SameSite::None)
        .path("/")
        .max_age(max_age)
        .build()
}

pub fn access_cookie(token: String, ttl: chrono::Duration) -> Cookie<'static> {
    session_cookie(ACCESS_COOKIE, token, Duration::seconds(ttl.num_seconds()))
}

pub fn refresh_cookie(token: String, ttl: chrono::Duration) -> Cookie<'static> {
    session_cookie(REFRESH_COOKIE, token, Duration::seconds(ttl.num_seconds()))
}

pub fn clear_access() -> Cookie<'static> {
    session_cookie(ACCESS_COOKIE, String::new(), Duration::ZERO)
}

pub fn clear_refresh() -> Cookie<'static> {
    session_cookie(REFRESH_COOKIE, String::new(), Duration::ZERO)
}
