//! How the token pair travels: cookie names, lifetimes, and builders.
//!
//! Both cookies are HttpOnly, Secure, SameSite=Lax. The access cookie rides
//! on every request; the refresh cookie is path-scoped to `/auth/token`.

use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use time::Duration;

/// Name of the cookie carrying the access token.
pub const BENEFIX_ACCESS_TOKEN: &str = "benefix_access_token";

/// Name of the cookie carrying the refresh token.
pub const BENEFIX_REFRESH_TOKEN: &str = "benefix_refresh_token";

/// Seconds an access-token JWT stays valid (four hours).
pub const ACCESS_TOKEN_EXP: u64 = 14400;

/// Seconds a refresh-token JWT stays valid; also both cookies' Max-Age
/// (seven days).
pub const REFRESH_TOKEN_EXP: u64 = 604800;

fn token_cookie(
    name: &'static str,
    value: String,
    path: &'static str,
    domain: String,
    max_age: Duration,
) -> Cookie<'static> {
    Cookie::build((name, value))
        .path(path)
        .domain(domain)
        .max_age(max_age)
        .http_only(true)
        .secure(true)
        .same_site(SameSite::Lax)
        .build()
}

/// Add the access-token cookie to the jar.
///
/// Its Max-Age matches the refresh window; the JWT inside expires sooner,
/// and an expired access token failing validation is the refresh signal.
///
/// ```
/// use axum_extra::extract::cookie::CookieJar;
/// use benefix_auth_types::cookie::{set_access_token_cookie, BENEFIX_ACCESS_TOKEN};
///
/// let jar = set_access_token_cookie(CookieJar::new(), "jwt".into(), "benefix.test".into());
/// let access = jar.get(BENEFIX_ACCESS_TOKEN).unwrap();
/// assert_eq!(access.path(), Some("/"));
/// assert_eq!(access.domain(), Some("benefix.test"));
/// assert!(access.secure().unwrap_or(false) && access.http_only().unwrap_or(false));
/// ```
pub fn set_access_token_cookie(jar: CookieJar, value: String, domain: String) -> CookieJar {
    jar.add(token_cookie(
        BENEFIX_ACCESS_TOKEN,
        value,
        "/",
        domain,
        Duration::seconds(REFRESH_TOKEN_EXP as i64),
    ))
}

/// Add the refresh-token cookie to the jar, path-scoped to `/auth/token`.
///
/// ```
/// use axum_extra::extract::cookie::CookieJar;
/// use benefix_auth_types::cookie::{
///     set_refresh_token_cookie, BENEFIX_REFRESH_TOKEN, REFRESH_TOKEN_EXP,
/// };
///
/// let jar = set_refresh_token_cookie(CookieJar::new(), "jwt".into(), "benefix.test".into());
/// let refresh = jar.get(BENEFIX_REFRESH_TOKEN).unwrap();
/// assert_eq!(refresh.path(), Some("/auth/token"));
/// assert_eq!(refresh.max_age().unwrap().whole_seconds() as u64, REFRESH_TOKEN_EXP);
/// ```
pub fn set_refresh_token_cookie(jar: CookieJar, value: String, domain: String) -> CookieJar {
    jar.add(token_cookie(
        BENEFIX_REFRESH_TOKEN,
        value,
        "/auth/token",
        domain,
        Duration::seconds(REFRESH_TOKEN_EXP as i64),
    ))
}

/// Clear both token cookies by zeroing their Max-Age.
///
/// ```
/// use axum_extra::extract::cookie::CookieJar;
/// use benefix_auth_types::cookie::{clear_cookies, BENEFIX_ACCESS_TOKEN, BENEFIX_REFRESH_TOKEN};
///
/// let jar = clear_cookies(CookieJar::new(), "benefix.test".into());
/// for name in [BENEFIX_ACCESS_TOKEN, BENEFIX_REFRESH_TOKEN] {
///     assert_eq!(jar.get(name).unwrap().max_age(), Some(time::Duration::ZERO));
/// }
/// ```
pub fn clear_cookies(jar: CookieJar, domain: String) -> CookieJar {
    let jar = jar.add(token_cookie(
        BENEFIX_ACCESS_TOKEN,
        String::new(),
        "/",
        domain.clone(),
        Duration::ZERO,
    ));
    jar.add(token_cookie(
        BENEFIX_REFRESH_TOKEN,
        String::new(),
        "/auth/token",
        domain,
        Duration::ZERO,
    ))
}
