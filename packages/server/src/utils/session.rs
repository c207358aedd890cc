use axum_extra::extract::cookie::{Cookie, SameSite};

/// Name of the session cookie.
pub const TOKEN_COOKIE: &str = "token";

/// Session cookie carrying `token`. Lifetime comes from the token's `exp` claim.
pub fn session_cookie(token: String, production: bool) -> Cookie<'static> {
    with_attributes(Cookie::build((TOKEN_COOKIE, token)), production).build()
}

/// Expired, empty session cookie with the same attributes as the issued one.
pub fn cleared_session_cookie(production: bool) -> Cookie<'static> {
    with_attributes(Cookie::build((TOKEN_COOKIE, "")), production)
        .max_age(time::Duration::ZERO)
        .build()
}

fn with_attributes(
    builder: cookie::CookieBuilder<'static>,
    production: bool,
) -> cookie::CookieBuilder<'static> {
    let same_site = if production {
        SameSite::None
    } else {
        SameSite::Strict
    };
    builder
        .path("/")
        .http_only(true)
        .secure(production)
        .same_site(same_site)
}
