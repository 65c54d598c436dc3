use crate::error::AgendaError;
use actix_web::HttpRequest;
use agenda_domain::User;
use agenda_infra::AgendaContext;

/// Cookie carrying the api token of the signed in `User` in the web UIs
pub const AUTH_COOKIE_NAME: &str = "agenda_token";

/// Accepts `Token <token>` and `Bearer <token>`
fn parse_authtoken_header(token_header_value: &str) -> Option<&str> {
    let mut parts = token_header_value.trim().splitn(2, ' ');
    let scheme = parts.next()?;
    let token = parts.next()?.trim();
    if !(scheme.eq_ignore_ascii_case("token") || scheme.eq_ignore_ascii_case("bearer")) {
        return None;
    }
    if token.is_empty() {
        return None;
    }
    Some(token)
}

/// The `User` identified by the `Authorization` header of the request
pub async fn protect_route(req: &HttpRequest, ctx: &AgendaContext) -> Result<User, AgendaError> {
    let header = req
        .headers()
        .get("authorization")
        .ok_or_else(|| {
            AgendaError::Unauthorized("Authentication credentials were not provided.".into())
        })?
        .to_str()
        .map_err(|_| AgendaError::Unauthorized("Malformed authorization header".into()))?;
    let token = parse_authtoken_header(header)
        .ok_or_else(|| AgendaError::Unauthorized("Malformed authorization header".into()))?;

    ctx.repos
        .users
        .find_by_api_token(token)
        .await
        .ok_or_else(|| AgendaError::Unauthorized("Invalid token.".into()))
}

/// The `User` identified by the auth cookie, if any
pub async fn protect_web_route(req: &HttpRequest, ctx: &AgendaContext) -> Option<User> {
    let cookie = req.cookie(AUTH_COOKIE_NAME)?;
    ctx.repos.users.find_by_api_token(cookie.value()).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::{cookie::Cookie, test::TestRequest};

    #[test]
    fn it_parses_authorization_headers() {
        assert_eq!(parse_authtoken_header("Token abc"), Some("abc"));
        assert_eq!(parse_authtoken_header("Bearer abc "), Some("abc"));
        assert_eq!(parse_authtoken_header("bearer abc"), Some("abc"));
        assert_eq!(parse_authtoken_header("Basic abc"), None);
        assert_eq!(parse_authtoken_header("Token"), None);
        assert_eq!(parse_authtoken_header("Token  "), None);
        assert_eq!(parse_authtoken_header(""), None);
    }

    #[actix_web::test]
    async fn it_authenticates_by_header_and_cookie() {
        let ctx = AgendaContext::create_inmemory();
        let user = User::new("alice", "alice@example.com", "secret".into()).unwrap();
        ctx.repos.users.insert(&user).await.unwrap();

        let req = TestRequest::default()
            .insert_header(("Authorization", "Token secret"))
            .to_http_request();
        assert_eq!(protect_route(&req, &ctx).await, Ok(user.clone()));

        let req = TestRequest::default()
            .insert_header(("Authorization", "Token wrong"))
            .to_http_request();
        assert!(matches!(
            protect_route(&req, &ctx).await,
            Err(AgendaError::Unauthorized(_))
        ));

        let req = TestRequest::default().to_http_request();
        assert!(protect_route(&req, &ctx).await.is_err());

        let req = TestRequest::default()
            .cookie(Cookie::new(AUTH_COOKIE_NAME, "secret"))
            .to_http_request();
        assert_eq!(protect_web_route(&req, &ctx).await, Some(user));
    }
}
