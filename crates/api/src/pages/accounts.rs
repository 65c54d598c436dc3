use super::html::{self, escape};
use super::LOGIN_URL;
use crate::error::AgendaError;
use crate::shared::{
    auth::{protect_web_route, AUTH_COOKIE_NAME},
    usecase::execute,
};
use crate::user::SignupUseCase;
use actix_web::{
    cookie::{Cookie, SameSite},
    web, HttpRequest, HttpResponse,
};
use agenda_infra::AgendaContext;
use serde::Deserialize;

#[derive(Debug, Default, Deserialize)]
pub struct SignupForm {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub email: String,
}

#[derive(Debug, Deserialize)]
pub struct LoginForm {
    #[serde(default)]
    pub token: String,
}

fn auth_cookie(token: &str) -> Cookie<'static> {
    Cookie::build(AUTH_COOKIE_NAME, token.to_string())
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .finish()
}

pub async fn home_page(http_req: HttpRequest, ctx: web::Data<AgendaContext>) -> HttpResponse {
    let greeting = match protect_web_route(&http_req, &ctx).await {
        Some(user) => format!(
            r#"<p>Signed in as <strong>{}</strong>.</p>"#,
            escape(&user.username)
        ),
        None => r#"<p><a href="/web/signup/">Sign up</a> or <a href="/web/login/">log in</a> with your API token.</p>"#.to_string(),
    };
    let body = format!(
        r#"{greeting}
<ul>
<li><a href="/web/events/">Events</a></li>
<li><a href="/web/events/create/">New event</a></li>
<li><a href="/ui/events/">Quick events</a></li>
<li><a href="/health">Health</a></li>
</ul>"#,
        greeting = greeting
    );
    html::ok_page("Agenda", &body)
}

fn render_signup_form(form: &SignupForm, errors: &[String]) -> String {
    format!(
        r#"{errors}<form method="post" action="/web/signup/">
<div class="mb-3"><label class="form-label" for="username">Username</label><input class="form-control" id="username" name="username" maxlength="150" required value="{username}"></div>
<div class="mb-3"><label class="form-label" for="email">Email</label><input class="form-control" id="email" name="email" type="email" required value="{email}"></div>
<button class="btn btn-primary" type="submit">Sign up</button>
</form>"#,
        errors = html::errors_list(errors),
        username = escape(&form.username),
        email = escape(&form.email),
    )
}

pub async fn signup_page() -> HttpResponse {
    html::ok_page("Sign up", &render_signup_form(&SignupForm::default(), &[]))
}

pub async fn signup(form: web::Form<SignupForm>, ctx: web::Data<AgendaContext>) -> HttpResponse {
    let form = form.into_inner();
    let usecase = SignupUseCase {
        username: form.username.clone(),
        email: form.email.clone(),
    };

    match execute(usecase, &ctx).await {
        Ok(user) => {
            let body = format!(
                r#"<p>Welcome <strong>{username}</strong>, you are now signed in.</p>
<p>Your API token is <code>{token}</code>. Keep it safe, it is needed to log in again and to call the API.</p>
<p><a href="/web/events/">Go to your events</a></p>"#,
                username = escape(&user.username),
                token = escape(&user.api_token),
            );
            let mut res = HttpResponse::Created();
            res.cookie(auth_cookie(&user.api_token));
            html::html_response(&mut res, html::page("Signed up", &body))
        }
        Err(e) => {
            let e = AgendaError::from(e);
            let body = render_signup_form(&form, &[html::error_message(&e)]);
            html::html_response(
                &mut HttpResponse::build(actix_web::ResponseError::status_code(&e)),
                html::page("Sign up", &body),
            )
        }
    }
}

fn render_login_form(errors: &[String]) -> String {
    format!(
        r#"{errors}<form method="post" action="/web/login/">
<div class="mb-3"><label class="form-label" for="token">API token</label><input class="form-control" id="token" name="token" required></div>
<button class="btn btn-primary" type="submit">Log in</button>
</form>
<p>No account yet? <a href="/web/signup/">Sign up</a>.</p>"#,
        errors = html::errors_list(errors),
    )
}

pub async fn login_page() -> HttpResponse {
    html::ok_page("Log in", &render_login_form(&[]))
}

pub async fn login(form: web::Form<LoginForm>, ctx: web::Data<AgendaContext>) -> HttpResponse {
    let token = form.token.trim();
    match ctx.repos.users.find_by_api_token(token).await {
        Some(user) if !token.is_empty() => HttpResponse::Found()
            .cookie(auth_cookie(&user.api_token))
            .insert_header((actix_web::http::header::LOCATION, "/web/events/"))
            .finish(),
        _ => html::html_response(
            &mut HttpResponse::BadRequest(),
            html::page("Log in", &render_login_form(&["Invalid token.".into()])),
        ),
    }
}

pub async fn logout() -> HttpResponse {
    let mut cookie = auth_cookie("");
    cookie.make_removal();
    HttpResponse::Found()
        .cookie(cookie)
        .insert_header((actix_web::http::header::LOCATION, LOGIN_URL))
        .finish()
}
