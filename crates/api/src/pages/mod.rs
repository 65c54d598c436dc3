mod accounts;
mod events;
mod form;
mod html;
mod htmx;

use actix_web::web;

const LOGIN_URL: &str = "/web/login/";

/// Server rendered pages. The signed in `User` is identified by the
/// `agenda_token` cookie, anonymous visitors are sent to the login page.
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/", web::get().to(accounts::home_page));
    cfg.service(
        web::scope("/web")
            .route("/signup/", web::get().to(accounts::signup_page))
            .route("/signup/", web::post().to(accounts::signup))
            .route("/login/", web::get().to(accounts::login_page))
            .route("/login/", web::post().to(accounts::login))
            .route("/logout/", web::get().to(accounts::logout))
            .route("/events/", web::get().to(events::event_list_page))
            .route("/events/create/", web::get().to(events::event_create_page))
            .route("/events/create/", web::post().to(events::event_create))
            .route("/events/{event_id}/", web::get().to(events::event_detail_page)),
    );
    cfg.service(
        web::scope("/ui")
            .route("/events/", web::get().to(htmx::event_list_page))
            .route("/events/create/", web::post().to(htmx::event_create))
            .route("/events/{event_id}/row/", web::get().to(htmx::event_row))
            .route("/events/{event_id}/delete/", web::post().to(htmx::event_delete)),
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::{
        auth::AUTH_COOKIE_NAME,
        testing::{setup, TestContext},
    };
    use actix_web::{cookie::Cookie, http::StatusCode, test, App};
    use agenda_infra::EventQuery;

    macro_rules! app {
        ($ctx:expr) => {
            test::init_service(
                App::new()
                    .app_data(web::Data::new($ctx.clone()))
                    .configure(configure_routes),
            )
            .await
        };
    }

    fn location<B>(res: &actix_web::dev::ServiceResponse<B>) -> &str {
        res.headers()
            .get("location")
            .and_then(|l| l.to_str().ok())
            .unwrap_or_default()
    }

    #[actix_web::test]
    async fn anonymous_visitors_are_sent_to_login() {
        let TestContext { ctx, .. } = setup().await;
        let app = app!(ctx);

        for uri in ["/web/events/", "/web/events/create/", "/ui/events/"] {
            let req = test::TestRequest::get().uri(uri).to_request();
            let res = test::call_service(&app, req).await;
            assert_eq!(res.status(), StatusCode::FOUND);
            assert_eq!(location(&res), LOGIN_URL);
        }

        let req = test::TestRequest::get().uri("/").to_request();
        let res = test::call_service(&app, req).await;
        assert_eq!(res.status(), StatusCode::OK);
    }

    #[actix_web::test]
    async fn signup_and_login_set_the_auth_cookie() {
        let TestContext { ctx, user, .. } = setup().await;
        let app = app!(ctx);

        let req = test::TestRequest::post()
            .uri("/web/signup/")
            .set_form([("username", "bob"), ("email", "Bob@Example.com")])
            .to_request();
        let res = test::call_service(&app, req).await;
        assert_eq!(res.status(), StatusCode::CREATED);
        let bob = ctx.repos.users.find_by_username("bob").await.unwrap();
        assert_eq!(bob.email, "bob@example.com");
        let cookie = res
            .response()
            .cookies()
            .find(|c| c.name() == AUTH_COOKIE_NAME)
            .unwrap();
        assert_eq!(cookie.value(), bob.api_token);

        let req = test::TestRequest::post()
            .uri("/web/signup/")
            .set_form([("username", "bob"), ("email", "other@example.com")])
            .to_request();
        let res = test::call_service(&app, req).await;
        assert_eq!(res.status(), StatusCode::CONFLICT);

        let req = test::TestRequest::post()
            .uri("/web/login/")
            .set_form([("token", user.api_token.as_str())])
            .to_request();
        let res = test::call_service(&app, req).await;
        assert_eq!(res.status(), StatusCode::FOUND);
        assert_eq!(location(&res), "/web/events/");

        let req = test::TestRequest::post()
            .uri("/web/login/")
            .set_form([("token", "wrong")])
            .to_request();
        let res = test::call_service(&app, req).await;
        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    }

    #[actix_web::test]
    async fn classic_ui_creates_events_with_default_reminder() {
        let TestContext { ctx, user, .. } = setup().await;
        let app = app!(ctx);
        let cookie = Cookie::new(AUTH_COOKIE_NAME, user.api_token.clone());

        let req = test::TestRequest::post()
            .uri("/web/events/create/")
            .cookie(cookie.clone())
            .set_form([
                ("title", "Standup"),
                ("start", "2025-10-08T14:30"),
                ("end", "2025-10-08T14:00"),
            ])
            .to_request();
        let res = test::call_service(&app, req).await;
        assert_eq!(res.status(), StatusCode::BAD_REQUEST);

        let req = test::TestRequest::post()
            .uri("/web/events/create/")
            .cookie(cookie.clone())
            .set_form([
                ("title", "Standup"),
                ("start", "2025-10-08T14:30"),
                ("end", "2025-10-08T15:00"),
            ])
            .to_request();
        let res = test::call_service(&app, req).await;
        assert_eq!(res.status(), StatusCode::FOUND);
        assert_eq!(location(&res), "/web/events/");

        let events = ctx
            .repos
            .events
            .find_by_user(&EventQuery::for_user(user.id))
            .await
            .unwrap();
        assert_eq!(events.len(), 1);
        let reminders = ctx.repos.reminders.find_by_event(&events[0].id).await.unwrap();
        assert_eq!(reminders.len(), 1);
        assert_eq!(reminders[0].minutes_before, 15);

        let req = test::TestRequest::get()
            .uri(&format!("/web/events/{}/", events[0].id))
            .cookie(cookie)
            .to_request();
        let body = test::call_and_read_body(&app, req).await;
        let body = String::from_utf8(body.to_vec()).unwrap();
        assert!(body.contains("Standup"));
        assert!(body.contains("15 minutes before"));
    }

    #[actix_web::test]
    async fn htmx_ui_returns_partials() {
        let TestContext { ctx, user, .. } = setup().await;
        let app = app!(ctx);
        let cookie = Cookie::new(AUTH_COOKIE_NAME, user.api_token.clone());

        let req = test::TestRequest::post()
            .uri("/ui/events/create/")
            .cookie(cookie.clone())
            .set_form([("title", ""), ("start", "x"), ("end", "y")])
            .to_request();
        let res = test::call_service(&app, req).await;
        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
        assert_eq!(test::read_body(res).await, "Invalid form");

        let req = test::TestRequest::post()
            .uri("/ui/events/create/")
            .cookie(cookie.clone())
            .set_form([
                ("title", "Lunch"),
                ("start", "2025-10-08T12:00"),
                ("end", "2025-10-08T13:00"),
            ])
            .to_request();
        let body = test::call_and_read_body(&app, req).await;
        let row = String::from_utf8(body.to_vec()).unwrap();
        assert!(row.starts_with("<tr id=\"event-"));
        assert!(row.contains("Lunch"));

        let events = ctx
            .repos
            .events
            .find_by_user(&EventQuery::for_user(user.id))
            .await
            .unwrap();
        let event_id = events[0].id;

        let req = test::TestRequest::get()
            .uri(&format!("/ui/events/{}/row/", event_id))
            .cookie(cookie.clone())
            .to_request();
        let res = test::call_service(&app, req).await;
        assert_eq!(res.status(), StatusCode::OK);

        let req = test::TestRequest::post()
            .uri(&format!("/ui/events/{}/delete/", event_id))
            .cookie(cookie.clone())
            .to_request();
        let res = test::call_service(&app, req).await;
        assert_eq!(res.status(), StatusCode::NO_CONTENT);
        assert!(ctx.repos.events.find(&event_id).await.is_none());

        let req = test::TestRequest::get()
            .uri(&format!("/ui/events/{}/row/", event_id))
            .cookie(cookie)
            .to_request();
        let res = test::call_service(&app, req).await;
        assert_eq!(res.status(), StatusCode::NOT_FOUND);
    }
}
