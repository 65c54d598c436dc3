use super::form::{render_event_form, EventForm};
use super::html;
use super::LOGIN_URL;
use crate::error::AgendaError;
use crate::event::{CreateEventUseCase, GetEventUseCase, GetEventsUseCase};
use crate::shared::{auth::protect_web_route, usecase::execute};
use actix_web::{web, HttpRequest, HttpResponse, ResponseError};
use agenda_api_structs::get_event::PathParams;
use agenda_infra::AgendaContext;

pub async fn event_list_page(
    http_req: HttpRequest,
    ctx: web::Data<AgendaContext>,
) -> Result<HttpResponse, AgendaError> {
    let user = match protect_web_route(&http_req, &ctx).await {
        Some(user) => user,
        None => return Ok(html::redirect(LOGIN_URL)),
    };

    let (events, _) = execute(GetEventsUseCase::new(user), &ctx).await?;
    let tz = &ctx.config.time_zone;
    let rows = if events.is_empty() {
        r#"<tr><td colspan="3">No events yet.</td></tr>"#.to_string()
    } else {
        events.iter().map(|e| html::event_list_row(e, tz)).collect()
    };
    let body = format!(
        r#"<p><a class="btn btn-primary" href="/web/events/create/">New event</a></p>
<table class="table">
<thead><tr><th>Title</th><th>When</th><th>Location</th></tr></thead>
<tbody>{rows}</tbody>
</table>"#,
        rows = rows
    );

    Ok(html::ok_page("Events", &body))
}

pub async fn event_create_page(http_req: HttpRequest, ctx: web::Data<AgendaContext>) -> HttpResponse {
    if protect_web_route(&http_req, &ctx).await.is_none() {
        return html::redirect(LOGIN_URL);
    }
    html::ok_page("New event", &render_event_form(&EventForm::default()))
}

fn invalid_form(form: &EventForm, errors: &[String]) -> HttpResponse {
    let body = format!("{}{}", html::errors_list(errors), render_event_form(form));
    html::html_response(&mut HttpResponse::BadRequest(), html::page("New event", &body))
}

pub async fn event_create(
    http_req: HttpRequest,
    form: web::Form<EventForm>,
    ctx: web::Data<AgendaContext>,
) -> HttpResponse {
    let user = match protect_web_route(&http_req, &ctx).await {
        Some(user) => user,
        None => return html::redirect(LOGIN_URL),
    };

    let form = form.into_inner();
    let valid = match form.validate(&ctx.config.time_zone) {
        Ok(valid) => valid,
        Err(errors) => return invalid_form(&form, &errors),
    };
    let usecase = CreateEventUseCase {
        user,
        title: valid.title,
        description: valid.description,
        location: valid.location,
        start: valid.start,
        end: valid.end,
        is_all_day: valid.is_all_day,
        reminders: Vec::new(),
    };

    match execute(usecase, &ctx).await {
        Ok(_) => html::redirect("/web/events/"),
        Err(e) => {
            let e = AgendaError::from(e);
            if e.status_code().is_server_error() {
                return e.error_response();
            }
            invalid_form(&form, &[html::error_message(&e)])
        }
    }
}

pub async fn event_detail_page(
    http_req: HttpRequest,
    path_params: web::Path<PathParams>,
    ctx: web::Data<AgendaContext>,
) -> Result<HttpResponse, AgendaError> {
    let user = match protect_web_route(&http_req, &ctx).await {
        Some(user) => user,
        None => return Ok(html::redirect(LOGIN_URL)),
    };

    let usecase = GetEventUseCase {
        user,
        event_id: path_params.event_id,
    };
    let (event, reminders) = execute(usecase, &ctx).await?;
    let body = html::event_detail(&event, &reminders, &ctx.config.time_zone);

    Ok(html::ok_page(&event.title, &body))
}
