use super::form::{render_htmx_event_form, EventForm};
use super::html;
use super::LOGIN_URL;
use crate::error::AgendaError;
use crate::event::{CreateEventUseCase, DeleteEventUseCase, GetEventUseCase, GetEventsUseCase};
use crate::shared::{auth::protect_web_route, usecase::execute};
use actix_web::{http::header, web, HttpRequest, HttpResponse};
use agenda_api_structs::get_event::PathParams;
use agenda_infra::AgendaContext;

fn row_response(row: String) -> HttpResponse {
    HttpResponse::Ok()
        .insert_header((header::CONTENT_TYPE, "text/html; charset=utf-8"))
        .body(row)
}

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
    let rows: String = events.iter().map(|e| html::event_htmx_row(e, tz)).collect();
    let body = format!(
        r#"{form}
<table class="table" id="events">
<thead><tr><th>Title</th><th>When</th><th>Location</th><th></th></tr></thead>
<tbody>{rows}</tbody>
</table>"#,
        form = render_htmx_event_form(),
        rows = rows
    );

    Ok(html::ok_page("Quick events", &body))
}

/// Responds with the table row of the created event only
pub async fn event_create(
    http_req: HttpRequest,
    form: web::Form<EventForm>,
    ctx: web::Data<AgendaContext>,
) -> Result<HttpResponse, AgendaError> {
    let user = match protect_web_route(&http_req, &ctx).await {
        Some(user) => user,
        None => return Ok(html::redirect(LOGIN_URL)),
    };

    let invalid_form = || HttpResponse::BadRequest().body("Invalid form");
    let valid = match form.validate(&ctx.config.time_zone) {
        Ok(valid) => valid,
        Err(_) => return Ok(invalid_form()),
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

    match execute(usecase, &ctx).await.map_err(AgendaError::from) {
        Ok((event, _)) => Ok(row_response(html::event_htmx_row(
            &event,
            &ctx.config.time_zone,
        ))),
        Err(AgendaError::InternalError) => Err(AgendaError::InternalError),
        Err(_) => Ok(invalid_form()),
    }
}

pub async fn event_row(
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
    let (event, _) = execute(usecase, &ctx).await?;

    Ok(row_response(html::event_htmx_row(
        &event,
        &ctx.config.time_zone,
    )))
}

/// No content lets htmx drop the row
pub async fn event_delete(
    http_req: HttpRequest,
    path_params: web::Path<PathParams>,
    ctx: web::Data<AgendaContext>,
) -> Result<HttpResponse, AgendaError> {
    let user = match protect_web_route(&http_req, &ctx).await {
        Some(user) => user,
        None => return Ok(html::redirect(LOGIN_URL)),
    };

    let usecase = DeleteEventUseCase {
        user,
        event_id: path_params.event_id,
    };
    execute(usecase, &ctx).await?;

    Ok(HttpResponse::NoContent().finish())
}
