use super::GetEventUseCase;
use crate::error::AgendaError;
use crate::shared::{auth::protect_route, usecase::execute};
use actix_web::{http::header, web, HttpRequest, HttpResponse};
use agenda_api_structs::export_event_ics::*;
use agenda_domain::ics;
use agenda_infra::AgendaContext;

pub async fn export_event_ics_controller(
    http_req: HttpRequest,
    path_params: web::Path<PathParams>,
    ctx: web::Data<AgendaContext>,
) -> Result<HttpResponse, AgendaError> {
    let user = protect_route(&http_req, &ctx).await?;

    let usecase = GetEventUseCase {
        user,
        event_id: path_params.event_id,
    };
    let (event, _) = execute(usecase, &ctx).await.map_err(AgendaError::from)?;

    let body = ics::event_to_ics(&event, &ctx.config.time_zone, ctx.sys.now());
    Ok(HttpResponse::Ok()
        .insert_header((header::CONTENT_TYPE, "text/calendar; charset=utf-8"))
        .insert_header((
            header::CONTENT_DISPOSITION,
            format!("attachment; filename=\"{}\"", ics::filename(&event)),
        ))
        .body(body))
}
