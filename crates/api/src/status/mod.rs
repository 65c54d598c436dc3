use actix_web::{web, HttpResponse};
use agenda_api_structs::get_service_health::*;
use agenda_infra::AgendaContext;

async fn status(ctx: web::Data<AgendaContext>) -> HttpResponse {
    let (db, engine) = ctx.storage_description();
    HttpResponse::Ok().json(APIResponse {
        status: "ok".into(),
        db: db.into(),
        engine: engine.into(),
        name: "agenda".into(),
    })
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/health", web::get().to(status));
}
