mod error;
mod event;
mod job_schedulers;
mod notification;
mod pages;
mod reminder;
mod shared;
mod status;
mod user;

use actix_cors::Cors;
use actix_web::{dev::Server, middleware, web, App, HttpServer};
use agenda_infra::AgendaContext;
use job_schedulers::start_send_reminders_job;
use std::net::TcpListener;
use tracing::info;
use tracing_actix_web::TracingLogger;

pub use reminder::SendDueRemindersUseCase;
pub use shared::usecase::{execute, UseCase};

pub fn configure_server_api(cfg: &mut web::ServiceConfig) {
    event::configure_routes(cfg);
    notification::configure_routes(cfg);
    reminder::configure_routes(cfg);
    user::configure_routes(cfg);
}

/// Routes outside of the json api
pub fn configure_server_pages(cfg: &mut web::ServiceConfig) {
    status::configure_routes(cfg);
    pages::configure_routes(cfg);
}

fn cors(allowed_origins: &[String]) -> Cors {
    if allowed_origins.iter().any(|origin| origin == "*") {
        return Cors::permissive();
    }
    allowed_origins.iter().fold(
        Cors::default()
            .allow_any_method()
            .allow_any_header()
            .max_age(3600),
        |cors, origin| cors.allowed_origin(origin),
    )
}

pub struct Application {
    server: Server,
    port: u16,
}

impl Application {
    pub async fn new(context: AgendaContext) -> Result<Self, std::io::Error> {
        let (server, port) = Application::configure_server(context.clone()).await?;
        Application::start_job_schedulers(context);

        Ok(Self { server, port })
    }

    pub fn port(&self) -> u16 {
        self.port
    }

    fn start_job_schedulers(context: AgendaContext) {
        start_send_reminders_job(context);
    }

    async fn configure_server(context: AgendaContext) -> Result<(Server, u16), std::io::Error> {
        let port = context.config.port;
        let address = format!("0.0.0.0:{}", port);
        let listener = TcpListener::bind(&address)?;
        let port = listener.local_addr()?.port();
        info!("Listening on port {}", port);

        let server = HttpServer::new(move || {
            let ctx = context.clone();
            let allowed_origins = ctx.config.cors_allowed_origins.clone();

            App::new()
                .wrap(cors(&allowed_origins))
                .wrap(middleware::Compress::default())
                .wrap(TracingLogger::default())
                .app_data(web::Data::new(ctx))
                .service(web::scope("/api").configure(configure_server_api))
                .configure(configure_server_pages)
        })
        .listen(listener)?
        .workers(4)
        .run();

        Ok((server, port))
    }

    pub async fn start(self) -> Result<(), std::io::Error> {
        self.server.await
    }
}
