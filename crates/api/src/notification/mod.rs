mod get_notification;
mod get_notifications;

use actix_web::web;
use get_notification::get_notification_controller;
use get_notifications::get_notifications_controller;

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route(
        "/notifications",
        web::get().to(get_notifications_controller),
    );
    cfg.route(
        "/notifications/{notification_id}",
        web::get().to(get_notification_controller),
    );
}
