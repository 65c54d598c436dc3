mod get_me;
mod signup;

use actix_web::web;
use get_me::get_me_controller;
pub use signup::SignupUseCase;
use signup::signup_controller;

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/auth/signup", web::post().to(signup_controller));
    cfg.route("/auth/me", web::get().to(get_me_controller));
}
