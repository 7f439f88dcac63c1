use actix_web::web;

use crate::controllers::{content_controller, user_controller};

pub fn routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/api/register", web::post().to(user_controller::register))
        .route("/api/login", web::post().to(user_controller::login))
        .route("/api/logout", web::post().to(user_controller::logout))
        .route("/api/user", web::get().to(user_controller::current_user))
        .route(
            "/api/verify-phone",
            web::post().to(user_controller::verify_phone),
        )
        .route(
            "/api/resend-otp",
            web::post().to(user_controller::resend_otp),
        )
        .route(
            "/api/blog",
            web::get().to(content_controller::list_blog_posts),
        )
        .route(
            "/api/blog",
            web::post().to(content_controller::create_blog_post),
        )
        .route(
            "/api/blog/{id}",
            web::get().to(content_controller::get_blog_post),
        )
        .route(
            "/api/resources",
            web::get().to(content_controller::list_resources),
        )
        .route(
            "/api/resources",
            web::post().to(content_controller::create_resource),
        )
        .route(
            "/api/resources/{id}",
            web::get().to(content_controller::get_resource),
        );
}
