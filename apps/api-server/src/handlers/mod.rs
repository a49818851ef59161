//! HTTP handlers and route configuration.

mod auth;
mod comments;
mod health;
mod posts;

#[cfg(test)]
pub(crate) mod testing;

use actix_web::web;

/// Configure all application routes. Everything is served at the root, with
/// no global path prefix.
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg
        // Public routes
        .route("/health", web::get().to(health::health_check))
        // Auth routes
        .service(
            web::scope("/auth")
                .route("/register", web::post().to(auth::register))
                .route("/login", web::post().to(auth::login))
                .route("/me", web::get().to(auth::me)),
        )
        // Post routes. The literal "/id/{id}" segment is registered before
        // the "/{slug}" catch-all so id lookups are not shadowed.
        .service(
            web::scope("/posts")
                .route("", web::post().to(posts::create))
                .route("", web::get().to(posts::list))
                .route("/id/{id}", web::get().to(posts::get_by_id))
                .route("/{post_id}/comments", web::get().to(comments::list_for_post))
                .route("/{slug}", web::get().to(posts::get_by_slug))
                .route("/{id}", web::patch().to(posts::update))
                .route("/{id}", web::delete().to(posts::remove)),
        )
        // Comment routes: guest and authenticated creation are split
        // across two endpoints; the guest one never reads an identity.
        .route("/comments", web::post().to(comments::create_guest))
        .route("/comments/auth", web::post().to(comments::create_authenticated))
        .route(
            "/comments/{id}/status",
            web::patch().to(comments::update_status),
        )
        // Admin moderation queue
        .route("/admin/comments", web::get().to(comments::admin_list));
}
