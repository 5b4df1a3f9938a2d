//! HTTP layer
//!
//! Thin adapters that translate requests into [`crate::storage::FileStore`]
//! calls. Route registration order matters: the `/api` scope and the index
//! page must come before the `/{code}` redirect.

pub mod services;

use actix_web::web;

use services::{api_routes, frontend_routes, redirect_routes};

/// Register every route on an actix `App` or `ServiceConfig`
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(api_routes())
        .service(frontend_routes())
        .service(redirect_routes());
}
