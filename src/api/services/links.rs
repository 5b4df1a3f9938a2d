//! Link API: shorten, list and delete

use std::sync::Arc;

use actix_web::http::StatusCode;
use actix_web::{HttpResponse, Responder, web};
use serde::{Deserialize, Serialize};
use tracing::{error, info, trace, warn};

use crate::errors::ShortyError;
use crate::storage::FileStore;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShortenRequest {
    pub url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub custom: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShortenResponse {
    pub code: String,
    pub url: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub code: String,
    pub error: String,
    pub message: String,
}

/// 从 ShortyError 构建错误响应
pub fn error_response(err: &ShortyError) -> HttpResponse {
    HttpResponse::build(err.http_status()).json(ErrorResponse {
        code: err.code().to_string(),
        error: err.error_type().to_string(),
        message: err.message().to_string(),
    })
}

fn blocking_failed(e: actix_web::error::BlockingError) -> HttpResponse {
    error!("Store task failed: {}", e);
    HttpResponse::build(StatusCode::INTERNAL_SERVER_ERROR).json(ErrorResponse {
        code: "E500".to_string(),
        error: "Internal Server Error".to_string(),
        message: "store task failed".to_string(),
    })
}

pub struct LinkService;

impl LinkService {
    pub async fn shorten(
        store: web::Data<Arc<FileStore>>,
        body: web::Json<ShortenRequest>,
    ) -> impl Responder {
        let ShortenRequest { url, custom } = body.into_inner();
        trace!("Shorten request for {} (custom: {:?})", url, custom);

        let store = store.get_ref().clone();
        let target = url.clone();
        let result = web::block(move || store.create(&target, custom.as_deref())).await;

        match result {
            Ok(Ok(code)) => HttpResponse::Ok().json(ShortenResponse { code, url }),
            Ok(Err(e)) => {
                if matches!(e, ShortyError::Persistence(_)) {
                    warn!("Link created but durability not confirmed: {}", e);
                } else {
                    info!("Shorten rejected: {}", e);
                }
                error_response(&e)
            }
            Err(e) => blocking_failed(e),
        }
    }

    pub async fn list(store: web::Data<Arc<FileStore>>) -> impl Responder {
        let store = store.get_ref().clone();
        let mut links = match web::block(move || store.list()).await {
            Ok(links) => links,
            Err(e) => return blocking_failed(e),
        };
        // Newest first
        links.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        trace!("Listing {} links", links.len());
        HttpResponse::Ok().json(links)
    }

    pub async fn delete(
        path: web::Path<String>,
        store: web::Data<Arc<FileStore>>,
    ) -> impl Responder {
        let code = path.into_inner();
        let store = store.get_ref().clone();
        let result = web::block(move || store.delete(&code)).await;

        match result {
            Ok(Ok(())) => HttpResponse::NoContent().finish(),
            Ok(Err(e)) => error_response(&e),
            Err(e) => blocking_failed(e),
        }
    }

    async fn method_not_allowed() -> HttpResponse {
        HttpResponse::MethodNotAllowed().body("method not allowed")
    }

    async fn not_found() -> HttpResponse {
        HttpResponse::NotFound().body("Not Found")
    }
}

/// 链接 API 路由 `/api`
///
/// - POST /api/shorten - 创建短链接
/// - GET /api/list - 获取所有链接
/// - DELETE /api/{code} - 删除链接
pub fn api_routes() -> actix_web::Scope {
    web::scope("/api")
        .route("/shorten", web::post().to(LinkService::shorten))
        .route("/shorten", web::route().to(LinkService::method_not_allowed))
        .route("/list", web::get().to(LinkService::list))
        .route("/list", web::route().to(LinkService::method_not_allowed))
        .route("/{code}", web::delete().to(LinkService::delete))
        .route("/{code}", web::route().to(LinkService::not_found))
}
