use std::sync::Arc;

use actix_web::http::StatusCode;
use actix_web::{HttpResponse, Responder, web};
use tracing::{debug, error, trace, warn};

use crate::storage::FileStore;
use crate::utils::is_valid_short_code;

pub struct RedirectService;

impl RedirectService {
    pub async fn handle_redirect(
        path: web::Path<String>,
        store: web::Data<Arc<FileStore>>,
    ) -> impl Responder {
        let code = path.into_inner();

        // 非法短码直接 404，不查表
        if !is_valid_short_code(&code) {
            trace!("Invalid short code rejected: {}", code);
            return Self::not_found_response();
        }

        // 读锁可能等待正在落盘的写者，放到阻塞线程池
        let store = store.get_ref().clone();
        let lookup = {
            let store = store.clone();
            let code = code.clone();
            web::block(move || store.get(&code)).await
        };
        let link = match lookup {
            Ok(Some(link)) => link,
            Ok(None) => {
                debug!("Redirect link not found: {}", code);
                return Self::not_found_response();
            }
            Err(e) => {
                error!("lookup task failed for {}: {}", code, e);
                return HttpResponse::InternalServerError().finish();
            }
        };

        Self::update_click(code, store).await;

        HttpResponse::build(StatusCode::FOUND)
            .insert_header(("Location", link.url))
            .finish()
    }

    /// Click counting is best-effort; a failure never breaks the redirect.
    async fn update_click(code: String, store: Arc<FileStore>) {
        let result = web::block(move || {
            let outcome = store.increment_clicks(&code);
            (code, outcome)
        })
        .await;

        match result {
            Ok((_, Ok(()))) => {}
            Ok((code, Err(e))) => warn!("increment error for {}: {}", code, e),
            Err(e) => warn!("click update task failed: {}", e),
        }
    }

    #[inline]
    fn not_found_response() -> HttpResponse {
        HttpResponse::build(StatusCode::NOT_FOUND)
            .insert_header(("Content-Type", "text/plain; charset=utf-8"))
            .body("Not Found")
    }
}

pub fn redirect_routes() -> actix_web::Resource {
    web::resource("/{code}")
        .route(web::get().to(RedirectService::handle_redirect))
        .route(web::head().to(RedirectService::handle_redirect))
}
