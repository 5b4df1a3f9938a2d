use actix_web::{HttpResponse, Responder, web};
use tracing::trace;

const INDEX_HTML: &str = include_str!(concat!(env!("CARGO_MANIFEST_DIR"), "/web/index.html"));

pub struct FrontendService;

impl FrontendService {
    /// 首页：内嵌的短链接表单
    pub async fn handle_index() -> impl Responder {
        trace!("Serving index page");
        HttpResponse::Ok()
            .content_type("text/html; charset=utf-8")
            .body(INDEX_HTML.replace("%SHORTY_VERSION%", env!("CARGO_PKG_VERSION")))
    }
}

pub fn frontend_routes() -> actix_web::Resource {
    web::resource("/").route(web::get().to(FrontendService::handle_index))
}
