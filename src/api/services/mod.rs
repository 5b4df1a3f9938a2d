pub mod frontend;
pub mod links;
pub mod redirect;

pub use frontend::{FrontendService, frontend_routes};
pub use links::{LinkService, api_routes};
pub use redirect::{RedirectService, redirect_routes};
