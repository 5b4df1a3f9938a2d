pub mod file_store;
pub mod models;

pub use file_store::FileStore;
pub use models::Mapping;
