pub mod api;
pub mod worker;

pub use api::ApiClient;
pub use worker::BackendWorker;
