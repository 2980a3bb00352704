mod fetch_service;
pub use fetch_service::FetchService;

mod pagination;
pub use pagination::{Page, paginate};

mod validation;
pub use validation::Validate;
