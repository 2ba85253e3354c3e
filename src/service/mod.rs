//! Repositories over the database gateway.

mod repository;
mod validation;
pub use repository::Repository;
pub use validation::RequestValidator;
