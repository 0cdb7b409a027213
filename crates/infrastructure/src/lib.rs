pub mod dynamodb;
pub mod file_repository;
pub mod models;
pub mod retry;
pub mod s3;
pub mod sdk_error;
pub mod store;

pub use dynamodb::*;
pub use file_repository::*;
pub use models::*;
pub use retry::*;
pub use s3::*;
pub use sdk_error::*;
pub use store::*;
