pub mod errors;
pub mod file;
pub mod upload;

pub use errors::*;
pub use file::*;
pub use upload::*;
