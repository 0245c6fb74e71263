pub mod correction_profile_results;
pub mod error;
mod extract;
pub mod filters;
pub mod root;
pub mod users;

pub use error::AppError;
