//! Remote collaborators: the hosted catalog/auth service and its record types.

pub mod error;
pub mod models;
pub mod supabase;

pub use error::ApiError;
pub use models::*;
pub use supabase::*;
