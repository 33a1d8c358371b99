pub mod backup;
pub mod copier;
pub mod errors;
pub mod models;

pub use backup::*;
pub use copier::*;
pub use errors::*;
pub use models::*;
