pub mod bearer;
pub mod claims;
pub mod errors;
pub mod handler;

pub use bearer::extract_bearer;
pub use claims::Claims;
pub use claims::Role;
pub use errors::JwtError;
pub use errors::UnknownRoleError;
pub use handler::JwtHandler;
