pub mod handlers;
pub mod server;

pub use server::AuthGrpcService;
