//! HTTP surface of the answer service.
//!
//! - `GET /` liveness
//! - `POST /api/` (alias `/query/`) question in, `{answer, links}` or
//!   `{error}` out, always with status 200

pub mod context;
pub mod handlers;
pub mod routes;
pub mod server;

pub use context::ServiceContext;
pub use routes::create_router;
pub use server::run_server;
