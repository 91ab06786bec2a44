//! # Worker
//!
//! A stateless HTTP endpoint that runs controller-generated commands.
//!
//! Every request carries a JSON body:
//!
//! ```json
//! {"command": "registry compute lint", "resource": "projects/demo/apis/petstore/versions/v1/specs/openapi"}
//! ```
//!
//! The worker fetches an identity token for the registry ([`TokenSource`]), runs the command
//! with the resource appended as its last argument and the token in `APG_REGISTRY_TOKEN`,
//! logs the combined output, and answers `200 Execution Completed`. Only an undecodable body
//! (400) or a missing token (500) produce anything else.

pub mod auth;
pub mod error;
pub mod exec;
pub mod request;
pub mod server;

pub use auth::{MetadataTokenSource, StaticTokenSource, TokenSource};
pub use error::WorkerError;
pub use exec::{execute, CommandOutcome, TOKEN_ENV};
pub use request::WorkerRequest;
pub use server::{HttpResponse, Worker, WorkerServer, EXECUTION_COMPLETED};
