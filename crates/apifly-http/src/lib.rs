//! # Apifly HTTP
//!
//! Request and response types plus the [`Handler`] trait that every route,
//! including the content-negotiating handler, implements.
//!
//! ```rust
//! use apifly_http::{Handler, Request, Response};
//! use async_trait::async_trait;
//!
//! struct Hello;
//!
//! #[async_trait]
//! impl Handler for Hello {
//!     async fn handle(&self, _request: Request) -> apifly_core::Result<Response> {
//!         Ok(Response::ok().with_body("Hello!"))
//!     }
//! }
//! ```

pub mod handler;
pub mod request;
pub mod response;

pub use handler::Handler;
pub use request::{Request, RequestBuilder};
pub use response::Response;

pub use apifly_core::exception::{Error, Result};
