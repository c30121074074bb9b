//! HTTP surface for Hokusai.
//!
//! Exposes the comic studio over a small axum router:
//!
//! | Route | Purpose |
//! |-------|---------|
//! | `GET /` | Plain-text banner |
//! | `GET /status` | Liveness probe |
//! | `POST /generate` | Create a comic from `{ prompt, style?, quality? }` |
//! | `GET /artifacts/{filename}` | Fetch a composed page |
//!
//! # Example
//!
//! ```rust,no_run
//! use hokusai_pipeline::ComicStudio;
//! use hokusai_server::{AppState, bind, create_router, serve};
//! use std::sync::Arc;
//!
//! # async fn example(studio: ComicStudio) -> Result<(), Box<dyn std::error::Error>> {
//! let router = create_router(AppState::new(Arc::new(studio)));
//! let listener = bind("127.0.0.1:5002").await?;
//! serve(listener, router).await?;
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod api;
mod response;
mod server;

pub use api::{AppState, BANNER, create_router};
pub use response::ApiError;
pub use server::{bind, serve};
