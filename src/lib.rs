//! Catalog ingestion engine and shopping-list statistics listener.
//!
//! Two independent subsystems sharing only the [`storage::CatalogStore`]
//! collaborator:
//!
//! - [`import`]: a single-producer/multi-worker bulk loader that streams a
//!   tab-separated catalog file into the store with bounded queuing,
//!   per-record error isolation and first-error-wins shutdown.
//! - [`listener`]: a best-effort change notifier plus a background updater
//!   that recomputes per-shopping-list aggregates off the request path.

pub mod app;
pub mod domain;
pub mod import;
pub mod io;
pub mod listener;
pub mod prelude;
pub mod storage;
