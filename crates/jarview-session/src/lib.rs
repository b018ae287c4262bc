//! Reactive comparison sessions for jarview.
//!
//! Wires version selections through snapshot fetching, entry aggregation,
//! and change classification as push pipelines over `tokio::sync::watch`
//! channels. Each published value (snapshot, entry table, change set) is an
//! immutable `Arc` handed to subscribers; recomputation replaces the value
//! in its single-slot channel rather than patching shared state.
//!
//! # Key Types
//!
//! - [`DiffSide`] / [`SideStatus`] — One comparison side's pipeline and its load state
//! - [`DiffCoordinator`] — Joins both sides' entry tables into a change set
//! - [`CompareSession`] — Lazily builds the two sides and the coordinator, once each
//! - [`SessionConfig`] — Initial selections and the diff-view flag

pub mod config;
pub mod coordinator;
pub mod session;
pub mod side;

pub use config::SessionConfig;
pub use coordinator::DiffCoordinator;
pub use session::CompareSession;
pub use side::{DiffSide, SideStatus};
