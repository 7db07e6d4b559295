//! fx-types: Shared data structures for the Foxtrot delivery export.
//!
//! This crate defines the types used across the workspace:
//! - [`DeliveryRow`] - The flat, five-column record written to the CSV
//! - [`RowContext`] - Values known above the delivery level that every row carries
//! - [`api`] - Optional-typed response schemas for the upstream API
//!
//! Every absent or null value is represented by [`BLANK`], never by an
//! empty `Option` in the output.
//!
//! # Example
//!
//! ```rust
//! use fx_types::{derive_product_id, RowContext, BLANK};
//!
//! let ctx = RowContext::new("BO016", "RUTA 7", "CUST-1");
//! let row = ctx.row("DELIVERED", derive_product_id("DEL_PROD123"));
//!
//! assert_eq!(row.product_id, "PROD123");
//! assert_eq!(ctx.blank_row().attempt_status, BLANK);
//! ```

pub mod api;
mod row;

pub use api::{Attempt, Delivery, Route, Waypoint};
pub use row::{derive_product_id, or_blank, DeliveryRow, RowContext, BLANK, COLUMNS};
