//! Shared test fixtures for parkforge crates.
//!
//! - [`site`] - rectangular, triangular and trapezoidal zones
//! - [`catalog`] - small stall catalogs with hand-checkable widths
//! - [`kernel`] - geometry providers, including ones that fail on purpose
//!
//! # Usage
//!
//! Add as a dev-dependency in your crate's `Cargo.toml`:
//!
//! ```toml
//! [dev-dependencies]
//! parkforge-test = { workspace = true }
//! ```
//!
//! Then import the fixtures you need:
//!
//! ```
//! use parkforge_test::{right_angle_catalog, site_40x25};
//!
//! let zone = site_40x25();
//! assert_eq!(zone.max_offset_length(0).unwrap(), 25.0);
//! assert_eq!(right_angle_catalog().len(), 1);
//! ```

pub mod catalog;
pub mod kernel;
pub mod site;

pub use catalog::{double_first_catalog, right_angle_catalog, standard_catalog};
pub use kernel::{NoOffsetKernel, DEPTH_25, ROAD_WIDTH};
pub use site::{
    rectangle_zone, site_40x25, skewed_triangle_zone, trapezoid_zone, triangle_zone,
};
