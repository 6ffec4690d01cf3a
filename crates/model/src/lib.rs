//! driftview data model
//!
//! Plain values shared by the drift engine and its hosts:
//! - **Geometry:** sizes, pan vectors, and edge insets
//! - **Fit modes:** how an image's natural size maps onto a viewport
//! - **Traits:** the resolved numbers for one drift cycle
//! - **Plans:** per-channel animation descriptions handed to a renderer
//!
//! Nothing here performs I/O or holds mutable shared state.

pub mod fit;
pub mod geometry;
pub mod plan;
pub mod traits;

pub use fit::*;
pub use geometry::*;
pub use plan::*;
pub use traits::*;
