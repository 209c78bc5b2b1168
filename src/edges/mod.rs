//! Edge detection: image gradients and Canny-style thinning.
//!
//! - Gradient computation (Sobel) returning `gx`, `gy`, and magnitude.
//! - Non-maximum suppression with a direction-aligned 4-neighborhood,
//!   followed by two-threshold hysteresis, producing a binary edge mask.
//!
//! Border handling clamps indices (replicate); the outermost 1-pixel frame
//! is ignored by NMS to avoid bounds checks in neighbor lookup.

pub mod canny;
pub mod grad;

pub use canny::{detect_edges, CannyEdges};
pub use grad::{sobel_gradients, Grad};
