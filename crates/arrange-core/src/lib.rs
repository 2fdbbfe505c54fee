//! Arrangement engine for print-ready designs.
//!
//! Places rectangular design items onto fixed-size sheets, honoring margins,
//! inter-item spacing, optional 90 degree rotation, and per-item copy
//! counts, and reports exact millimeter coordinates plus utilization
//! statistics for downstream rendering.

mod arranger;
pub mod preview;
mod types;

pub use arranger::Arranger;
pub use types::*;
