//! Display transforms and box projection.
//!
//! Everything here is pure geometry: the projector takes the full mapping as
//! explicit input and never reads ambient display state, so it is testable
//! without any rendering surface present.

mod projector;

pub use projector::{project, DisplayTransform, ProjectedBox};
