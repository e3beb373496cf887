//! Detection records and the vision source boundary.
//!
//! The detector itself is an external collaborator; this module only defines
//! the records it delivers and the trait the pipeline polls them through.
//! Records are ephemeral: produced per frame, consumed immediately, never
//! retained.

mod result;
mod source;

pub use result::{confidence_percent, BoxCoords, Detection, PERSON_LABEL};
pub use source::{DetectionSource, StubSource};
