//! Load inputs and generated load descriptors

mod descriptor;
mod pressure;
mod slab;

pub use descriptor::{EdgeLoad, EdgeLoadKind, FaceLoads, LoadSegment, NodalForce};
pub use pressure::{LoadOrientation, PressureField};
pub use slab::{SlabFace, SpanType};
