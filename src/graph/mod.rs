pub mod traits;
pub mod directed;
pub mod mask;
pub mod generators;

pub use traits::{Graph, VertexId, VertexSource, Weight};
pub use directed::DirectedGraph;
pub use mask::{EdgeMask, MaskedGraph};
