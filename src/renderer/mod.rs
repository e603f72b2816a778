//! WebGPU rendering module
//!
//! Every sprite is flattened to vertex-colored triangles on the CPU and drawn
//! in a single pass.

pub mod pipeline;
pub mod shapes;
pub mod vertex;

pub use pipeline::RenderState;
pub use shapes::scene;
pub use vertex::Vertex;
