//! WebGPU rendering module
//!
//! `frame` builds a triangle list in surface pixels from a session snapshot;
//! `pipeline` owns the GPU side and draws whatever list it is handed.

pub mod frame;
pub mod pipeline;
pub mod shapes;
pub mod sprite;
pub mod vertex;

pub use frame::{FrameStyle, build_frame};
pub use pipeline::{RenderError, RenderState, pixel_to_ndc};
pub use vertex::Vertex;
