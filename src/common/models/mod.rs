pub use model::{Mesh, Model, ModelLoadError, Primitive};
pub use model_vertex::ModelVertex;

mod model;
pub mod model_vertex;
pub mod primitives;
