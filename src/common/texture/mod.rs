pub use texture2d::{Texture2D, TextureLoadError};

pub mod texture2d;
