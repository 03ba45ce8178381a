use std::fmt;
use std::path::{Path, PathBuf};

use glium::glutin::surface::WindowSurface;
use glium::index::PrimitiveType;
use glium::{Display, IndexBuffer, VertexBuffer};
use gltf::buffer::Data;
use itertools::Itertools;
use log::{debug, info, warn};

use crate::models::ModelVertex;
use crate::texture::{Texture2D, TextureLoadError};

#[derive(Debug)]
pub struct Primitive {
    pub vertex_buffer: VertexBuffer<ModelVertex>,
    pub index_buffer: IndexBuffer<u32>,
    /// Base colour texture, if the material has one
    pub diffuse: Option<Texture2D>,
}

#[derive(Debug)]
pub struct Mesh {
    pub name: Option<String>,
    pub primitives: Vec<Primitive>,
}

#[derive(Debug)]
pub enum ModelLoadError {
    ModelDoesNotExist(PathBuf),
    CreateBufferError(PathBuf),
    NoPositions(PathBuf),
    NoIndices(PathBuf),
    TextureError(PathBuf, TextureLoadError),
}

impl std::error::Error for ModelLoadError {}

impl fmt::Display for ModelLoadError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::ModelDoesNotExist(path) => {
                write!(f, "The model {:?} does not exist or is not valid glTF", path)
            }
            Self::CreateBufferError(path) => {
                write!(f, "Could not create buffers for the model {:?}", path)
            }
            Self::NoPositions(path) => {
                write!(
                    f,
                    "Could not extract primitive vertex positions for the model {:?}",
                    path
                )
            }
            Self::NoIndices(path) => {
                write!(
                    f,
                    "Could not extract primitive indices for the model {:?}",
                    path
                )
            }
            Self::TextureError(path, error) => {
                write!(f, "Could not load a texture of the model {:?}: {}", path, error)
            }
        }
    }
}

#[derive(Debug)]
pub struct Model {
    pub path: PathBuf,
    pub meshes: Vec<Mesh>,
}

impl Model {
    pub fn load(path: &Path, display: &Display<WindowSurface>) -> Result<Self, ModelLoadError> {
        info!("Loading model {:?}...", path);

        let (document, file_buffers, images) = gltf::import(path)
            .map_err(|_| ModelLoadError::ModelDoesNotExist(path.to_path_buf()))?;

        let meshes = document
            .meshes()
            .enumerate()
            .map(|(mesh_index, mesh)| {
                let primitives = mesh
                    .primitives()
                    .enumerate()
                    .map(|(primitive_index, primitive)| {
                        debug!("Loading mesh {} primitive {}", mesh_index, primitive_index);

                        Primitive::from_gltf_primitive(primitive, &file_buffers, &images, display, path)
                    })
                    .collect::<Result<Vec<Primitive>, ModelLoadError>>()?;

                Ok(Mesh {
                    name: mesh.name().map(str::to_owned),
                    primitives,
                })
            })
            .collect::<Result<Vec<Mesh>, ModelLoadError>>()?;

        info!(
            "Loaded model {:?} with {} meshes",
            path,
            meshes.len()
        );

        for mesh in &meshes {
            debug!(
                "Mesh {} has {} primitives",
                mesh.name.as_deref().unwrap_or("<unnamed>"),
                mesh.primitives.len()
            );
        }

        Ok(Self {
            path: path.to_path_buf(),
            meshes,
        })
    }

    pub fn primitives(&self) -> impl Iterator<Item = &Primitive> {
        self.meshes.iter().flat_map(|mesh| mesh.primitives.iter())
    }
}

impl Primitive {
    fn from_gltf_primitive(
        primitive: gltf::Primitive,
        file_buffers: &[Data],
        images: &[gltf::image::Data],
        display: &Display<WindowSurface>,
        path: &Path,
    ) -> Result<Self, ModelLoadError> {
        let reader = primitive.reader(|buffer| Some(&file_buffers[buffer.index()].0));

        let positions = reader
            .read_positions()
            .ok_or_else(|| ModelLoadError::NoPositions(path.to_path_buf()))?;

        let indices = reader
            .read_indices()
            .ok_or_else(|| ModelLoadError::NoIndices(path.to_path_buf()))?
            .into_u32()
            .collect_vec();

        let mut vertices = positions
            .map(|position| ModelVertex {
                position,
                ..ModelVertex::default()
            })
            .collect_vec();

        match reader.read_normals() {
            Some(normals) => {
                for (vertex, normal) in vertices.iter_mut().zip(normals) {
                    vertex.normal = normal;
                }
            }
            None => warn!("Primitive of {:?} has no normals", path),
        }

        // Primitives can have multiple "sets" of texture coordinates, 0 is the one used for diffuse maps
        if let Some(tex_coords) = reader.read_tex_coords(0) {
            for (vertex, tex_coord) in vertices.iter_mut().zip(tex_coords.into_f32()) {
                vertex.tex_coord = tex_coord;
            }
        }

        let vertex_buffer = VertexBuffer::new(display, &vertices)
            .map_err(|_| ModelLoadError::CreateBufferError(path.to_path_buf()))?;

        let index_buffer = IndexBuffer::new(display, PrimitiveType::TrianglesList, &indices)
            .map_err(|_| ModelLoadError::CreateBufferError(path.to_path_buf()))?;

        let diffuse = match base_color_image(&primitive, images) {
            Some(image) => Texture2D::from_gltf_image(image, display)
                .map_err(|error| ModelLoadError::TextureError(path.to_path_buf(), error))?,
            None => None,
        };

        Ok(Primitive {
            vertex_buffer,
            index_buffer,
            diffuse,
        })
    }
}

fn base_color_image<'a>(
    primitive: &gltf::Primitive,
    images: &'a [gltf::image::Data],
) -> Option<&'a gltf::image::Data> {
    let info = primitive
        .material()
        .pbr_metallic_roughness()
        .base_color_texture()?;

    images.get(info.texture().source().index())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn load_error_names_the_model() {
        let error = ModelLoadError::NoIndices(PathBuf::from("assets/models/box.gltf"));

        assert!(error.to_string().contains("box.gltf"));
    }
}
