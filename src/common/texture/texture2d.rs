use std::fmt;
use std::path::Path;

use glium::glutin::surface::WindowSurface;
use glium::texture::{RawImage2d, Texture2d, TextureCreationError};
use glium::uniforms::{
    MagnifySamplerFilter, MinifySamplerFilter, SamplerBehavior, SamplerWrapFunction,
};
use glium::Display;
use gltf::image::Format;
use log::{info, warn};

use crate::import;
use crate::import::image::ImageLoadError;

#[derive(Debug)]
pub enum TextureLoadError {
    ImageLoad(ImageLoadError),
    CreateTextureError(TextureCreationError),
}

impl fmt::Display for TextureLoadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ImageLoad(error) => write!(f, "{}", error),
            Self::CreateTextureError(error) => {
                write!(f, "Could not upload the texture to the GPU: {}", error)
            }
        }
    }
}

impl std::error::Error for TextureLoadError {}

impl From<ImageLoadError> for TextureLoadError {
    fn from(error: ImageLoadError) -> Self {
        Self::ImageLoad(error)
    }
}

#[derive(Debug)]
pub struct Texture2D {
    pub inner_texture: Texture2d,
}

impl Texture2D {
    /// Loads an image from disk with mipmaps. Rows are flipped so the first row is the bottom of the image.
    pub fn load(path: &Path, display: &Display<WindowSurface>) -> Result<Self, TextureLoadError> {
        let rgba8 = import::image::load_dynamic_image(path)?.into_rgba8();
        let dimensions = rgba8.dimensions();

        let raw_image = RawImage2d::from_raw_rgba_reversed(&rgba8.into_raw(), dimensions);
        let inner_texture =
            Texture2d::new(display, raw_image).map_err(TextureLoadError::CreateTextureError)?;

        info!(
            "Loaded texture {:?} ({}x{})",
            path, dimensions.0, dimensions.1
        );

        Ok(Self { inner_texture })
    }

    /// Falls back to plain white when the image cannot be loaded so the scene still renders
    pub fn load_or_white(
        path: &Path,
        display: &Display<WindowSurface>,
    ) -> Result<Self, TextureLoadError> {
        match Self::load(path, display) {
            Ok(texture) => Ok(texture),
            Err(TextureLoadError::ImageLoad(error)) => {
                warn!("{}, using a white texture instead", error);
                Self::white(display)
            }
            Err(error) => Err(error),
        }
    }

    pub fn white(display: &Display<WindowSurface>) -> Result<Self, TextureLoadError> {
        Self::solid([u8::MAX; 4], display)
    }

    pub fn solid(rgba: [u8; 4], display: &Display<WindowSurface>) -> Result<Self, TextureLoadError> {
        let raw_image = RawImage2d::from_raw_rgba(rgba.to_vec(), (1, 1));
        let inner_texture =
            Texture2d::new(display, raw_image).map_err(TextureLoadError::CreateTextureError)?;

        Ok(Self { inner_texture })
    }

    /// Uploads an image embedded in or referenced by a glTF file. Returns `None` for pixel formats
    /// without an 8 bit per channel representation.
    pub fn from_gltf_image(
        image: &gltf::image::Data,
        display: &Display<WindowSurface>,
    ) -> Result<Option<Self>, TextureLoadError> {
        let Some(pixels) = rgba8_from_gltf_pixels(&image.pixels, image.format) else {
            warn!("Skipping glTF image with unsupported format {:?}", image.format);
            return Ok(None);
        };

        // glTF texture coordinates start at the top left so the rows are kept in file order
        let raw_image = RawImage2d::from_raw_rgba(pixels, (image.width, image.height));
        let inner_texture =
            Texture2d::new(display, raw_image).map_err(TextureLoadError::CreateTextureError)?;

        Ok(Some(Self { inner_texture }))
    }
}

pub fn repeating_sampler() -> SamplerBehavior {
    SamplerBehavior {
        wrap_function: (
            SamplerWrapFunction::Repeat,
            SamplerWrapFunction::Repeat,
            SamplerWrapFunction::Repeat,
        ),
        minify_filter: MinifySamplerFilter::LinearMipmapLinear,
        magnify_filter: MagnifySamplerFilter::Linear,
        ..SamplerBehavior::default()
    }
}

fn rgba8_from_gltf_pixels(pixels: &[u8], format: Format) -> Option<Vec<u8>> {
    match format {
        Format::R8G8B8A8 => Some(pixels.to_vec()),
        Format::R8G8B8 => Some(
            pixels
                .chunks_exact(3)
                .flat_map(|rgb| [rgb[0], rgb[1], rgb[2], u8::MAX])
                .collect(),
        ),
        Format::R8G8 => Some(
            pixels
                .chunks_exact(2)
                .flat_map(|rg| [rg[0], rg[1], 0, u8::MAX])
                .collect(),
        ),
        Format::R8 => Some(
            pixels
                .iter()
                .flat_map(|&grey| [grey, grey, grey, u8::MAX])
                .collect(),
        ),
        _ => None,
    }
}
