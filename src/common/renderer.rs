use color_eyre::Result;
use glium::draw_parameters::{Stencil, StencilOperation, StencilTest};
use glium::glutin::surface::WindowSurface;
use glium::index::{NoIndices, PrimitiveType};
use glium::texture::Texture2d;
use glium::uniforms::{SamplerBehavior, UniformValue, Uniforms};
use glium::{
    uniform, BackfaceCullingMode, Depth, DepthTest, Display, DrawParameters, Frame, PolygonMode,
    Program, Surface, VertexBuffer,
};
use log::warn;
use nalgebra::{Matrix4, Point3, Vector3};

use crate::camera::Camera;
use crate::colors::{self, ColorExt};
use crate::config::AssetPaths;
use crate::light::Lighting;
use crate::models::{primitives, Model, ModelVertex};
use crate::scene::{self, SceneToggles};
use crate::texture::{texture2d, Texture2D};
use crate::{context, maths};

pub const MATERIAL_SPECULAR: [f32; 3] = [0.5, 0.5, 0.5];
pub const MATERIAL_SHININESS: f32 = 16.0;

const MODEL_STENCIL_VALUE: i32 = 1;

/// What changes between two frames
pub struct FrameScene<'a> {
    pub camera: &'a dyn Camera,
    pub toggles: SceneToggles,
    /// Seconds since start up
    pub time: f32,
    pub model: Option<&'a Model>,
}

/// Uniforms shared by the cube and model programs
struct LitUniforms<'a> {
    model: [[f32; 4]; 4],
    view: [[f32; 4]; 4],
    proj: [[f32; 4]; 4],
    view_position: [f32; 3],
    diffuse: &'a Texture2d,
    sampler: SamplerBehavior,
    lighting: &'a Lighting,
}

impl Uniforms for LitUniforms<'_> {
    fn visit_values<'a, F: FnMut(&str, UniformValue<'a>)>(&'a self, mut output: F) {
        output("model", UniformValue::Mat4(self.model));
        output("view", UniformValue::Mat4(self.view));
        output("proj", UniformValue::Mat4(self.proj));
        output("view_position", UniformValue::Vec3(self.view_position));
        output(
            "material.diffuse",
            UniformValue::Texture2d(self.diffuse, Some(self.sampler)),
        );
        output("material.specular", UniformValue::Vec3(MATERIAL_SPECULAR));
        output("material.shininess", UniformValue::Float(MATERIAL_SHININESS));

        self.lighting.visit_values(output);
    }
}

pub struct Renderer {
    window_size: (f32, f32),

    lamp_program: Program,
    lit_program: Program,
    model_program: Program,
    outline_program: Program,

    cube_vertex_buffer: VertexBuffer<ModelVertex>,
    container_texture: Texture2D,
    white_texture: Texture2D,
}

impl Renderer {
    pub fn new(
        assets: &AssetPaths,
        window_width: f32,
        window_height: f32,
        display: &Display<WindowSurface>,
    ) -> Result<Self> {
        let lamp_program = context::new_program(&assets.shaders, "lamp", display)?;
        let lit_program = context::new_program(&assets.shaders, "lit", display)?;
        let model_program = context::new_program(&assets.shaders, "model", display)?;
        let outline_program = context::new_program(&assets.shaders, "outline", display)?;

        // Shared by the lamp and the textured cubes
        let cube_vertex_buffer = VertexBuffer::new(display, &primitives::cube())?;

        let container_texture = Texture2D::load_or_white(&assets.container_texture, display)?;
        let white_texture = Texture2D::white(display)?;

        Ok(Self {
            window_size: (window_width, window_height),
            lamp_program,
            lit_program,
            model_program,
            outline_program,
            cube_vertex_buffer,
            container_texture,
            white_texture,
        })
    }

    pub fn update_window_size(&mut self, window_width: f32, window_height: f32) {
        self.window_size = (window_width, window_height);
    }

    /// The field of view follows the camera zoom so the projection is rebuilt every frame
    pub fn perspective_projection(&self, fov_degrees: f32) -> Matrix4<f32> {
        maths::perspective_matrix_from_window_size(fov_degrees, self.window_size.0, self.window_size.1)
    }

    pub fn render(&self, scene: &FrameScene, target: &mut Frame) -> Result<()> {
        let lamp_color = scene::lamp_color(scene.time);
        let lamp_position =
            scene::point_light_position(scene::POINT_LIGHT_POSITION, scene.time, scene.toggles.moving_light);

        let (red, green, blue, alpha) = scene::clear_color(lamp_color);
        target.clear_all((red, green, blue, alpha), 1.0, 0);

        let view = maths::raw_matrix(scene.camera.view());
        let proj = maths::raw_matrix(self.perspective_projection(scene.camera.zoom()));

        let lighting = Lighting::new(
            lamp_color,
            lamp_position,
            scene.camera.position(),
            scene.camera.direction(),
            scene.toggles.flashlight,
        );

        self.render_lamp(lamp_color, lamp_position, view, proj, scene.toggles, target)?;
        self.render_cubes(scene, &lighting, view, proj, target)?;

        if let Some(model) = scene.model {
            let model_lighting = lighting.with_sun_direction(scene::MODEL_SUN_DIRECTION);
            self.render_model(model, scene, &model_lighting, view, proj, target)?;

            if scene.toggles.outline {
                self.render_outline(model, scene.toggles, view, proj, target)?;
            }
        }

        Ok(())
    }

    fn render_lamp(
        &self,
        lamp_color: Vector3<f32>,
        lamp_position: Point3<f32>,
        view: [[f32; 4]; 4],
        proj: [[f32; 4]; 4],
        toggles: SceneToggles,
        target: &mut Frame,
    ) -> Result<()> {
        let uniforms = uniform! {
            model: maths::raw_matrix(scene::lamp_transform(lamp_position)),
            view: view,
            proj: proj,
            lamp_color: maths::raw_vector(lamp_color * 0.8),
        };

        target.draw(
            &self.cube_vertex_buffer,
            NoIndices(PrimitiveType::TrianglesList),
            &self.lamp_program,
            &uniforms,
            &draw_parameters(toggles),
        )?;

        Ok(())
    }

    fn render_cubes(
        &self,
        scene: &FrameScene,
        lighting: &Lighting,
        view: [[f32; 4]; 4],
        proj: [[f32; 4]; 4],
        target: &mut Frame,
    ) -> Result<()> {
        let parameters = draw_parameters(scene.toggles);

        for (index, position) in scene::CUBE_POSITIONS.iter().enumerate() {
            let uniforms = LitUniforms {
                model: maths::raw_matrix(scene::moving_cube_transform(index, *position, scene.time)),
                view,
                proj,
                view_position: maths::raw_point(scene.camera.position()),
                diffuse: &self.container_texture.inner_texture,
                sampler: texture2d::repeating_sampler(),
                lighting,
            };

            target.draw(
                &self.cube_vertex_buffer,
                NoIndices(PrimitiveType::TrianglesList),
                &self.lit_program,
                &uniforms,
                &parameters,
            )?;
        }

        Ok(())
    }

    fn render_model(
        &self,
        model: &Model,
        scene: &FrameScene,
        lighting: &Lighting,
        view: [[f32; 4]; 4],
        proj: [[f32; 4]; 4],
        target: &mut Frame,
    ) -> Result<()> {
        // Mark every covered pixel so the outline is only drawn around the model
        let stencil = Stencil {
            test_clockwise: StencilTest::AlwaysPass,
            test_counter_clockwise: StencilTest::AlwaysPass,
            reference_value_clockwise: MODEL_STENCIL_VALUE,
            reference_value_counter_clockwise: MODEL_STENCIL_VALUE,
            depth_pass_operation_clockwise: StencilOperation::Replace,
            depth_pass_operation_counter_clockwise: StencilOperation::Replace,
            ..Default::default()
        };

        let parameters = DrawParameters {
            stencil,
            ..draw_parameters(scene.toggles)
        };

        let transform = maths::raw_matrix(scene::model_transform(scene::MODEL_SCALE));

        for primitive in model.primitives() {
            let diffuse = primitive.diffuse.as_ref().unwrap_or(&self.white_texture);

            let uniforms = LitUniforms {
                model: transform,
                view,
                proj,
                view_position: maths::raw_point(scene.camera.position()),
                diffuse: &diffuse.inner_texture,
                sampler: texture2d::repeating_sampler(),
                lighting,
            };

            target.draw(
                &primitive.vertex_buffer,
                &primitive.index_buffer,
                &self.model_program,
                &uniforms,
                &parameters,
            )?;
        }

        Ok(())
    }

    fn render_outline(
        &self,
        model: &Model,
        toggles: SceneToggles,
        view: [[f32; 4]; 4],
        proj: [[f32; 4]; 4],
        target: &mut Frame,
    ) -> Result<()> {
        let stencil = Stencil {
            test_clockwise: StencilTest::IfNotEqual { mask: 0xFF },
            test_counter_clockwise: StencilTest::IfNotEqual { mask: 0xFF },
            reference_value_clockwise: MODEL_STENCIL_VALUE,
            reference_value_counter_clockwise: MODEL_STENCIL_VALUE,
            write_mask_clockwise: 0,
            write_mask_counter_clockwise: 0,
            ..Default::default()
        };

        let parameters = DrawParameters {
            depth: Depth {
                test: DepthTest::Overwrite,
                write: false,
                ..Default::default()
            },
            stencil,
            ..draw_parameters(toggles)
        };

        let uniforms = uniform! {
            model: maths::raw_matrix(scene::model_transform(scene::OUTLINE_SCALE)),
            view: view,
            proj: proj,
            outline_color: maths::raw_vector(colors::outline().to_rgb_vector3()),
        };

        for primitive in model.primitives() {
            if let Err(error) = target.draw(
                &primitive.vertex_buffer,
                &primitive.index_buffer,
                &self.outline_program,
                &uniforms,
                &parameters,
            ) {
                warn!("Failed to draw the model outline: {}", error);
                break;
            }
        }

        Ok(())
    }
}

fn draw_parameters(toggles: SceneToggles) -> DrawParameters<'static> {
    DrawParameters {
        depth: Depth {
            test: DepthTest::IfLess,
            write: true,
            ..Default::default()
        },
        backface_culling: BackfaceCullingMode::CullClockwise,
        polygon_mode: if toggles.wireframe {
            PolygonMode::Line
        } else {
            PolygonMode::Fill
        },
        ..DrawParameters::default()
    }
}
