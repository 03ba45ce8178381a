use glium::uniforms::{UniformValue, Uniforms};
use nalgebra::{Point3, Vector3};

use crate::colors::{self, Color, ColorExt};
use crate::{maths, scene};

pub const POINT_LIGHT_INTENSITIES: PhongIntensities = PhongIntensities {
    ambient: 0.4,
    diffuse: 0.9,
    specular: 0.8,
};

pub const FLASHLIGHT_INTENSITIES: PhongIntensities = PhongIntensities {
    ambient: 0.2,
    diffuse: 1.0,
    specular: 0.4,
};

pub const SUN_INTENSITIES: PhongIntensities = PhongIntensities {
    ambient: 0.2,
    diffuse: 0.5,
    specular: 0.2,
};

pub const FLASHLIGHT_INNER_ANGLE: f32 = 5.0;
pub const FLASHLIGHT_OUTER_ANGLE: f32 = 20.0;

#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Attenuation {
    pub constant: f32,
    pub linear: f32,
    pub quadratic: f32,
}

impl Default for Attenuation {
    // Roughly a 50 unit range
    fn default() -> Self {
        Self {
            constant: 1.0,
            linear: 0.09,
            quadratic: 0.032,
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq)]
pub struct PhongIntensities {
    pub ambient: f32,
    pub diffuse: f32,
    pub specular: f32,
}

impl PhongIntensities {
    /// Ambient is derived from the diffuse color, specular ignores the light color.
    pub fn apply(&self, color: Vector3<f32>) -> PhongColors {
        let diffuse = color * self.diffuse;

        PhongColors {
            ambient: diffuse * self.ambient,
            diffuse,
            specular: Vector3::repeat(self.specular),
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq)]
pub struct PhongColors {
    pub ambient: Vector3<f32>,
    pub diffuse: Vector3<f32>,
    pub specular: Vector3<f32>,
}

#[derive(Copy, Clone, Debug, PartialEq)]
pub struct PointLight {
    pub position: Point3<f32>,
    pub colors: PhongColors,
    pub attenuation: Attenuation,
}

#[derive(Copy, Clone, Debug, PartialEq)]
pub struct DirectionalLight {
    pub direction: Vector3<f32>,
    pub colors: PhongColors,
}

#[derive(Copy, Clone, Debug, PartialEq)]
pub struct SpotLight {
    pub on: bool,
    pub position: Point3<f32>,
    pub direction: Vector3<f32>,
    pub colors: PhongColors,
    pub attenuation: Attenuation,
    /// Cosine of the inner cone angle
    pub cut_off: f32,
    /// Cosine of the outer cone angle
    pub outer_cut_off: f32,
}

/// Every light in the scene for a single frame
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Lighting {
    pub point_light: PointLight,
    pub directional_light: DirectionalLight,
    pub flashlight: SpotLight,
}

pub fn flashlight_color() -> Color {
    Color::from_rgb_vector3(Vector3::repeat(0.7))
}

pub fn sun_color() -> Color {
    colors::white()
}

impl Lighting {
    pub fn new(
        lamp_color: Vector3<f32>,
        lamp_position: Point3<f32>,
        camera_position: Point3<f32>,
        camera_direction: Vector3<f32>,
        flashlight_on: bool,
    ) -> Self {
        Self {
            point_light: PointLight {
                position: lamp_position,
                colors: POINT_LIGHT_INTENSITIES.apply(lamp_color),
                attenuation: Attenuation::default(),
            },
            directional_light: DirectionalLight {
                direction: scene::CUBE_SUN_DIRECTION,
                colors: SUN_INTENSITIES.apply(sun_color().to_rgb_vector3()),
            },
            flashlight: SpotLight {
                on: flashlight_on,
                position: camera_position,
                direction: camera_direction,
                colors: FLASHLIGHT_INTENSITIES.apply(flashlight_color().to_rgb_vector3()),
                attenuation: Attenuation::default(),
                cut_off: FLASHLIGHT_INNER_ANGLE.to_radians().cos(),
                outer_cut_off: FLASHLIGHT_OUTER_ANGLE.to_radians().cos(),
            },
        }
    }

    pub fn with_sun_direction(mut self, direction: Vector3<f32>) -> Self {
        self.directional_light.direction = direction;
        self
    }
}

impl Uniforms for Lighting {
    fn visit_values<'a, F: FnMut(&str, UniformValue<'a>)>(&'a self, mut output: F) {
        let vec3 = |vector: Vector3<f32>| UniformValue::Vec3(maths::raw_vector(vector));

        let point = &self.point_light;
        output("point_light.position", UniformValue::Vec3(maths::raw_point(point.position)));
        output("point_light.ambient", vec3(point.colors.ambient));
        output("point_light.diffuse", vec3(point.colors.diffuse));
        output("point_light.specular", vec3(point.colors.specular));
        output("point_light.constant", UniformValue::Float(point.attenuation.constant));
        output("point_light.linear", UniformValue::Float(point.attenuation.linear));
        output("point_light.quadratic", UniformValue::Float(point.attenuation.quadratic));

        let sun = &self.directional_light;
        output("dir_light.direction", vec3(sun.direction));
        output("dir_light.ambient", vec3(sun.colors.ambient));
        output("dir_light.diffuse", vec3(sun.colors.diffuse));
        output("dir_light.specular", vec3(sun.colors.specular));

        let flashlight = &self.flashlight;
        output("flashlight.on", UniformValue::Bool(flashlight.on));
        output("flashlight.position", UniformValue::Vec3(maths::raw_point(flashlight.position)));
        output("flashlight.direction", vec3(flashlight.direction));
        output("flashlight.ambient", vec3(flashlight.colors.ambient));
        output("flashlight.diffuse", vec3(flashlight.colors.diffuse));
        output("flashlight.specular", vec3(flashlight.colors.specular));
        output("flashlight.constant", UniformValue::Float(flashlight.attenuation.constant));
        output("flashlight.linear", UniformValue::Float(flashlight.attenuation.linear));
        output("flashlight.quadratic", UniformValue::Float(flashlight.attenuation.quadratic));
        output("flashlight.cut_off", UniformValue::Float(flashlight.cut_off));
        output("flashlight.outer_cut_off", UniformValue::Float(flashlight.outer_cut_off));
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;

    fn lighting() -> Lighting {
        Lighting::new(
            Vector3::new(1.0, 0.5, 0.25),
            Point3::new(1.2, 1.0, 2.0),
            Point3::new(0.0, 0.0, 3.0),
            Vector3::new(0.0, 0.0, -1.0),
            true,
        )
    }

    #[test]
    fn intensities_derive_ambient_from_diffuse() {
        let colors = POINT_LIGHT_INTENSITIES.apply(Vector3::new(1.0, 0.5, 0.0));

        assert_relative_eq!(colors.diffuse, Vector3::new(0.9, 0.45, 0.0), epsilon = 1e-6);
        assert_relative_eq!(colors.ambient, Vector3::new(0.36, 0.18, 0.0), epsilon = 1e-6);
        assert_relative_eq!(colors.specular, Vector3::repeat(0.8));
    }

    #[test]
    fn flashlight_cones_are_cosines() {
        let flashlight = lighting().flashlight;

        assert_relative_eq!(flashlight.cut_off, 5.0_f32.to_radians().cos());
        assert_relative_eq!(flashlight.outer_cut_off, 20.0_f32.to_radians().cos());
        assert!(flashlight.cut_off > flashlight.outer_cut_off);
    }

    #[test]
    fn flashlight_follows_camera() {
        let flashlight = lighting().flashlight;

        assert!(flashlight.on);
        assert_eq!(flashlight.position, Point3::new(0.0, 0.0, 3.0));
        assert_eq!(flashlight.direction, Vector3::new(0.0, 0.0, -1.0));
        assert_relative_eq!(flashlight.colors.diffuse, Vector3::repeat(0.7), epsilon = 1e-3);
    }

    #[test]
    fn with_sun_direction_only_changes_direction() {
        let base = lighting();
        let redirected = base.with_sun_direction(Vector3::new(1.0, -0.5, -1.0));

        assert_eq!(redirected.directional_light.direction, Vector3::new(1.0, -0.5, -1.0));
        assert_eq!(redirected.directional_light.colors, base.directional_light.colors);
        assert_eq!(redirected.point_light, base.point_light);
    }

    #[test]
    fn uniforms_cover_every_light_member() {
        let lighting = lighting();
        let mut names = Vec::new();

        lighting.visit_values(|name, _| names.push(name.to_owned()));

        for expected in [
            "point_light.position",
            "point_light.quadratic",
            "dir_light.direction",
            "dir_light.specular",
            "flashlight.on",
            "flashlight.cut_off",
            "flashlight.outer_cut_off",
        ] {
            assert!(names.iter().any(|name| name == expected), "missing {}", expected);
        }

        assert_eq!(names.len(), 22);
    }

    #[test]
    fn flashlight_switch_is_a_bool_uniform() {
        let mut lighting = lighting();
        lighting.flashlight.on = false;

        let mut switch = None;
        lighting.visit_values(|name, value| {
            if name == "flashlight.on" {
                switch = Some(matches!(value, UniformValue::Bool(false)));
            }
        });

        assert_eq!(switch, Some(true));
    }
}
