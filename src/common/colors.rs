use nalgebra::Vector3;
use palette::{FromColor, IntoColor, Lch, Srgb};

pub type Color = Lch;

pub trait ColorExt {
    fn from_named(color: Srgb<u8>) -> Self;
    fn from_rgb_vector3(rgb: Vector3<f32>) -> Self;
    fn to_rgb_vector3(self) -> Vector3<f32>;
}

impl ColorExt for Color {
    fn from_named(named: Srgb<u8>) -> Color {
        Lch::from_color(Srgb::<f32>::from_format(named))
    }

    fn from_rgb_vector3(rgb: Vector3<f32>) -> Color {
        Lch::from_color(Srgb::new(rgb.x, rgb.y, rgb.z))
    }

    fn to_rgb_vector3(self) -> Vector3<f32> {
        let rgb: Srgb = self.into_color();

        Vector3::new(rgb.red, rgb.green, rgb.blue)
    }
}

pub fn outline() -> Color {
    Color::from_named(palette::named::ORANGE)
}

pub fn white() -> Color {
    Color::from_named(palette::named::WHITE)
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;

    #[test]
    fn named_white_round_trips_to_ones() {
        assert_relative_eq!(white().to_rgb_vector3(), Vector3::new(1.0, 1.0, 1.0), epsilon = 1e-3);
    }

    #[test]
    fn grey_survives_lch_conversion() {
        let grey = Color::from_rgb_vector3(Vector3::new(0.7, 0.7, 0.7));

        assert_relative_eq!(grey.to_rgb_vector3(), Vector3::new(0.7, 0.7, 0.7), epsilon = 1e-3);
    }
}
