use nalgebra::{Matrix4, Point3, Vector3};

pub const NEAR_PLANE: f32 = 0.1;
pub const FAR_PLANE: f32 = 100.0;

pub fn raw_matrix(matrix: Matrix4<f32>) -> [[f32; 4]; 4] {
    <[[f32; 4]; 4]>::from(matrix)
}

pub fn raw_vector(vector: Vector3<f32>) -> [f32; 3] {
    <[f32; 3]>::from(vector)
}

pub fn raw_point(point: Point3<f32>) -> [f32; 3] {
    <[f32; 3]>::from(point)
}

pub fn perspective_matrix_from_window_size(
    fov_degrees: f32,
    window_width: f32,
    window_height: f32,
) -> Matrix4<f32> {
    // Minimised windows report a zero height
    let aspect_ratio = window_width / window_height.max(1.0);

    Matrix4::new_perspective(
        aspect_ratio,
        fov_degrees.to_radians(),
        NEAR_PLANE,
        FAR_PLANE,
    )
}

pub fn translation_scale(translation: Vector3<f32>, scale: f32) -> Matrix4<f32> {
    Matrix4::new_translation(&translation) * Matrix4::new_scaling(scale)
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;
    use nalgebra::Vector4;

    use super::*;

    #[test]
    fn perspective_maps_near_and_far_planes_to_clip_bounds() {
        let projection = perspective_matrix_from_window_size(45.0, 800.0, 600.0);

        let near = projection * Vector4::new(0.0, 0.0, -NEAR_PLANE, 1.0);
        let far = projection * Vector4::new(0.0, 0.0, -FAR_PLANE, 1.0);

        assert_relative_eq!(near.z / near.w, -1.0, epsilon = 1e-4);
        assert_relative_eq!(far.z / far.w, 1.0, epsilon = 1e-4);
    }

    #[test]
    fn perspective_uses_aspect_ratio() {
        let projection = perspective_matrix_from_window_size(90.0, 200.0, 100.0);

        // x is squashed by the aspect ratio, y is 1 / tan(fov / 2)
        assert_relative_eq!(projection[(0, 0)], 0.5, epsilon = 1e-5);
        assert_relative_eq!(projection[(1, 1)], 1.0, epsilon = 1e-5);
    }

    #[test]
    fn perspective_survives_zero_height() {
        let projection = perspective_matrix_from_window_size(45.0, 800.0, 0.0);

        assert!(projection.iter().all(|value| value.is_finite()));
    }

    #[test]
    fn translation_scale_scales_then_translates() {
        let matrix = translation_scale(Vector3::new(1.0, 2.0, 3.0), 0.5);

        let transformed = matrix.transform_point(&Point3::new(2.0, 2.0, 2.0));

        assert_relative_eq!(transformed, Point3::new(2.0, 3.0, 4.0));
    }
}
