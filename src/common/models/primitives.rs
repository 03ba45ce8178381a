use nalgebra::Vector3;

use crate::maths;
use crate::models::ModelVertex;

pub const CUBE_VERTEX_COUNT: usize = 36;

/// Each face as (outward normal, u axis, v axis) where u × v = normal
const CUBE_FACES: [([f32; 3], [f32; 3], [f32; 3]); 6] = [
    ([0.0, 0.0, 1.0], [1.0, 0.0, 0.0], [0.0, 1.0, 0.0]),
    ([0.0, 0.0, -1.0], [-1.0, 0.0, 0.0], [0.0, 1.0, 0.0]),
    ([1.0, 0.0, 0.0], [0.0, 0.0, -1.0], [0.0, 1.0, 0.0]),
    ([-1.0, 0.0, 0.0], [0.0, 0.0, 1.0], [0.0, 1.0, 0.0]),
    ([0.0, 1.0, 0.0], [1.0, 0.0, 0.0], [0.0, 0.0, -1.0]),
    ([0.0, -1.0, 0.0], [1.0, 0.0, 0.0], [0.0, 0.0, 1.0]),
];

/// Corners of the two triangles of a face in (u, v), counter-clockwise
const FACE_CORNERS: [(f32, f32); 6] = [
    (-1.0, -1.0),
    (1.0, -1.0),
    (1.0, 1.0),
    (1.0, 1.0),
    (-1.0, 1.0),
    (-1.0, -1.0),
];

/// A unit cube centred on the origin, every face textured with the whole texture
pub fn cube() -> Vec<ModelVertex> {
    CUBE_FACES
        .iter()
        .flat_map(|(normal, u_axis, v_axis)| {
            let normal = Vector3::from(*normal);
            let u_axis = Vector3::from(*u_axis);
            let v_axis = Vector3::from(*v_axis);

            FACE_CORNERS.iter().map(move |&(u, v)| {
                let position = (normal + u_axis * u + v_axis * v) * 0.5;

                ModelVertex {
                    position: maths::raw_vector(position),
                    normal: maths::raw_vector(normal),
                    tex_coord: [(u + 1.0) / 2.0, (v + 1.0) / 2.0],
                }
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;
    use itertools::Itertools;

    use super::*;

    #[test]
    fn cube_has_thirty_six_vertices() {
        assert_eq!(cube().len(), CUBE_VERTEX_COUNT);
    }

    #[test]
    fn cube_normals_are_unit_length() {
        for vertex in cube() {
            assert_relative_eq!(Vector3::from(vertex.normal).norm(), 1.0);
        }
    }

    #[test]
    fn cube_is_unit_sized() {
        for vertex in cube() {
            assert!(vertex.position.iter().all(|component| component.abs() == 0.5));
        }
    }

    #[test]
    fn cube_triangles_wind_counter_clockwise_from_outside() {
        for (a, b, c) in cube().into_iter().tuples() {
            let a_position = Vector3::from(a.position);
            let edge_1 = Vector3::from(b.position) - a_position;
            let edge_2 = Vector3::from(c.position) - a_position;

            let facing = edge_1.cross(&edge_2).dot(&Vector3::from(a.normal));

            assert!(facing > 0.0, "triangle {:?} {:?} {:?} winds clockwise", a, b, c);
        }
    }

    #[test]
    fn cube_vertices_lie_on_their_face() {
        for vertex in cube() {
            let along_normal = Vector3::from(vertex.position).dot(&Vector3::from(vertex.normal));

            assert_relative_eq!(along_normal, 0.5);
        }
    }

    #[test]
    fn cube_texture_coordinates_cover_the_texture() {
        let cube = cube();

        for face in cube.chunks_exact(6) {
            assert!(face.iter().any(|vertex| vertex.tex_coord == [0.0, 0.0]));
            assert!(face.iter().any(|vertex| vertex.tex_coord == [1.0, 1.0]));
        }
    }
}
