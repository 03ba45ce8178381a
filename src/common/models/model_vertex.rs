use glium::implement_vertex;

#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct ModelVertex {
    pub position: [f32; 3],
    pub normal: [f32; 3],
    pub tex_coord: [f32; 2],
}

implement_vertex!(ModelVertex, position, normal, tex_coord);
