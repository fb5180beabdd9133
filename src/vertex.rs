#[repr(C)] // make 'C-like' memory storage for compatibility with wgsl and gpu
#[derive(Copy, Clone, Debug, bytemuck::Pod, bytemuck::Zeroable)]
pub struct Vertex {
    position: [f32; 4],
    color: [f32; 4],
}

/// The one static mesh in the program: a multicolored triangle in clip space,
/// positions in homogeneous XYZW.
pub const TRIANGLE: &[Vertex] = &[
    Vertex {
        position: [0.0, 0.5, 0.0, 1.0],
        color: [1.0, 0.0, 0.0, 1.0],
    }, // top
    Vertex {
        position: [-0.5, -0.5, 0.0, 1.0],
        color: [0.0, 1.0, 0.0, 1.0],
    }, // bottom left
    Vertex {
        position: [0.5, -0.5, 0.0, 1.0],
        color: [0.0, 0.0, 1.0, 1.0],
    }, // bottom right
];

impl Vertex {
    const ATTRIBUTES: [wgpu::VertexAttribute; 2] =
        wgpu::vertex_attr_array![0 => Float32x4, 1 => Float32x4];

    /// Buffer layout matching the attribute locations in `triangle.wgsl`:
    /// position at offset 0, color at offset 16, 32 bytes per vertex.
    pub fn desc() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<Vertex>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &Self::ATTRIBUTES,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn vertex_is_32_bytes() {
        assert_eq!(std::mem::size_of::<Vertex>(), 32);
    }

    #[test]
    fn layout_has_two_attributes_at_expected_offsets() {
        let layout = Vertex::desc();
        assert_eq!(layout.array_stride, 32);
        assert_eq!(layout.attributes.len(), 2);
        assert_eq!(layout.attributes[0].offset, 0);
        assert_eq!(layout.attributes[0].format, wgpu::VertexFormat::Float32x4);
        assert_eq!(layout.attributes[1].offset, 16);
        assert_eq!(layout.attributes[1].format, wgpu::VertexFormat::Float32x4);
    }

    #[test]
    fn triangle_has_three_vertices() {
        assert_eq!(TRIANGLE.len(), 3);
    }
}
