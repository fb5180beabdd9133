//! Vertex buffer upload: allocate exactly the byte length of the source
//! slice, write through the mapped range, unmap.

use bytemuck::Pod;

/// Byte length of a slice of plain-old-data elements.
pub fn byte_size<T: Pod>(data: &[T]) -> usize {
    std::mem::size_of_val(data)
}

/// Creates a GPU-resident vertex buffer holding `data`.
///
/// The element type is fixed at compile time by the `Pod` bound, so the copy
/// is a single byte-for-byte write with no runtime type dispatch.
pub fn create_vertex_buffer<T: Pod>(
    device: &wgpu::Device,
    label: &str,
    data: &[T],
) -> wgpu::Buffer {
    let bytes: &[u8] = bytemuck::cast_slice(data);

    let buffer = device.create_buffer(&wgpu::BufferDescriptor {
        label: Some(label),
        size: bytes.len() as wgpu::BufferAddress,
        usage: wgpu::BufferUsages::VERTEX,
        mapped_at_creation: true,
    });

    // the mapped view borrows the buffer, so scope it before unmap
    {
        let mut view = buffer.slice(..).get_mapped_range_mut();
        view.copy_from_slice(bytes);
    }
    buffer.unmap();

    buffer
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::vertex::TRIANGLE;

    #[test]
    fn byte_size_is_four_bytes_per_f32() {
        let data: &[f32] = &[0.0, 1.0, 2.0, 3.0, 4.0];
        assert_eq!(byte_size(data), data.len() * 4);
    }

    #[test]
    fn triangle_upload_size_is_three_packed_vertices() {
        assert_eq!(byte_size(TRIANGLE), 3 * 32);
    }
}
