//! File export
//!
//! Slices are written as RGBA PNG images, display meshes as Wavefront OBJ
//! with one normal per face or as a flat-shaded vertex stream.

use std::fmt;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

use image::codecs::png::PngEncoder;
use image::ImageEncoder;

use brainmap_render::{DisplayMesh, PixelBuffer};

/// Error writing an output file
#[derive(Debug)]
pub enum ExportError {
    Io(io::Error),
    Image(image::ImageError),
    /// The slice has no pixels
    EmptyImage,
}

impl fmt::Display for ExportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExportError::Io(e) => write!(f, "Export IO error: {}", e),
            ExportError::Image(e) => write!(f, "PNG encoding error: {}", e),
            ExportError::EmptyImage => write!(f, "Cannot encode an empty image"),
        }
    }
}

impl std::error::Error for ExportError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ExportError::Io(e) => Some(e),
            ExportError::Image(e) => Some(e),
            ExportError::EmptyImage => None,
        }
    }
}

impl From<io::Error> for ExportError {
    fn from(e: io::Error) -> Self {
        ExportError::Io(e)
    }
}

impl From<image::ImageError> for ExportError {
    fn from(e: image::ImageError) -> Self {
        ExportError::Image(e)
    }
}

/// Encode a pixel buffer as PNG bytes
pub fn encode_png(buffer: &PixelBuffer) -> Result<Vec<u8>, ExportError> {
    if buffer.width() == 0 || buffer.height() == 0 {
        return Err(ExportError::EmptyImage);
    }
    let mut bytes = Vec::new();
    PngEncoder::new(&mut bytes).write_image(
        buffer.as_bytes(),
        buffer.width() as u32,
        buffer.height() as u32,
        image::ExtendedColorType::Rgba8,
    )?;
    Ok(bytes)
}

/// Write a pixel buffer to `path` as PNG
pub fn save_png<P: AsRef<Path>>(path: P, buffer: &PixelBuffer) -> Result<(), ExportError> {
    let bytes = encode_png(buffer)?;
    std::fs::write(path.as_ref(), bytes)?;
    log::info!(
        "Wrote {}x{} slice to {}",
        buffer.width(),
        buffer.height(),
        path.as_ref().display()
    );
    Ok(())
}

/// Write a display mesh as OBJ text
///
/// Face `i` references normal `i`; indices are 1-based.
pub fn write_obj<W: Write>(mut out: W, mesh: &DisplayMesh) -> Result<(), ExportError> {
    writeln!(out, "# brainmap isosurface")?;
    writeln!(out, "# {} vertices, {} triangles", mesh.vertex_count(), mesh.triangle_count())?;
    for v in &mesh.vertices {
        writeln!(out, "v {} {} {}", v.x, v.y, v.z)?;
    }
    for n in &mesh.normals {
        writeln!(out, "vn {} {} {}", n.x, n.y, n.z)?;
    }
    for (i, [a, b, c]) in mesh.triangles.iter().enumerate() {
        let n = i + 1;
        writeln!(out, "f {}//{n} {}//{n} {}//{n}", a + 1, b + 1, c + 1)?;
    }
    out.flush()?;
    Ok(())
}

/// Write a display mesh to `path` as OBJ
pub fn save_obj<P: AsRef<Path>>(path: P, mesh: &DisplayMesh) -> Result<(), ExportError> {
    let file = File::create(path.as_ref())?;
    write_obj(BufWriter::new(file), mesh)?;
    log::info!(
        "Wrote {} triangles to {}",
        mesh.triangle_count(),
        path.as_ref().display()
    );
    Ok(())
}

/// Write the flat-shaded vertex stream of a display mesh
///
/// Three vertices per triangle, each six native-endian `f32`s (position
/// then face normal), ready to upload as a vertex buffer.
pub fn write_vertex_buffer<W: Write>(mut out: W, mesh: &DisplayMesh) -> Result<(), ExportError> {
    out.write_all(&mesh.flat_vertex_bytes())?;
    out.flush()?;
    Ok(())
}

/// Write the flat-shaded vertex stream of a display mesh to `path`
pub fn save_vertex_buffer<P: AsRef<Path>>(path: P, mesh: &DisplayMesh) -> Result<(), ExportError> {
    let file = File::create(path.as_ref())?;
    write_vertex_buffer(BufWriter::new(file), mesh)?;
    log::info!(
        "Wrote {} flat-shaded vertices to {}",
        mesh.triangle_count() * 3,
        path.as_ref().display()
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use brainmap_math::Vec3;

    #[test]
    fn test_png_round_trips_pixels() {
        let mut buffer = PixelBuffer::new(3, 2);
        buffer.set_pixel(2, 1, [10, 20, 30, 255]);
        let bytes = encode_png(&buffer).unwrap();
        assert_eq!(&bytes[1..4], b"PNG");

        let decoded = image::load_from_memory(&bytes).unwrap().to_rgba8();
        assert_eq!(decoded.dimensions(), (3, 2));
        assert_eq!(decoded.get_pixel(2, 1).0, [10, 20, 30, 255]);
    }

    #[test]
    fn test_empty_png_is_rejected() {
        assert!(matches!(
            encode_png(&PixelBuffer::new(0, 4)),
            Err(ExportError::EmptyImage)
        ));
    }

    #[test]
    fn test_obj_layout() {
        let mesh = DisplayMesh {
            vertices: vec![Vec3::ZERO, Vec3::X, Vec3::Y],
            triangles: vec![[0, 1, 2]],
            normals: vec![Vec3::Z],
            bounding_box: None,
            bounding_sphere: None,
        };
        let mut out = Vec::new();
        write_obj(&mut out, &mesh).unwrap();
        let text = String::from_utf8(out).unwrap();
        let lines: Vec<&str> = text.lines().filter(|l| !l.starts_with('#')).collect();
        assert_eq!(lines, vec!["v 0 0 0", "v 1 0 0", "v 0 1 0", "vn 0 0 1", "f 1//1 2//1 3//1"]);
    }

    #[test]
    fn test_vertex_buffer_layout() {
        let mesh = DisplayMesh {
            vertices: vec![Vec3::ZERO, Vec3::X, Vec3::Y, Vec3::Z],
            triangles: vec![[0, 1, 2], [0, 2, 3]],
            normals: vec![Vec3::Z, Vec3::X],
            bounding_box: None,
            bounding_sphere: None,
        };
        let mut out = Vec::new();
        write_vertex_buffer(&mut out, &mesh).unwrap();
        // 2 triangles * 3 corners * 6 floats
        assert_eq!(out.len(), 36 * 4);

        let floats: Vec<f32> = out
            .chunks_exact(4)
            .map(|c| f32::from_ne_bytes([c[0], c[1], c[2], c[3]]))
            .collect();
        // Last corner of the second triangle is vertex 3 with that face's normal
        assert_eq!(&floats[30..36], &[0.0, 0.0, 1.0, 1.0, 0.0, 0.0]);
    }

    #[test]
    fn test_empty_mesh_writes_empty_vertex_buffer() {
        let mut out = Vec::new();
        write_vertex_buffer(&mut out, &DisplayMesh::empty()).unwrap();
        assert!(out.is_empty());
    }
}
