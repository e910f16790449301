//! 2D slice rendering
//!
//! Renders one axis-aligned plane of a volume into an RGBA pixel buffer.
//! The density slice goes through the color transfer function; the
//! anatomical template is drawn as opaque grayscale. When both are present
//! the density slice is composited over the template with additive
//! ("lighter") blending.
//!
//! Rows are written bottom-up: plane row `v` lands in image row `H - v - 1`,
//! so the positive axis points up.

use brainmap_volume::{DensityVolume, SliceAxis, TemplateVolume, Volume};

use crate::colormap::ColorTable;

/// Default opacity of the density overlay when a template is drawn beneath it
pub const DEFAULT_OVERLAY_ALPHA: f32 = 0.8;

/// Width x height RGBA8 image
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PixelBuffer {
    width: usize,
    height: usize,
    data: Vec<u8>,
}

impl PixelBuffer {
    /// Fully transparent black buffer
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            data: vec![0; width * height * 4],
        }
    }

    /// Buffer with every pixel set to `rgba`
    pub fn filled(width: usize, height: usize, rgba: [u8; 4]) -> Self {
        let mut data = Vec::with_capacity(width * height * 4);
        for _ in 0..width * height {
            data.extend_from_slice(&rgba);
        }
        Self { width, height, data }
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    #[inline]
    pub fn pixel(&self, x: usize, y: usize) -> [u8; 4] {
        let i = (y * self.width + x) * 4;
        [self.data[i], self.data[i + 1], self.data[i + 2], self.data[i + 3]]
    }

    #[inline]
    pub fn set_pixel(&mut self, x: usize, y: usize, rgba: [u8; 4]) {
        let i = (y * self.width + x) * 4;
        self.data[i..i + 4].copy_from_slice(&rgba);
    }

    /// Raw RGBA bytes, row-major from the top row
    #[inline]
    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.data
    }

    /// Draw `src` over this buffer with additive blending at `alpha`
    ///
    /// `src` is stretched nearest-neighbour to this buffer's size. Each
    /// channel becomes `dst + src * alpha`, saturating at 255.
    pub fn blend_lighter(&mut self, src: &PixelBuffer, alpha: f32) {
        if src.width == 0 || src.height == 0 {
            return;
        }
        let alpha = alpha.clamp(0.0, 1.0);
        for y in 0..self.height {
            let sy = y * src.height / self.height;
            for x in 0..self.width {
                let sx = x * src.width / self.width;
                let s = src.pixel(sx, sy);
                let mut d = self.pixel(x, y);
                for c in 0..4 {
                    let v = d[c] as f32 + s[c] as f32 * alpha;
                    d[c] = v.round().min(255.0) as u8;
                }
                self.set_pixel(x, y, d);
            }
        }
    }
}

/// Renders volume slices with a color transfer function
#[derive(Clone, Debug)]
pub struct SliceRenderer {
    table: ColorTable,
    overlay_alpha: f32,
}

impl SliceRenderer {
    pub fn new(table: ColorTable) -> Self {
        Self {
            table,
            overlay_alpha: DEFAULT_OVERLAY_ALPHA,
        }
    }

    /// Set the density overlay opacity used when compositing over a template
    pub fn with_overlay_alpha(mut self, alpha: f32) -> Self {
        self.overlay_alpha = alpha;
        self
    }

    #[inline]
    pub fn table(&self) -> &ColorTable {
        &self.table
    }

    #[inline]
    pub fn overlay_alpha(&self) -> f32 {
        self.overlay_alpha
    }

    /// Render the density slice at `percent` along `axis`
    ///
    /// Cell values are normalized with `0.5 + 0.5 * value / max`. An empty
    /// volume (max 0) renders uniformly at the table midpoint.
    pub fn render_density(&self, density: &DensityVolume, axis: SliceAxis, percent: f32) -> PixelBuffer {
        let max = density.max_value();
        render_plane(density.volume(), axis, percent, |v| {
            let t = if max == 0 { 0.5 } else { 0.5 + 0.5 * (v as f32 / max as f32) };
            self.table.color_at_u8(t)
        })
    }

    /// Render the anatomical template slice as opaque grayscale
    pub fn render_template(&self, template: &TemplateVolume, axis: SliceAxis, percent: f32) -> PixelBuffer {
        render_plane(template, axis, percent, |v| [v, v, v])
    }

    /// Render the density slice, composited over the template when one is given
    ///
    /// With a template the output has the template's resolution; without
    /// one it has the density grid's.
    pub fn render(
        &self,
        density: &DensityVolume,
        template: Option<&TemplateVolume>,
        axis: SliceAxis,
        percent: f32,
    ) -> PixelBuffer {
        let overlay = self.render_density(density, axis, percent);
        match template {
            Some(template) => {
                let mut base = self.render_template(template, axis, percent);
                base.blend_lighter(&overlay, self.overlay_alpha);
                base
            }
            None => overlay,
        }
    }
}

impl Default for SliceRenderer {
    fn default() -> Self {
        Self::new(ColorTable::negpos())
    }
}

/// Walk the plane of `volume` fixed at `percent` along `axis`, coloring each cell
fn render_plane<T: Copy>(
    volume: &Volume<T>,
    axis: SliceAxis,
    percent: f32,
    color: impl Fn(T) -> [u8; 3],
) -> PixelBuffer {
    let dims = volume.dims();
    let (width, height) = axis.plane_size(dims);
    let mut buffer = PixelBuffer::new(width, height);
    if dims.is_empty() {
        return buffer;
    }
    let s = axis.slice_index(dims, percent);

    for v in 0..height {
        for u in 0..width {
            let (x, y, z) = axis.cell(s, u, v);
            let [r, g, b] = color(volume.get(x, y, z));
            buffer.set_pixel(u, height - v - 1, [r, g, b, 255]);
        }
    }
    buffer
}

#[cfg(test)]
mod tests {
    use super::*;
    use brainmap_volume::{DensityBuilder, Dims, Vec3};

    #[test]
    fn test_empty_density_is_uniform_midpoint() {
        let renderer = SliceRenderer::default();
        let density = DensityVolume::empty(Dims::new(45, 54, 45));
        let [r, g, b] = renderer.table().color_at_u8(0.5);

        for axis in SliceAxis::ALL {
            let img = renderer.render_density(&density, axis, 50.0);
            let (w, h) = axis.plane_size(density.dims());
            assert_eq!((img.width(), img.height()), (w, h));
            for y in 0..h {
                for x in 0..w {
                    assert_eq!(img.pixel(x, y), [r, g, b, 255]);
                }
            }
        }
    }

    #[test]
    fn test_density_peak_maps_to_top_of_table() {
        let renderer = SliceRenderer::default();
        // Lands on cell (22, 27, 22)
        let density = DensityBuilder::default().accumulate(&[Vec3::new(0.0, -16.0, 18.0)]);
        // Axial slice at 50% is z = 22
        let img = renderer.render_density(&density, SliceAxis::Axial, 50.0);
        let top = renderer.table().color_at_u8(1.0);
        let h = img.height();
        assert_eq!(img.pixel(22, h - 27 - 1), [top[0], top[1], top[2], 255]);
        let mid = renderer.table().color_at_u8(0.5);
        assert_eq!(img.pixel(0, 0), [mid[0], mid[1], mid[2], 255]);
    }

    #[test]
    fn test_plane_orientation() {
        // Encode the cell coordinate in the voxel value to check the mapping
        let dims = Dims::new(4, 5, 6);
        let vol = Volume::from_fn(dims, |x, y, z| (x * 100 + y * 10 + z) as u8);
        let renderer = SliceRenderer::default();

        // Sagittal: u = y, v = z, x fixed
        let img = renderer.render_template(&vol, SliceAxis::Sagittal, 50.0);
        assert_eq!((img.width(), img.height()), (5, 6));
        assert_eq!(img.pixel(3, 6 - 4 - 1)[0], 234);

        // Coronal: u = x, v = z, y fixed at floor(5 * 0.5) = 2
        let img = renderer.render_template(&vol, SliceAxis::Coronal, 50.0);
        assert_eq!((img.width(), img.height()), (4, 6));
        assert_eq!(img.pixel(1, 6 - 5 - 1)[0], 125);

        // Axial: u = x, v = y, z fixed at 3
        let img = renderer.render_template(&vol, SliceAxis::Axial, 50.0);
        assert_eq!((img.width(), img.height()), (4, 5));
        assert_eq!(img.pixel(2, 4)[0], 203);
    }

    #[test]
    fn test_template_is_opaque_gray() {
        let vol = Volume::filled(Dims::new(3, 3, 3), 77u8);
        let img = SliceRenderer::default().render_template(&vol, SliceAxis::Axial, 10.0);
        assert_eq!(img.pixel(1, 1), [77, 77, 77, 255]);
    }

    #[test]
    fn test_blend_lighter_adds_and_saturates() {
        let mut dst = PixelBuffer::filled(4, 4, [100, 200, 0, 255]);
        let src = PixelBuffer::filled(2, 2, [100, 100, 50, 255]);
        dst.blend_lighter(&src, 0.8);
        assert_eq!(dst.pixel(3, 3), [180, 255, 40, 255]);
    }

    #[test]
    fn test_blend_lighter_stretches_source() {
        let mut dst = PixelBuffer::new(4, 2);
        let mut src = PixelBuffer::new(2, 1);
        src.set_pixel(1, 0, [0, 0, 100, 255]);
        dst.blend_lighter(&src, 1.0);
        assert_eq!(dst.pixel(1, 0)[2], 0);
        assert_eq!(dst.pixel(2, 0)[2], 100);
        assert_eq!(dst.pixel(3, 1)[2], 100);
    }

    #[test]
    fn test_render_with_template_uses_template_size() {
        let renderer = SliceRenderer::default();
        let density = DensityVolume::empty(Dims::new(45, 54, 45));
        let template = Volume::filled(Dims::new(180, 216, 180), 40u8);
        let img = renderer.render(&density, Some(&template), SliceAxis::Axial, 50.0);
        assert_eq!((img.width(), img.height()), (180, 216));
        // Midpoint of the ramp is black, so only the template shows through
        assert_eq!(img.pixel(90, 100), [40, 40, 40, 255]);

        let img = renderer.render(&density, None, SliceAxis::Axial, 50.0);
        assert_eq!((img.width(), img.height()), (45, 54));
    }
}
