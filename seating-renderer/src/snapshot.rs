//! Raster capture of the rendered scene.
//!
//! Separate from document assembly so "can we capture pixels" and "can we
//! compose a document" fail, and are tested, independently.

use image::ImageEncoder;
use seating_core::{Roster, SeatingChart};

use crate::error::{RenderError, RenderResult};
use crate::scene::SceneRenderer;

/// A rasterized capture of the scene.
#[derive(Debug, Clone)]
pub struct Snapshot {
    pixmap: tiny_skia::Pixmap,
}

impl Snapshot {
    /// Render the chart through `renderer` and rasterize it.
    ///
    /// # Errors
    ///
    /// Returns [`RenderError::Context`] when a pixmap cannot be allocated,
    /// [`RenderError::Svg`] when the scene description fails to parse, and
    /// [`RenderError::BlankCapture`] when rasterization yields no pixels.
    pub fn capture(
        renderer: &SceneRenderer,
        chart: &SeatingChart,
        roster: &Roster,
    ) -> RenderResult<Self> {
        let snapshot = Self::rasterize(&renderer.render_svg(chart, roster, None))?;
        if snapshot.is_blank() {
            return Err(RenderError::BlankCapture);
        }
        Ok(snapshot)
    }

    /// Rasterize an SVG scene description at its intrinsic size.
    ///
    /// # Errors
    ///
    /// Returns [`RenderError::Svg`] for an unparseable scene and
    /// [`RenderError::Context`] when the pixmap cannot be allocated.
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn rasterize(svg: &str) -> RenderResult<Self> {
        let options = usvg::Options::default();
        let tree =
            usvg::Tree::from_str(svg, &options).map_err(|e| RenderError::Svg(e.to_string()))?;

        let width = tree.size().width() as u32;
        let height = tree.size().height() as u32;
        let mut pixmap = tiny_skia::Pixmap::new(width.max(1), height.max(1))
            .ok_or_else(|| RenderError::Context("Failed to create pixmap".to_string()))?;

        resvg::render(&tree, tiny_skia::Transform::default(), &mut pixmap.as_mut());
        Ok(Self { pixmap })
    }

    /// Capture width in pixels.
    #[must_use]
    pub fn width(&self) -> u32 {
        self.pixmap.width()
    }

    /// Capture height in pixels.
    #[must_use]
    pub fn height(&self) -> u32 {
        self.pixmap.height()
    }

    /// Whether the capture holds no image data (every pixel fully
    /// transparent).
    #[must_use]
    pub fn is_blank(&self) -> bool {
        self.pixmap.pixels().iter().all(|p| p.alpha() == 0)
    }

    /// Encode the capture as PNG.
    ///
    /// # Errors
    ///
    /// Returns [`RenderError::Encode`] if encoding fails.
    pub fn to_png(&self) -> RenderResult<Vec<u8>> {
        self.pixmap
            .encode_png()
            .map_err(|e| RenderError::Encode(format!("PNG encoding failed: {e}")))
    }

    /// Encode the capture as JPEG, flattened onto `background`.
    ///
    /// # Errors
    ///
    /// Returns [`RenderError::Encode`] if encoding fails.
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn to_jpeg(&self, quality: u8, background: [u8; 3]) -> RenderResult<Vec<u8>> {
        let (width, height) = (self.pixmap.width(), self.pixmap.height());
        let mut rgb_data = Vec::with_capacity((width * height * 3) as usize);
        for pixel in self.pixmap.data().chunks_exact(4) {
            let alpha = f32::from(pixel[3]) / 255.0;
            let inv = 1.0 - alpha;
            rgb_data.push((f32::from(pixel[0]).mul_add(alpha, f32::from(background[0]) * inv)) as u8);
            rgb_data.push((f32::from(pixel[1]).mul_add(alpha, f32::from(background[1]) * inv)) as u8);
            rgb_data.push((f32::from(pixel[2]).mul_add(alpha, f32::from(background[2]) * inv)) as u8);
        }

        let mut buf = std::io::Cursor::new(Vec::new());
        let encoder = image::codecs::jpeg::JpegEncoder::new_with_quality(&mut buf, quality);
        encoder
            .write_image(&rgb_data, width, height, image::ColorType::Rgb8.into())
            .map_err(|e| RenderError::Encode(format!("JPEG encoding failed: {e}")))?;

        Ok(buf.into_inner())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scene::Surface;
    use seating_core::Roster;

    fn renderer() -> SceneRenderer {
        SceneRenderer::new(Surface::new(200, 150))
    }

    #[test]
    fn test_capture_empty_chart_is_not_blank() {
        // The background paint alone is image data.
        let snapshot = Snapshot::capture(&renderer(), &SeatingChart::new(), &Roster::default())
            .expect("capture");
        assert_eq!(snapshot.width(), 200);
        assert_eq!(snapshot.height(), 150);
        assert!(!snapshot.is_blank());
    }

    #[test]
    fn test_png_and_jpeg_magic_bytes() {
        let snapshot = Snapshot::capture(&renderer(), &SeatingChart::new(), &Roster::default())
            .expect("capture");

        let png = snapshot.to_png().expect("png");
        assert_eq!(&png[0..4], &[137, 80, 78, 71]);

        let jpeg = snapshot.to_jpeg(85, [255, 255, 255]).expect("jpeg");
        assert_eq!(jpeg[0], 0xFF);
        assert_eq!(jpeg[1], 0xD8);
    }

    #[test]
    fn test_blank_detection_on_transparent_pixmap() {
        let pixmap = tiny_skia::Pixmap::new(10, 10).expect("pixmap");
        let snapshot = Snapshot { pixmap };
        assert!(snapshot.is_blank());
    }

    #[test]
    fn test_rasterize_rejects_garbage() {
        assert!(matches!(
            Snapshot::rasterize("not svg at all"),
            Err(RenderError::Svg(_))
        ));
    }
}
