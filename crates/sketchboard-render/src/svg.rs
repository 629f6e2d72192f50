//! SVG renderer: draws a frame as a standalone SVG document.

use crate::display::{ImageItem, RenderItem, ShapeItem, build_display_list};
use crate::renderer::{RenderContext, RenderResult, Renderer};
use kurbo::{Affine, Point};
use peniko::Color;
use sketchboard_core::selection::{Handle, HandleKind};
use sketchboard_core::shapes::SerializableColor;
use std::fmt::{self, Write as _};
use std::path::Path;

/// Renders frames to SVG markup.
#[derive(Debug, Clone)]
pub struct SvgRenderer {
    svg: String,
    selection_color: Color,
    handle_size: f64,
}

impl Default for SvgRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl SvgRenderer {
    pub fn new() -> Self {
        Self {
            svg: String::new(),
            selection_color: Color::from_rgba8(0, 161, 255, 255),
            handle_size: 10.0,
        }
    }

    /// Markup of the last built frame.
    pub fn svg(&self) -> &str {
        &self.svg
    }

    /// Take the last built frame, leaving the renderer empty.
    pub fn take_svg(&mut self) -> String {
        std::mem::take(&mut self.svg)
    }

    /// Write the last built frame to a file.
    pub fn save(&self, path: impl AsRef<Path>) -> RenderResult<()> {
        let path = path.as_ref();
        std::fs::write(path, &self.svg)?;
        log::info!("Wrote SVG frame to {}", path.display());
        Ok(())
    }

    /// Write the whole document for a frame.
    fn write_frame(&mut self, ctx: &RenderContext) -> fmt::Result {
        let size = ctx.viewport_size;
        writeln!(
            self.svg,
            r#"<svg xmlns="http://www.w3.org/2000/svg" width="{w}" height="{h}" viewBox="0 0 {w} {h}">"#,
            w = size.width,
            h = size.height,
        )?;
        writeln!(
            self.svg,
            r#"  <rect width="100%" height="100%" fill="{}"/>"#,
            hex(self.background_color(ctx)),
        )?;

        for item in build_display_list(ctx) {
            match &item {
                RenderItem::Shape(shape) => self.render_shape(shape)?,
                RenderItem::Image(image) => self.render_image(image)?,
            }
        }

        writeln!(self.svg, "</svg>")
    }

    fn render_shape(&mut self, item: &ShapeItem) -> fmt::Result {
        let fill = item
            .style
            .fill_color
            .map_or_else(|| "none".to_string(), |c| c.to_hex());
        writeln!(
            self.svg,
            r#"  <path d="{}" fill="{}" stroke="{}" stroke-width="{}" stroke-linecap="round" stroke-linejoin="round"/>"#,
            item.path.to_svg(),
            fill,
            item.style.stroke_color.to_hex(),
            item.style.stroke_width,
        )?;
        if item.selected {
            self.render_selection(&item.handles)?;
        }
        Ok(())
    }

    fn render_image(&mut self, item: &ImageItem) -> fmt::Result {
        writeln!(
            self.svg,
            r#"  <image href="{}" x="{}" y="{}" width="{}" height="{}" transform="{}" preserveAspectRatio="none"/>"#,
            item.href,
            item.frame.x0,
            item.frame.y0,
            item.frame.width(),
            item.frame.height(),
            svg_matrix(item.transform),
        )?;
        if item.selected {
            self.render_selection(&item.handles)?;
        }
        Ok(())
    }

    /// Frame through the corner handles plus the handles themselves.
    fn render_selection(&mut self, handles: &[Handle]) -> fmt::Result {
        let color = hex(self.selection_color);
        let corners: Vec<Point> = handles
            .iter()
            .filter(|h| matches!(h.kind, HandleKind::Corner(_)))
            .map(|h| h.position)
            .collect();
        // Handles come TL, TR, BL, BR
        if let [tl, tr, bl, br] = corners[..] {
            writeln!(
                self.svg,
                r#"  <polygon points="{},{} {},{} {},{} {},{}" fill="none" stroke="{color}" stroke-width="1"/>"#,
                tl.x, tl.y, tr.x, tr.y, br.x, br.y, bl.x, bl.y,
            )?;
        }

        let half = self.handle_size / 2.0;
        for handle in handles {
            let p = handle.position;
            match handle.kind {
                HandleKind::Corner(_) => writeln!(
                    self.svg,
                    r#"  <rect x="{}" y="{}" width="{}" height="{}" fill="white" stroke="{color}" stroke-width="1"/>"#,
                    p.x - half,
                    p.y - half,
                    self.handle_size,
                    self.handle_size,
                )?,
                HandleKind::Rotate => writeln!(
                    self.svg,
                    r#"  <circle cx="{}" cy="{}" r="{half}" fill="white" stroke="{color}" stroke-width="1"/>"#,
                    p.x, p.y,
                )?,
            }
        }
        Ok(())
    }
}

impl Renderer for SvgRenderer {
    fn build_scene(&mut self, ctx: &RenderContext) {
        self.svg.clear();
        self.selection_color = ctx.selection_color;
        self.handle_size = ctx.handle_size;

        if let Err(e) = self.write_frame(ctx) {
            log::error!("Failed to build SVG frame: {e}");
            self.svg.clear();
        }
    }
}

fn hex(color: Color) -> String {
    SerializableColor::from(color).to_hex()
}

fn svg_matrix(affine: Affine) -> String {
    let [a, b, c, d, e, f] = affine.as_coeffs();
    format!("matrix({a} {b} {c} {d} {e} {f})")
}

#[cfg(test)]
mod tests {
    use super::*;
    use sketchboard_core::canvas::Canvas;
    use sketchboard_core::shapes::{Rectangle, Stroke};

    #[test]
    fn test_build_empty_scene() {
        let mut renderer = SvgRenderer::new();
        let canvas = Canvas::new();
        renderer.build_scene(&RenderContext::new(&canvas, kurbo::Size::new(800.0, 600.0)));

        let svg = renderer.svg();
        assert!(svg.starts_with("<svg"));
        assert!(svg.contains(r#"viewBox="0 0 800 600""#));
        assert!(svg.contains(r##"fill="#ffffff""##));
        assert!(svg.trim_end().ends_with("</svg>"));
        assert!(!svg.contains("<path"));
    }

    #[test]
    fn test_build_scene_with_shapes() {
        let mut renderer = SvgRenderer::new();
        let mut canvas = Canvas::new();
        canvas.create_rectangle(Rectangle::new(Point::new(100.0, 100.0), 200.0, 150.0));
        let stroke = canvas.create_pen(Stroke::from_points(vec![Point::new(0.0, 0.0), Point::new(5.0, 5.0)]));
        canvas.select_shape(stroke);

        renderer.build_scene(&RenderContext::for_stage(&canvas));
        let svg = renderer.svg();
        assert_eq!(svg.matches("<path").count(), 2);
        assert!(svg.contains(r##"fill="#cccccc""##));
        assert!(svg.contains(r#"fill="none""#));
        // Stroke is selected: frame plus four corner handles, no rotate handle
        assert_eq!(svg.matches("<polygon").count(), 1);
        assert_eq!(svg.matches(r#"fill="white""#).count(), 4);
        assert!(!svg.contains("<circle"));
    }

    #[test]
    fn test_selected_rectangle_has_rotate_handle() {
        let mut renderer = SvgRenderer::new();
        let mut canvas = Canvas::new();
        let id = canvas.create_rectangle(Rectangle::new(Point::new(10.0, 10.0), 40.0, 20.0));
        canvas.select_shape(id);

        renderer.build_scene(&RenderContext::for_stage(&canvas));
        let svg = renderer.svg();
        assert_eq!(svg.matches("<polygon").count(), 1);
        assert_eq!(svg.matches("<circle").count(), 1);
        assert_eq!(svg.matches(r#"fill="white""#).count(), 5);
        assert!(svg.ends_with("</svg>\n"));
    }

    #[test]
    fn test_rebuild_replaces_previous_frame() {
        let mut renderer = SvgRenderer::new();
        let mut canvas = Canvas::new();
        canvas.create_rectangle(Rectangle::new(Point::ZERO, 10.0, 10.0));
        renderer.build_scene(&RenderContext::for_stage(&canvas));
        canvas.reset();
        renderer.build_scene(&RenderContext::for_stage(&canvas));
        assert_eq!(renderer.svg().matches("<svg").count(), 1);
        assert!(!renderer.svg().contains("<path"));
    }

    #[test]
    fn test_save() {
        let mut renderer = SvgRenderer::new();
        let canvas = Canvas::new();
        renderer.build_scene(&RenderContext::for_stage(&canvas));

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("frame.svg");
        renderer.save(&path).unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), renderer.svg());
    }

    #[test]
    fn test_matrix_for_identity() {
        assert_eq!(svg_matrix(Affine::IDENTITY), "matrix(1 0 0 1 0 0)");
    }
}
