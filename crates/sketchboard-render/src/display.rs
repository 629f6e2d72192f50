//! Display list: what a frame shows, independent of the output backend.

use crate::renderer::RenderContext;
use kurbo::{Affine, BezPath, Rect};
use sketchboard_core::overlay::OverlayImage;
use sketchboard_core::selection::{Handle, frame_handles, get_handles};
use sketchboard_core::shapes::{Shape, ShapeId, ShapeKind, ShapeStyle};

/// Where a drawn item comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ItemSource {
    /// A committed shape.
    Shape(ShapeId),
    /// The image overlay.
    Overlay,
    /// The shape being drawn.
    Preview,
}

/// A vector shape ready to draw.
#[derive(Debug, Clone)]
pub struct ShapeItem {
    pub source: ItemSource,
    pub kind: ShapeKind,
    /// Outline in world coordinates, rotation applied.
    pub path: BezPath,
    pub style: ShapeStyle,
    pub selected: bool,
    pub draggable: bool,
    /// Transform handles, empty unless selected.
    pub handles: Vec<Handle>,
}

/// The overlay image ready to draw.
#[derive(Debug, Clone)]
pub struct ImageItem {
    /// Preview source.
    pub href: String,
    /// Unrotated frame.
    pub frame: Rect,
    /// Rotation about the frame center.
    pub transform: Affine,
    pub selected: bool,
    pub draggable: bool,
    pub handles: Vec<Handle>,
}

/// One entry of the display list.
#[derive(Debug, Clone)]
pub enum RenderItem {
    Shape(ShapeItem),
    Image(ImageItem),
}

impl RenderItem {
    pub fn is_selected(&self) -> bool {
        match self {
            RenderItem::Shape(item) => item.selected,
            RenderItem::Image(item) => item.selected,
        }
    }

    pub fn handles(&self) -> &[Handle] {
        match self {
            RenderItem::Shape(item) => &item.handles,
            RenderItem::Image(item) => &item.handles,
        }
    }
}

/// Build the display list for a frame, back to front: committed shapes,
/// then the overlay image, then the shape being drawn.
///
/// A shape or overlay under an active drag is shown at its dragged geometry.
pub fn build_display_list(ctx: &RenderContext) -> Vec<RenderItem> {
    let canvas = ctx.canvas;
    let draggable = !canvas.is_drawing();
    let dragged = ctx.gestures.and_then(|g| g.manipulation_preview(canvas));

    let mut items: Vec<RenderItem> = canvas
        .shapes_ordered()
        .map(|shape| {
            let shape = match &dragged {
                Some(d) if d.id() == shape.id() => d,
                _ => shape,
            };
            let selected = canvas.is_selected(shape.id());
            RenderItem::Shape(shape_item(shape, ItemSource::Shape(shape.id()), selected, draggable))
        })
        .collect();

    let overlay = canvas.overlay();
    let dragged_image = ctx.gestures.and_then(|g| g.overlay_preview(canvas));
    if let Some(image) = dragged_image.as_ref().or(overlay.image()) {
        items.push(RenderItem::Image(image_item(image, overlay.is_selected(), draggable)));
    }

    if let Some(preview) = ctx.gestures.and_then(|g| g.preview()) {
        items.push(RenderItem::Shape(shape_item(preview, ItemSource::Preview, false, false)));
    }

    log::trace!("Display list has {} items", items.len());
    items
}

fn shape_item(shape: &Shape, source: ItemSource, selected: bool, draggable: bool) -> ShapeItem {
    ShapeItem {
        source,
        kind: shape.kind(),
        path: shape.to_path(),
        style: shape.style().clone(),
        selected,
        draggable,
        handles: if selected { get_handles(shape) } else { Vec::new() },
    }
}

fn image_item(image: &OverlayImage, selected: bool, draggable: bool) -> ImageItem {
    ImageItem {
        href: image.preview_uri().to_string(),
        frame: image.bounds(),
        transform: image.rotation_affine(),
        selected,
        draggable,
        handles: if selected {
            frame_handles(image.bounds(), image.rotation, true)
        } else {
            Vec::new()
        },
    }
}
