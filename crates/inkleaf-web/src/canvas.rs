//! 2D-canvas [`LeafSurface`].

use std::f64::consts::TAU;

use inkleaf_core::leaves::{LeafPaint, LeafSurface};
use wasm_bindgen::JsCast;
use web_sys::{CanvasRenderingContext2d, Document, HtmlCanvasElement};

use crate::platform::SetupError;

pub const LEAVES_CANVAS_ID: &str = "leavesCanvas";

pub struct CanvasSurface {
    canvas: HtmlCanvasElement,
    context: CanvasRenderingContext2d,
}

impl CanvasSurface {
    pub fn from_document(document: &Document) -> Result<Self, SetupError> {
        let canvas = document
            .get_element_by_id(LEAVES_CANVAS_ID)
            .and_then(|el| el.dyn_into::<HtmlCanvasElement>().ok())
            .ok_or(SetupError::MissingElement("#leavesCanvas"))?;
        let context = canvas
            .get_context("2d")
            .ok()
            .flatten()
            .and_then(|ctx| ctx.dyn_into::<CanvasRenderingContext2d>().ok())
            .ok_or(SetupError::NoCanvasContext)?;
        Ok(Self { canvas, context })
    }

    /// Match the backing store to the viewport.
    pub fn fit(&self, width: f64, height: f64) {
        self.canvas.set_width(width.max(0.0) as u32);
        self.canvas.set_height(height.max(0.0) as u32);
    }
}

impl LeafSurface for CanvasSurface {
    fn clear(&mut self, width: f64, height: f64) {
        self.context.clear_rect(0.0, 0.0, width, height);
    }

    fn paint(&mut self, leaf: &LeafPaint) {
        let ctx = &self.context;
        let color = format!("rgb({}, {}, {})", leaf.color.r, leaf.color.g, leaf.color.b);

        ctx.save();
        let _ = ctx.translate(leaf.x, leaf.y);
        let _ = ctx.rotate(leaf.rotation_rad);
        ctx.set_global_alpha(leaf.alpha);

        ctx.set_fill_style_str(&color);
        ctx.begin_path();
        let _ = ctx.ellipse(0.0, 0.0, leaf.radius_x, leaf.radius_y, 0.0, 0.0, TAU);
        ctx.fill();

        if let Some(stem_len) = leaf.stem_len {
            ctx.set_stroke_style_str(&color);
            ctx.set_line_width(1.0);
            ctx.begin_path();
            ctx.move_to(0.0, leaf.radius_y);
            ctx.line_to(0.0, leaf.radius_y + stem_len);
            ctx.stroke();
        }

        ctx.restore();
    }
}
