use std::f64::consts::PI;

use web_sys::CanvasRenderingContext2d;

use super::error::CanvasError;
use super::label::{line_offsets, wrap_label};
use super::state::ForceGraphState;
use super::style::{LabelPlacement, NodeAppearance, link_alpha, node_appearance, with_alpha};

/// Redraws the whole frame. Drawing is the only side effect, so calling this
/// more often than needed is harmless.
pub fn render(state: &ForceGraphState, ctx: &CanvasRenderingContext2d) -> Result<(), CanvasError> {
	let metrics = state.metrics();
	let style = &state.config().style;
	ctx.set_fill_style_str(&style.background);
	ctx.fill_rect(0.0, 0.0, metrics.width, metrics.height);

	ctx.save();
	let camera = state.camera();
	let drawn = ctx
		.translate(camera.offset.x, camera.offset.y)
		.and_then(|_| ctx.scale(camera.zoom, camera.zoom))
		.map_err(CanvasError::from)
		.and_then(|_| {
			draw_links(state, ctx);
			draw_nodes(state, ctx)
		});
	ctx.restore();
	drawn
}

fn draw_links(state: &ForceGraphState, ctx: &CanvasRenderingContext2d) {
	let positions = state.positions();
	let highlight = state.highlight();
	let style = &state.config().style;
	ctx.set_line_width(style.link_width / state.camera().zoom);

	for &(src, tgt) in state.graph().links() {
		let (Some(a), Some(b)) = (positions.get(src), positions.get(tgt)) else {
			continue;
		};
		let alpha = link_alpha(highlight, src, tgt, style);
		ctx.set_stroke_style_str(&format!("rgba(255, 255, 255, {alpha})"));
		ctx.begin_path();
		ctx.move_to(a.x, a.y);
		ctx.line_to(b.x, b.y);
		ctx.stroke();
	}
}

fn draw_nodes(state: &ForceGraphState, ctx: &CanvasRenderingContext2d) -> Result<(), CanvasError> {
	let graph = state.graph();
	let highlight = state.highlight();
	let style = &state.config().style;
	let zoom = state.camera().zoom;

	// Dimmed nodes first so the highlighted neighbourhood sits on top.
	let (dimmed, related): (Vec<usize>, Vec<usize>) = (0..graph.len())
		.partition(|&idx| !highlight.is_related(idx) && !state.is_emphasized(idx));

	for idx in dimmed.into_iter().chain(related) {
		let Some(pos) = state.positions().get(idx).copied() else {
			continue;
		};
		let Some(node) = graph.node(idx) else {
			continue;
		};
		let look = node_appearance(graph, idx, state.is_emphasized(idx), highlight, zoom, style);
		let color = node.kind.color();

		if let Some(glow) = look.glow {
			draw_glow(ctx, pos.x, pos.y, &look, glow, color, style.glow_alpha)?;
		}

		ctx.set_global_alpha(look.alpha);
		ctx.begin_path();
		ctx.arc(pos.x, pos.y, look.radius, 0.0, 2.0 * PI)?;
		ctx.set_fill_style_str(color);
		ctx.fill();
		ctx.set_global_alpha(1.0);

		if look.show_label {
			draw_label(state, ctx, &node.label, pos.x, pos.y, &look);
		}
	}
	Ok(())
}

fn draw_glow(
	ctx: &CanvasRenderingContext2d,
	x: f64,
	y: f64,
	look: &NodeAppearance,
	glow: f64,
	color: &str,
	alpha: f64,
) -> Result<(), CanvasError> {
	let gradient = ctx.create_radial_gradient(x, y, look.radius * 0.5, x, y, glow)?;
	gradient.add_color_stop(0.0, &with_alpha(color, alpha))?;
	gradient.add_color_stop(1.0, &with_alpha(color, 0.0))?;
	ctx.begin_path();
	ctx.arc(x, y, glow, 0.0, 2.0 * PI)?;
	ctx.set_fill_style_canvas_gradient(&gradient);
	ctx.fill();
	Ok(())
}

fn draw_label(
	state: &ForceGraphState,
	ctx: &CanvasRenderingContext2d,
	text: &str,
	x: f64,
	y: f64,
	look: &NodeAppearance,
) {
	let style = &state.config().style;
	let zoom = state.camera().zoom;
	// Labels keep a constant on-screen size regardless of zoom.
	let font_px = style.font_px / zoom;
	let line_height = style.line_height / zoom;
	ctx.set_font(&format!("{font_px}px sans-serif"));
	ctx.set_text_align("center");
	ctx.set_text_baseline("middle");

	let max_width = style.max_label_width / zoom;
	let lines = wrap_label(text, max_width, |s| {
		ctx.measure_text(s)
			.map(|m| m.width())
			.unwrap_or(s.chars().count() as f64 * font_px * 0.6)
	});

	let anchor_y = match style.label_placement {
		LabelPlacement::Below => {
			y + look.radius + 4.0 / zoom + line_height * lines.len() as f64 / 2.0
		}
		LabelPlacement::Centered => y,
	};
	ctx.set_fill_style_str(&format!("rgba(255, 255, 255, {})", look.alpha * 0.9));
	for (line, offset) in lines.iter().zip(line_offsets(lines.len(), line_height)) {
		let _ = ctx.fill_text(line, x, anchor_y + offset);
	}
}
