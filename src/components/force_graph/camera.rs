use super::types::Vec2;

#[derive(Clone, Debug, PartialEq)]
pub struct CameraLimits {
	pub min_zoom: f64,
	pub max_zoom: f64,
	/// Multiplier used by the zoom buttons.
	pub step: f64,
	/// Multiplier applied per wheel notch.
	pub wheel_step: f64,
}

impl Default for CameraLimits {
	fn default() -> Self {
		Self {
			min_zoom: 0.5,
			max_zoom: 3.0,
			step: 1.2,
			wheel_step: 1.1,
		}
	}
}

/// Where the canvas sits on the page and how large its backing store is.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CanvasMetrics {
	pub left: f64,
	pub top: f64,
	pub css_width: f64,
	pub css_height: f64,
	pub width: f64,
	pub height: f64,
}

impl CanvasMetrics {
	/// A canvas at the page origin whose CSS size equals its pixel size.
	#[cfg(test)]
	pub fn unscaled(width: f64, height: f64) -> Self {
		Self {
			left: 0.0,
			top: 0.0,
			css_width: width,
			css_height: height,
			width,
			height,
		}
	}

	/// Device pixels per CSS pixel on each axis.
	pub fn ratio(&self) -> Vec2 {
		let axis = |px: f64, css: f64| if css > 0.0 { px / css } else { 1.0 };
		Vec2::new(axis(self.width, self.css_width), axis(self.height, self.css_height))
	}

	/// Page coordinates to canvas pixels.
	pub fn to_local(&self, client: Vec2) -> Vec2 {
		let ratio = self.ratio();
		let css = client - Vec2::new(self.left, self.top);
		Vec2::new(css.x * ratio.x, css.y * ratio.y)
	}

	pub fn center(&self) -> Vec2 {
		Vec2::new(self.width / 2.0, self.height / 2.0)
	}
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Bounds {
	pub min: Vec2,
	pub max: Vec2,
}

impl Bounds {
	pub fn around<'a>(points: impl IntoIterator<Item = &'a Vec2>) -> Option<Self> {
		let mut iter = points.into_iter();
		let first = *iter.next()?;
		Some(iter.fold(Bounds { min: first, max: first }, |b, p| Bounds {
			min: Vec2::new(b.min.x.min(p.x), b.min.y.min(p.y)),
			max: Vec2::new(b.max.x.max(p.x), b.max.y.max(p.y)),
		}))
	}

	pub fn center(&self) -> Vec2 {
		(self.min + self.max) / 2.0
	}

	pub fn size(&self) -> Vec2 {
		self.max - self.min
	}
}

#[derive(Clone, Debug, PartialEq)]
struct Tween {
	from_zoom: f64,
	from_offset: Vec2,
	to_zoom: f64,
	to_offset: Vec2,
	start: f64,
	duration: f64,
}

fn ease_in_out_cubic(t: f64) -> f64 {
	if t < 0.5 {
		4.0 * t * t * t
	} else {
		1.0 - (-2.0 * t + 2.0).powi(3) / 2.0
	}
}

/// Pan/zoom transform: `screen = world * zoom + offset`.
#[derive(Clone, Debug, PartialEq)]
pub struct Camera {
	pub zoom: f64,
	pub offset: Vec2,
	limits: CameraLimits,
	tween: Option<Tween>,
}

impl Default for Camera {
	fn default() -> Self {
		Self::new(CameraLimits::default())
	}
}

impl Camera {
	pub fn new(limits: CameraLimits) -> Self {
		Self {
			zoom: 1.0,
			offset: Vec2::ZERO,
			limits,
			tween: None,
		}
	}

	pub fn limits(&self) -> &CameraLimits {
		&self.limits
	}

	pub fn local_to_world(&self, local: Vec2) -> Vec2 {
		(local - self.offset) / self.zoom
	}

	pub fn screen_to_world(&self, metrics: &CanvasMetrics, client: Vec2) -> Vec2 {
		self.local_to_world(metrics.to_local(client))
	}

	#[cfg(test)]
	pub fn world_to_local(&self, world: Vec2) -> Vec2 {
		world * self.zoom + self.offset
	}

	fn clamp_zoom(&self, zoom: f64) -> f64 {
		zoom.clamp(self.limits.min_zoom, self.limits.max_zoom)
	}

	/// Zooms keeping the world point under `anchor` (canvas pixels) fixed.
	pub fn zoom_at(&mut self, factor: f64, anchor: Vec2) {
		self.tween = None;
		let world = self.local_to_world(anchor);
		self.zoom = self.clamp_zoom(self.zoom * factor);
		self.offset = anchor - world * self.zoom;
	}

	/// Zooms around the centre of the viewport.
	pub fn apply_zoom(&mut self, factor: f64, metrics: &CanvasMetrics) {
		self.zoom_at(factor, metrics.center());
	}

	pub fn zoom_in(&mut self, metrics: &CanvasMetrics) {
		self.apply_zoom(self.limits.step, metrics);
	}

	pub fn zoom_out(&mut self, metrics: &CanvasMetrics) {
		self.apply_zoom(1.0 / self.limits.step, metrics);
	}

	pub fn pan(&mut self, delta: Vec2) {
		self.tween = None;
		self.offset += delta;
	}

	pub fn reset_view(&mut self) {
		self.tween = None;
		self.zoom = 1.0;
		self.offset = Vec2::ZERO;
	}

	/// Frames `bounds` (plus `padding` canvas pixels on each side), animated
	/// over `duration_ms` starting at `now`.
	pub fn zoom_to_fit(
		&mut self,
		bounds: Bounds,
		padding: f64,
		duration_ms: f64,
		metrics: &CanvasMetrics,
		now: f64,
	) {
		let size = bounds.size();
		let avail = Vec2::new(
			(metrics.width - 2.0 * padding).max(1.0),
			(metrics.height - 2.0 * padding).max(1.0),
		);
		let fit = match (size.x > f64::EPSILON, size.y > f64::EPSILON) {
			(true, true) => (avail.x / size.x).min(avail.y / size.y),
			(true, false) => avail.x / size.x,
			(false, true) => avail.y / size.y,
			(false, false) => self.limits.max_zoom,
		};
		let to_zoom = self.clamp_zoom(fit);
		let to_offset = metrics.center() - bounds.center() * to_zoom;

		if duration_ms <= 0.0 {
			self.tween = None;
			self.zoom = to_zoom;
			self.offset = to_offset;
			return;
		}
		self.tween = Some(Tween {
			from_zoom: self.zoom,
			from_offset: self.offset,
			to_zoom,
			to_offset,
			start: now,
			duration: duration_ms,
		});
	}

	#[cfg(test)]
	pub fn is_animating(&self) -> bool {
		self.tween.is_some()
	}

	/// Moves an active fit animation forward to `now`.
	pub fn advance(&mut self, now: f64) {
		let Some(tween) = &self.tween else {
			return;
		};
		let t = ((now - tween.start) / tween.duration).clamp(0.0, 1.0);
		let e = ease_in_out_cubic(t);
		self.zoom = tween.from_zoom + (tween.to_zoom - tween.from_zoom) * e;
		self.offset = tween.from_offset + (tween.to_offset - tween.from_offset) * e;
		if t >= 1.0 {
			self.tween = None;
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn close(a: Vec2, b: Vec2) -> bool {
		(a - b).length() < 1e-9
	}

	#[test]
	fn zoom_round_trip_restores_camera() {
		let metrics = CanvasMetrics::unscaled(800.0, 600.0);
		let mut camera = Camera::default();
		camera.offset = Vec2::new(37.0, -12.0);
		let (zoom, offset) = (camera.zoom, camera.offset);
		camera.apply_zoom(1.2, &metrics);
		camera.apply_zoom(1.0 / 1.2, &metrics);
		assert!((camera.zoom - zoom).abs() < 1e-12);
		assert!(close(camera.offset, offset));
	}

	#[test]
	fn zoom_keeps_viewport_center_fixed() {
		let metrics = CanvasMetrics::unscaled(800.0, 600.0);
		let mut camera = Camera::default();
		camera.offset = Vec2::new(100.0, 50.0);
		let before = camera.local_to_world(metrics.center());
		camera.zoom_in(&metrics);
		assert!(close(camera.local_to_world(metrics.center()), before));
	}

	#[test]
	fn zoom_is_clamped() {
		let metrics = CanvasMetrics::unscaled(800.0, 600.0);
		let mut camera = Camera::default();
		for _ in 0..50 {
			camera.zoom_in(&metrics);
		}
		assert_eq!(camera.zoom, 3.0);
		for _ in 0..50 {
			camera.zoom_out(&metrics);
		}
		assert_eq!(camera.zoom, 0.5);
	}

	#[test]
	fn wheel_zoom_anchors_at_cursor() {
		let mut camera = Camera::default();
		let cursor = Vec2::new(120.0, 80.0);
		let before = camera.local_to_world(cursor);
		camera.zoom_at(1.1, cursor);
		assert!(close(camera.local_to_world(cursor), before));
	}

	#[test]
	fn screen_to_world_corrects_css_scaling() {
		let metrics = CanvasMetrics {
			left: 10.0,
			top: 20.0,
			css_width: 400.0,
			css_height: 300.0,
			width: 800.0,
			height: 600.0,
		};
		let mut camera = Camera::default();
		camera.zoom = 2.0;
		camera.offset = Vec2::new(100.0, 0.0);
		// (60 - 10) * 2 = 100 local px, minus offset -> 0 world x.
		let world = camera.screen_to_world(&metrics, Vec2::new(60.0, 70.0));
		assert!(close(world, Vec2::new(0.0, 50.0)));
	}

	#[test]
	fn pan_moves_offset_by_raw_delta() {
		let mut camera = Camera::default();
		camera.zoom = 2.0;
		camera.pan(Vec2::new(5.0, -3.0));
		assert_eq!(camera.offset, Vec2::new(5.0, -3.0));
	}

	#[test]
	fn instant_fit_centers_bounds() {
		let metrics = CanvasMetrics::unscaled(800.0, 600.0);
		let mut camera = Camera::default();
		let bounds = Bounds {
			min: Vec2::new(0.0, 0.0),
			max: Vec2::new(200.0, 100.0),
		};
		camera.zoom_to_fit(bounds, 50.0, 0.0, &metrics, 0.0);
		assert_eq!(camera.zoom, 3.0);
		assert!(close(camera.world_to_local(bounds.center()), metrics.center()));
	}

	#[test]
	fn animated_fit_reaches_target_and_stops() {
		let metrics = CanvasMetrics::unscaled(800.0, 600.0);
		let mut camera = Camera::default();
		let bounds = Bounds {
			min: Vec2::new(-400.0, -200.0),
			max: Vec2::new(400.0, 200.0),
		};
		camera.zoom_to_fit(bounds, 100.0, 500.0, &metrics, 1000.0);
		assert!(camera.is_animating());
		camera.advance(1250.0);
		assert!(camera.zoom < 1.0 && camera.zoom > 0.75);
		camera.advance(1500.0);
		assert!(!camera.is_animating());
		assert!((camera.zoom - 0.75).abs() < 1e-12);
		assert!(close(camera.offset, Vec2::new(400.0, 300.0)));
	}

	#[test]
	fn manual_pan_cancels_fit_animation() {
		let metrics = CanvasMetrics::unscaled(800.0, 600.0);
		let mut camera = Camera::default();
		let bounds = Bounds {
			min: Vec2::ZERO,
			max: Vec2::new(10.0, 10.0),
		};
		camera.zoom_to_fit(bounds, 0.0, 300.0, &metrics, 0.0);
		camera.pan(Vec2::new(1.0, 1.0));
		assert!(!camera.is_animating());
	}

	#[test]
	fn reset_view_restores_defaults() {
		let mut camera = Camera::default();
		camera.zoom = 2.5;
		camera.offset = Vec2::new(9.0, 9.0);
		camera.reset_view();
		assert_eq!(camera.zoom, 1.0);
		assert_eq!(camera.offset, Vec2::ZERO);
	}
}
