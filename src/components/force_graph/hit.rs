use super::types::Vec2;

pub const HIT_RADIUS: f64 = 15.0;

/// First node, in sequence order, whose centre lies within `radius` of `world`.
pub fn node_at(positions: &[Vec2], world: Vec2, radius: f64) -> Option<usize> {
	let radius_sq = radius * radius;
	positions
		.iter()
		.position(|p| (*p - world).length_sq() <= radius_sq)
}
