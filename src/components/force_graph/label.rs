/// Greedy word wrap. `measure` returns the rendered width of a string.
///
/// A single word wider than `max_width` gets a line of its own rather than
/// being split.
pub fn wrap_label(text: &str, max_width: f64, measure: impl Fn(&str) -> f64) -> Vec<String> {
	let mut lines = Vec::new();
	let mut current = String::new();
	for word in text.split_whitespace() {
		if current.is_empty() {
			current.push_str(word);
			continue;
		}
		let candidate = format!("{current} {word}");
		if measure(&candidate) > max_width {
			lines.push(std::mem::replace(&mut current, word.to_string()));
		} else {
			current = candidate;
		}
	}
	if !current.is_empty() {
		lines.push(current);
	}
	lines
}

/// Baseline offsets that centre `count` lines as a block on the anchor.
pub fn line_offsets(count: usize, line_height: f64) -> Vec<f64> {
	let first = -(count.saturating_sub(1) as f64) * line_height / 2.0;
	(0..count).map(|i| first + i as f64 * line_height).collect()
}
