//! A small built-in catalogue standing in for the document store, and the
//! shaping that turns it into graph input for each view.

use std::collections::{BTreeMap, HashMap};

use crate::components::force_graph::{GraphData, GraphLink, GraphNode, NodeKind, Seeding};

pub struct Movie {
	pub id: &'static str,
	pub title: &'static str,
	pub year: u16,
	pub directors: &'static [&'static str],
	pub cast: &'static [&'static str],
}

pub struct Person {
	pub id: &'static str,
	pub name: &'static str,
}

pub const MOVIES: &[Movie] = &[
	Movie {
		id: "parasite",
		title: "Parasite",
		year: 2019,
		directors: &["bong"],
		cast: &["song", "choi-ws", "park-sd", "lee-sk"],
	},
	Movie {
		id: "memories-of-murder",
		title: "Memories of Murder",
		year: 2003,
		directors: &["bong"],
		cast: &["song", "kim-sk"],
	},
	Movie {
		id: "the-host",
		title: "The Host",
		year: 2006,
		directors: &["bong"],
		cast: &["song", "bae", "park-hi"],
	},
	Movie {
		id: "snowpiercer",
		title: "Snowpiercer",
		year: 2013,
		directors: &["bong"],
		cast: &["evans", "song", "swinton"],
	},
	Movie {
		id: "okja",
		title: "Okja",
		year: 2017,
		directors: &["bong"],
		cast: &["swinton", "ahn", "choi-ws"],
	},
	Movie {
		id: "oldboy",
		title: "Oldboy",
		year: 2003,
		directors: &["park-cw"],
		cast: &["choi-ms", "yoo"],
	},
	Movie {
		id: "the-handmaiden",
		title: "The Handmaiden",
		year: 2016,
		directors: &["park-cw"],
		cast: &["kim-mh", "kim-tr"],
	},
	Movie {
		id: "unforgiven",
		title: "Unforgiven",
		year: 1992,
		directors: &["eastwood"],
		cast: &["eastwood", "hackman", "freeman"],
	},
	Movie {
		id: "million-dollar-baby",
		title: "Million Dollar Baby",
		year: 2004,
		directors: &["eastwood"],
		cast: &["eastwood", "swank", "freeman"],
	},
	Movie {
		id: "the-grand-budapest-hotel",
		title: "The Grand Budapest Hotel",
		year: 2014,
		directors: &["anderson"],
		cast: &["fiennes", "swinton", "goldblum"],
	},
];

pub const PEOPLE: &[Person] = &[
	Person { id: "bong", name: "Bong Joon-ho" },
	Person { id: "song", name: "Song Kang-ho" },
	Person { id: "choi-ws", name: "Choi Woo-shik" },
	Person { id: "park-sd", name: "Park So-dam" },
	Person { id: "lee-sk", name: "Lee Sun-kyun" },
	Person { id: "kim-sk", name: "Kim Sang-kyung" },
	Person { id: "bae", name: "Bae Doona" },
	Person { id: "park-hi", name: "Park Hae-il" },
	Person { id: "evans", name: "Chris Evans" },
	Person { id: "swinton", name: "Tilda Swinton" },
	Person { id: "ahn", name: "Ahn Seo-hyun" },
	Person { id: "park-cw", name: "Park Chan-wook" },
	Person { id: "choi-ms", name: "Choi Min-sik" },
	Person { id: "yoo", name: "Yoo Ji-tae" },
	Person { id: "kim-mh", name: "Kim Min-hee" },
	Person { id: "kim-tr", name: "Kim Tae-ri" },
	Person { id: "eastwood", name: "Clint Eastwood" },
	Person { id: "hackman", name: "Gene Hackman" },
	Person { id: "freeman", name: "Morgan Freeman" },
	Person { id: "swank", name: "Hilary Swank" },
	Person { id: "anderson", name: "Wes Anderson" },
	Person { id: "fiennes", name: "Ralph Fiennes" },
	Person { id: "goldblum", name: "Jeff Goldblum" },
];

/// How many other films of the same people an ego network pulls in.
const RELATED_MOVIES: usize = 4;

pub fn movie(id: &str) -> Option<&'static Movie> {
	MOVIES.iter().find(|m| m.id == id)
}

pub fn person_name(id: &str) -> &'static str {
	PEOPLE
		.iter()
		.find(|p| p.id == id)
		.map(|p| p.name)
		.unwrap_or("Unknown")
}

pub fn is_movie(id: &str) -> bool {
	movie(id).is_some()
}

fn movie_label(m: &Movie) -> String {
	format!("{} ({})", m.title, m.year)
}

/// Credits of one person inside one movie.
fn credit_kind(m: &Movie, person: &str) -> Option<NodeKind> {
	let acted = m.cast.iter().any(|p| *p == person);
	let directed = m.directors.iter().any(|p| *p == person);
	match (acted, directed) {
		(true, true) => Some(NodeKind::ActorDirector),
		(true, false) => Some(NodeKind::Actor),
		(false, true) => Some(NodeKind::Director),
		(false, false) => None,
	}
}

/// Everyone credited on a film, once each, directors first.
fn credits(m: &Movie) -> Vec<&'static str> {
	let mut people: Vec<&'static str> = Vec::new();
	for &person in m.directors.iter().chain(m.cast.iter()) {
		if !people.contains(&person) {
			people.push(person);
		}
	}
	people
}

/// Number of films each person is credited on across the catalogue.
fn appearance_counts() -> HashMap<&'static str, usize> {
	let mut counts = HashMap::new();
	for m in MOVIES {
		for person in credits(m) {
			*counts.entry(person).or_insert(0) += 1;
		}
	}
	counts
}

/// A movie at the centre, its cast and crew around it, and a few other films
/// those people worked on.
pub fn movie_graph(movie_id: &str) -> GraphData {
	let Some(center) = movie(movie_id) else {
		return GraphData::default();
	};
	let counts = appearance_counts();
	let mut nodes = vec![GraphNode::movie(center.id, movie_label(center)).with_weight(3.0)];
	let mut links = Vec::new();
	let mut people: BTreeMap<&str, NodeKind> = BTreeMap::new();

	for person in credits(center) {
		if let Some(kind) = credit_kind(center, person) {
			people.insert(person, kind);
		}
	}
	for (&person, &kind) in &people {
		let weight = counts.get(person).copied().unwrap_or(1) as f64;
		nodes.push(GraphNode::new(person, person_name(person), kind).with_weight(weight));
		links.push(GraphLink::new(center.id, person));
	}

	let related = MOVIES
		.iter()
		.filter(|m| m.id != center.id)
		.filter(|m| credits(m).iter().any(|p| people.contains_key(p)))
		.take(RELATED_MOVIES);
	for m in related {
		nodes.push(GraphNode::movie(m.id, movie_label(m)).with_weight(1.0));
		for person in credits(m) {
			if people.contains_key(person) {
				links.push(GraphLink::new(m.id, person));
			}
		}
	}

	GraphData {
		nodes,
		links,
		seed: Seeding::Ring { radius: 150.0 },
	}
}

/// A person at the centre linked to every film they are credited on.
pub fn person_graph(person_id: &str) -> GraphData {
	let films: Vec<&Movie> = MOVIES
		.iter()
		.filter(|m| credits(m).iter().any(|p| *p == person_id))
		.collect();
	if films.is_empty() {
		return GraphData::default();
	}
	let kind = films
		.iter()
		.filter_map(|m| credit_kind(m, person_id))
		.reduce(NodeKind::merge)
		.unwrap_or(NodeKind::Actor);

	let mut nodes =
		vec![GraphNode::new(person_id, person_name(person_id), kind).with_weight(films.len() as f64)];
	let mut links = Vec::new();
	for m in &films {
		let weight = credits(m).len() as f64;
		nodes.push(GraphNode::movie(m.id, movie_label(m)).with_weight(weight));
		links.push(GraphLink::new(person_id, m.id));
	}
	GraphData {
		nodes,
		links,
		seed: Seeding::Ring { radius: 140.0 },
	}
}

/// Every person in the catalogue, linked when they share a film.
pub fn collaboration_graph() -> GraphData {
	let counts = appearance_counts();
	let mut kinds: BTreeMap<&str, NodeKind> = BTreeMap::new();
	let mut pairs: Vec<(&str, &str)> = Vec::new();
	for m in MOVIES {
		let members = credits(m);
		for &person in &members {
			if let Some(kind) = credit_kind(m, person) {
				kinds
					.entry(person)
					.and_modify(|k| *k = k.merge(kind))
					.or_insert(kind);
			}
		}
		for (i, a) in members.iter().enumerate() {
			for b in &members[i + 1..] {
				let pair = if a < b { (*a, *b) } else { (*b, *a) };
				if !pairs.contains(&pair) {
					pairs.push(pair);
				}
			}
		}
	}

	let nodes = kinds
		.iter()
		.map(|(&id, &kind)| {
			let weight = counts.get(id).copied().unwrap_or(1) as f64;
			GraphNode::new(id, person_name(id), kind).with_weight(weight)
		})
		.collect();
	let links = pairs.into_iter().map(|(a, b)| GraphLink::new(a, b)).collect();
	GraphData {
		nodes,
		links,
		seed: Seeding::Jitter,
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::components::force_graph::Graph;

	fn kind_of(data: &GraphData, id: &str) -> Option<NodeKind> {
		data.nodes.iter().find(|n| n.id == id).map(|n| n.kind)
	}

	#[test]
	fn every_credit_refers_to_a_known_person() {
		for m in MOVIES {
			for person in credits(m) {
				assert_ne!(person_name(person), "Unknown", "{person} in {}", m.id);
			}
		}
	}

	#[test]
	fn movie_graph_centers_on_movie() {
		let data = movie_graph("parasite");
		assert_eq!(data.nodes[0].id, "parasite");
		assert_eq!(kind_of(&data, "bong"), Some(NodeKind::Director));
		assert_eq!(kind_of(&data, "song"), Some(NodeKind::Actor));
		assert!(kind_of(&data, "memories-of-murder").is_some());
		let related = data.nodes.iter().filter(|n| n.kind == NodeKind::Movie).count();
		assert_eq!(related, 1 + RELATED_MOVIES);
	}

	#[test]
	fn shaped_graphs_have_no_dangling_links() {
		for data in [movie_graph("okja"), person_graph("swinton"), collaboration_graph()] {
			let graph = Graph::build(&data);
			assert_eq!(graph.links().len(), data.links.len());
		}
	}

	#[test]
	fn actor_director_becomes_composite() {
		assert_eq!(kind_of(&movie_graph("unforgiven"), "eastwood"), Some(NodeKind::ActorDirector));
		assert_eq!(kind_of(&person_graph("eastwood"), "eastwood"), Some(NodeKind::ActorDirector));
		assert_eq!(kind_of(&collaboration_graph(), "eastwood"), Some(NodeKind::ActorDirector));
		assert_eq!(kind_of(&collaboration_graph(), "bong"), Some(NodeKind::Director));
	}

	#[test]
	fn unknown_ids_give_empty_graphs() {
		assert!(movie_graph("nope").nodes.is_empty());
		assert!(person_graph("nope").nodes.is_empty());
	}

	#[test]
	fn person_graph_links_each_film() {
		let data = person_graph("song");
		assert_eq!(data.links.len(), 4);
		assert_eq!(data.nodes[0].weight, 4.0);
	}
}
