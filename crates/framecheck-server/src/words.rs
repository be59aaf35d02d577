//! Word list and batch selection.

use rand::Rng;

/// Words the server draws from
pub const WORDS: &[&str] = &[
    "anchor", "basalt", "cinder", "dune", "ember", "fjord", "glacier", "harbor", "isthmus", "juniper",
    "kelp", "lagoon", "meadow", "nebula", "orchard", "prairie", "quartz", "ravine", "summit", "tundra",
    "umber", "valley", "willow", "xenon", "yarrow", "zephyr",
];

/// Pick between `min` and `max` words (inclusive), with repetition.
///
/// `min <= max` is checked by [`crate::ServerConfig::validate`].
pub fn pick_words<R: Rng>(rng: &mut R, min: usize, max: usize) -> Vec<&'static str> {
    debug_assert!(min <= max);

    let count = rng.gen_range(min..=max);
    (0..count).map(|_| WORDS[rng.gen_range(0..WORDS.len())]).collect()
}
