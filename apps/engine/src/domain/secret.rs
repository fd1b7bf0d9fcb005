//! The shared secret: a character all socials know and the impostor must
//! bluff about.

use rand::Rng;
use serde::Serialize;

/// The secret handed to every social player.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Secret {
    pub name: String,
    /// Character sheet link shown alongside the role reveal.
    pub url: String,
}

/// Draw a secret uniformly from the built-in catalogue. `base_url` prefixes
/// the entry's slug to form the character sheet link.
pub fn draw_secret<R: Rng + ?Sized>(rng: &mut R, base_url: &str) -> Secret {
    let (name, slug) = CATALOGUE[rng.random_range(0..CATALOGUE.len())];
    Secret {
        name: name.to_string(),
        url: format!("{base_url}{slug}"),
    }
}

const CATALOGUE: &[(&str, &str)] = &[
    ("Naruto Uzumaki", "naruto-uzumaki"),
    ("Sasuke Uchiha", "sasuke-uchiha"),
    ("Sakura Haruno", "sakura-haruno"),
    ("Kakashi Hatake", "kakashi-hatake"),
    ("Itachi Uchiha", "itachi-uchiha"),
    ("Gaara", "gaara"),
    ("Hinata Hyuga", "hinata-hyuga"),
    ("Jiraiya", "jiraiya"),
    ("Minato Namikaze", "minato-namikaze"),
    ("Madara Uchiha", "madara-uchiha"),
    ("Son Goku", "son-goku"),
    ("Vegeta", "vegeta"),
    ("Gohan", "gohan"),
    ("Piccolo", "piccolo"),
    ("Krillin", "krillin"),
    ("Trunks", "trunks"),
    ("Frieza", "frieza"),
    ("Cell", "cell"),
    ("Majin Buu", "majin-buu"),
    ("Bulma", "bulma"),
    ("Monkey D. Luffy", "monkey-d-luffy"),
    ("Roronoa Zoro", "roronoa-zoro"),
    ("Nami", "nami"),
    ("Usopp", "usopp"),
    ("Sanji", "sanji"),
    ("Tony Tony Chopper", "tony-tony-chopper"),
];
