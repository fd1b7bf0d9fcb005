use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use crate::domain::secret::draw_secret;

#[test]
fn drawn_secret_links_to_the_configured_base() {
    let mut rng = ChaCha8Rng::seed_from_u64(3);
    let secret = draw_secret(&mut rng, "https://chars.example/");

    assert!(!secret.name.is_empty());
    assert!(secret.url.starts_with("https://chars.example/"));
    assert!(secret.url.len() > "https://chars.example/".len());
}

#[test]
fn draw_is_seed_deterministic() {
    let a = draw_secret(&mut ChaCha8Rng::seed_from_u64(9), "base/");
    let b = draw_secret(&mut ChaCha8Rng::seed_from_u64(9), "base/");
    assert_eq!(a, b);
}
