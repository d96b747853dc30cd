//! Recorded output of known seeds. The files were produced by the `srand`
//! based generator this crate's `AdditiveRng` reproduces.

use maze::{generate, AdditiveRng, GlyphStyle, MazeConfig, Renderer};

fn render(width: usize, height: usize, seed: u32) -> String {
    let config = MazeConfig::new(width, height).unwrap();
    let grid = generate(&config, &mut AdditiveRng::new(seed));
    Renderer::new(GlyphStyle::Rounded).render(&grid)
}

#[test]
fn default_size_seed_1() {
    assert_eq!(render(30, 20, 1), include_str!("golden/30x20_seed_1.txt"));
}

#[test]
fn default_size_seed_42() {
    assert_eq!(render(30, 20, 42), include_str!("golden/30x20_seed_42.txt"));
}

#[test]
fn small_seed_7() {
    assert_eq!(render(12, 6, 7), include_str!("golden/12x6_seed_7.txt"));
}

#[test]
fn seed_zero_is_seed_one() {
    assert_eq!(render(30, 20, 0), include_str!("golden/30x20_seed_1.txt"));
}
