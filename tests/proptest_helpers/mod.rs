#![allow(dead_code)]

use std::collections::{BTreeMap, BTreeSet};

use kvadrat::raster::{Color, Coordinate};
use kvadrat::{Document, Element};
use proptest::prelude::*;
use proptest::strategy::BoxedStrategy;
use proptest::test_runner::{Config as ProptestConfig, FileFailurePersistence};

pub const EPS_AREA: f64 = 1e-6;

pub fn proptest_config() -> ProptestConfig {
    let cases = std::env::var("PROPTEST_CASES")
        .ok()
        .and_then(|v| v.parse::<u32>().ok())
        .unwrap_or(64);

    let mut config = ProptestConfig::with_failure_persistence(FileFailurePersistence::WithSource(
        "proptest-regressions",
    ));
    config.cases = cases;
    config.max_shrink_iters = 1024;
    config
}

/// A fixed palette: index 0 is transparent, the rest opaque and distinct.
pub fn palette(size: usize) -> Vec<Color> {
    (0..size)
        .map(|i| match i {
            0 => Color::new(0, 0, 0, 0),
            _ => Color::opaque((i * 67 % 256) as u8, (i * 131 % 256) as u8, (i * 29 % 256) as u8),
        })
        .collect()
}

/// Rectangular rows of colors drawn from a palette of `max_colors`.
///
/// Small palettes on small grids produce plenty of corner-touching and
/// enclosed pixels.
pub fn arb_rows(max_width: usize, max_height: usize, max_colors: usize) -> BoxedStrategy<Vec<Vec<Color>>> {
    assert!(max_colors > 0, "max_colors must be > 0");

    (1usize..=max_width, 1usize..=max_height, 1usize..=max_colors)
        .prop_flat_map(|(width, height, colors)| {
            let palette = palette(colors);
            proptest::collection::vec(
                proptest::collection::vec(0usize..colors, width..=width),
                height..=height,
            )
            .prop_map(move |indices| {
                indices
                    .into_iter()
                    .map(|row| row.into_iter().map(|i| palette[i]).collect())
                    .collect()
            })
        })
        .boxed()
}

/// A non-empty set of pixels inside a `size` x `size` box.
pub fn arb_pixels(size: u32, max_pixels: usize) -> BoxedStrategy<BTreeSet<Coordinate>> {
    proptest::collection::btree_set((0..size, 0..size), 1..=max_pixels)
        .prop_map(|coords| coords.into_iter().map(|(x, y)| Coordinate::new(x, y)).collect())
        .boxed()
}

/// Pixel count per color in the source rows.
pub fn pixel_counts(rows: &[Vec<Color>]) -> BTreeMap<Color, usize> {
    let mut counts = BTreeMap::new();
    for color in rows.iter().flatten() {
        *counts.entry(*color).or_insert(0) += 1;
    }
    counts
}

/// Area emitted per fill value.
pub fn area_by_fill(document: &Document) -> Result<BTreeMap<String, f64>, String> {
    let mut areas = BTreeMap::new();
    for element in document.children() {
        let fill = element
            .attributes()
            .get("fill")
            .ok_or_else(|| format!("top-level {} without fill", element.tag_name()))?;
        if areas.insert(fill.clone(), element.area()).is_some() {
            return Err(format!("fill {} used by more than one element", fill));
        }
    }
    Ok(areas)
}

/// Counts every leaf shape in the tree.
pub fn shape_count(element: &Element) -> usize {
    match element {
        Element::Group(group) => group.children.iter().map(shape_count).sum(),
        _ => 1,
    }
}
