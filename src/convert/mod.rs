//! The conversion pipeline.
//!
//! ```text
//! PixelGrid -> ColorMap -> RegionBuilder -> Canonicalizer -> ShapeSelector -> DocumentAssembler
//! ```
//!
//! Colors are independent of each other until assembly, so the per-color
//! stages can run on a worker pool. Assembly sorts the layers again, so the
//! document is identical whatever order the workers finish in.

pub mod report;

use std::collections::BTreeSet;
use std::time::Instant;

use log::{debug, info};
use rayon::prelude::*;

use crate::canonical::Canonicalizer;
use crate::document::{ColorLayer, Document, DocumentAssembler};
use crate::error::KvadratError;
use crate::geometry::{ClipperKernel, GeometryKernel, Region};
use crate::partition::ColorMap;
use crate::raster::{Color, Coordinate, PixelGrid};
use crate::region::RegionBuilder;
use crate::shape::ShapeSelector;

pub use report::ConversionReport;

/// Integer units the merge epsilon must span in the clipping kernel.
const MIN_EPSILON_UNITS: f64 = 10.0;

/// Growing pixels by half their size joins pixels a whole pixel apart.
const MAX_MERGE_EPSILON: f64 = 0.5;

/// Options for a conversion.
#[derive(Clone, Debug, PartialEq)]
pub struct ConvertOptions {
    /// Maximum perpendicular deviation removed by simplification.
    pub simplify_tolerance: f64,
    /// Distance used to merge pixels that touch only at a corner.
    pub merge_epsilon: f64,
    /// Number of worker threads; 1 runs everything on the calling thread.
    pub workers: usize,
}

impl Default for ConvertOptions {
    fn default() -> Self {
        Self::with_tolerance(0.001)
    }
}

impl ConvertOptions {
    /// Options for `tolerance`, with the merge epsilon three orders of
    /// magnitude below it.
    pub fn with_tolerance(tolerance: f64) -> Self {
        Self {
            simplify_tolerance: tolerance,
            merge_epsilon: tolerance / 1000.0,
            workers: 1,
        }
    }

    /// Sets the worker count.
    pub fn workers(mut self, workers: usize) -> Self {
        self.workers = workers;
        self
    }

    /// Checks that the options describe a runnable conversion.
    ///
    /// # Errors
    /// Returns [`KvadratError::InvalidOptions`] describing the first
    /// offending field.
    pub fn validate(&self) -> Result<(), KvadratError> {
        if !self.simplify_tolerance.is_finite() || self.simplify_tolerance < 0.0 {
            return Err(KvadratError::InvalidOptions(format!(
                "simplify tolerance must be a finite non-negative number, got {}",
                self.simplify_tolerance
            )));
        }
        if !self.merge_epsilon.is_finite() || self.merge_epsilon <= 0.0 {
            return Err(KvadratError::InvalidOptions(format!(
                "merge epsilon must be a finite positive number, got {}",
                self.merge_epsilon
            )));
        }
        if self.merge_epsilon >= MAX_MERGE_EPSILON {
            return Err(KvadratError::InvalidOptions(format!(
                "merge epsilon must be below {}, got {}",
                MAX_MERGE_EPSILON, self.merge_epsilon
            )));
        }
        if self.workers == 0 {
            return Err(KvadratError::InvalidOptions(
                "worker count must be at least 1".to_string(),
            ));
        }
        Ok(())
    }

    /// The clipping kernel for these options, fine enough to resolve the
    /// merge epsilon.
    pub fn kernel(&self) -> ClipperKernel {
        let needed = MIN_EPSILON_UNITS / self.merge_epsilon;
        ClipperKernel::new(needed.max(ClipperKernel::DEFAULT_SCALE))
    }

    /// Validates the options and returns the clipping kernel for `grid`.
    ///
    /// # Errors
    /// Returns [`KvadratError::InvalidOptions`] for invalid options, or when
    /// the scale needed for the merge epsilon leaves the grid outside the
    /// kernel's coordinate range.
    pub fn kernel_for(&self, grid: &PixelGrid) -> Result<ClipperKernel, KvadratError> {
        self.validate()?;
        let kernel = self.kernel();
        let extent = f64::from(grid.width().max(grid.height())) + 1.0;
        if extent > kernel.max_extent() {
            return Err(KvadratError::InvalidOptions(format!(
                "merge epsilon {} is too fine for a {}x{} grid (kernel range {:.3e} pixels)",
                self.merge_epsilon,
                grid.width(),
                grid.height(),
                kernel.max_extent()
            )));
        }
        Ok(kernel)
    }
}

/// Converts a pixel grid into a vector document.
///
/// An empty grid gives an empty document with a zero-sized viewport.
///
/// # Errors
/// Returns [`KvadratError::InvalidOptions`] for unusable options and
/// propagates geometry, path-format and worker-pool failures. Any failure
/// aborts the whole conversion.
pub fn convert(grid: &PixelGrid, options: &ConvertOptions) -> Result<Document, KvadratError> {
    let kernel = options.kernel_for(grid)?;
    run_pipeline(grid, options, &kernel)
}

/// Converts a pixel grid using a caller-supplied geometry kernel.
///
/// # Errors
/// Same as [`convert`].
pub fn convert_with_kernel<K: GeometryKernel + ?Sized>(
    grid: &PixelGrid,
    options: &ConvertOptions,
    kernel: &K,
) -> Result<Document, KvadratError> {
    options.validate()?;
    run_pipeline(grid, options, kernel)
}

fn run_pipeline<K: GeometryKernel + ?Sized>(
    grid: &PixelGrid,
    options: &ConvertOptions,
    kernel: &K,
) -> Result<Document, KvadratError> {
    let started = Instant::now();

    let color_map = ColorMap::from_grid(grid);
    let entries = color_map.by_pixel_count();
    info!(
        "partitioned {}x{} grid into {} color(s) in {:.2?}",
        grid.width(),
        grid.height(),
        entries.len(),
        started.elapsed()
    );

    let total = entries.len();
    let stage_started = Instant::now();
    let results: Vec<Option<ColorLayer>> = if options.workers > 1 && total > 1 {
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(options.workers)
            .build()
            .map_err(|e| KvadratError::WorkerPool(e.to_string()))?;
        debug!("processing colors on {} workers", options.workers);
        pool.install(|| {
            entries
                .par_iter()
                .enumerate()
                .map(|(index, (color, pixels))| {
                    process_color(kernel, options, index, total, *color, pixels)
                })
                .collect::<Result<Vec<_>, _>>()
        })?
    } else {
        entries
            .iter()
            .enumerate()
            .map(|(index, (color, pixels))| {
                process_color(kernel, options, index, total, *color, pixels)
            })
            .collect::<Result<Vec<_>, _>>()?
    };
    info!(
        "built shapes for {} color(s) in {:.2?}",
        total,
        stage_started.elapsed()
    );

    let document = DocumentAssembler.assemble(results.into_iter().flatten().collect());
    info!(
        "assembled {} element(s), viewport {:?}, total {:.2?}",
        document.children().len(),
        document.viewport(),
        started.elapsed()
    );
    Ok(document)
}

/// Runs region building, canonicalization and shape selection for one
/// color.
fn process_color<K: GeometryKernel + ?Sized>(
    kernel: &K,
    options: &ConvertOptions,
    index: usize,
    total: usize,
    color: Color,
    pixels: &BTreeSet<Coordinate>,
) -> Result<Option<ColorLayer>, KvadratError> {
    let started = Instant::now();

    let regions = RegionBuilder::new(kernel, options.merge_epsilon).build(pixels)?;
    let canonicalizer = Canonicalizer::new(kernel, options.simplify_tolerance);
    let regions: Vec<Region> = regions
        .iter()
        .map(|region| canonicalizer.canonicalize(region))
        .collect();
    let element = ShapeSelector::new(kernel).select(&regions, color)?;

    debug!(
        "[{}/{}] {}: {} pixel(s), {} region(s) in {:.2?}",
        index + 1,
        total,
        color,
        pixels.len(),
        regions.len(),
        started.elapsed()
    );

    Ok(element.map(|element| ColorLayer {
        color,
        pixel_count: pixels.len(),
        element,
    }))
}
