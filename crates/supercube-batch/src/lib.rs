//! Merges many meshes into few, keyed by material and lightmap, under a vertex cap.
#![forbid(unsafe_code)]

mod error;
mod pack;
mod source;
mod subset;

use std::time::{Duration, Instant};

use hashbrown::HashMap;

pub use error::BatchError;
pub use pack::BatchedMesh;
pub use source::{BatchConfig, BatchSource, LightmapId, MAX_VERTS};

use subset::{Subset, merge_into};

/// A source submesh left out because it alone would fill an output mesh.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct RejectedSubmesh {
    pub source: usize,
    pub submesh: usize,
    pub vertices: usize,
}

#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct BatchStats {
    pub scanned: usize,
    pub valid: usize,
    /// Buckets formed before packing.
    pub subsets: usize,
    pub elapsed: Duration,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct BatchReport {
    pub meshes: Vec<BatchedMesh>,
    /// Indices of sources whose geometry was merged in full; the caller may
    /// stop drawing them.
    pub consumed: Vec<usize>,
    pub rejected: Vec<RejectedSubmesh>,
    /// Most common layer among valid sources, first seen on ties.
    pub layer: Option<i32>,
    pub stats: BatchStats,
}

impl BatchReport {
    pub fn vertex_count(&self) -> usize {
        self.meshes.iter().map(|m| m.mesh.vertex_count()).sum()
    }
}

/// Runs one batching pass over `sources`.
///
/// Sources the filters reject are skipped. A malformed source aborts the pass.
pub fn combine(sources: &[BatchSource<'_>], config: &BatchConfig) -> Result<BatchReport, BatchError> {
    if config.max_verts < 3 {
        return Err(BatchError::InvalidCap(config.max_verts));
    }
    let started = Instant::now();
    let mut buckets: Vec<Subset> = Vec::new();
    let mut consumed = Vec::new();
    let mut rejected = Vec::new();
    let mut layers = LayerTally::default();
    let mut valid = 0usize;

    for (index, source) in sources.iter().enumerate() {
        if !config.accepts(source) {
            continue;
        }
        source
            .mesh
            .validate()
            .map_err(|error| BatchError::InvalidSource {
                source_index: index,
                error,
            })?;
        valid += 1;
        layers.add(source.layer);

        let mut whole = true;
        for (s, submesh) in source.mesh.submeshes.iter().enumerate() {
            if submesh.indices.is_empty() {
                continue;
            }
            let material = source.material(s).unwrap_or_else(|| {
                log::debug!(
                    "source {index} submesh {s} has no material; using {:?}",
                    config.default_material
                );
                config.default_material
            });
            let gathered = Subset::gather(source, submesh, material);
            if gathered.count() >= config.max_verts {
                log::debug!(
                    "source {index} submesh {s} has {} vertices, over the cap of {}; skipped",
                    gathered.count(),
                    config.max_verts
                );
                rejected.push(RejectedSubmesh {
                    source: index,
                    submesh: s,
                    vertices: gathered.count(),
                });
                whole = false;
                continue;
            }
            merge_into(&mut buckets, gathered, config.max_verts);
        }
        if whole {
            consumed.push(index);
        }
    }

    let subsets = buckets.len();
    let meshes = pack::pack(buckets, config.max_verts);
    let elapsed = started.elapsed();
    let stats = BatchStats {
        scanned: sources.len(),
        valid,
        subsets,
        elapsed,
    };
    let summary = format!(
        "Merging geometry [{} sources scanned: {} valid, {} subsets]: {:.2} ms",
        stats.scanned,
        stats.valid,
        stats.subsets,
        elapsed.as_secs_f64() * 1000.0
    );
    if config.log_time_cost {
        log::info!("{summary}");
    } else {
        log::debug!("{summary}");
    }

    Ok(BatchReport {
        meshes,
        consumed,
        rejected,
        layer: layers.dominant(),
        stats,
    })
}

#[derive(Default)]
struct LayerTally {
    counts: HashMap<i32, usize>,
    order: Vec<i32>,
}

impl LayerTally {
    fn add(&mut self, layer: i32) {
        let n = self.counts.entry(layer).or_insert(0);
        if *n == 0 {
            self.order.push(layer);
        }
        *n += 1;
    }

    fn dominant(&self) -> Option<i32> {
        let mut best: Option<(i32, usize)> = None;
        for &layer in &self.order {
            let n = self.counts.get(&layer).copied().unwrap_or(0);
            if best.is_none_or(|(_, m)| n > m) {
                best = Some((layer, n));
            }
        }
        best.map(|(layer, _)| layer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dominant_layer_prefers_first_on_tie() {
        let mut t = LayerTally::default();
        for l in [3, 5, 5, 3, 7] {
            t.add(l);
        }
        assert_eq!(t.dominant(), Some(3));
        t.add(5);
        assert_eq!(t.dominant(), Some(5));
        assert_eq!(LayerTally::default().dominant(), None);
    }
}
