/*
 * Spatial Grid Module
 *
 * This module defines the SpatialGrid struct for efficient neighbor
 * candidate lookups. Space is divided into uniform cells keyed by their
 * integer coordinates; a query scans the 3^N cells surrounding a position,
 * which covers every boid within one cell size. The environment sizes
 * cells by the population's largest vision radius, so the candidate set
 * always contains the true neighbor set (callers still filter by exact
 * distance). Purely an optimization: disabling it changes nothing but
 * running time.
 */

use std::collections::HashMap;

use crate::vector::Vector;

pub struct SpatialGrid<const N: usize> {
    cell_size: f64,
    cells: HashMap<[i64; N], Vec<usize>>,
}

impl<const N: usize> SpatialGrid<N> {
    pub fn new(cell_size: f64) -> Self {
        assert!(cell_size > 0.0, "cell size must be positive");
        Self {
            cell_size,
            cells: HashMap::new(),
        }
    }

    pub fn cell_size(&self) -> f64 {
        self.cell_size
    }

    // Convert a world position to integer cell coordinates
    #[inline]
    fn cell_of(&self, position: &Vector<N>) -> [i64; N] {
        let mut cell = [0i64; N];
        for (slot, component) in cell.iter_mut().zip(position.iter()) {
            *slot = (component / self.cell_size).floor() as i64;
        }
        cell
    }

    /// Remove all entries, keeping allocated cell buckets for reuse.
    pub fn clear(&mut self) {
        for bucket in self.cells.values_mut() {
            bucket.clear();
        }
    }

    /// Insert a boid index at the given position.
    #[inline]
    pub fn insert(&mut self, index: usize, position: &Vector<N>) {
        self.cells
            .entry(self.cell_of(position))
            .or_default()
            .push(index);
    }

    /// Boid indices in the cell containing `position` and all adjacent
    /// cells. A superset of the indices within `cell_size` of `position`;
    /// order is deterministic for a fixed insertion sequence.
    pub fn nearby_indices(&self, position: &Vector<N>) -> Vec<usize> {
        let center = self.cell_of(position);
        let mut result = Vec::new();

        // Enumerate the 3^N offset combinations in {-1, 0, 1}^N
        for mut code in 0..3usize.pow(N as u32) {
            let mut cell = center;
            for slot in cell.iter_mut() {
                *slot += (code % 3) as i64 - 1;
                code /= 3;
            }
            if let Some(bucket) = self.cells.get(&cell) {
                result.extend_from_slice(bucket);
            }
        }

        result
    }
}
