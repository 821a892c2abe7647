use crate::geo::PixelPoint;
use std::collections::HashMap;

pub(crate) type CellKey = (i64, i64);

/// Uniform pixel grid bucketing point indices
pub(crate) struct SpatialGrid {
    cell_size: f64,
    cells: HashMap<CellKey, Vec<usize>>,
}

impl SpatialGrid {
    pub(crate) fn new(cell_size: f64) -> Self {
        Self {
            cell_size,
            cells: HashMap::new(),
        }
    }

    pub(crate) fn cell_of(&self, p: PixelPoint) -> CellKey {
        (
            (p.x / self.cell_size).floor() as i64,
            (p.y / self.cell_size).floor() as i64,
        )
    }

    pub(crate) fn insert(&mut self, index: usize, p: PixelPoint) {
        let key = self.cell_of(p);
        self.cells.entry(key).or_default().push(index);
    }

    /// Indices stored in `cell` and its 8 neighbours
    pub(crate) fn neighbourhood(&self, cell: CellKey) -> impl Iterator<Item = usize> + '_ {
        let (cx, cy) = cell;
        (-1..=1)
            .flat_map(move |dx| (-1..=1).map(move |dy| (cx.saturating_add(dx), cy.saturating_add(dy))))
            .filter_map(move |key| self.cells.get(&key))
            .flat_map(|bucket| bucket.iter().copied())
    }

    #[cfg(test)]
    pub(crate) fn cell_count(&self) -> usize {
        self.cells.len()
    }
}
