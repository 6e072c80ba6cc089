// src/harbor.rs
use crate::hex::{Cube, HexSet};
use crate::perimeter::ring_around;

/// Сколько соседей клетки лежит на острове
#[must_use]
pub fn land_neighbor_count(cell: Cube, island: &HexSet) -> usize {
    cell.neighbors()
        .iter()
        .filter(|n| island.contains(n))
        .count()
}

/// Гавани: клетки прибрежного кольца, у которых не меньше `threshold` соседей-суши.
///
/// Проходит по кольцу с повторами, поэтому гавань, граничащая с `k` клетками
/// острова, выдаётся `k` раз.
#[must_use]
pub fn harbors_of(island: &HexSet, threshold: usize) -> Vec<Cube> {
    ring_around(island)
        .into_iter()
        .filter(|&cell| land_neighbor_count(cell, island) >= threshold)
        .collect()
}
