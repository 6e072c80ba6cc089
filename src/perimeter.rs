// src/perimeter.rs
//! Кольца клеток вокруг множества
use crate::hex::{Cube, HexSet};

/// Все соседи клеток `core`, не входящие в `core`.
///
/// Повторы не убираются: клетка встречается столько раз, со сколькими
/// клетками `core` она граничит. На этом построен поиск гаваней.
#[must_use]
pub fn ring_around(core: &HexSet) -> Vec<Cube> {
    core.iter()
        .flat_map(|cell| cell.neighbors())
        .filter(|n| !core.contains(n))
        .collect()
}

/// Один слой клеток вокруг `core`, без повторов (порядок первого появления)
#[must_use]
pub fn ocean_ring_around(core: &HexSet) -> Vec<Cube> {
    let ring: HexSet = ring_around(core).into_iter().collect();
    ring.as_slice().to_vec()
}
