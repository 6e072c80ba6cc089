// src/hex.rs
//! Кубические координаты шестиугольной сетки
//!
//! Каждая клетка задаётся тройкой `(q, r, s)` с инвариантом `q + r + s = 0`.
//! Модуль не хранит состояния: только алгебра соседей, расстояний и сдвигов,
//! а также упорядоченное множество клеток [`HexSet`].

use crate::config::RecenterMode;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::ops::{Add, Sub};

/// Клетка в кубических координатах
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Cube {
    pub q: i32,
    pub r: i32,
    pub s: i32,
}

/// Шесть направлений в фиксированном порядке.
///
/// Порядок важен: от него зависят индексы фронтира при росте острова,
/// а значит и воспроизводимость генерации с заданным сидом.
pub const DIRECTIONS: [Cube; 6] = [
    Cube::new(1, -1, 0),
    Cube::new(1, 0, -1),
    Cube::new(0, 1, -1),
    Cube::new(-1, 1, 0),
    Cube::new(-1, 0, 1),
    Cube::new(0, -1, 1),
];

impl Cube {
    pub const ORIGIN: Cube = Cube::new(0, 0, 0);

    #[must_use]
    pub const fn new(q: i32, r: i32, s: i32) -> Self {
        Self { q, r, s }
    }

    /// Строит клетку по двум осевым компонентам, `s` выводится из инварианта.
    #[must_use]
    pub const fn from_axial(q: i32, r: i32) -> Self {
        Self { q, r, s: -q - r }
    }

    /// Выполняется ли инвариант `q + r + s = 0`
    #[must_use]
    pub fn is_valid(self) -> bool {
        self.q + self.r + self.s == 0
    }

    /// Шесть соседей клетки, в порядке [`DIRECTIONS`]
    ///
    /// # Примеры
    /// ```
    /// use hexisle::hex::Cube;
    /// let n = Cube::ORIGIN.neighbors();
    /// assert_eq!(n[0], Cube::new(1, -1, 0));
    /// assert!(n.iter().all(|c| c.is_valid()));
    /// ```
    #[must_use]
    pub fn neighbors(self) -> [Cube; 6] {
        DIRECTIONS.map(|d| self + d)
    }

    /// Число шагов по сетке между двумя корректными клетками
    #[must_use]
    pub fn distance(self, other: Cube) -> u32 {
        let d = self - other;
        (d.q.unsigned_abs() + d.r.unsigned_abs() + d.s.unsigned_abs()) / 2
    }

    /// Совпадают ли осевые компоненты `(q, r)`.
    #[must_use]
    pub fn same_axial(self, other: Cube) -> bool {
        self.q == other.q && self.r == other.r
    }

    /// Сдвигает клетку на `(dq, dr)`.
    ///
    /// - [`RecenterMode::PreserveCube`] пересчитывает `s`, инвариант сохраняется
    /// - [`RecenterMode::ShiftAxialOnly`] оставляет `s` как есть, и у всех клеток,
    ///   кроме нового центра, `q + r + s` перестаёт быть нулём
    #[must_use]
    pub fn translate_axial(self, dq: i32, dr: i32, mode: RecenterMode) -> Cube {
        let q = self.q + dq;
        let r = self.r + dr;
        match mode {
            RecenterMode::PreserveCube => Cube::from_axial(q, r),
            RecenterMode::ShiftAxialOnly => Cube::new(q, r, self.s),
        }
    }
}

impl Add for Cube {
    type Output = Cube;

    fn add(self, rhs: Cube) -> Cube {
        Cube::new(self.q + rhs.q, self.r + rhs.r, self.s + rhs.s)
    }
}

impl Sub for Cube {
    type Output = Cube;

    fn sub(self, rhs: Cube) -> Cube {
        Cube::new(self.q - rhs.q, self.r - rhs.r, self.s - rhs.s)
    }
}

/// Количество клеток в шестиугольной доске радиуса `radius`
#[must_use]
pub fn board_cell_count(radius: u32) -> usize {
    let r = radius as usize;
    3 * r * (r + 1) + 1
}

/// Множество клеток с сохранением порядка вставки
///
/// Порядок вставки используется как порядок выдачи и как порядок при равных
/// оценках внутренности, поэтому обычного `HashSet` недостаточно.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HexSet {
    order: Vec<Cube>,
    members: HashSet<Cube>,
}

impl HexSet {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Добавляет клетку; `false`, если она уже была в множестве
    pub fn insert(&mut self, cell: Cube) -> bool {
        if self.members.insert(cell) {
            self.order.push(cell);
            true
        } else {
            false
        }
    }

    #[must_use]
    pub fn contains(&self, cell: &Cube) -> bool {
        self.members.contains(cell)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.order.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Cube> {
        self.order.iter()
    }

    #[must_use]
    pub fn as_slice(&self) -> &[Cube] {
        &self.order
    }
}

impl Extend<Cube> for HexSet {
    fn extend<I: IntoIterator<Item = Cube>>(&mut self, iter: I) {
        for cell in iter {
            self.insert(cell);
        }
    }
}

impl FromIterator<Cube> for HexSet {
    fn from_iter<I: IntoIterator<Item = Cube>>(iter: I) -> Self {
        let mut set = HexSet::new();
        set.extend(iter);
        set
    }
}

impl<'a> IntoIterator for &'a HexSet {
    type Item = &'a Cube;
    type IntoIter = std::slice::Iter<'a, Cube>;

    fn into_iter(self) -> Self::IntoIter {
        self.order.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn neighbors_keep_fixed_order() {
        let n = Cube::new(2, -3, 1).neighbors();
        assert_eq!(
            n,
            [
                Cube::new(3, -4, 1),
                Cube::new(3, -3, 0),
                Cube::new(2, -2, 0),
                Cube::new(1, -2, 1),
                Cube::new(1, -3, 2),
                Cube::new(2, -4, 2),
            ]
        );
    }

    #[test]
    fn neighbors_of_valid_cells_are_valid() {
        for q in -4..=4 {
            for r in -4..=4 {
                let cell = Cube::from_axial(q, r);
                for n in cell.neighbors() {
                    assert!(n.is_valid(), "{n:?} is not a cube coordinate");
                    assert_eq!(cell.distance(n), 1);
                }
            }
        }
    }

    #[test]
    fn distance_counts_grid_steps() {
        assert_eq!(Cube::ORIGIN.distance(Cube::ORIGIN), 0);
        assert_eq!(Cube::ORIGIN.distance(Cube::new(3, -1, -2)), 3);
        assert_eq!(Cube::new(-2, 2, 0).distance(Cube::new(2, -2, 0)), 4);
    }

    #[test]
    fn translate_preserving_cube_restores_invariant() {
        let cell = Cube::new(3, -1, -2);
        let moved = cell.translate_axial(-1, 4, RecenterMode::PreserveCube);
        assert_eq!(moved, Cube::new(2, 3, -5));
        assert!(moved.is_valid());
    }

    #[test]
    fn translate_axial_only_keeps_s() {
        let cell = Cube::new(3, -1, -2);
        let moved = cell.translate_axial(-1, 4, RecenterMode::ShiftAxialOnly);
        assert_eq!(moved, Cube::new(2, 3, -2));
        assert!(!moved.is_valid());
    }

    #[test]
    fn board_sizes() {
        assert_eq!(board_cell_count(0), 1);
        assert_eq!(board_cell_count(1), 7);
        assert_eq!(board_cell_count(2), 19);
    }

    #[test]
    fn hex_set_keeps_insertion_order_and_skips_repeats() {
        let a = Cube::new(1, -1, 0);
        let b = Cube::new(0, 1, -1);
        let set: HexSet = [a, b, a, Cube::ORIGIN, b].into_iter().collect();
        assert_eq!(set.as_slice(), &[a, b, Cube::ORIGIN]);
        assert!(set.contains(&Cube::ORIGIN));
        assert_eq!(set.len(), 3);
    }
}
