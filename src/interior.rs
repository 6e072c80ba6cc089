// src/interior.rs
//! Оценка «внутренности» клеток суши
//!
//! Для клетки `t` считается, сколько клеток вне острова достижимо из неё
//! не более чем за `n` шагов, и эти числа суммируются по `n = 1..=radius`.
//! Чем меньше сумма, тем плотнее клетка окружена сушей. Самые внутренние
//! клетки становятся горами, самая внутренняя — центром карты.

use crate::hex::{Cube, HexSet};
use serde::Serialize;
use std::collections::HashSet;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Клетка суши с её оценкой
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct InteriorRank {
    pub tile: Cube,
    pub score: u64,
}

/// Горы и центр, выбранные по оценке внутренности
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Landmarks {
    pub center: Cube,
    pub mountains: Vec<Cube>,
}

/// Число клеток вне острова на каждом расстоянии `1..=radius` от `tile`.
///
/// Обход в ширину по кольцам; элемент `i` соответствует расстоянию `i + 1`.
#[must_use]
pub fn off_island_by_distance(tile: Cube, radius: u32, island: &HexSet) -> Vec<usize> {
    let mut visited: HashSet<Cube> = HashSet::from([tile]);
    let mut frontier = vec![tile];
    let mut counts = Vec::with_capacity(radius as usize);

    for _ in 0..radius {
        let mut next = Vec::with_capacity(frontier.len() + 6);
        for cell in &frontier {
            for n in cell.neighbors() {
                if visited.insert(n) {
                    next.push(n);
                }
            }
        }
        counts.push(next.iter().filter(|c| !island.contains(c)).count());
        frontier = next;
    }
    counts
}

/// Сколько различных клеток вне острова достижимо из `tile` за `1..=n` шагов
#[must_use]
pub fn reach(tile: Cube, n: u32, island: &HexSet) -> usize {
    off_island_by_distance(tile, n, island).iter().sum()
}

/// Оценка внутренности: `reach(tile, 1) + ... + reach(tile, radius)`.
///
/// Клетка на расстоянии `d` входит в `reach(tile, n)` при каждом `n >= d`,
/// то есть `radius - d + 1` раз, поэтому хватает одного обхода.
#[must_use]
pub fn interiority_score(tile: Cube, island: &HexSet, radius: u32) -> u64 {
    off_island_by_distance(tile, radius, island)
        .into_iter()
        .zip((1..=u64::from(radius)).rev())
        .map(|(count, weight)| count as u64 * weight)
        .sum()
}

/// Клетки острова по возрастанию оценки.
///
/// Сортировка устойчивая: при равных оценках сохраняется порядок острова.
#[must_use]
pub fn rank_interior(island: &HexSet, radius: u32) -> Vec<InteriorRank> {
    let score_of = |&tile: &Cube| InteriorRank {
        tile,
        score: interiority_score(tile, island, radius),
    };

    #[cfg(feature = "parallel")]
    let mut ranking: Vec<InteriorRank> = island.as_slice().par_iter().map(score_of).collect();
    #[cfg(not(feature = "parallel"))]
    let mut ranking: Vec<InteriorRank> = island.iter().map(score_of).collect();

    ranking.sort_by_key(|rank| rank.score);
    ranking
}

/// Первые `mountain_count` клеток рейтинга — горы, первая из них — центр.
///
/// `None`, если остров пуст или `mountain_count == 0`.
#[must_use]
pub fn pick_landmarks(island: &HexSet, radius: u32, mountain_count: usize) -> Option<Landmarks> {
    if mountain_count == 0 {
        return None;
    }
    let ranking = rank_interior(island, radius);
    let center = ranking.first()?.tile;
    let mountains = ranking
        .iter()
        .take(mountain_count)
        .map(|rank| rank.tile)
        .collect();
    Some(Landmarks { center, mountains })
}
