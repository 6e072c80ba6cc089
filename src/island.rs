// src/island.rs
//! Рост острова
//!
//! Остров начинается с одной клетки в начале координат и растёт случайным
//! выбором из фронтира. Фронтир — это список, а не множество: соседи каждой
//! принятой клетки просто дописываются в конец, без удаления повторов и уже
//! занятых клеток. Клетка, граничащая с несколькими клетками суши, попадает во
//! фронтир несколько раз и выбирается чаще, поэтому острова получаются
//! округлыми, а не ветвистыми. Убирать повторы из фронтира нельзя.

use crate::error::GenerationError;
use crate::hex::{Cube, HexSet, board_cell_count};
use rand::Rng;

/// Сколько промахов подряд допускается на одну запись фронтира,
/// прежде чем рост считается застрявшим.
const MAX_MISSES_PER_FRONTIER_ENTRY: usize = 64;

/// Источник случайных индексов во фронтире.
///
/// Возвращаемый индекс обязан быть меньше `len`.
pub trait IndexSource {
    fn next_index(&mut self, len: usize) -> usize;
}

/// Источник на основе любого генератора из `rand`
#[derive(Debug, Clone)]
pub struct RngSource<R>(pub R);

impl<R: Rng> IndexSource for RngSource<R> {
    fn next_index(&mut self, len: usize) -> usize {
        self.0.gen_range(0..len)
    }
}

/// Заранее заданная последовательность индексов (для тестов).
///
/// Индексы берутся по кругу и приводятся по модулю длины фронтира.
#[derive(Debug, Clone)]
pub struct ScriptedSource {
    indices: Vec<usize>,
    cursor: usize,
}

impl ScriptedSource {
    pub fn new(indices: impl Into<Vec<usize>>) -> Self {
        Self {
            indices: indices.into(),
            cursor: 0,
        }
    }
}

impl IndexSource for ScriptedSource {
    fn next_index(&mut self, len: usize) -> usize {
        if self.indices.is_empty() {
            return 0;
        }
        let index = self.indices[self.cursor % self.indices.len()];
        self.cursor += 1;
        index % len
    }
}

/// Состояние роста: принятые клетки и фронтир
#[derive(Debug, Clone)]
pub struct IslandGrowth {
    island: HexSet,
    frontier: Vec<Cube>,
    board_radius: Option<u32>,
}

impl IslandGrowth {
    /// Начальное состояние: остров из одной клетки, во фронтире её шесть соседей
    #[must_use]
    pub fn new(board_radius: Option<u32>) -> Self {
        let mut growth = Self {
            island: HexSet::new(),
            frontier: Vec::new(),
            board_radius,
        };
        growth.island.insert(Cube::ORIGIN);
        growth.push_neighbors(Cube::ORIGIN);
        growth
    }

    fn on_board(&self, cell: Cube) -> bool {
        self.board_radius
            .is_none_or(|radius| cell.distance(Cube::ORIGIN) <= radius)
    }

    fn push_neighbors(&mut self, cell: Cube) {
        for n in cell.neighbors() {
            if self.on_board(n) {
                self.frontier.push(n);
            }
        }
    }

    #[must_use]
    pub fn island(&self) -> &HexSet {
        &self.island
    }

    #[must_use]
    pub fn frontier(&self) -> &[Cube] {
        &self.frontier
    }

    /// Сколько раз клетка встречается во фронтире (её относительный вес при выборе)
    #[cfg(test)]
    fn frontier_weight(&self, cell: Cube) -> usize {
        self.frontier.iter().filter(|&&c| c == cell).count()
    }

    /// Рост больше невозможен: фронтир пуст или доска заполнена
    #[must_use]
    pub fn is_stalled(&self) -> bool {
        self.frontier.is_empty()
            || self
                .board_radius
                .is_some_and(|radius| self.island.len() >= board_cell_count(radius))
    }

    /// Один розыгрыш из фронтира.
    ///
    /// Возвращает принятую клетку или `None`, если выпала уже занятая клетка
    /// (или фронтир пуст).
    pub fn draw<S: IndexSource + ?Sized>(&mut self, source: &mut S) -> Option<Cube> {
        if self.frontier.is_empty() {
            return None;
        }
        let cell = self.frontier[source.next_index(self.frontier.len())];
        if self.island.insert(cell) {
            self.push_neighbors(cell);
            Some(cell)
        } else {
            None
        }
    }

    #[must_use]
    pub fn into_island(self) -> HexSet {
        self.island
    }
}

/// Выращивает остров из `target_growth + 1` клеток.
///
/// Повторный выбор уже занятой клетки не засчитывается: розыгрыш повторяется.
///
/// # Ошибки
/// - [`GenerationError::InvalidGrowthTarget`] при отрицательном `target_growth`
/// - [`GenerationError::GenerationStalled`], если на ограниченной доске
///   не осталось свободных клеток или источник слишком долго выдаёт только
///   занятые клетки
pub fn generate_island<S: IndexSource + ?Sized>(
    target_growth: i64,
    board_radius: Option<u32>,
    source: &mut S,
) -> Result<HexSet, GenerationError> {
    let target = usize::try_from(target_growth)
        .map_err(|_| GenerationError::InvalidGrowthTarget(target_growth))?;

    let mut growth = IslandGrowth::new(board_radius);
    let mut accepted = 0;
    let mut draws = 0usize;
    let mut misses = 0usize;

    while accepted < target {
        if growth.is_stalled() || misses > growth.frontier().len() * MAX_MISSES_PER_FRONTIER_ENTRY {
            log::warn!("Island growth stalled at {accepted}/{target} tiles after {draws} draws");
            return Err(GenerationError::GenerationStalled { accepted, target });
        }
        draws += 1;
        if growth.draw(source).is_some() {
            accepted += 1;
            misses = 0;
        } else {
            misses += 1;
        }
    }

    log::debug!(
        "Grew island of {} tiles in {} draws (frontier: {})",
        growth.island().len(),
        draws,
        growth.frontier().len()
    );
    Ok(growth.into_island())
}
