// src/config.rs
//! Конфигурация генерации острова
//!
//! Этот модуль определяет все параметры, управляющие процедурной генерацией:
//! - Размер острова (число шагов роста) и необязательный радиус доски
//! - Количество гор и радиус оценки внутренности
//! - Порог для гаваней
//! - Режим сдвига координат к центру и схлопывание повторов
//!
//! Все структуры поддерживают сериализацию в TOML/JSON для удобной настройки через конфигурационные файлы.

use crate::error::{ConfigError, GenerationError};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Как сдвигать координаты при переносе центра острова в начало координат
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum RecenterMode {
    /// Сдвигаются `q` и `r`, `s` пересчитывается: `q + r + s = 0` сохраняется
    #[default]
    PreserveCube,
    /// Сдвигаются только `q` и `r`, `s` переносится без изменений.
    ///
    /// Воспроизводит исходное поведение карты: у всех клеток, кроме центра,
    /// кубический инвариант нарушен. Оставлено для совместимости с рендерерами,
    /// которые читают только `(q, r)`.
    ShiftAxialOnly,
}

/// Параметры генерации острова
///
/// Полная конфигурация одного запуска. Поддерживает загрузку из TOML-файлов.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct IslandParams {
    /// Сид генератора случайных чисел (детерминированная генерация)
    #[serde(default)]
    pub seed: u64,

    /// Сколько новых клеток суши добавить к стартовой (итоговый размер: `island_growth + 1`)
    #[serde(default = "default_island_growth")]
    pub island_growth: i64,

    /// Количество горных клеток (самые «внутренние» клетки суши)
    #[serde(default = "default_mountain_count")]
    pub mountain_count: usize,

    /// Радиус (в шагах сетки), в котором считается оценка внутренности
    #[serde(default = "default_interiority_radius")]
    pub interiority_radius: u32,

    /// Минимальное число соседей-суши, при котором прибрежная клетка становится гаванью
    #[serde(default = "default_harbor_threshold")]
    pub harbor_threshold: usize,

    /// Радиус доски вокруг начала координат (`None` — сетка без границ).
    /// На ограниченной доске рост может упереться в край.
    #[serde(default)]
    pub board_radius: Option<u32>,

    /// Режим сдвига к центру (по умолчанию инвариант сохраняется)
    #[serde(default)]
    pub recenter_mode: RecenterMode,

    /// Схлопывать повторяющиеся координаты перед выдачей, объединяя флаги.
    /// По умолчанию выключено: повторы из прибрежного кольца и гаваней доходят до результата.
    #[serde(default)]
    pub dedup_tiles: bool,
}

fn default_island_growth() -> i64 {
    64
}
fn default_mountain_count() -> usize {
    14
}
fn default_interiority_radius() -> u32 {
    9
}
fn default_harbor_threshold() -> usize {
    3
}

impl IslandParams {
    /// Загружает параметры из TOML-файла
    ///
    /// # Ошибки
    /// Возвращает ошибку, если файл не найден или содержит недопустимый формат.
    ///
    /// # Пример
    /// ```toml
    /// # island.toml
    /// seed = 42
    /// island_growth = 96
    /// recenter_mode = "ShiftAxialOnly"
    /// ```
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let contents = fs::read_to_string(path)?;
        Self::from_toml_str(&contents)
    }

    pub fn from_toml_str(contents: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(contents)?)
    }

    /// Проверяет параметры до запуска конвейера
    pub fn validate(&self) -> Result<(), GenerationError> {
        if self.island_growth < 0 {
            return Err(GenerationError::InvalidGrowthTarget(self.island_growth));
        }
        if self.mountain_count == 0 {
            return Err(GenerationError::InvalidParams(
                "mountain_count must be at least 1 to pick a center".into(),
            ));
        }
        if self.interiority_radius == 0 {
            return Err(GenerationError::InvalidParams(
                "interiority_radius must be at least 1".into(),
            ));
        }
        Ok(())
    }
}

impl Default for IslandParams {
    fn default() -> Self {
        Self {
            seed: 0,
            island_growth: 64,
            mountain_count: 14,
            interiority_radius: 9,
            harbor_threshold: 3,
            board_radius: None,
            recenter_mode: RecenterMode::PreserveCube,
            dedup_tiles: false,
        }
    }
}
