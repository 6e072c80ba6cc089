// src/error.rs
use thiserror::Error;

/// Ошибки конвейера генерации
#[derive(Debug, Error, PartialEq, Eq)]
pub enum GenerationError {
    /// Отрицательное число шагов роста, отклоняется до запуска
    #[error("island growth must be non-negative, got {0}")]
    InvalidGrowthTarget(i64),

    /// Фронтир опустел (или доска заполнена) раньше, чем остров дорос до цели
    #[error("island growth stalled after {accepted} of {target} tiles")]
    GenerationStalled { accepted: usize, target: usize },

    #[error("invalid generation parameters: {0}")]
    InvalidParams(String),
}

/// Ошибки загрузки конфигурации
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse config: {0}")]
    Toml(#[from] toml::de::Error),
}
