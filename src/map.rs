// src/map.rs
//! Сборка итоговой карты
//!
//! Порядок этапов:
//! 1. Рост острова (суша)
//! 2. Прибрежное кольцо вокруг суши (с повторами)
//! 3. Гавани из прибрежного кольца
//! 4. Океан — один слой вокруг суши и гаваней
//! 5. Горы и центр по оценке внутренности
//! 6. Сдвиг всех клеток так, чтобы центр оказался в начале координат
//!
//! Результат — [`IslandMap`], единственное, что получает рендерер.

use crate::config::IslandParams;
use crate::error::GenerationError;
use crate::harbor::harbors_of;
use crate::hex::{Cube, HexSet};
use crate::interior::pick_landmarks;
use crate::island::{IndexSource, RngSource, generate_island};
use crate::perimeter::{ocean_ring_around, ring_around};
use rand::SeedableRng;
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use std::path::Path;
use std::time::Instant;

/// Категории клетки; флаги не исключают друг друга
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TileFlags {
    pub land: bool,
    pub adjacent: bool,
    pub ocean: bool,
    pub harbor: bool,
    pub mountain: bool,
    pub center: bool,
}

impl TileFlags {
    #[must_use]
    pub fn union(self, other: TileFlags) -> TileFlags {
        TileFlags {
            land: self.land || other.land,
            adjacent: self.adjacent || other.adjacent,
            ocean: self.ocean || other.ocean,
            harbor: self.harbor || other.harbor,
            mountain: self.mountain || other.mountain,
            center: self.center || other.center,
        }
    }
}

/// Клетка итоговой карты
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tile {
    #[serde(flatten)]
    pub coord: Cube,
    #[serde(flatten)]
    pub flags: TileFlags,
}

/// Итоговая карта: клетки в порядке суша, прибрежные, океан, гавани
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IslandMap {
    pub tiles: Vec<Tile>,
    /// Центр в исходных координатах (до сдвига)
    pub center: Cube,
    /// Применённый сдвиг `(dq, dr)`
    pub offset: (i32, i32),
    /// Горы в исходных координатах
    pub mountains: Vec<Cube>,
}

impl IslandMap {
    /// Сколько клеток удовлетворяет условию на флаги
    pub fn count(&self, pred: impl Fn(&TileFlags) -> bool) -> usize {
        self.tiles.iter().filter(|t| pred(&t.flags)).count()
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }

    pub fn save_as_json(&self, path: impl AsRef<Path>) -> Result<(), Box<dyn std::error::Error>> {
        std::fs::write(path, self.to_json()?)?;
        Ok(())
    }
}

/// Полный конвейер с внешним источником случайности
pub fn build_island_map<S: IndexSource + ?Sized>(
    params: &IslandParams,
    source: &mut S,
) -> Result<IslandMap, GenerationError> {
    params.validate()?;
    let started = Instant::now();

    // === 1. Суша ===
    let island = generate_island(params.island_growth, params.board_radius, source)?;

    // === 2. Прибрежное кольцо (повторы сохраняются) ===
    let adjacent = ring_around(&island);

    // === 3. Гавани ===
    let harbors = harbors_of(&island, params.harbor_threshold);

    // === 4. Океан вокруг суши и гаваней ===
    let mut core: HexSet = island.clone();
    core.extend(harbors.iter().copied());
    let ocean = ocean_ring_around(&core);

    log::debug!(
        "Classified {} land, {} adjacent, {} harbor, {} ocean entries",
        island.len(),
        adjacent.len(),
        harbors.len(),
        ocean.len()
    );

    // === 5. Горы и центр ===
    let landmarks = pick_landmarks(&island, params.interiority_radius, params.mountain_count)
        .ok_or_else(|| GenerationError::InvalidParams("no center tile could be chosen".into()))?;
    let center = landmarks.center;
    let mountain_axial: HashSet<(i32, i32)> =
        landmarks.mountains.iter().map(|m| (m.q, m.r)).collect();

    // === 6. Сдвиг к центру ===
    let (dq, dr) = (-center.q, -center.r);

    let only = |flags: fn(&mut TileFlags)| {
        let mut base = TileFlags::default();
        flags(&mut base);
        base
    };
    let stages = [
        (island.as_slice(), only(|f| f.land = true)),
        (adjacent.as_slice(), only(|f| f.adjacent = true)),
        (ocean.as_slice(), only(|f| f.ocean = true)),
        (harbors.as_slice(), only(|f| f.harbor = true)),
    ];

    // Горы и центр сверяются по исходным координатам, выдаются сдвинутые
    let classified = stages
        .iter()
        .flat_map(|&(cells, base)| cells.iter().map(move |&cell| (cell, base)));
    let total = island.len() + adjacent.len() + ocean.len() + harbors.len();
    let mut tiles = Vec::with_capacity(total);
    let mut seen: HashMap<Cube, usize> = HashMap::new();

    for (cell, base) in classified {
        let flags = TileFlags {
            center: cell.same_axial(center),
            mountain: mountain_axial.contains(&(cell.q, cell.r)),
            ..base
        };

        if params.dedup_tiles {
            if let Some(&idx) = seen.get(&cell) {
                let tile: &mut Tile = &mut tiles[idx];
                tile.flags = tile.flags.union(flags);
                continue;
            }
            seen.insert(cell, tiles.len());
        }

        tiles.push(Tile {
            coord: cell.translate_axial(dq, dr, params.recenter_mode),
            flags,
        });
    }

    log::info!(
        "Assembled island map: {} tiles, center {:?}, {:.3?}",
        tiles.len(),
        center,
        started.elapsed()
    );

    Ok(IslandMap {
        tiles,
        center,
        offset: (dq, dr),
        mountains: landmarks.mountains,
    })
}

/// Полный конвейер с генератором `ChaCha8Rng`, засеянным `params.seed`
pub fn generate_island_map(params: &IslandParams) -> Result<IslandMap, GenerationError> {
    let mut source = RngSource(rand_chacha::ChaCha8Rng::seed_from_u64(params.seed));
    build_island_map(params, &mut source)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::RecenterMode;
    use crate::hex::DIRECTIONS;
    use crate::island::ScriptedSource;

    fn params(growth: i64) -> IslandParams {
        IslandParams {
            island_growth: growth,
            ..IslandParams::default()
        }
    }

    #[test]
    fn single_tile_map() {
        let map = build_island_map(&params(0), &mut ScriptedSource::new([0])).unwrap();

        assert_eq!(map.center, Cube::ORIGIN);
        assert_eq!(map.offset, (0, 0));
        assert_eq!(map.mountains, vec![Cube::ORIGIN]);
        assert_eq!(map.count(|f| f.land), 1);
        assert_eq!(map.count(|f| f.harbor), 0);

        let adjacent: Vec<Cube> = map
            .tiles
            .iter()
            .filter(|t| t.flags.adjacent)
            .map(|t| t.coord)
            .collect();
        assert_eq!(adjacent, DIRECTIONS.to_vec());

        // без гаваней океан совпадает с прибрежным кольцом, но без повторов
        assert_eq!(map.count(|f| f.ocean), 6);
        assert!(map.tiles.iter().all(|t| t.coord.distance(Cube::ORIGIN) <= 1));

        let first = map.tiles[0];
        assert!(first.flags.land && first.flags.center && first.flags.mountain);
    }

    #[test]
    fn tiles_are_ordered_land_adjacent_ocean_harbor() {
        let map = generate_island_map(&IslandParams {
            seed: 3,
            ..IslandParams::default()
        })
        .unwrap();

        let rank = |f: &TileFlags| {
            if f.land {
                0
            } else if f.adjacent {
                1
            } else if f.ocean {
                2
            } else {
                3
            }
        };
        assert!(
            map.tiles
                .windows(2)
                .all(|w| rank(&w[0].flags) <= rank(&w[1].flags))
        );
        assert_eq!(map.count(|f| f.land), 65);
    }

    #[test]
    fn center_lands_on_origin_and_cube_invariant_holds() {
        let map = generate_island_map(&IslandParams {
            seed: 11,
            ..IslandParams::default()
        })
        .unwrap();

        let centers: Vec<&Tile> = map.tiles.iter().filter(|t| t.flags.center).collect();
        assert_eq!(centers.len(), 1);
        assert_eq!(centers[0].coord, Cube::ORIGIN);
        assert!(centers[0].flags.land && centers[0].flags.mountain);
        assert!(map.tiles.iter().all(|t| t.coord.is_valid()));
        assert_eq!(map.count(|f| f.mountain), 14);
    }

    #[test]
    fn axial_only_shift_keeps_s() {
        let base = IslandParams {
            seed: 11,
            ..IslandParams::default()
        };
        let preserved = generate_island_map(&base).unwrap();
        let legacy = generate_island_map(&IslandParams {
            recenter_mode: RecenterMode::ShiftAxialOnly,
            ..base
        })
        .unwrap();

        assert_eq!(preserved.tiles.len(), legacy.tiles.len());
        let (dq, dr) = legacy.offset;
        for (p, l) in preserved.tiles.iter().zip(&legacy.tiles) {
            assert_eq!((p.coord.q, p.coord.r), (l.coord.q, l.coord.r));
            assert_eq!(p.flags, l.flags);
            // исходное s = -(q - dq) - (r - dr)
            assert_eq!(l.coord.s, -(l.coord.q - dq) - (l.coord.r - dr));
        }
    }

    #[test]
    fn duplicates_survive_by_default_and_merge_when_requested() {
        let base = IslandParams {
            seed: 5,
            ..IslandParams::default()
        };
        let raw = generate_island_map(&base).unwrap();
        let raw_unique: HashSet<Cube> = raw.tiles.iter().map(|t| t.coord).collect();
        assert!(raw_unique.len() < raw.tiles.len());

        let deduped = generate_island_map(&IslandParams {
            dedup_tiles: true,
            ..base
        })
        .unwrap();
        let unique: HashSet<Cube> = deduped.tiles.iter().map(|t| t.coord).collect();
        assert_eq!(unique.len(), deduped.tiles.len());
        assert_eq!(unique, raw_unique);

        // флаги повторов объединяются
        for tile in &deduped.tiles {
            let merged = raw
                .tiles
                .iter()
                .filter(|t| t.coord == tile.coord)
                .fold(TileFlags::default(), |acc, t| acc.union(t.flags));
            assert_eq!(tile.flags, merged);
        }
    }

    #[test]
    fn harbors_are_never_land_or_ocean() {
        let map = generate_island_map(&IslandParams {
            seed: 21,
            dedup_tiles: true,
            ..IslandParams::default()
        })
        .unwrap();
        for tile in map.tiles.iter().filter(|t| t.flags.harbor) {
            assert!(tile.flags.adjacent);
            assert!(!tile.flags.land && !tile.flags.ocean);
        }
        for tile in map.tiles.iter().filter(|t| t.flags.ocean) {
            assert!(!tile.flags.land && !tile.flags.harbor);
        }
    }

    #[test]
    fn invalid_params_are_reported() {
        assert_eq!(
            generate_island_map(&params(-1)),
            Err(GenerationError::InvalidGrowthTarget(-1))
        );
        let stalled = IslandParams {
            island_growth: 20,
            board_radius: Some(2),
            ..IslandParams::default()
        };
        assert_eq!(
            generate_island_map(&stalled),
            Err(GenerationError::GenerationStalled {
                accepted: 18,
                target: 20
            })
        );
    }

    #[test]
    fn json_output_is_flat_per_tile() {
        let map = build_island_map(&params(0), &mut ScriptedSource::new([0])).unwrap();
        let json: serde_json::Value = serde_json::from_str(&map.to_json().unwrap()).unwrap();
        let first = &json["tiles"][0];
        assert_eq!(first["q"], 0);
        assert_eq!(first["land"], true);
        assert_eq!(first["center"], true);
        assert_eq!(first["ocean"], false);
    }
}
