use clap::Parser;
use hexisle::{IslandParams, generate_island_map};
use std::path::PathBuf;

/// Генератор шестиугольных островов
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Путь к конфигурационному файлу в формате TOML (без него — параметры по умолчанию)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Переопределяет сид из конфигурации
    #[arg(short, long)]
    seed: Option<u64>,

    /// Путь для сохранения карты (по умолчанию: ./island.json)
    #[arg(short, long, default_value = "island.json")]
    output: PathBuf,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();
    let cli = Cli::parse();

    let mut params = match &cli.config {
        Some(path) => {
            println!("🔍 Загрузка конфигурации из {}...", path.display());
            IslandParams::from_toml_file(path)?
        }
        None => IslandParams::default(),
    };
    if let Some(seed) = cli.seed {
        params.seed = seed;
    }

    println!(
        "Генерация острова (сид: {}, рост: {})...",
        params.seed, params.island_growth
    );
    let map = generate_island_map(&params)?;

    println!(
        "Суша: {}, горы: {}, гавани: {}, океан: {}",
        map.count(|f| f.land),
        map.count(|f| f.mountain),
        map.count(|f| f.harbor),
        map.count(|f| f.ocean)
    );

    println!("Сохранение в {:?}", cli.output);
    map.save_as_json(&cli.output)?;

    println!("\nГотово! Карта сохранена.");
    Ok(())
}
