use std::env;
use std::fs;
use std::path::Path;

use wxx_codec::{Map, Result, WxxError};

/// File kinds the converter understands, chosen by extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Format {
    Wxx,
    Json,
}

impl Format {
    fn from_path(path: &Path) -> Result<Self> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_ascii_lowercase())
            .unwrap_or_default();
        match ext.as_str() {
            "wxx" => Ok(Format::Wxx),
            "json" => Ok(Format::Json),
            other => Err(WxxError::NotImplemented(format!("{:?} files", other))),
        }
    }
}

fn read_map(path: &Path) -> Result<Map> {
    let format = Format::from_path(path)?;
    let data = fs::read(path)?;
    match format {
        Format::Wxx => wxx_codec::import(&data),
        Format::Json => Ok(serde_json::from_slice(&data)?),
    }
}

fn write_map(path: &Path, map: &Map) -> Result<()> {
    let data = match Format::from_path(path)? {
        Format::Wxx => wxx_codec::export(map)?,
        Format::Json => serde_json::to_vec_pretty(map)?,
    };
    fs::write(path, data)?;
    Ok(())
}

fn main() {
    env_logger::init();
    let args: Vec<String> = env::args().collect();

    if args.iter().any(|arg| arg == "--version") {
        println!("wxconv {}", env!("CARGO_PKG_VERSION"));
        return;
    }
    if args.len() != 3 {
        eprintln!("Usage: {} <input.wxx|input.json> <output.wxx|output.json>", args[0]);
        std::process::exit(2);
    }

    let input = Path::new(&args[1]);
    let output = Path::new(&args[2]);

    let map = match read_map(input) {
        Ok(map) => map,
        Err(e) => {
            eprintln!("ERROR: Failed to read {}", input.display());
            eprintln!("  {}", e);
            std::process::exit(1);
        }
    };

    if let Err(e) = write_map(output, &map) {
        eprintln!("ERROR: Failed to write {}", output.display());
        eprintln!("  {}", e);
        std::process::exit(1);
    }

    println!(
        "Converted {} -> {} ({} tile rows, {} features, {} labels)",
        input.display(),
        output.display(),
        map.tiles.tile_rows.len(),
        map.features.len(),
        map.labels.len()
    );
}
