// Print the recommendation for every variety under one set of conditions
//
// Usage: cargo run --bin recommend_table -- <soil_ph> <temperature_c> <soil_moisture_pct> [rainfall_mm]
// CATALOG_PATH overrides the built-in catalog.

use anyhow::{bail, Context, Result};
use std::path::Path;
use crop_advisor::engine::format_kg_ha;
use crop_advisor::{compute_recommendation, CropCatalog, WeatherSnapshot};

fn parse_arg(args: &[String], index: usize, name: &str) -> Result<f64> {
    let raw = args
        .get(index)
        .with_context(|| format!("missing argument <{}>", name))?;
    raw.parse()
        .with_context(|| format!("<{}> must be a number, got '{}'", name, raw))
}

fn main() -> Result<()> {
    let args: Vec<String> = std::env::args().collect();
    if args.len() < 4 {
        bail!("usage: recommend_table <soil_ph> <temperature_c> <soil_moisture_pct> [rainfall_mm]");
    }

    let soil_ph = parse_arg(&args, 1, "soil_ph")?;
    let weather = WeatherSnapshot {
        temperature_c: parse_arg(&args, 2, "temperature_c")?,
        soil_moisture_pct: parse_arg(&args, 3, "soil_moisture_pct")?,
        rainfall_mm: if args.len() > 4 { parse_arg(&args, 4, "rainfall_mm")? } else { 0.0 },
        humidity_pct: 70.0,
        condition: None,
    };

    let catalog = match std::env::var("CATALOG_PATH") {
        Ok(path) => CropCatalog::load(Path::new(&path))?,
        Err(_) => CropCatalog::builtin(),
    };

    println!(
        "Soil pH {:.1}, {}°C, soil moisture {}%, rainfall {}mm\n",
        soil_ph, weather.temperature_c, weather.soil_moisture_pct, weather.rainfall_mm
    );
    println!(
        "{:<20} {:<8} {:>10} {:>10} {:>10} {:>10} {:>12}",
        "Variety", "Tier", "N", "P", "K", "Irrigate", "pH fit"
    );
    println!("{}", "=".repeat(86));

    for variety in catalog.varieties() {
        let rec = compute_recommendation(&catalog, &variety.id, soil_ph, &weather)?;
        println!(
            "{:<20} {:<8} {:>10} {:>10} {:>10} {:>10} {:>12}",
            variety.id,
            rec.fertilizer_tier.as_str(),
            format_kg_ha(rec.npk.nitrogen_kg_ha),
            format_kg_ha(rec.npk.phosphorus_kg_ha),
            format_kg_ha(rec.npk.potassium_kg_ha),
            if rec.irrigation_needed { "yes" } else { "no" },
            if rec.compatibility.is_compatible { "ok" } else { "outside" },
        );
    }

    Ok(())
}
