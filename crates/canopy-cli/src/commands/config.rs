//! Config command implementation

use crate::output::OutputWriter;
use crate::output_types::{ConfigEntry, ConfigOutput};
use anyhow::{Context, Result};
use canopy_core::config::LayeredConfig;
use tabled::Tabled;

#[derive(Tabled)]
struct ConfigRow {
    #[tabled(rename = "Key")]
    key: String,
    #[tabled(rename = "Value")]
    value: String,
    #[tabled(rename = "Source")]
    source: String,
}

pub fn execute(config: &LayeredConfig, output: &OutputWriter) -> Result<()> {
    let mut inspection_map = config.to_inspection_map();

    if output.is_json() {
        let mut entry = |key: &str| {
            inspection_map
                .remove(key)
                .map(|(value, source)| ConfigEntry { value, source })
                .with_context(|| format!("Configuration key {} missing", key))
        };

        return output.result(ConfigOutput {
            server_url: entry("server_url")?,
            confidence: entry("confidence")?,
            map_center: entry("map_center")?,
            map_zoom: entry("map_zoom")?,
            tile_url: entry("tile_url")?,
        });
    }

    output.section("Configuration Values");

    let mut rows: Vec<ConfigRow> = inspection_map
        .into_iter()
        .map(|(key, (value, source))| ConfigRow {
            key,
            value,
            source: format!("{:?}", source),
        })
        .collect();

    // Sort by key for consistent output
    rows.sort_by(|a, b| a.key.cmp(&b.key));

    output.table(rows);

    output.section("Configuration Precedence");
    output.info("CLI arguments > Environment variables > Config file > Defaults");

    Ok(())
}
