use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// Canopy - Tree-cover analysis
#[derive(Parser, Debug)]
#[command(name = "canopy")]
#[command(about = "Send an image or a map region to the tree-detection backend", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Output results in JSON format
    #[arg(long, global = true)]
    pub json: bool,

    /// Configuration file (defaults to ./canopy.toml when present)
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Detection backend base URL
    #[arg(long, global = true, value_name = "URL")]
    pub server: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Analyze an uploaded image
    Image(ImageArgs),

    /// Draw a region and analyze it
    Area(AreaArgs),

    /// Draw a region and report its area without contacting the backend
    Measure(MeasureArgs),

    /// Show the resolved configuration and where each value came from
    Config,
}

#[derive(Parser, Debug)]
pub struct ImageArgs {
    /// Image file to upload
    pub file: PathBuf,

    #[command(flatten)]
    pub analysis: AnalysisArgs,
}

#[derive(Parser, Debug)]
pub struct AreaArgs {
    #[command(flatten)]
    pub region: RegionArgs,

    #[command(flatten)]
    pub analysis: AnalysisArgs,
}

#[derive(Parser, Debug)]
pub struct MeasureArgs {
    #[command(flatten)]
    pub region: RegionArgs,
}

/// Options shared by commands that call the backend
#[derive(Args, Debug)]
pub struct AnalysisArgs {
    /// Detection confidence threshold between 0 and 1
    #[arg(long, value_name = "X", value_parser = parse_conf)]
    pub conf: Option<f64>,

    /// Download the processed image into this directory
    #[arg(long, value_name = "DIR")]
    pub save: Option<PathBuf>,
}

/// Region to draw, exactly one of the three forms
#[derive(Args, Debug)]
#[group(required = true, multiple = false)]
pub struct RegionArgs {
    /// Rectangle as "south,west,north,east" in degrees
    #[arg(long, value_name = "S,W,N,E", allow_hyphen_values = true)]
    pub bbox: Option<String>,

    /// Polygon as "lat,lng;lat,lng;lat,lng;..."
    #[arg(long, value_name = "VERTICES", allow_hyphen_values = true)]
    pub polygon: Option<String>,

    /// GeoJSON file with Polygon or MultiPolygon geometries
    #[arg(long, value_name = "FILE")]
    pub geojson: Option<PathBuf>,
}

fn parse_conf(s: &str) -> Result<f64, String> {
    canopy_core::config::parse_confidence(s).map_err(|e| e.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_area_requires_one_region() {
        assert!(Cli::try_parse_from(["canopy", "area"]).is_err());
        assert!(Cli::try_parse_from([
            "canopy", "area", "--bbox", "1,2,3,4", "--polygon", "1,2;3,4;5,6"
        ])
        .is_err());
    }

    #[test]
    fn test_negative_bbox_parses() {
        let cli = Cli::try_parse_from(["canopy", "measure", "--bbox", "-1,-2,3,4"]).unwrap();
        match cli.command {
            Commands::Measure(args) => assert_eq!(args.region.bbox.as_deref(), Some("-1,-2,3,4")),
            other => panic!("Expected measure, got {:?}", other),
        }
    }

    #[test]
    fn test_conf_out_of_range_rejected() {
        assert!(Cli::try_parse_from(["canopy", "image", "a.jpg", "--conf", "1.5"]).is_err());
        let cli = Cli::try_parse_from(["canopy", "image", "a.jpg", "--conf", "0.3"]).unwrap();
        match cli.command {
            Commands::Image(args) => assert_eq!(args.analysis.conf, Some(0.3)),
            other => panic!("Expected image, got {:?}", other),
        }
    }
}
