//! Measure command implementation

use super::build_controller;
use crate::cli::MeasureArgs;
use crate::errors;
use crate::output::OutputWriter;
use crate::output_types::{MeasureOutput, RegionOutput};
use crate::shape_input::shapes_from_args;
use anyhow::Result;
use canopy_controller::ScriptedEvents;
use canopy_core::config::LayeredConfig;
use canopy_core::models::{ElementId, UiEvent};
use tabled::Tabled;

#[derive(Tabled)]
struct RegionRow {
    #[tabled(rename = "Shape")]
    shape: u64,
    #[tabled(rename = "Area (km²)")]
    area: String,
    #[tabled(rename = "Coordinates (S,W,N,E)")]
    coordinates: String,
}

pub async fn execute(args: MeasureArgs, config: &LayeredConfig, output: &OutputWriter) -> Result<()> {
    let shapes = shapes_from_args(&args.region)?;

    let mut controller = build_controller(config, output);
    let mut events = ScriptedEvents::default();
    controller.ready(&mut events);

    let mut regions = Vec::new();
    for shape in shapes {
        let id = shape.id;
        controller.handle(UiEvent::ShapeCreated(shape)).await;

        match controller.region() {
            Some(region) if region.shape_id == id => regions.push(RegionOutput::from(region)),
            _ => output.warning(format!("Shape {} is not a usable polygon, skipped", id.0)),
        }
    }

    if regions.is_empty() {
        return Err(errors::invalid_region("no usable polygon to measure").into());
    }

    let measured = MeasureOutput {
        regions,
        selected: controller.coordinates(),
    };

    if output.is_json() {
        return output.result(&measured);
    }

    output.section("Measured Regions");
    output.table(
        measured
            .regions
            .iter()
            .map(|r| RegionRow {
                shape: r.shape_id,
                area: format!("{:.2}", r.area_km2),
                coordinates: r.coordinates.clone(),
            })
            .collect(),
    );

    output.kv("Shapes on map", controller.map().overlay().len());
    output.kv("Selection", controller.page().text(ElementId::AreaInfo));
    if let Some(selected) = &measured.selected {
        output.kv("Coordinates", selected);
    }

    Ok(())
}
