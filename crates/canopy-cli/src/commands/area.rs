//! Area command implementation

use super::{build_controller, finish_analysis, print_analysis};
use crate::cli::AreaArgs;
use crate::output::OutputWriter;
use crate::shape_input::shapes_from_args;
use anyhow::Result;
use canopy_controller::ScriptedEvents;
use canopy_core::config::LayeredConfig;
use canopy_core::models::UiEvent;

pub async fn execute(args: AreaArgs, config: &LayeredConfig, output: &OutputWriter) -> Result<()> {
    let shapes = shapes_from_args(&args.region)?;
    if shapes.len() > 1 {
        output.warning(format!(
            "{} polygons given; each new drawing replaces the last, analyzing the final one",
            shapes.len()
        ));
    }

    let mut controller = build_controller(config, output);

    let mut events = ScriptedEvents::new(shapes.into_iter().map(UiEvent::ShapeCreated));
    events.push(UiEvent::UpdateAnalysisClicked);

    let outcome = controller.run(&mut events).await.into_iter().next();
    let coordinates = controller.coordinates();

    let mut analysis = finish_analysis(&controller, outcome, args.analysis.save.as_deref()).await?;
    analysis.coordinates = coordinates;
    print_analysis(&controller, &analysis, output)
}
