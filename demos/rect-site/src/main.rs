//! Rectangular Site Example
//!
//! Plans every boundary edge of a rectangular lot and prints the best row
//! patterns found for each edge.
//!
//! ```text
//! cargo run -p rect-site -- [width] [depth]
//! ```
//!
//! A `parkforge.toml` in the working directory overrides the default
//! planner configuration.

use parkforge::prelude::*;
use parkforge::{Branch, PlanError, RowNode};

/// How many ranked patterns to print per edge.
const TOP_N: usize = 3;

fn main() -> Result<(), PlanError> {
    let mut args = std::env::args().skip(1);
    let width = args.next().and_then(|a| a.parse().ok()).unwrap_or(40.0);
    let depth = args.next().and_then(|a| a.parse().ok()).unwrap_or(25.0);

    println!("parkforge Rectangular Site Example");
    println!("==================================\n");
    println!("Site: {} x {} m", width, depth);

    let config = PlannerConfig::load_or_default("parkforge.toml")?;
    let planner = ParkingPlanner::new(config)?;
    println!(
        "Catalog: {}\n",
        planner
            .catalog()
            .iter()
            .map(|t| t.label())
            .collect::<Vec<_>>()
            .join(", ")
    );

    let zone = planner.zone(Polygon::rectangle(width, depth))?;
    let plan = planner.plan_site(&zone)?;

    for edge in &plan.edges {
        println!(
            "\nEdge {} ({} layouts, usable depth {:.2} m):",
            edge.edge_id,
            edge.branches.len(),
            zone.max_offset_length(edge.edge_id)?
        );
        for (rank, branch) in edge.branches.iter().take(TOP_N).enumerate() {
            println!("  {}. {}", rank + 1, describe(branch));
        }
    }

    match plan.best() {
        Some(best) => println!(
            "\nBest overall: edge {} │ {}",
            best.edge_id(),
            describe(best)
        ),
        None => println!("\nNo feasible layout for this site."),
    }
    Ok(())
}

fn describe(branch: &Branch) -> String {
    let rows: Vec<String> = branch
        .rows()
        .iter()
        .map(|row| match row {
            RowNode::Stall(stall) => stall.stall_type().label(),
            RowNode::Road(_) => "road".to_string(),
        })
        .collect();
    format!(
        "{} │ score {:.1} │ {:.2} m │ {}",
        branch.kinds(),
        branch.metric_value(),
        branch.total_width(),
        rows.join(" / ")
    )
}
