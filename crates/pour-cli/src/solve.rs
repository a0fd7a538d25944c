//! Solve command - print the moves for one puzzle.

use anyhow::{Context, Result};
use clap::Args;
use console::style;

use pour_solver::{Config, SolveResponse, Step, WaterJugService};

#[derive(Args, Debug)]
pub struct SolveArgs {
    /// Capacity of bucket X
    #[arg(allow_negative_numbers = true)]
    pub x_capacity: i32,

    /// Capacity of bucket Y
    #[arg(allow_negative_numbers = true)]
    pub y_capacity: i32,

    /// Amount wanted in either bucket
    #[arg(allow_negative_numbers = true)]
    pub z_amount_wanted: i32,

    /// Print the same JSON payload the HTTP endpoint returns
    #[arg(long)]
    pub json: bool,
}

pub fn execute(args: SolveArgs, config: &Config) -> Result<i32> {
    let service = WaterJugService::from_config(&config.cache);

    let solution = match service.solve(args.x_capacity, args.y_capacity, args.z_amount_wanted) {
        Ok(solution) => solution,
        Err(e) => {
            if args.json {
                println!("{}", serde_json::json!({ "error": e.to_string() }));
            } else {
                eprintln!("{} {}", style("Error:").red().bold(), e);
            }
            return Ok(1);
        }
    };

    if args.json {
        let response = SolveResponse {
            solution: solution.to_vec(),
        };
        let rendered = serde_json::to_string_pretty(&response).context("Failed to encode solution")?;
        println!("{}", rendered);
        return Ok(0);
    }

    if solution.is_empty() {
        println!("{} Nothing to do: empty buckets already hold 0", style("Solved:").green().bold());
        return Ok(0);
    }

    println!(
        "{} {} moves with buckets of {} and {}",
        style("Solved:").green().bold(),
        solution.len(),
        args.x_capacity,
        args.y_capacity
    );
    println!();
    println!("  {:>4}  {:<16} {:>8} {:>8}", "Step", "Action", "X", "Y");
    for step in solution.iter() {
        println!("{}", format_step(step));
    }

    Ok(0)
}

fn format_step(step: &Step) -> String {
    let line = format!(
        "  {:>4}  {:<16} {:>8} {:>8}",
        step.step,
        step.action.label(),
        step.bucket_x,
        step.bucket_y
    );

    if step.is_solved() {
        format!("{}  {}", style(line).bold(), style("Solved").green())
    } else {
        line
    }
}
