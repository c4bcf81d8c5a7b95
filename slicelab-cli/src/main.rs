//! SliceLab CLI — basket slicing and migration planning commands.
//!
//! Commands:
//! - `slice` — decompose a basket into uniform-spend purchase steps, either
//!   at a fixed tolerance window or via the slop-budget search
//! - `walk` — print the interpolation path from an even split to the target
//! - `check` — load, validate (or rescale) and print a basket file

mod basket;
mod report;

use anyhow::{bail, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

use slicelab_core::domain::validate_investment;
use slicelab_core::engine::{decompose, interpolate, search_tolerance};
use slicelab_core::pricing::{price_plan, MIN_ORDER_DOLLARS};

use basket::load_basket;

#[derive(Parser)]
#[command(
    name = "slicelab",
    about = "SliceLab — decompose a basket allocation into discrete purchase slices"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Decompose a basket into an ordered purchase plan.
    Slice {
        /// Basket file (.toml, .json, or .csv of symbol → weight).
        #[arg(long)]
        basket: PathBuf,

        /// Investment amount in dollars.
        #[arg(long, short = 'i')]
        investment: f64,

        /// Max acceptable dollar slop. Enables the tolerance search; every
        /// plan whose slop grew is printed, coarsest-within-budget wins.
        #[arg(long, short = 'm')]
        max_slop: Option<f64>,

        /// Fixed tolerance window (weight percent). Ignored with --max-slop.
        #[arg(long, default_value_t = 0.0)]
        epsilon: f64,

        /// Brokerage minimum order size in dollars.
        #[arg(long, default_value_t = MIN_ORDER_DOLLARS)]
        min_order: f64,

        /// Rescale weights to sum to 100 instead of rejecting.
        #[arg(long, default_value_t = false)]
        scale: bool,

        /// Emit the final plan as JSON instead of a text report.
        #[arg(long, default_value_t = false)]
        json: bool,
    },
    /// Print the migration path from an even split to the target basket.
    Walk {
        /// Basket file (.toml, .json, or .csv of symbol → weight).
        #[arg(long)]
        basket: PathBuf,

        /// Rescale weights to sum to 100 instead of rejecting.
        #[arg(long, default_value_t = false)]
        scale: bool,
    },
    /// Validate a basket file and print its normalized weights.
    Check {
        /// Basket file (.toml, .json, or .csv of symbol → weight).
        #[arg(long)]
        basket: PathBuf,

        /// Rescale weights to sum to 100 instead of rejecting.
        #[arg(long, default_value_t = false)]
        scale: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    match cli.command {
        Commands::Slice {
            basket,
            investment,
            max_slop,
            epsilon,
            min_order,
            scale,
            json,
        } => cmd_slice(basket, investment, max_slop, epsilon, min_order, scale, json),
        Commands::Walk { basket, scale } => cmd_walk(basket, scale),
        Commands::Check { basket, scale } => cmd_check(basket, scale),
    }
}

#[allow(clippy::too_many_arguments)]
fn cmd_slice(
    basket_path: PathBuf,
    investment: f64,
    max_slop: Option<f64>,
    epsilon: f64,
    min_order: f64,
    scale: bool,
    json: bool,
) -> Result<()> {
    let investment = validate_investment(investment)?;
    if epsilon < 0.0 {
        bail!("epsilon must be non-negative, got {epsilon}");
    }
    if min_order < 0.0 {
        bail!("min-order must be non-negative, got {min_order}");
    }
    if let Some(budget) = max_slop {
        if budget < 0.0 {
            bail!("max-slop must be non-negative, got {budget}");
        }
    }

    let allocation = load_basket(&basket_path, scale)?;

    let plan = match max_slop {
        Some(budget) => {
            let search = search_tolerance(&allocation, investment, budget);
            if !json {
                print!("{}", report::render_search(&search, investment, min_order));
            }
            search.best
        }
        None => {
            let plan = decompose(&allocation, epsilon);
            if !json {
                print!(
                    "{}",
                    report::render_priced_plan(&price_plan(&plan, investment, min_order))
                );
            }
            plan
        }
    };

    if json {
        let priced = price_plan(&plan, investment, min_order);
        println!("{}", serde_json::to_string_pretty(&priced)?);
    }
    Ok(())
}

fn cmd_walk(basket_path: PathBuf, scale: bool) -> Result<()> {
    let allocation = load_basket(&basket_path, scale)?;
    let sequence = interpolate(&allocation);
    print!("{}", report::render_walk(&sequence, &allocation));
    Ok(())
}

fn cmd_check(basket_path: PathBuf, scale: bool) -> Result<()> {
    let allocation = load_basket(&basket_path, scale)?;
    print!("{}", report::render_basket(&allocation));
    Ok(())
}
