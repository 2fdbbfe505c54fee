use anyhow::Result;
use arrange_core::{preview, ArrangementRequest, ArrangementResult, Arranger};
use clap::{Parser, Subcommand};
use colored::*;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "arrange")]
#[command(about = "Sheet Arrangement Engine - Pack print designs onto sheets", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Arrange a design catalog onto sheets
    Arrange {
        /// Input request file (YAML or JSON)
        #[arg(short, long)]
        input: PathBuf,

        /// Output file for the result (JSON)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Render an SVG preview from a saved result
    Preview {
        /// Input result file (JSON)
        #[arg(short, long)]
        input: PathBuf,

        /// Output SVG file
        #[arg(short, long)]
        output: PathBuf,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Arrange { input, output } => {
            arrange_command(input, output)?;
        }
        Commands::Preview { input, output } => {
            preview_command(input, output)?;
        }
    }

    Ok(())
}

fn arrange_command(input: PathBuf, output: Option<PathBuf>) -> Result<()> {
    println!("{}", "🔍 Loading request...".bright_blue());

    let content = std::fs::read_to_string(&input)?;
    let extension = input.extension().and_then(|s| s.to_str());
    let request: ArrangementRequest = if extension == Some("yaml") || extension == Some("yml") {
        serde_yaml::from_str(&content)?
    } else {
        serde_json::from_str(&content)?
    };

    println!(
        "  {} designs to place",
        request.items.len().to_string().bright_white().bold()
    );
    let total_copies: u32 = request.items.iter().map(|i| i.copies).sum();
    println!(
        "  {} copies total on {:.0}x{:.0} mm sheets",
        total_copies.to_string().bright_white().bold(),
        request.sheet.sheet_width_mm,
        request.sheet.sheet_height_mm
    );
    println!();

    println!("{}", "🚀 Arranging...".bright_blue());

    let result = Arranger::new(request)?.arrange();

    println!();
    println!("{}", "✅ Arrangement complete!".bright_green().bold());
    println!();

    println!("{}", "📊 Results:".bright_yellow().bold());
    for sheet in &result.sheets {
        println!(
            "    • Sheet {}: {} items, {:.1}% efficiency",
            (sheet.sheet_index + 1).to_string().bright_white(),
            sheet.placements.len(),
            sheet.statistics.efficiency_percent
        );
    }
    println!();
    println!(
        "  Total sheets: {}",
        result.sheets.len().to_string().bright_white().bold()
    );
    println!(
        "  Overall efficiency: {:.1}%",
        result.statistics.efficiency_percent
    );
    println!(
        "  Waste area: {:.0} mm²",
        result.statistics.waste_area_mm2
    );

    if !result.unplaced.is_empty() {
        println!();
        println!(
            "{}",
            format!("⚠️  {} copies could not be placed:", result.unplaced.len())
                .bright_yellow()
                .bold()
        );
        for unplaced in &result.unplaced {
            println!(
                "    • {} copy {} ({})",
                unplaced.item_id.bright_white(),
                unplaced.copy_index,
                unplaced.reason.to_string().bright_red()
            );
        }
    }

    println!();

    if let Some(output_path) = output {
        let json = serde_json::to_string_pretty(&result)?;
        std::fs::write(&output_path, json)?;
        println!(
            "💾 Saved result to {}",
            output_path.display().to_string().bright_white()
        );
    } else {
        let json = serde_json::to_string_pretty(&result)?;
        println!("{}", json);
    }

    Ok(())
}

fn preview_command(input: PathBuf, output: PathBuf) -> Result<()> {
    println!("{}", "🔍 Loading result...".bright_blue());

    let content = std::fs::read_to_string(&input)?;
    let result: ArrangementResult = serde_json::from_str(&content)?;

    println!("{}", "🎨 Rendering SVG...".bright_blue());

    let svg = preview::render_svg(&result);
    std::fs::write(&output, svg)?;

    println!();
    println!(
        "{} Saved SVG to {}",
        "✅".bright_green(),
        output.display().to_string().bright_white()
    );

    Ok(())
}
