//! Generate the proposal deck from a branded template.
//!
//! Usage:
//!   longan <design_file> [--template genda] [--keep-existing] [--strict-placeholders]
//!
//! The template is resolved as `slides/templates/<name>.pptx`; the output
//! lands in `slides/output/` named after the design file's stem. Slide
//! content itself is compiled in (`longan::proposal`), so the design file
//! only names the output.

use clap::Parser;
use longan::pptx::{Deck, DeckConfig, PlaceholderTolerance};
use longan::proposal;
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "longan",
    version,
    about = "Generate the proposal deck from a branded .pptx template"
)]
struct Args {
    /// Design file; its stem names the generated .pptx under slides/output/
    design_file: PathBuf,

    /// Template name, resolved as slides/templates/<NAME>.pptx
    #[arg(short, long, default_value = "genda")]
    template: String,

    /// Keep the slides the template ships with instead of deleting them
    #[arg(long)]
    keep_existing: bool,

    /// Fail on unknown layout placeholder types instead of skipping them
    #[arg(long)]
    strict_placeholders: bool,
}

fn main() {
    let args = Args::parse();
    if let Err(e) = run(args) {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}

fn run(args: Args) -> longan::Result<()> {
    let template_path = PathBuf::from(format!("slides/templates/{}.pptx", args.template));
    let stem = args
        .design_file
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "presentation".to_string());
    let output_path = PathBuf::from("slides/output").join(format!("{}.pptx", stem));

    println!("Design file: {}", args.design_file.display());
    println!("Template: {}", template_path.display());
    println!("Output: {}", output_path.display());

    let config = DeckConfig {
        placeholder_tolerance: if args.strict_placeholders {
            PlaceholderTolerance::Strict
        } else {
            PlaceholderTolerance::Lenient
        },
    };
    let mut deck = Deck::open(&template_path, config)?;

    if !args.keep_existing {
        let removed = deck.delete_existing_slides()?;
        println!("Deleted {removed} existing slides from template");
    }

    println!("\nLoaded theme colors:");
    for (slot, color) in deck.theme().iter() {
        println!("  {}: {}", slot, color);
    }

    let area = deck.content_area();
    println!(
        "\nContent area: {}in - {}in (width: {}in)",
        area.left(),
        area.right(),
        area.width()
    );

    for (i, (label, builder)) in proposal::SLIDES.iter().enumerate() {
        builder(&mut deck)?;
        println!("Created slide {}: {}", i + 1, label);
    }

    if let Some(parent) = output_path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    deck.save(&output_path)?;

    println!("\nSaved to: {}", output_path.display());
    println!("Total slides: {}", deck.slide_count());

    Ok(())
}
