//! Reduce, cluster and bind a small extracted palette.
//!
//! Run with `RUST_LOG=swatchbook=debug` to see what each stage decided.

use swatchbook::{
    AnsiLayout, AnsiPalette, Ciede2000, CliqueReducer, Hsl, RoleFrequencies, Rgb, SyntaxGroup,
    SyntaxPalette,
};
use tracing_subscriber::EnvFilter;

fn main() -> swatchbook::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    // Two shades of each of six hues, plus near-duplicates an extractor
    // would typically return.
    let mut colors: Vec<Rgb> = [5.0, 45.0, 110.0, 175.0, 225.0, 290.0]
        .iter()
        .flat_map(|&h| {
            [
                Rgb::from_hsl(Hsl::new(h, 0.7, 0.35)),
                Rgb::from_hsl(Hsl::new(h, 0.7, 0.7)),
            ]
        })
        .collect();
    colors.push(Rgb::from_hex("#b22f22")?);
    colors.push(Rgb::from_hex("#3ab5b7")?);

    // --- Diversity reduction (CIEDE2000 > 10) ---
    let kept = CliqueReducer::new(10.0).reduce(&colors, &Ciede2000)?;
    println!("=== Reduced {} colors to {} ===", colors.len(), kept.len());
    for c in &kept {
        println!("  {c}");
    }

    // --- Terminal palette ---
    let ansi = AnsiPalette::classify(&kept, AnsiLayout::RedGreen)?;
    println!("\n=== ANSI palette ===");
    for (i, c) in ansi.slots().iter().enumerate() {
        println!("  color{i:<2} {c}");
    }

    // --- Editor syntax groups ---
    let syntax = SyntaxPalette::bind(&kept, &RoleFrequencies::default())?;
    println!("\n=== Syntax groups ===");
    for group in SyntaxGroup::ALL {
        println!(
            "  {:<10} {} ({} colors)",
            group.name(),
            syntax.color(group),
            syntax.cluster(group).len()
        );
    }
    for (name, color) in syntax.bindings() {
        println!("  hi {name} guifg={color}");
    }

    Ok(())
}
