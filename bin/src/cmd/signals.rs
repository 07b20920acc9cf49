//! Signal listing command implementation.

use displacement::signals::registry::{available_categories, signals_by_category};

/// List registered signals, optionally filtered by category.
pub(crate) fn list_signals(category: Option<&str>, verbose: bool) {
    println!("\n╔══════════════════════════════════════════════════════════════╗");
    println!("║                    Composite Signals                         ║");
    println!("╚══════════════════════════════════════════════════════════════╝\n");

    for cat in available_categories() {
        let cat_name = format!("{cat:?}");
        if let Some(filter) = category
            && !cat_name.to_lowercase().contains(&filter.to_lowercase())
        {
            continue;
        }

        println!("{cat_name}: {}", cat.description());
        println!("{}", "-".repeat(60));

        for info in signals_by_category(&cat) {
            if verbose {
                println!("  {:18} weight {:.2}  {}", info.id.as_str(), info.weight, info.description);
                println!(
                    "  {:18} {:?}, {}, {}",
                    "", info.resolution, info.quantity, info.direction
                );
                println!("  {:18} {}", "", info.source_path);
            } else {
                println!("  {:18} {:.2}", info.id.as_str(), info.weight);
            }
        }
        println!();
    }

    if !verbose {
        println!("Use --verbose for sources, directions and descriptions.\n");
    }
}
