use anyhow::Result;
use chrono::Local;
use landing_kit_core::{Dataset, ServiceType, load_site_config};
use landing_kit_generator::{PatchOutcome, generate_all};
use std::path::PathBuf;

/// Generate every landing page and patch the route registry and sitemap
pub async fn run(path: PathBuf, output: Option<PathBuf>) -> Result<()> {
    println!("🔨 Generating landing pages...");
    println!("   Project: {}", path.display());
    println!();

    if !path.exists() {
        anyhow::bail!("Project directory does not exist: {}", path.display());
    }

    let mut site = load_site_config(&path)?;
    if let Some(output) = output {
        site.paths.pages_dir = output;
    }

    let dataset = Dataset::builtin();
    let locations = dataset.flatten_locations().len();

    println!("✓ Loaded: {}", site.business.name);
    println!("  Base URL: {}", site.site.base_url);
    println!(
        "  Pages: {} locations x {} services = {}",
        locations,
        ServiceType::ALL.len(),
        locations * ServiceType::ALL.len()
    );
    println!();

    let today = Local::now().date_naive();
    let summary = generate_all(&path, &dataset, &site, today);

    println!("📄 Writing pages...");
    for page in &summary.pages {
        println!("   ✓ {} ({})", page.slug, page.outcome.as_str());
    }
    for failure in &summary.failures {
        eprintln!("   ⚠ {}: {}", failure.slug, failure.error);
    }

    println!();
    print_patch("Route registry", &summary.registry);
    print_patch("Sitemap", &summary.sitemap);

    println!();
    println!("✅ Generation complete!");
    println!(
        "   {} created, {} updated, {} unchanged",
        summary.created(),
        summary.updated(),
        summary.unchanged()
    );
    if !summary.failures.is_empty() {
        eprintln!("   ⚠ {} page(s) failed", summary.failures.len());
    }

    Ok(())
}

pub(crate) fn print_patch(label: &str, outcome: &PatchOutcome) {
    match outcome {
        PatchOutcome::Applied {
            added,
            total,
            changed,
        } => {
            if *changed {
                println!("🗺  {}: +{} entries ({} total)", label, added, total);
            } else {
                println!("🗺  {}: up to date ({} total)", label, total);
            }
        }
        PatchOutcome::Failed { error } => {
            eprintln!("   ⚠ {} not patched: {}", label, error);
        }
    }
}
