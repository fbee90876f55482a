use anyhow::Result;
use chrono::Local;
use landing_kit_core::{Dataset, ServiceType, load_site_config};
use landing_kit_generator::{PageRequest, generate_one};
use std::path::PathBuf;

use super::generate::print_patch;

/// Generate a single page with a custom slug and title
pub async fn run(
    project: PathBuf,
    slug: String,
    title: String,
    location: String,
    service: ServiceType,
) -> Result<()> {
    println!("📄 Creating page '{}'...", slug);
    println!("   Project: {}", project.display());
    println!();

    if !project.exists() {
        anyhow::bail!("Project directory does not exist: {}", project.display());
    }

    let site = load_site_config(&project)?;
    let dataset = Dataset::builtin();

    if dataset.find_location(&location).is_none() {
        println!(
            "   ⚠ '{}' is not in the dataset, using generic copy for it",
            location
        );
    }

    let request = PageRequest {
        slug,
        title,
        location,
        service,
    };
    let today = Local::now().date_naive();
    let report = generate_one(&project, &dataset, &site, &request, today)?;

    println!("✓ Wrote {} ({})", report.path.display(), report.outcome.as_str());
    print_patch("Route registry", &report.registry);
    print_patch("Sitemap", &report.sitemap);

    println!();
    println!("✅ Page ready: {}/{}", site.site.base_url, report.slug);

    Ok(())
}
