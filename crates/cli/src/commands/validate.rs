use anyhow::Result;
use landing_kit_core::{Dataset, load_site_config};
use landing_kit_validator::validate_project;
use std::path::PathBuf;

pub async fn run(path: PathBuf) -> Result<()> {
    println!("Validating project at: {}", path.display());

    if !path.exists() {
        anyhow::bail!("Project directory does not exist: {}", path.display());
    }

    let site = load_site_config(&path)?;
    let dataset = Dataset::builtin();

    println!("✓ Configuration loaded: {}", site.business.name);
    println!();

    let report = validate_project(&path, &dataset, &site);

    for note in &report.info {
        println!("  {}", note);
    }
    for warning in &report.warnings {
        println!("⚠ {}", warning);
    }
    for error in &report.errors {
        eprintln!("✗ {}", error);
    }

    println!();
    if !report.is_ok() {
        anyhow::bail!("Validation failed with {} error(s)", report.errors.len());
    }

    println!("✅ Validation passed ({} warning(s))", report.warnings.len());
    Ok(())
}
