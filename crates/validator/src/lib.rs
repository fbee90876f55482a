//! Project validation: dataset hygiene, registry anchors and the
//! route/page cross-check.
//!
//! Errors block generation from being trusted; warnings are advisory and
//! never fail a run.

use landing_kit_core::dataset::{Dataset, KNOWN_PROVINCES};
use landing_kit_core::{Error, ServiceConfig, SiteConfig};
use landing_kit_generator::{read_registry_slugs, read_sitemap_urls};
use std::collections::{HashMap, HashSet};
use std::io;
use std::path::Path;
use walkdir::WalkDir;

#[derive(Debug, Default)]
pub struct ValidationReport {
    pub errors: Vec<String>,
    pub warnings: Vec<String>,
    pub info: Vec<String>,
}

impl ValidationReport {
    pub fn is_ok(&self) -> bool {
        self.errors.is_empty()
    }

    fn error(&mut self, message: impl Into<String>) {
        self.errors.push(message.into());
    }

    fn warn(&mut self, message: impl Into<String>) {
        self.warnings.push(message.into());
    }

    fn note(&mut self, message: impl Into<String>) {
        self.info.push(message.into());
    }
}

/// Run every check against a project directory.
pub fn validate_project(
    project_root: &Path,
    dataset: &Dataset,
    site: &SiteConfig,
) -> ValidationReport {
    let mut report = ValidationReport::default();
    check_locations(dataset, &mut report);
    check_templates(dataset, &mut report);
    check_registries(project_root, site, &mut report);
    report
}

fn check_locations(dataset: &Dataset, report: &mut ValidationReport) {
    let names: HashSet<&str> = dataset
        .groups
        .iter()
        .flat_map(|g| g.locations.iter())
        .map(|l| l.name.as_str())
        .collect();

    let mut first_category: HashMap<&str, &str> = HashMap::new();
    for group in &dataset.groups {
        for location in &group.locations {
            match first_category.get(location.name.as_str()) {
                Some(first) => report.warn(format!(
                    "Duplicate location '{}' in category '{}' (already listed in '{}'); the first entry wins",
                    location.name, group.category, first
                )),
                None => {
                    first_category.insert(&location.name, &group.category);
                }
            }

            if location.description.trim().is_empty() {
                report.warn(format!("Location '{}' has no description", location.name));
            }

            if !KNOWN_PROVINCES.contains(&location.province.as_str()) {
                report.error(format!(
                    "Location '{}' has unknown province code '{}' (expected one of {})",
                    location.name,
                    location.province,
                    KNOWN_PROVINCES.join(", ")
                ));
            }

            if let Some(parent) = &location.location
                && !names.contains(parent.as_str())
            {
                report.warn(format!(
                    "Location '{}' references parent '{}' which is not in the dataset",
                    location.name, parent
                ));
            }
        }
    }
}

/// The renderer only ever substitutes `{location}`; any other placeholder
/// would reach the published page verbatim.
fn check_templates(dataset: &Dataset, report: &mut ValidationReport) {
    for (service, config) in [
        ("ncc", &dataset.services.ncc),
        ("transfer", &dataset.services.transfer),
        ("tour", &dataset.services.tour),
        ("rental", &dataset.services.rental),
    ] {
        for (field, template) in service_templates(config) {
            for placeholder in placeholders(&template) {
                if placeholder != "location" {
                    report.error(format!(
                        "services.{}.{} uses unknown placeholder '{{{}}}'",
                        service, field, placeholder
                    ));
                }
            }
        }
    }

    for (index, advantage) in dataset.advantages.iter().enumerate() {
        for placeholder in placeholders(&advantage.description) {
            if placeholder != "location" {
                report.error(format!(
                    "advantages[{}] uses unknown placeholder '{{{}}}'",
                    index, placeholder
                ));
            }
        }
    }
}

fn service_templates(config: &ServiceConfig) -> Vec<(String, String)> {
    let mut templates = vec![
        ("description".to_string(), config.description.clone()),
        ("intro".to_string(), config.intro.clone()),
        ("why_heading".to_string(), config.why_heading.clone()),
        (
            "features_heading".to_string(),
            config.features_heading.clone(),
        ),
    ];
    for (i, feature) in config.features.iter().enumerate() {
        templates.push((format!("features[{}]", i), feature.clone()));
    }
    for (i, faq) in config.faqs.iter().enumerate() {
        templates.push((format!("faqs[{}].question", i), faq.question.clone()));
        templates.push((format!("faqs[{}].answer", i), faq.answer.clone()));
    }
    for (i, keyword) in config.keywords.iter().enumerate() {
        templates.push((format!("keywords[{}]", i), keyword.clone()));
    }
    templates
}

/// `{key}` occurrences with an alphanumeric/underscore key. Mirrors what
/// the template substitution recognizes.
fn placeholders(template: &str) -> Vec<String> {
    let bytes = template.as_bytes();
    let mut found = Vec::new();
    let mut i = 0;
    while i < bytes.len() {
        if bytes[i] == b'{' {
            let mut j = i + 1;
            while j < bytes.len() && (bytes[j].is_ascii_alphanumeric() || bytes[j] == b'_') {
                j += 1;
            }
            if j < bytes.len() && bytes[j] == b'}' && j > i + 1 {
                found.push(template[i + 1..j].to_string());
                i = j + 1;
                continue;
            }
        }
        i += 1;
    }
    found
}

fn check_registries(project_root: &Path, site: &SiteConfig, report: &mut ValidationReport) {
    let routes_path = project_root.join(&site.paths.routes_file);
    let registry_slugs = match read_registry_slugs(&routes_path) {
        Ok(slugs) => {
            report.note(format!(
                "Route registry lists {} slugs ({})",
                slugs.len(),
                routes_path.display()
            ));
            Some(slugs)
        }
        Err(Error::IoError(e)) if e.kind() == io::ErrorKind::NotFound => {
            report.note(format!(
                "Route registry not found at {}; it will be seeded on the next generate",
                routes_path.display()
            ));
            None
        }
        Err(e) => {
            report.error(e.to_string());
            None
        }
    };

    let sitemap_path = project_root.join(&site.paths.sitemap_file);
    match read_sitemap_urls(&sitemap_path) {
        Ok(urls) => report.note(format!(
            "Sitemap lists {} urls ({})",
            urls.len(),
            sitemap_path.display()
        )),
        Err(Error::IoError(e)) if e.kind() == io::ErrorKind::NotFound => {
            report.note(format!(
                "Sitemap not found at {}; it will be seeded on the next generate",
                sitemap_path.display()
            ));
        }
        Err(e) => report.error(e.to_string()),
    }

    if let Some(slugs) = registry_slugs {
        cross_check_pages(project_root, site, &slugs, report);
    }
}

/// Two-way comparison between the route registry and the pages on disk.
fn cross_check_pages(
    project_root: &Path,
    site: &SiteConfig,
    registry_slugs: &[String],
    report: &mut ValidationReport,
) {
    let pages_dir = project_root.join(&site.paths.pages_dir);
    if !pages_dir.is_dir() {
        report.note(format!(
            "Pages directory not found at {}; nothing generated yet",
            pages_dir.display()
        ));
        return;
    }

    let on_disk = scan_page_slugs(&pages_dir);
    let disk_set: HashSet<&str> = on_disk.iter().map(String::as_str).collect();
    let registry_set: HashSet<&str> = registry_slugs.iter().map(String::as_str).collect();

    for slug in registry_slugs {
        if !disk_set.contains(slug.as_str()) {
            report.warn(format!(
                "Route '{}' is registered but has no generated page",
                slug
            ));
        }
    }
    for slug in &on_disk {
        if !registry_set.contains(slug.as_str()) {
            report.warn(format!(
                "Page '{}' exists on disk but is not in the route registry",
                slug
            ));
        }
    }
}

/// Slugs that have an `index.html` under the pages directory.
fn scan_page_slugs(pages_dir: &Path) -> Vec<String> {
    let mut slugs = Vec::new();
    for entry in WalkDir::new(pages_dir)
        .min_depth(2)
        .max_depth(2)
        .into_iter()
        .flatten()
    {
        if entry.file_type().is_file()
            && entry.file_name() == "index.html"
            && let Some(slug) = entry
                .path()
                .parent()
                .and_then(|p| p.file_name())
                .and_then(|n| n.to_str())
        {
            slugs.push(slug.to_string());
        }
    }
    slugs.sort();
    slugs
}
