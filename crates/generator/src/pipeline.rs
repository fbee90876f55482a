//! Batch and single-page generation drivers.
//!
//! The batch never aborts on a single bad page: failures are tallied and
//! reported while the rest of the run continues. The two registry patches
//! happen once at the end, covering every page that was actually written.

use crate::emitter::{WriteOutcome, write_page};
use crate::html::page_html;
use crate::registry::{RegistryPatch, patch_route_registry, seed_route_registry};
use crate::render::{PageOverrides, render_page};
use crate::sitemap::{SitemapPatch, patch_sitemap, seed_sitemap};
use chrono::NaiveDate;
use landing_kit_core::{Dataset, LocationEntry, Result, ServiceType, SiteConfig};
use std::path::{Path, PathBuf};

/// One successfully written page.
#[derive(Debug, Clone)]
pub struct PageResult {
    pub slug: String,
    pub path: PathBuf,
    pub outcome: WriteOutcome,
}

/// One page that could not be written.
#[derive(Debug, Clone)]
pub struct PageFailure {
    pub slug: String,
    pub error: String,
}

/// What happened to one of the two registry files.
#[derive(Debug, Clone)]
pub enum PatchOutcome {
    Applied {
        added: usize,
        total: usize,
        changed: bool,
    },
    Failed {
        error: String,
    },
}

impl PatchOutcome {
    pub fn is_failed(&self) -> bool {
        matches!(self, PatchOutcome::Failed { .. })
    }

    fn from_registry(result: Result<RegistryPatch>) -> PatchOutcome {
        match result {
            Ok(patch) => PatchOutcome::Applied {
                added: patch.added,
                total: patch.total,
                changed: patch.changed,
            },
            Err(e) => PatchOutcome::Failed {
                error: e.to_string(),
            },
        }
    }

    fn from_sitemap(result: Result<SitemapPatch>) -> PatchOutcome {
        match result {
            Ok(patch) => PatchOutcome::Applied {
                added: patch.added,
                total: patch.total,
                changed: patch.changed,
            },
            Err(e) => PatchOutcome::Failed {
                error: e.to_string(),
            },
        }
    }
}

/// Full batch report.
#[derive(Debug)]
pub struct GenerationSummary {
    pub pages: Vec<PageResult>,
    pub failures: Vec<PageFailure>,
    pub registry: PatchOutcome,
    pub sitemap: PatchOutcome,
}

impl GenerationSummary {
    pub fn created(&self) -> usize {
        self.count(WriteOutcome::Created)
    }

    pub fn updated(&self) -> usize {
        self.count(WriteOutcome::Updated)
    }

    pub fn unchanged(&self) -> usize {
        self.count(WriteOutcome::Unchanged)
    }

    fn count(&self, outcome: WriteOutcome) -> usize {
        self.pages.iter().filter(|p| p.outcome == outcome).count()
    }
}

/// Single-page request: discrete values straight from the command line.
#[derive(Debug, Clone)]
pub struct PageRequest {
    pub slug: String,
    pub title: String,
    pub location: String,
    pub service: ServiceType,
}

/// Single-page report.
#[derive(Debug)]
pub struct SinglePageReport {
    pub slug: String,
    pub path: PathBuf,
    pub outcome: WriteOutcome,
    pub registry: PatchOutcome,
    pub sitemap: PatchOutcome,
}

/// Generate every page in the dataset: one per location and service type.
pub fn generate_all(
    project_root: &Path,
    dataset: &Dataset,
    site: &SiteConfig,
    today: NaiveDate,
) -> GenerationSummary {
    let pages_dir = project_root.join(&site.paths.pages_dir);

    let mut pages = Vec::new();
    let mut failures = Vec::new();
    for location in dataset.flatten_locations() {
        for service in ServiceType::ALL {
            let spec = render_page(&location, service, dataset, site, &PageOverrides::default());
            let html = page_html(&spec, site, false);
            match write_page(&pages_dir, &spec.slug, &html) {
                Ok((path, outcome)) => pages.push(PageResult {
                    slug: spec.slug,
                    path,
                    outcome,
                }),
                Err(e) => failures.push(PageFailure {
                    slug: spec.slug,
                    error: e.to_string(),
                }),
            }
        }
    }

    // Only pages that actually landed on disk get routed and listed.
    let slugs: Vec<String> = pages.iter().map(|p| p.slug.clone()).collect();
    let registry = apply_registry_patch(project_root, site, &slugs);
    let urls: Vec<String> = slugs
        .iter()
        .map(|slug| format!("{}/{}", site.site.base_url, slug))
        .collect();
    let sitemap = apply_sitemap_patch(project_root, site, &urls, today);

    GenerationSummary {
        pages,
        failures,
        registry,
        sitemap,
    }
}

/// Generate one page from discrete arguments. Unknown locations are
/// synthesized on the fly instead of rejected.
pub fn generate_one(
    project_root: &Path,
    dataset: &Dataset,
    site: &SiteConfig,
    request: &PageRequest,
    today: NaiveDate,
) -> Result<SinglePageReport> {
    let location = dataset
        .find_location(&request.location)
        .unwrap_or_else(|| synthesized_location(&request.location));

    let overrides = PageOverrides {
        slug: Some(request.slug.clone()),
        title: Some(request.title.clone()),
    };
    let spec = render_page(&location, request.service, dataset, site, &overrides);
    let html = page_html(&spec, site, false);

    let pages_dir = project_root.join(&site.paths.pages_dir);
    let (path, outcome) = write_page(&pages_dir, &spec.slug, &html)?;

    let registry = apply_registry_patch(project_root, site, std::slice::from_ref(&spec.slug));
    let urls = vec![format!("{}/{}", site.site.base_url, spec.slug)];
    let sitemap = apply_sitemap_patch(project_root, site, &urls, today);

    Ok(SinglePageReport {
        slug: spec.slug,
        path,
        outcome,
        registry,
        sitemap,
    })
}

fn apply_registry_patch(project_root: &Path, site: &SiteConfig, slugs: &[String]) -> PatchOutcome {
    let path = project_root.join(&site.paths.routes_file);
    let result = seed_if_missing(&path, seed_route_registry)
        .and_then(|_| patch_route_registry(&path, slugs));
    PatchOutcome::from_registry(result)
}

fn apply_sitemap_patch(
    project_root: &Path,
    site: &SiteConfig,
    urls: &[String],
    today: NaiveDate,
) -> PatchOutcome {
    let path = project_root.join(&site.paths.sitemap_file);
    let result =
        seed_if_missing(&path, seed_sitemap).and_then(|_| patch_sitemap(&path, urls, today));
    PatchOutcome::from_sitemap(result)
}

fn seed_if_missing(path: &Path, seed: impl FnOnce(&Path) -> Result<()>) -> Result<()> {
    if path.exists() { Ok(()) } else { seed(path) }
}

fn synthesized_location(name: &str) -> LocationEntry {
    LocationEntry {
        name: name.trim().to_string(),
        description: String::new(),
        province: String::new(),
        is_province: false,
        location: None,
        category: "custom".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::read_registry_slugs;
    use crate::sitemap::read_sitemap_urls;
    use landing_kit_core::dataset::LocationGroup;
    use std::fs;
    use tempfile::TempDir;

    fn fixture_dataset() -> Dataset {
        let builtin = Dataset::builtin();
        Dataset {
            groups: vec![LocationGroup {
                category: "citta".to_string(),
                locations: vec![
                    builtin.find_location("Bari").unwrap(),
                    builtin.find_location("Ostuni").unwrap(),
                ],
            }],
            services: builtin.services,
            advantages: builtin.advantages,
        }
    }

    fn today() -> NaiveDate {
        NaiveDate::parse_from_str("2026-08-22", "%Y-%m-%d").unwrap()
    }

    #[test]
    fn test_generate_all_writes_every_page() {
        let dir = TempDir::new().unwrap();
        let dataset = fixture_dataset();
        let site = SiteConfig::default();

        let summary = generate_all(dir.path(), &dataset, &site, today());

        assert_eq!(summary.pages.len(), 8);
        assert!(summary.failures.is_empty());
        assert_eq!(summary.created(), 8);

        for page in &summary.pages {
            assert!(page.path.is_file(), "missing {}", page.path.display());
        }

        let registry_path = dir.path().join(&site.paths.routes_file);
        let slugs = read_registry_slugs(&registry_path).unwrap();
        assert_eq!(slugs.len(), 8);
        assert!(slugs.contains(&"ncc-bari".to_string()));
        assert!(slugs.contains(&"rental-ostuni".to_string()));

        let sitemap_path = dir.path().join(&site.paths.sitemap_file);
        let urls = read_sitemap_urls(&sitemap_path).unwrap();
        assert_eq!(urls.len(), 8);
        assert!(urls.contains(&format!("{}/tour-ostuni", site.site.base_url)));

        match summary.registry {
            PatchOutcome::Applied { added, total, .. } => {
                assert_eq!(added, 8);
                assert_eq!(total, 8);
            }
            PatchOutcome::Failed { ref error } => panic!("registry patch failed: {}", error),
        }
    }

    #[test]
    fn test_second_run_changes_nothing() {
        let dir = TempDir::new().unwrap();
        let dataset = fixture_dataset();
        let site = SiteConfig::default();

        generate_all(dir.path(), &dataset, &site, today());
        let registry_path = dir.path().join(&site.paths.routes_file);
        let sitemap_path = dir.path().join(&site.paths.sitemap_file);
        let page_path = dir
            .path()
            .join(&site.paths.pages_dir)
            .join("ncc-bari/index.html");
        let registry_before = fs::read(&registry_path).unwrap();
        let sitemap_before = fs::read(&sitemap_path).unwrap();
        let page_before = fs::read(&page_path).unwrap();

        let summary = generate_all(dir.path(), &dataset, &site, today());

        assert_eq!(summary.unchanged(), 8);
        assert_eq!(summary.created() + summary.updated(), 0);
        assert_eq!(fs::read(&registry_path).unwrap(), registry_before);
        assert_eq!(fs::read(&sitemap_path).unwrap(), sitemap_before);
        assert_eq!(fs::read(&page_path).unwrap(), page_before);
        assert!(matches!(
            summary.registry,
            PatchOutcome::Applied { changed: false, .. }
        ));
        assert!(matches!(
            summary.sitemap,
            PatchOutcome::Applied { changed: false, .. }
        ));
    }

    #[test]
    fn test_generate_one_with_overrides() {
        let dir = TempDir::new().unwrap();
        let dataset = fixture_dataset();
        let site = SiteConfig::default();

        let request = PageRequest {
            slug: "ncc-bari-aeroporto".to_string(),
            title: "NCC Aeroporto di Bari".to_string(),
            location: "Bari".to_string(),
            service: ServiceType::Ncc,
        };
        let report = generate_one(dir.path(), &dataset, &site, &request, today()).unwrap();

        assert_eq!(report.slug, "ncc-bari-aeroporto");
        assert_eq!(report.outcome, WriteOutcome::Created);
        let html = fs::read_to_string(&report.path).unwrap();
        assert!(html.contains("NCC Aeroporto di Bari"));

        let slugs = read_registry_slugs(&dir.path().join(&site.paths.routes_file)).unwrap();
        assert_eq!(slugs, vec!["ncc-bari-aeroporto".to_string()]);
    }

    #[test]
    fn test_generate_one_synthesizes_unknown_location() {
        let dir = TempDir::new().unwrap();
        let dataset = fixture_dataset();
        let site = SiteConfig::default();

        let request = PageRequest {
            slug: "transfer-borgo-fittizio".to_string(),
            title: "Transfer per Borgo Fittizio".to_string(),
            location: "Borgo Fittizio".to_string(),
            service: ServiceType::Transfer,
        };
        let report = generate_one(dir.path(), &dataset, &site, &request, today()).unwrap();

        let html = fs::read_to_string(&report.path).unwrap();
        assert!(html.contains("Borgo Fittizio"));
        assert!(!html.contains("{location}"));
    }

    #[test]
    fn test_broken_registry_does_not_block_pages() {
        let dir = TempDir::new().unwrap();
        let dataset = fixture_dataset();
        let site = SiteConfig::default();

        let registry_path = dir.path().join(&site.paths.routes_file);
        fs::create_dir_all(registry_path.parent().unwrap()).unwrap();
        fs::write(&registry_path, "pub fn not_a_registry() {}\n").unwrap();
        let registry_before = fs::read(&registry_path).unwrap();

        let summary = generate_all(dir.path(), &dataset, &site, today());

        assert_eq!(summary.pages.len(), 8);
        assert!(summary.registry.is_failed());
        assert!(!summary.sitemap.is_failed());
        // The broken file is reported, never half-rewritten.
        assert_eq!(fs::read(&registry_path).unwrap(), registry_before);
    }
}
