use crate::error::{Error, Result};
use crate::types::*;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

/// Name of the per-project configuration file.
pub const SITE_CONFIG_FILE: &str = "site.toml";

const DEFAULT_PAGES_DIR: &str = "site/pages";
const DEFAULT_ROUTES_FILE: &str = "site/src/seo_slugs.rs";
const DEFAULT_SITEMAP_FILE: &str = "site/src/sitemap.rs";

impl Default for SiteConfig {
    fn default() -> Self {
        SiteConfig {
            business: Business {
                name: "Apulia Drive NCC".to_string(),
                phone: "+39 331 245 7890".to_string(),
                email: "info@apuliadrive.it".to_string(),
                address: Address {
                    street: "Via Giuseppe Capruzzi 112".to_string(),
                    city: "Bari".to_string(),
                    postal_code: "70124".to_string(),
                    region: "BA".to_string(),
                    country: "IT".to_string(),
                },
            },
            site: SiteMeta {
                base_url: "https://www.apuliadrive.it".to_string(),
                brand: "Apulia Drive".to_string(),
            },
            paths: SitePaths {
                pages_dir: PathBuf::from(DEFAULT_PAGES_DIR),
                routes_file: PathBuf::from(DEFAULT_ROUTES_FILE),
                sitemap_file: PathBuf::from(DEFAULT_SITEMAP_FILE),
            },
        }
    }
}

/// Raw TOML configuration structure
/// This matches the site.toml file structure exactly
#[derive(Debug, Deserialize)]
struct RawConfig {
    business: RawBusiness,
    site: RawSiteMeta,
    #[serde(default)]
    paths: Option<RawPaths>,
}

#[derive(Debug, Deserialize)]
struct RawBusiness {
    name: String,
    phone: String,
    email: String,
    address: RawAddress,
}

#[derive(Debug, Deserialize)]
struct RawAddress {
    street: String,
    city: String,
    postal_code: String,
    region: String,
    country: String,
}

#[derive(Debug, Deserialize)]
struct RawSiteMeta {
    base_url: String,
    brand: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
struct RawPaths {
    pages_dir: Option<String>,
    routes_file: Option<String>,
    sitemap_file: Option<String>,
}

/// Load `site.toml` from a project root, falling back to the built-in
/// defaults when the file does not exist.
pub fn load_site_config<P: AsRef<Path>>(project_root: P) -> Result<SiteConfig> {
    let path = project_root.as_ref().join(SITE_CONFIG_FILE);
    if path.exists() {
        parse_site_toml(&path)
    } else {
        Ok(SiteConfig::default())
    }
}

/// Parse site.toml from a file path
pub fn parse_site_toml<P: AsRef<Path>>(path: P) -> Result<SiteConfig> {
    let content = fs::read_to_string(path)?;
    parse_site_toml_str(&content)
}

/// Parse site.toml from a string (useful for testing)
pub fn parse_site_toml_str(content: &str) -> Result<SiteConfig> {
    let raw: RawConfig = toml::from_str(content)?;

    let base_url = normalize_base_url(&raw.site.base_url)?;

    // The brand falls back to the business name when not set.
    let brand = raw
        .site
        .brand
        .filter(|b| !b.trim().is_empty())
        .unwrap_or_else(|| raw.business.name.clone());

    // Convert output paths, validating each one.
    let raw_paths = raw.paths.unwrap_or_default();
    let pages_dir = resolve_path(raw_paths.pages_dir, DEFAULT_PAGES_DIR, "paths.pages_dir")?;
    let routes_file = resolve_path(
        raw_paths.routes_file,
        DEFAULT_ROUTES_FILE,
        "paths.routes_file",
    )?;
    let sitemap_file = resolve_path(
        raw_paths.sitemap_file,
        DEFAULT_SITEMAP_FILE,
        "paths.sitemap_file",
    )?;

    Ok(SiteConfig {
        business: Business {
            name: raw.business.name,
            phone: raw.business.phone,
            email: raw.business.email,
            address: Address {
                street: raw.business.address.street,
                city: raw.business.address.city,
                postal_code: raw.business.address.postal_code,
                region: raw.business.address.region,
                country: raw.business.address.country,
            },
        },
        site: SiteMeta { base_url, brand },
        paths: SitePaths {
            pages_dir,
            routes_file,
            sitemap_file,
        },
    })
}

/// Canonical form of the base URL: absolute http(s), no trailing slash.
/// Page URLs are built as `base_url + "/" + slug`, so a trailing slash
/// here would produce double slashes in the sitemap.
fn normalize_base_url(url: &str) -> Result<String> {
    let trimmed = url.trim().trim_end_matches('/');
    if !trimmed.starts_with("https://") && !trimmed.starts_with("http://") {
        return Err(Error::ConfigParse(format!(
            "Invalid site.base_url '{}': expected an absolute http(s) URL",
            url
        )));
    }
    Ok(trimmed.to_string())
}

fn resolve_path(value: Option<String>, default: &str, field_name: &str) -> Result<PathBuf> {
    match value {
        Some(path_str) => validate_path(&path_str, field_name),
        None => Ok(PathBuf::from(default)),
    }
}

/// Validate and convert a path string to PathBuf.
///
/// Rejects absolute paths and parent directory references (`..`) so a
/// site.toml cannot point the generator at files outside the project
/// directory.
///
/// # Arguments
///
/// * `path_str` - The path string from user input (site.toml)
/// * `field_name` - Name of the field for error messages
fn validate_path(path_str: &str, field_name: &str) -> Result<PathBuf> {
    let path = Path::new(path_str);

    // Reject absolute paths
    if path.is_absolute() {
        return Err(Error::ConfigParse(format!(
            "Absolute paths not allowed in '{}': '{}'. Use relative paths only.",
            field_name, path_str
        )));
    }

    // Check for parent directory references
    for component in path.components() {
        if component == std::path::Component::ParentDir {
            return Err(Error::ConfigParse(format!(
                "Parent directory references (..) not allowed in '{}': '{}'",
                field_name, path_str
            )));
        }
    }

    // Ensure path is not empty
    if path_str.trim().is_empty() {
        return Err(Error::ConfigParse(format!(
            "Empty path in '{}' field",
            field_name
        )));
    }

    Ok(path.to_path_buf())
}
