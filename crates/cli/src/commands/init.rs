use anyhow::{Context, Result};
use landing_kit_core::config::SITE_CONFIG_FILE;
use landing_kit_core::{SiteConfig, load_site_config};
use landing_kit_generator::{seed_route_registry, seed_sitemap};
use std::fs;
use std::path::{Path, PathBuf};
use toml;

/// Escape a string for safe inclusion in TOML per TOML v1.0.0 spec
///
/// Handles the required escape sequences for TOML basic strings:
/// - Backslash (\\) -> \\\\
/// - Quote (\") -> \\\"
/// - Backspace (\b) -> \\b
/// - Form feed (\f) -> \\f
/// - Newline (\n) -> \\n
/// - Carriage return (\r) -> \\r
/// - Tab (\t) -> \\t
///
/// Manual escaping instead of toml crate serialization because the
/// generated file is a commented template, not a plain document.
///
/// See: https://toml.io/en/v1.0.0#string
fn toml_escape_string(s: &str) -> String {
    s.replace('\\', "\\\\")
        .replace('"', "\\\"")
        .replace('\x08', "\\b")
        .replace('\x0C', "\\f")
        .replace('\n', "\\n")
        .replace('\r', "\\r")
        .replace('\t', "\\t")
}

/// Validate email format
/// Checks for basic RFC 5322 compliance without full regex
fn is_valid_email(email: &str) -> bool {
    // Must have exactly one @ symbol
    let at_count = email.matches('@').count();
    if at_count != 1 {
        return false;
    }

    let parts: Vec<&str> = email.split('@').collect();
    let local = parts[0];
    let domain = parts[1];

    // Local part (before @) checks
    if local.is_empty() || local.len() > 64 {
        return false;
    }

    // Domain checks
    if domain.is_empty() || domain.len() > 255 {
        return false;
    }

    // Domain must have at least one dot
    if !domain.contains('.') {
        return false;
    }

    // Domain can't start/end with dot or hyphen
    if domain.starts_with('.')
        || domain.ends_with('.')
        || domain.starts_with('-')
        || domain.ends_with('-')
    {
        return false;
    }

    // No consecutive dots
    if domain.contains("..") {
        return false;
    }

    // Domain must have valid TLD (at least 2 chars after last dot)
    if let Some(last_dot) = domain.rfind('.') {
        let tld = &domain[last_dot + 1..];
        if tld.len() < 2 {
            return false;
        }
    }

    true
}

/// Initialize a new site project directory.
///
/// Creates a commented `site.toml` template, the pages directory and the
/// two seeded registry files (route slugs and sitemap), so a first
/// `landing-kit generate` run has everything it needs.
///
/// # Arguments
///
/// * `path` - Path to the directory to initialize (must exist)
/// * `name` / `phone` / `email` / `base_url` - Optional values baked into
///   the template; anything not given gets a placeholder with a TODO
///
/// # Errors
///
/// Returns an error if the directory doesn't exist, site.toml is already
/// present, or a provided email/base URL is malformed.
pub async fn run(
    path: PathBuf,
    name: Option<String>,
    phone: Option<String>,
    email: Option<String>,
    base_url: Option<String>,
) -> Result<()> {
    println!("Initializing site project: {}", path.display());

    if !path.exists() {
        anyhow::bail!(
            "Directory '{}' does not exist. Create it first: mkdir {}",
            path.display(),
            path.display()
        );
    }

    let site_toml_path = path.join(SITE_CONFIG_FILE);
    if site_toml_path.exists() {
        anyhow::bail!(
            "site.toml already exists at {}\nHint: Delete it first or use a different directory",
            site_toml_path.display()
        );
    }

    generate_site_toml(
        &path,
        name.as_deref(),
        phone.as_deref(),
        email.as_deref(),
        base_url.as_deref(),
    )?;
    println!("✓ Generated site.toml");

    let site = load_site_config(&path).context("Failed to load generated site.toml")?;
    create_site_structure(&path, &site)?;
    println!("✓ Created pages directory");
    println!("✓ Seeded route registry and sitemap");

    println!("\n✓ Initialization complete!");
    println!("\nGenerated structure:");
    println!("  {}/", path.display());
    println!("  ├── site.toml            ← Edit this to set business details");
    println!("  └── site/");
    println!("      ├── pages/           ← Generated pages land here");
    println!("      └── src/");
    println!("          ├── seo_slugs.rs");
    println!("          └── sitemap.rs");

    println!("\nNext steps:");
    println!("  1. Edit site.toml (business details, base URL)");
    println!("  2. Generate pages: landing-kit generate {}", path.display());
    println!("  3. Preview: landing-kit preview {}", path.display());

    Ok(())
}

fn generate_site_toml(
    base: &Path,
    name: Option<&str>,
    phone: Option<&str>,
    email: Option<&str>,
    base_url: Option<&str>,
) -> Result<()> {
    if let Some(e) = email
        && !is_valid_email(e)
    {
        anyhow::bail!("Invalid email format: '{}'", e);
    }

    // The config loader rejects relative base URLs, so catch them here
    // with a message that points at the flag instead of the template.
    if let Some(u) = base_url
        && !(u.starts_with("https://") || u.starts_with("http://"))
    {
        anyhow::bail!("Invalid base URL '{}': expected an absolute http(s) URL", u);
    }

    // Escape user input for safe TOML inclusion
    let business_name = toml_escape_string(name.unwrap_or("Business Name"));
    let business_phone = toml_escape_string(phone.unwrap_or("+39 000 000 0000"));
    let business_email = toml_escape_string(email.unwrap_or("info@example.com"));
    let site_base_url = toml_escape_string(base_url.unwrap_or("https://www.example.com"));

    let name_comment = if name.is_some() {
        ""
    } else {
        "  # TODO: Set business name"
    };
    let phone_comment = if phone.is_some() {
        ""
    } else {
        "  # TODO: Set phone number"
    };
    let email_comment = if email.is_some() {
        ""
    } else {
        "  # TODO: Set email"
    };
    let base_url_comment = if base_url.is_some() {
        ""
    } else {
        "  # TODO: Set base URL"
    };

    let toml = format!(
        "# Generated by landing-kit init\n\
# Edit this file to customize your site\n\
\n\
[business]\n\
name = \"{business_name}\"{name_comment}\n\
phone = \"{business_phone}\"{phone_comment}\n\
email = \"{business_email}\"{email_comment}\n\
\n\
[business.address]\n\
street = \"Via Esempio 1\"  # TODO: Set street address\n\
city = \"Bari\"  # TODO: Set city\n\
postal_code = \"70100\"  # TODO: Set postal code\n\
region = \"BA\"  # Province plate code\n\
country = \"IT\"\n\
\n\
[site]\n\
base_url = \"{site_base_url}\"{base_url_comment}\n\
# brand = \"Short Name\"  # Optional, appended to page titles; defaults to the business name\n\
\n\
[paths]\n\
pages_dir = \"site/pages\"\n\
routes_file = \"site/src/seo_slugs.rs\"\n\
sitemap_file = \"site/src/sitemap.rs\"\n"
    );

    // Validate the generated TOML can be parsed
    toml::from_str::<toml::Value>(&toml)
        .context("Generated TOML is invalid - this is a bug in the template generator")?;

    fs::write(base.join(SITE_CONFIG_FILE), toml)?;

    Ok(())
}

fn create_site_structure(base: &Path, site: &SiteConfig) -> Result<()> {
    fs::create_dir_all(base.join(&site.paths.pages_dir))?;
    seed_route_registry(&base.join(&site.paths.routes_file))?;
    seed_sitemap(&base.join(&site.paths.sitemap_file))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use landing_kit_core::config::parse_site_toml_str;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_toml_escape_string() {
        // Test quote escaping
        assert_eq!(toml_escape_string(r#"Test "Quote""#), r#"Test \"Quote\""#);

        // Test backslash escaping
        assert_eq!(toml_escape_string(r"Test\Back"), r"Test\\Back");

        // Test newline escaping
        assert_eq!(toml_escape_string("Test\nNewline"), r"Test\nNewline");

        // Test normal string (no escaping needed)
        assert_eq!(toml_escape_string("Normal String"), "Normal String");
    }

    #[test]
    fn test_is_valid_email() {
        // Valid emails
        assert!(is_valid_email("user@example.com"));
        assert!(is_valid_email("test.user@domain.co.uk"));
        assert!(is_valid_email("name+tag@example.org"));

        // Invalid emails - missing or doubled @
        assert!(!is_valid_email("user"));
        assert!(!is_valid_email(""));
        assert!(!is_valid_email("user@@example.com"));

        // Invalid emails - missing parts
        assert!(!is_valid_email("@example.com"));
        assert!(!is_valid_email("user@"));

        // Invalid emails - invalid domain
        assert!(!is_valid_email("user@domain")); // No TLD
        assert!(!is_valid_email("user@.com")); // Domain starts with dot
        assert!(!is_valid_email("user@domain.")); // Domain ends with dot
        assert!(!is_valid_email("user@domain.c")); // TLD too short
        assert!(!is_valid_email("user@domain..com")); // Consecutive dots

        // Invalid emails - local part too long
        let long_local = "a".repeat(65);
        assert!(!is_valid_email(&format!("{}@example.com", long_local)));
    }

    #[test]
    fn test_generate_site_toml_defaults() {
        let dir = TempDir::new().unwrap();
        generate_site_toml(dir.path(), None, None, None, None).unwrap();

        let content = fs::read_to_string(dir.path().join("site.toml")).unwrap();
        assert!(content.contains("[business]"));
        assert!(content.contains("[business.address]"));
        assert!(content.contains("[site]"));
        assert!(content.contains("[paths]"));
        assert!(content.contains("TODO: Set business name"));
        assert!(content.contains("TODO: Set phone number"));
        assert!(content.contains("TODO: Set email"));
        assert!(content.contains("TODO: Set base URL"));

        // The template must round-trip through the real config parser.
        let site = parse_site_toml_str(&content).unwrap();
        assert_eq!(site.business.name, "Business Name");
        assert_eq!(site.paths.pages_dir, PathBuf::from("site/pages"));
        assert_eq!(site.paths.routes_file, PathBuf::from("site/src/seo_slugs.rs"));
    }

    #[test]
    fn test_generate_site_toml_with_overrides() {
        let dir = TempDir::new().unwrap();
        generate_site_toml(
            dir.path(),
            Some("Salento Go"),
            Some("+39 111 222 3333"),
            Some("booking@salentogo.example"),
            Some("https://salentogo.example"),
        )
        .unwrap();

        let content = fs::read_to_string(dir.path().join("site.toml")).unwrap();
        assert!(content.contains(r#"name = "Salento Go""#));
        assert!(content.contains(r#"phone = "+39 111 222 3333""#));
        assert!(!content.contains("TODO: Set business name"));
        assert!(!content.contains("TODO: Set phone number"));
        assert!(!content.contains("TODO: Set email"));
        assert!(!content.contains("TODO: Set base URL"));

        let site = parse_site_toml_str(&content).unwrap();
        assert_eq!(site.site.base_url, "https://salentogo.example");
        assert_eq!(site.site.brand, "Salento Go");
    }

    #[test]
    fn test_generate_site_toml_escapes_special_characters() {
        let dir = TempDir::new().unwrap();
        generate_site_toml(dir.path(), Some(r#"Drive "Deluxe""#), None, None, None).unwrap();

        let content = fs::read_to_string(dir.path().join("site.toml")).unwrap();
        assert!(content.contains(r#"Drive \"Deluxe\""#));
        assert!(toml::from_str::<toml::Value>(&content).is_ok());
    }

    #[test]
    fn test_generate_site_toml_rejects_invalid_email() {
        let dir = TempDir::new().unwrap();
        let result = generate_site_toml(dir.path(), None, None, Some("not-an-email"), None);
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("Invalid email"));
    }

    #[test]
    fn test_generate_site_toml_rejects_invalid_base_url() {
        let dir = TempDir::new().unwrap();
        let result = generate_site_toml(dir.path(), None, None, None, Some("www.example.com"));
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("base URL"));
    }

    #[test]
    fn test_create_site_structure_seeds_files() {
        let dir = TempDir::new().unwrap();
        let site = SiteConfig::default();
        create_site_structure(dir.path(), &site).unwrap();

        assert!(dir.path().join(&site.paths.pages_dir).is_dir());
        let registry = fs::read_to_string(dir.path().join(&site.paths.routes_file)).unwrap();
        assert!(registry.contains("pub const SEO_SLUGS"));
        let sitemap = fs::read_to_string(dir.path().join(&site.paths.sitemap_file)).unwrap();
        assert!(sitemap.contains("fn sitemap_entries"));
    }
}
