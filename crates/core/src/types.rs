use crate::error::Error;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

/// One landing-page destination.
///
/// Identity is the `name`: the raw dataset may list the same place under
/// several categories and flattening keeps the first occurrence only.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LocationEntry {
    pub name: String,
    pub description: String,
    /// Province plate code (BA, BR, BT, FG, LE, TA, MT).
    pub province: String,
    #[serde(default)]
    pub is_province: bool,
    /// Parent locality for hamlets and beaches (e.g. Torre dell'Orso sits
    /// in Melendugno).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    pub category: String,
}

/// The four services the business sells.
///
/// CLI arguments parse strictly via `FromStr`; dataset strings go through
/// `from_str_lenient`, which falls back to `Ncc` so an entry with a missing
/// or unknown type still renders instead of aborting the batch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ServiceType {
    Ncc,
    Transfer,
    Tour,
    Rental,
}

impl ServiceType {
    pub const ALL: [ServiceType; 4] = [
        ServiceType::Ncc,
        ServiceType::Transfer,
        ServiceType::Tour,
        ServiceType::Rental,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ServiceType::Ncc => "ncc",
            ServiceType::Transfer => "transfer",
            ServiceType::Tour => "tour",
            ServiceType::Rental => "rental",
        }
    }

    /// Human-readable label used in the Service schema block.
    pub fn label(&self) -> &'static str {
        match self {
            ServiceType::Ncc => "Noleggio con conducente",
            ServiceType::Transfer => "Transfer privato",
            ServiceType::Tour => "Tour privato",
            ServiceType::Rental => "Noleggio auto",
        }
    }

    /// Hero image for the page header. Tours get their own shot, every
    /// other service shares the fleet picture.
    pub fn hero_image(&self) -> &'static str {
        match self {
            ServiceType::Tour => "/images/tour-valle-itria.jpg",
            _ => "/images/flotta-mercedes.jpg",
        }
    }

    /// Lenient constructor for dataset strings: unknown values render with
    /// the `ncc` copy instead of failing the page.
    pub fn from_str_lenient(s: &str) -> ServiceType {
        ServiceType::from_str(s).unwrap_or(ServiceType::Ncc)
    }
}

impl FromStr for ServiceType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "ncc" => Ok(ServiceType::Ncc),
            "transfer" => Ok(ServiceType::Transfer),
            "tour" => Ok(ServiceType::Tour),
            "rental" => Ok(ServiceType::Rental),
            other => Err(Error::InvalidData(format!(
                "Unknown service type '{}', expected one of: ncc, transfer, tour, rental",
                other
            ))),
        }
    }
}

impl fmt::Display for ServiceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Copy templates for one service type. Every template string may use the
/// `{location}` placeholder.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceConfig {
    /// Title prefix from the phrase table, e.g. "Servizio NCC a".
    pub title: String,
    pub description: String,
    pub intro: String,
    pub why_heading: String,
    pub features_heading: String,
    pub features: Vec<String>,
    pub faqs: Vec<Faq>,
    pub keywords: Vec<String>,
}

/// Per-type copy plus the service-independent pools.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceCatalog {
    pub ncc: ServiceConfig,
    pub transfer: ServiceConfig,
    pub tour: ServiceConfig,
    pub rental: ServiceConfig,
}

impl ServiceCatalog {
    pub fn config(&self, service: ServiceType) -> &ServiceConfig {
        match service {
            ServiceType::Ncc => &self.ncc,
            ServiceType::Transfer => &self.transfer,
            ServiceType::Tour => &self.tour,
            ServiceType::Rental => &self.rental,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Advantage {
    pub title: String,
    pub description: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Faq {
    pub question: String,
    pub answer: String,
}

/// Complete site configuration, loaded from `site.toml` or built in.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SiteConfig {
    pub business: Business,
    pub site: SiteMeta,
    pub paths: SitePaths,
}

/// Business identity embedded in the Service schema provider block and the
/// contact footer of every generated page.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Business {
    pub name: String,
    pub phone: String,
    pub email: String,
    pub address: Address,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Address {
    pub street: String,
    pub city: String,
    pub postal_code: String,
    pub region: String,
    pub country: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SiteMeta {
    /// Canonical origin without a trailing slash, e.g.
    /// "https://www.apuliadrive.it".
    pub base_url: String,
    /// Short brand name appended to page titles.
    pub brand: String,
}

/// Where generated artifacts live, relative to the project root.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SitePaths {
    pub pages_dir: PathBuf,
    pub routes_file: PathBuf,
    pub sitemap_file: PathBuf,
}

/// One sitemap row. Generated pages contribute exactly one entry each,
/// keyed by URL.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SitemapEntry {
    pub url: String,
    pub last_modified: NaiveDate,
    pub change_frequency: String,
    pub priority: f32,
}

impl SitemapEntry {
    pub fn page(url: impl Into<String>, last_modified: NaiveDate) -> SitemapEntry {
        SitemapEntry {
            url: url.into(),
            last_modified,
            change_frequency: "weekly".to_string(),
            priority: 0.8,
        }
    }

    /// The exact struct-literal line the sitemap patcher writes into the
    /// site source. Must stay byte-stable: the patcher dedupes by URL and
    /// never rewrites lines it finds already present.
    pub fn to_source_line(&self) -> String {
        format!(
            "        SitemapEntry {{ url: \"{}\", last_modified: \"{}\", change_frequency: \"{}\", priority: {:.1} }},",
            self.url,
            self.last_modified.format("%Y-%m-%d"),
            self.change_frequency,
            self.priority
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_service_type_round_trip() {
        for service in ServiceType::ALL {
            assert_eq!(ServiceType::from_str(service.as_str()).unwrap(), service);
        }
    }

    #[test]
    fn test_service_type_strict_parse_rejects_unknown() {
        assert!(ServiceType::from_str("shuttle").is_err());
        assert!(ServiceType::from_str("").is_err());
        let err = ServiceType::from_str("invalid-type").unwrap_err();
        assert!(err.to_string().contains("ncc, transfer, tour, rental"));
    }

    #[test]
    fn test_service_type_strict_parse_accepts_case_and_whitespace() {
        assert_eq!(ServiceType::from_str(" NCC ").unwrap(), ServiceType::Ncc);
        assert_eq!(ServiceType::from_str("Tour").unwrap(), ServiceType::Tour);
    }

    #[test]
    fn test_service_type_lenient_falls_back_to_ncc() {
        assert_eq!(ServiceType::from_str_lenient("transfer"), ServiceType::Transfer);
        assert_eq!(ServiceType::from_str_lenient("limousine"), ServiceType::Ncc);
        assert_eq!(ServiceType::from_str_lenient(""), ServiceType::Ncc);
    }

    #[test]
    fn test_hero_image_by_service() {
        assert_eq!(ServiceType::Tour.hero_image(), "/images/tour-valle-itria.jpg");
        for service in [ServiceType::Ncc, ServiceType::Transfer, ServiceType::Rental] {
            assert_eq!(service.hero_image(), "/images/flotta-mercedes.jpg");
        }
    }

    #[test]
    fn test_sitemap_entry_source_line() {
        let date = NaiveDate::from_ymd_opt(2026, 8, 22).unwrap();
        let entry = SitemapEntry::page("https://www.apuliadrive.it/ncc-bari", date);
        assert_eq!(
            entry.to_source_line(),
            "        SitemapEntry { url: \"https://www.apuliadrive.it/ncc-bari\", last_modified: \"2026-08-22\", change_frequency: \"weekly\", priority: 0.8 },"
        );
    }
}
