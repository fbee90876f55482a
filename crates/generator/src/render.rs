//! Pure page assembly: dataset entry + service copy -> `PageSpec`.
//!
//! Rendering never touches the filesystem. Content variety comes from the
//! seeded sampler keyed on the page slug, so the same slug always renders
//! the same page.

use crate::schema;
use landing_kit_core::dataset::{Dataset, META_DESCRIPTION_SUFFIX};
use landing_kit_core::sampler::seeded_sample;
use landing_kit_core::slug::{apply_template, make_slug, normalize_slug};
use landing_kit_core::{Advantage, Faq, LocationEntry, ServiceType, SiteConfig};
use serde::Serialize;

// Per-call-site offsets keep the advantage, FAQ and related-page draws on
// independent streams for the same slug.
const ADVANTAGES_OFFSET: u32 = 0;
const FAQS_OFFSET: u32 = 31;
const RELATED_OFFSET: u32 = 67;

/// Optional slug/title overrides for single-page mode.
#[derive(Debug, Clone, Default)]
pub struct PageOverrides {
    pub slug: Option<String>,
    pub title: Option<String>,
}

/// Internal link to another landing page of the same service type.
#[derive(Debug, Clone, Serialize)]
pub struct RelatedPage {
    pub slug: String,
    pub name: String,
}

/// Everything the HTML template needs for one landing page.
#[derive(Debug, Clone, Serialize)]
pub struct PageSpec {
    pub slug: String,
    pub title: String,
    pub meta_description: String,
    pub location: LocationEntry,
    pub service: ServiceType,
    pub intro: String,
    pub why_heading: String,
    pub features_heading: String,
    pub features: Vec<String>,
    pub advantages: Vec<Advantage>,
    pub faqs: Vec<Faq>,
    pub keywords: Vec<String>,
    pub related: Vec<RelatedPage>,
    pub hero_image: String,
    pub url: String,
    pub faq_schema: serde_json::Value,
    pub service_schema: serde_json::Value,
}

/// Assemble the page spec for one location and service type.
pub fn render_page(
    location: &LocationEntry,
    service: ServiceType,
    dataset: &Dataset,
    site: &SiteConfig,
    overrides: &PageOverrides,
) -> PageSpec {
    let config = dataset.services.config(service);

    let slug = match &overrides.slug {
        Some(explicit) => normalize_slug(explicit),
        None => make_slug(&location.name, Some(service)),
    };
    let title = match &overrides.title {
        Some(explicit) => explicit.clone(),
        None => format!("{} {}", config.title, location.name),
    };

    let vars: &[(&str, &str)] = &[("location", &location.name)];

    let meta_description = format!(
        "{}{}",
        apply_template(&config.description, vars),
        META_DESCRIPTION_SUFFIX
    );

    let features: Vec<String> = config
        .features
        .iter()
        .map(|feature| apply_template(feature, vars))
        .collect();

    let advantages: Vec<Advantage> =
        seeded_sample(&dataset.advantages, &slug, ADVANTAGES_OFFSET, |r| {
            3 + (r * 3.0) as usize
        })
        .into_iter()
        .map(|advantage| Advantage {
            title: advantage.title,
            description: apply_template(&advantage.description, vars),
        })
        .collect();

    let faqs: Vec<Faq> = seeded_sample(&config.faqs, &slug, FAQS_OFFSET, |r| {
        4 + (r * 2.0) as usize
    })
    .into_iter()
    .map(|faq| Faq {
        question: apply_template(&faq.question, vars),
        answer: apply_template(&faq.answer, vars),
    })
    .collect();

    let keywords: Vec<String> = config
        .keywords
        .iter()
        .map(|keyword| apply_template(keyword, vars))
        .collect();

    let related = related_pages(location, service, dataset, &slug);

    let url = format!("{}/{}", site.site.base_url, slug);
    let faq_schema = schema::faq_schema(&faqs);
    let service_schema = schema::service_schema(
        &title,
        &meta_description,
        &url,
        service,
        &location.name,
        site,
    );

    PageSpec {
        slug,
        title,
        meta_description,
        location: location.clone(),
        service,
        intro: apply_template(&config.intro, vars),
        why_heading: apply_template(&config.why_heading, vars),
        features_heading: apply_template(&config.features_heading, vars),
        features,
        advantages,
        faqs,
        keywords,
        related,
        hero_image: service.hero_image().to_string(),
        url,
        faq_schema,
        service_schema,
    }
}

/// Other destinations offered for the same service type, excluding the
/// page's own location.
fn related_pages(
    location: &LocationEntry,
    service: ServiceType,
    dataset: &Dataset,
    slug: &str,
) -> Vec<RelatedPage> {
    let pool: Vec<LocationEntry> = dataset
        .flatten_locations()
        .into_iter()
        .filter(|other| !other.name.eq_ignore_ascii_case(&location.name))
        .collect();

    seeded_sample(&pool, slug, RELATED_OFFSET, |r| 3 + (r * 3.0) as usize)
        .into_iter()
        .map(|other| RelatedPage {
            slug: make_slug(&other.name, Some(service)),
            name: other.name,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fixtures() -> (Dataset, SiteConfig) {
        (Dataset::builtin(), SiteConfig::default())
    }

    fn bari(dataset: &Dataset) -> LocationEntry {
        dataset.find_location("Bari").unwrap()
    }

    #[test]
    fn test_render_is_deterministic() {
        let (dataset, site) = fixtures();
        let location = bari(&dataset);
        let overrides = PageOverrides::default();
        let a = render_page(&location, ServiceType::Transfer, &dataset, &site, &overrides);
        let b = render_page(&location, ServiceType::Transfer, &dataset, &site, &overrides);
        assert_eq!(a.slug, b.slug);
        assert_eq!(a.title, b.title);
        assert_eq!(a.faqs.len(), b.faqs.len());
        for (x, y) in a.faqs.iter().zip(&b.faqs) {
            assert_eq!(x.question, y.question);
        }
        for (x, y) in a.related.iter().zip(&b.related) {
            assert_eq!(x.slug, y.slug);
        }
    }

    #[test]
    fn test_default_slug_and_title() {
        let (dataset, site) = fixtures();
        let location = bari(&dataset);
        let spec = render_page(
            &location,
            ServiceType::Ncc,
            &dataset,
            &site,
            &PageOverrides::default(),
        );
        assert_eq!(spec.slug, "ncc-bari");
        assert_eq!(spec.title, "Servizio NCC a Bari");
        assert_eq!(spec.url, format!("{}/ncc-bari", site.site.base_url));
    }

    #[test]
    fn test_overrides_win_and_are_normalized() {
        let (dataset, site) = fixtures();
        let location = bari(&dataset);
        let overrides = PageOverrides {
            slug: Some("NCC Bari Centro".to_string()),
            title: Some("NCC Bari Centro Storico".to_string()),
        };
        let spec = render_page(&location, ServiceType::Ncc, &dataset, &site, &overrides);
        assert_eq!(spec.slug, "ncc-bari-centro");
        assert_eq!(spec.title, "NCC Bari Centro Storico");
    }

    #[test]
    fn test_placeholders_are_resolved_everywhere() {
        let (dataset, site) = fixtures();
        for location in dataset.flatten_locations().into_iter().take(4) {
            for service in ServiceType::ALL {
                let spec = render_page(
                    &location,
                    service,
                    &dataset,
                    &site,
                    &PageOverrides::default(),
                );
                assert!(!spec.meta_description.contains("{location}"));
                assert!(!spec.intro.contains("{location}"));
                assert!(!spec.why_heading.contains("{location}"));
                for feature in &spec.features {
                    assert!(!feature.contains("{location}"));
                }
                for faq in &spec.faqs {
                    assert!(!faq.question.contains("{location}"));
                    assert!(!faq.answer.contains("{location}"));
                }
            }
        }
    }

    #[test]
    fn test_sample_sizes_within_bounds() {
        let (dataset, site) = fixtures();
        for location in dataset.flatten_locations() {
            let spec = render_page(
                &location,
                ServiceType::Tour,
                &dataset,
                &site,
                &PageOverrides::default(),
            );
            assert_eq!(spec.features.len(), 6, "features are never sampled");
            assert!((3..=5).contains(&spec.advantages.len()));
            assert!((4..=5).contains(&spec.faqs.len()));
            assert!((3..=5).contains(&spec.related.len()));
        }
    }

    #[test]
    fn test_related_excludes_self_and_matches_service() {
        let (dataset, site) = fixtures();
        let location = bari(&dataset);
        let spec = render_page(
            &location,
            ServiceType::Rental,
            &dataset,
            &site,
            &PageOverrides::default(),
        );
        for related in &spec.related {
            assert_ne!(related.name, "Bari");
            assert!(related.slug.starts_with("rental-"));
        }
    }

    #[test]
    fn test_meta_description_carries_fixed_suffix() {
        let (dataset, site) = fixtures();
        let location = bari(&dataset);
        let spec = render_page(
            &location,
            ServiceType::Transfer,
            &dataset,
            &site,
            &PageOverrides::default(),
        );
        assert!(spec.meta_description.ends_with(META_DESCRIPTION_SUFFIX));
        assert!(spec.meta_description.contains("Bari"));
    }

    #[test]
    fn test_tour_uses_its_own_hero_image() {
        let (dataset, site) = fixtures();
        let location = bari(&dataset);
        let tour = render_page(
            &location,
            ServiceType::Tour,
            &dataset,
            &site,
            &PageOverrides::default(),
        );
        let ncc = render_page(
            &location,
            ServiceType::Ncc,
            &dataset,
            &site,
            &PageOverrides::default(),
        );
        assert_ne!(tour.hero_image, ncc.hero_image);
    }
}
