//! JSON-LD structured data blocks embedded in every landing page.

use landing_kit_core::{Faq, ServiceType, SiteConfig};
use serde_json::{Value, json};

/// FAQPage schema built from the page's sampled FAQ set.
pub fn faq_schema(faqs: &[Faq]) -> Value {
    let main_entity: Vec<Value> = faqs
        .iter()
        .map(|faq| {
            json!({
                "@type": "Question",
                "name": faq.question,
                "acceptedAnswer": {
                    "@type": "Answer",
                    "text": faq.answer,
                },
            })
        })
        .collect();

    json!({
        "@context": "https://schema.org",
        "@type": "FAQPage",
        "mainEntity": main_entity,
    })
}

/// Service schema with the configured business as provider.
///
/// The offer block advertises price 0: rates are quoted per ride, the
/// zero price only satisfies the schema requirement of an Offer node.
pub fn service_schema(
    title: &str,
    description: &str,
    page_url: &str,
    service: ServiceType,
    location_name: &str,
    site: &SiteConfig,
) -> Value {
    let business = &site.business;
    json!({
        "@context": "https://schema.org",
        "@type": "Service",
        "name": title,
        "serviceType": service.label(),
        "description": description,
        "url": page_url,
        "provider": {
            "@type": "LocalBusiness",
            "name": business.name,
            "telephone": business.phone,
            "email": business.email,
            "url": site.site.base_url,
            "address": {
                "@type": "PostalAddress",
                "streetAddress": business.address.street,
                "addressLocality": business.address.city,
                "postalCode": business.address.postal_code,
                "addressRegion": business.address.region,
                "addressCountry": business.address.country,
            },
        },
        "areaServed": {
            "@type": "City",
            "name": location_name,
        },
        "offers": {
            "@type": "Offer",
            "price": "0",
            "priceCurrency": "EUR",
            "availability": "https://schema.org/InStock",
        },
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_faqs() -> Vec<Faq> {
        vec![
            Faq {
                question: "Quanto costa?".to_string(),
                answer: "Dipende dal percorso.".to_string(),
            },
            Faq {
                question: "Come prenoto?".to_string(),
                answer: "Per telefono o WhatsApp.".to_string(),
            },
        ]
    }

    #[test]
    fn test_faq_schema_shape() {
        let schema = faq_schema(&sample_faqs());
        assert_eq!(schema["@type"], "FAQPage");
        let entities = schema["mainEntity"].as_array().unwrap();
        assert_eq!(entities.len(), 2);
        assert_eq!(entities[0]["name"], "Quanto costa?");
        assert_eq!(entities[1]["acceptedAnswer"]["text"], "Per telefono o WhatsApp.");
    }

    #[test]
    fn test_service_schema_provider_comes_from_config() {
        let site = SiteConfig::default();
        let schema = service_schema(
            "Servizio NCC a Bari",
            "Descrizione.",
            "https://www.apuliadrive.it/ncc-bari",
            ServiceType::Ncc,
            "Bari",
            &site,
        );
        assert_eq!(schema["@type"], "Service");
        assert_eq!(schema["provider"]["name"], site.business.name);
        assert_eq!(schema["provider"]["address"]["addressLocality"], "Bari");
        assert_eq!(schema["areaServed"]["name"], "Bari");
        assert_eq!(schema["serviceType"], "Noleggio con conducente");
        assert_eq!(schema["offers"]["priceCurrency"], "EUR");
    }

    #[test]
    fn test_schemas_serialize_compact() {
        let schema = faq_schema(&sample_faqs());
        let compact = schema.to_string();
        assert!(compact.starts_with("{\"@context\""));
        assert!(!compact.contains('\n'));
    }
}
