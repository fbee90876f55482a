//! Static HTML template for the landing pages.
//!
//! One self-contained document per page, inline CSS, no runtime assets.
//! The same template serves the build and the preview server so what you
//! see in preview is exactly what gets emitted.

use crate::render::PageSpec;
use landing_kit_core::SiteConfig;

/// HTML-escape a string to prevent XSS attacks
///
/// Escapes: & < > " '
fn html_escape(s: &str) -> String {
    s.chars()
        .map(|c| match c {
            '&' => "&amp;".to_string(),
            '<' => "&lt;".to_string(),
            '>' => "&gt;".to_string(),
            '"' => "&quot;".to_string(),
            '\'' => "&#x27;".to_string(),
            _ => c.to_string(),
        })
        .collect()
}

/// Generate the complete HTML document for one landing page.
///
/// # Arguments
///
/// * `spec` - Rendered page content
/// * `site` - Site configuration (business block feeds the footer)
/// * `is_preview` - Whether this is for preview mode (adds SSE reload)
pub fn page_html(spec: &PageSpec, site: &SiteConfig, is_preview: bool) -> String {
    let features_html: String = spec
        .features
        .iter()
        .map(|feature| format!("                <li>{}</li>\n", html_escape(feature)))
        .collect();

    let advantages_html: String = spec
        .advantages
        .iter()
        .map(|advantage| {
            format!(
                r#"                <div class="advantage">
                    <h3>{}</h3>
                    <p>{}</p>
                </div>
"#,
                html_escape(&advantage.title),
                html_escape(&advantage.description)
            )
        })
        .collect();

    let faqs_html: String = spec
        .faqs
        .iter()
        .map(|faq| {
            format!(
                r#"                <details class="faq-item">
                    <summary>{}</summary>
                    <p>{}</p>
                </details>
"#,
                html_escape(&faq.question),
                html_escape(&faq.answer)
            )
        })
        .collect();

    let related_html: String = spec
        .related
        .iter()
        .map(|related| {
            format!(
                "                <li><a href=\"/{}\">{}</a></li>\n",
                html_escape(&related.slug),
                html_escape(&related.name)
            )
        })
        .collect();

    // The location blurb only exists for dataset entries; synthesized
    // locations render without it.
    let location_blurb = if spec.location.description.trim().is_empty() {
        String::new()
    } else {
        format!(
            "            <p class=\"hero-blurb\">{}</p>\n",
            html_escape(&spec.location.description)
        )
    };

    let preview_badge = if is_preview {
        r#"<div class="preview-badge">PREVIEW MODE - Live Reload Active</div>"#
    } else {
        ""
    };

    let reload_script = if is_preview {
        r#"<script>
        // Hot reload via Server-Sent Events
        const eventSource = new EventSource('/_reload');
        eventSource.onmessage = () => {
            console.log('Reloading...');
            location.reload();
        };
        eventSource.onerror = () => {
            console.log('Preview server disconnected');
            eventSource.close();
        };
    </script>"#
    } else {
        ""
    };

    let footer_note = if is_preview {
        "Anteprima locale, premere Ctrl+C per uscire"
    } else {
        "Prenotazioni attive tutti i giorni, 24 ore su 24"
    };

    // HTML-escape everything that originates from dataset or config text.
    let title = html_escape(&spec.title);
    let brand = html_escape(&site.site.brand);
    let meta_description = html_escape(&spec.meta_description);
    let keywords = html_escape(&spec.keywords.join(", "));
    let intro = html_escape(&spec.intro);
    let why_heading = html_escape(&spec.why_heading);
    let features_heading = html_escape(&spec.features_heading);
    let hero_image = html_escape(&spec.hero_image);
    let page_url = html_escape(&spec.url);
    let og_image = html_escape(&format!("{}{}", site.site.base_url, spec.hero_image));
    let business_name = html_escape(&site.business.name);
    let phone = html_escape(&site.business.phone);
    let phone_href = html_escape(&site.business.phone.replace(' ', ""));
    let email = html_escape(&site.business.email);
    let street = html_escape(&site.business.address.street);
    let city = html_escape(&site.business.address.city);
    let postal_code = html_escape(&site.business.address.postal_code);
    let faq_schema = spec.faq_schema.to_string();
    let service_schema = spec.service_schema.to_string();

    format!(
        r#"<!DOCTYPE html>
<html lang="it">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>{title} | {brand}</title>
    <meta name="description" content="{meta_description}">
    <meta name="keywords" content="{keywords}">
    <meta name="robots" content="index, follow">
    <link rel="canonical" href="{page_url}">
    <meta property="og:type" content="website">
    <meta property="og:title" content="{title} | {brand}">
    <meta property="og:description" content="{meta_description}">
    <meta property="og:url" content="{page_url}">
    <meta property="og:image" content="{og_image}">
    <script type="application/ld+json">{service_schema}</script>
    <script type="application/ld+json">{faq_schema}</script>
    <style>
        :root {{
            --primary: #0b3d66;
            --accent: #d99a2b;
            --ink: #20242b;
            --paper: #ffffff;
            --mist: #f3f6f9;
            --line: #dde4ea;
        }}

        * {{ margin: 0; padding: 0; box-sizing: border-box; }}

        body {{
            font-family: -apple-system, BlinkMacSystemFont, "Segoe UI", Roboto, sans-serif;
            line-height: 1.6;
            color: var(--ink);
            background-color: var(--paper);
        }}

        .preview-badge {{
            background: var(--accent);
            color: #000000;
            padding: 0.5rem 1rem;
            font-weight: bold;
            text-align: center;
        }}

        .site-header {{
            display: flex;
            justify-content: space-between;
            align-items: center;
            padding: 1rem 2rem;
            border-bottom: 1px solid var(--line);
        }}

        .site-header .brand {{
            font-size: 1.3rem;
            font-weight: 700;
            color: var(--primary);
            text-decoration: none;
        }}

        .site-header .phone {{
            color: var(--paper);
            background: var(--primary);
            padding: 0.5rem 1rem;
            border-radius: 4px;
            text-decoration: none;
            font-weight: 600;
        }}

        .hero {{
            background:
                linear-gradient(rgba(11, 61, 102, 0.72), rgba(11, 61, 102, 0.72)),
                url('{hero_image}') center / cover no-repeat;
            color: var(--paper);
            padding: 4rem 2rem;
            text-align: center;
        }}

        .hero h1 {{
            font-size: 2.4rem;
            margin-bottom: 0.75rem;
        }}

        .hero-blurb {{
            max-width: 680px;
            margin: 0 auto 1rem auto;
            opacity: 0.95;
        }}

        .hero .cta {{
            display: inline-block;
            margin-top: 1rem;
            background: var(--accent);
            color: var(--ink);
            padding: 0.75rem 1.75rem;
            border-radius: 4px;
            text-decoration: none;
            font-weight: 700;
        }}

        main {{
            max-width: 960px;
            margin: 0 auto;
            padding: 2rem;
        }}

        section {{
            margin-bottom: 2.5rem;
        }}

        h2 {{
            color: var(--primary);
            font-size: 1.6rem;
            margin-bottom: 1rem;
        }}

        .intro {{
            font-size: 1.1rem;
        }}

        .advantages {{
            display: grid;
            grid-template-columns: repeat(auto-fit, minmax(260px, 1fr));
            gap: 1rem;
        }}

        .advantage {{
            background: var(--mist);
            border: 1px solid var(--line);
            border-radius: 6px;
            padding: 1.25rem;
        }}

        .advantage h3 {{
            color: var(--primary);
            margin-bottom: 0.5rem;
            font-size: 1.05rem;
        }}

        .features ul {{
            list-style: none;
        }}

        .features li {{
            padding: 0.6rem 0 0.6rem 1.75rem;
            border-bottom: 1px solid var(--line);
            position: relative;
        }}

        .features li::before {{
            content: "\2713";
            color: var(--accent);
            position: absolute;
            left: 0.25rem;
            font-weight: 700;
        }}

        .faq-item {{
            border: 1px solid var(--line);
            border-radius: 6px;
            margin-bottom: 0.75rem;
            padding: 0.85rem 1rem;
        }}

        .faq-item summary {{
            cursor: pointer;
            font-weight: 600;
            color: var(--primary);
        }}

        .faq-item p {{
            margin-top: 0.6rem;
        }}

        .related ul {{
            display: flex;
            flex-wrap: wrap;
            gap: 0.75rem;
            list-style: none;
        }}

        .related a {{
            display: inline-block;
            background: var(--mist);
            border: 1px solid var(--line);
            border-radius: 999px;
            padding: 0.4rem 1rem;
            color: var(--primary);
            text-decoration: none;
        }}

        .site-footer {{
            background: var(--primary);
            color: var(--paper);
            padding: 2rem;
            text-align: center;
        }}

        .site-footer a {{
            color: var(--accent);
            text-decoration: none;
        }}

        .site-footer p {{
            margin-bottom: 0.4rem;
        }}

        @media (max-width: 600px) {{
            .hero h1 {{ font-size: 1.7rem; }}
            .site-header {{ flex-direction: column; gap: 0.75rem; }}
        }}
    </style>
</head>
<body>
    {preview_badge}
    <header class="site-header">
        <a class="brand" href="/">{brand}</a>
        <a class="phone" href="tel:{phone_href}">{phone}</a>
    </header>

    <section class="hero">
        <h1>{title}</h1>
{location_blurb}            <a class="cta" href="tel:{phone_href}">Chiama ora</a>
    </section>

    <main>
        <section class="intro">
            <p>{intro}</p>
        </section>

        <section class="why">
            <h2>{why_heading}</h2>
            <div class="advantages">
{advantages_html}            </div>
        </section>

        <section class="features">
            <h2>{features_heading}</h2>
            <ul>
{features_html}            </ul>
        </section>

        <section class="faq">
            <h2>Domande frequenti</h2>
{faqs_html}        </section>

        <section class="related">
            <h2>Altre destinazioni</h2>
            <ul>
{related_html}            </ul>
        </section>
    </main>

    <footer class="site-footer">
        <p><strong>{business_name}</strong></p>
        <p>{street}, {postal_code} {city}</p>
        <p><a href="tel:{phone_href}">{phone}</a> &middot; <a href="mailto:{email}">{email}</a></p>
        <p>{footer_note}</p>
    </footer>
    {reload_script}
</body>
</html>
"#
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::{PageOverrides, render_page};
    use landing_kit_core::{Dataset, ServiceType};

    fn sample_page() -> (PageSpec, SiteConfig) {
        let dataset = Dataset::builtin();
        let site = SiteConfig::default();
        let location = dataset.find_location("Ostuni").unwrap();
        let spec = render_page(
            &location,
            ServiceType::Transfer,
            &dataset,
            &site,
            &PageOverrides::default(),
        );
        (spec, site)
    }

    #[test]
    fn test_html_escape() {
        assert_eq!(html_escape("a & b"), "a &amp; b");
        assert_eq!(html_escape("<script>"), "&lt;script&gt;");
        assert_eq!(html_escape("\"quoted\""), "&quot;quoted&quot;");
        assert_eq!(html_escape("it's"), "it&#x27;s");
        assert_eq!(html_escape("normal"), "normal");
    }

    #[test]
    fn test_page_html_contains_head_metadata() {
        let (spec, site) = sample_page();
        let html = page_html(&spec, &site, false);
        assert!(html.contains("<title>Transfer per Ostuni | Apulia Drive</title>"));
        assert!(html.contains("meta name=\"description\""));
        assert!(html.contains("rel=\"canonical\""));
        assert!(html.contains(&spec.url));
        assert_eq!(html.matches("application/ld+json").count(), 2);
    }

    #[test]
    fn test_page_html_renders_all_sections() {
        let (spec, site) = sample_page();
        let html = page_html(&spec, &site, false);
        assert!(html.contains(&spec.why_heading));
        assert!(html.contains(&spec.features_heading));
        assert!(html.contains("Domande frequenti"));
        assert!(html.contains("Altre destinazioni"));
        for related in &spec.related {
            assert!(html.contains(&format!("href=\"/{}\"", related.slug)));
        }
        assert!(html.contains(&site.business.email));
    }

    #[test]
    fn test_preview_mode_adds_reload_hooks() {
        let (spec, site) = sample_page();
        let static_html = page_html(&spec, &site, false);
        let preview_html = page_html(&spec, &site, true);
        assert!(!static_html.contains("_reload"));
        assert!(!static_html.contains("preview-badge\">"));
        assert!(preview_html.contains("EventSource('/_reload')"));
        assert!(preview_html.contains("PREVIEW MODE"));
    }

    #[test]
    fn test_apostrophes_in_names_are_escaped() {
        let dataset = Dataset::builtin();
        let site = SiteConfig::default();
        let location = dataset.find_location("Torre dell'Orso").unwrap();
        let spec = render_page(
            &location,
            ServiceType::Tour,
            &dataset,
            &site,
            &PageOverrides::default(),
        );
        let html = page_html(&spec, &site, false);
        assert!(html.contains("Torre dell&#x27;Orso"));
    }
}
