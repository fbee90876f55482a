use crate::types::ServiceType;

/// Turn a location name into a URL path segment.
///
/// Lowercases, strips apostrophes, collapses whitespace runs into single
/// hyphens and drops everything that is not ASCII alphanumeric or a hyphen.
/// Non-ASCII letters are removed, not transliterated. Idempotent, and never
/// produces leading or trailing hyphens from punctuation-only edges.
pub fn normalize_slug(name: &str) -> String {
    name.to_lowercase()
        .replace(['\'', '\u{2019}'], "")
        .chars()
        .map(|c| if c.is_whitespace() { '-' } else { c })
        .filter(|c| c.is_ascii_alphanumeric() || *c == '-')
        .collect::<String>()
        .split('-')
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join("-")
}

/// Slug for a generated page: `"{service}-{normalized-name}"`, or the bare
/// normalized name when no service is given.
pub fn make_slug(name: &str, service: Option<ServiceType>) -> String {
    match service {
        Some(service) => format!("{}-{}", service.as_str(), normalize_slug(name)),
        None => normalize_slug(name),
    }
}

/// Substitute `{key}` placeholders from `vars`.
///
/// A placeholder only counts when the key is non-empty and made of
/// alphanumerics or underscores. Unknown keys are left literal rather than
/// erroring; templates rely on that fallback.
pub fn apply_template(template: &str, vars: &[(&str, &str)]) -> String {
    let bytes = template.as_bytes();
    let mut out = String::with_capacity(template.len());
    let mut i = 0;

    while i < bytes.len() {
        if bytes[i] == b'{' {
            if let Some(end) = template[i + 1..].find('}') {
                let key = &template[i + 1..i + 1 + end];
                if is_placeholder_key(key) {
                    if let Some((_, value)) = vars.iter().find(|(k, _)| *k == key) {
                        out.push_str(value);
                    } else {
                        out.push('{');
                        out.push_str(key);
                        out.push('}');
                    }
                    i += end + 2;
                    continue;
                }
            }
        }
        let c = template[i..].chars().next().unwrap_or('\u{FFFD}');
        out.push(c);
        i += c.len_utf8();
    }

    out
}

fn is_placeholder_key(key: &str) -> bool {
    !key.is_empty() && key.chars().all(|c| c.is_alphanumeric() || c == '_')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_slug_basic() {
        assert_eq!(normalize_slug("Bari"), "bari");
        assert_eq!(normalize_slug("Polignano a Mare"), "polignano-a-mare");
        assert_eq!(normalize_slug("Torre dell'Orso"), "torre-dellorso");
        assert_eq!(normalize_slug("Santa Maria di Leuca"), "santa-maria-di-leuca");
    }

    #[test]
    fn test_normalize_slug_curly_apostrophe() {
        assert_eq!(normalize_slug("Torre dell\u{2019}Orso"), "torre-dellorso");
    }

    #[test]
    fn test_normalize_slug_collapses_whitespace_runs() {
        assert_eq!(normalize_slug("Martina   Franca"), "martina-franca");
        assert_eq!(normalize_slug("a \t b"), "a-b");
    }

    #[test]
    fn test_normalize_slug_trims_punctuation_edges() {
        assert_eq!(normalize_slug("  Bari  "), "bari");
        assert_eq!(normalize_slug("(Bari)"), "bari");
        assert_eq!(normalize_slug("- Bari -"), "bari");
    }

    #[test]
    fn test_normalize_slug_drops_non_ascii() {
        assert_eq!(normalize_slug("Città Vecchia"), "citt-vecchia");
    }

    #[test]
    fn test_normalize_slug_idempotent() {
        for name in ["Torre dell'Orso", "Polignano a Mare", "  Aeroporto di Bari "] {
            let once = normalize_slug(name);
            assert_eq!(normalize_slug(&once), once);
        }
    }

    #[test]
    fn test_make_slug_with_service() {
        assert_eq!(make_slug("Bari", Some(ServiceType::Ncc)), "ncc-bari");
        assert_eq!(
            make_slug("Polignano a Mare", Some(ServiceType::Transfer)),
            "transfer-polignano-a-mare"
        );
    }

    #[test]
    fn test_make_slug_without_service() {
        assert_eq!(make_slug("Ostuni", None), "ostuni");
    }

    #[test]
    fn test_apply_template_substitutes() {
        assert_eq!(
            apply_template("Servizio a {location}", &[("location", "Lecce")]),
            "Servizio a Lecce"
        );
        assert_eq!(
            apply_template("{location}, {location}", &[("location", "Bari")]),
            "Bari, Bari"
        );
    }

    #[test]
    fn test_apply_template_missing_key_left_literal() {
        assert_eq!(apply_template("Hi {x}", &[]), "Hi {x}");
        assert_eq!(
            apply_template("{location} e {altro}", &[("location", "Bari")]),
            "Bari e {altro}"
        );
    }

    #[test]
    fn test_apply_template_ignores_non_placeholder_braces() {
        assert_eq!(apply_template("{ not a key }", &[]), "{ not a key }");
        assert_eq!(apply_template("orphan { brace", &[]), "orphan { brace");
        assert_eq!(
            apply_template("{{location}}", &[("location", "Bari")]),
            "{Bari}"
        );
    }
}
