// ============================================================
// MESSAGE TEMPLATES
// ============================================================
// Placeholder extraction and per-lead rendering for campaign messages

use once_cell::sync::Lazy;
use regex::Regex;

use crate::domain::lead::LeadRecord;

static PLACEHOLDER_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\{([^{}]+)\}").expect("placeholder pattern is valid")
});

/// Placeholders every lead supports regardless of its source file.
pub const DYNAMIC_VARIABLES: &[&str] = &["{firstName}", "{lastName}", "{companyName}"];

/// List the distinct placeholders in a template, in order of first
/// appearance, braces included.
pub fn extract_variables(template: &str) -> Vec<String> {
    let mut seen = Vec::new();
    for caps in PLACEHOLDER_PATTERN.captures_iter(template) {
        let token = caps[0].to_string();
        if !seen.contains(&token) {
            seen.push(token);
        }
    }
    seen
}

/// Fill a template for one lead. Standard placeholders pull from the
/// lead's fields, anything else from its personalization map. Unknown
/// placeholders stay in the text untouched.
pub fn render(template: &str, lead: &LeadRecord) -> String {
    PLACEHOLDER_PATTERN
        .replace_all(template, |caps: &regex::Captures| {
            let name = &caps[1];
            match name {
                "firstName" => lead.first_name.clone(),
                "lastName" => lead.last_name.clone(),
                "companyName" => lead.company_name.clone(),
                _ => match lead.personalization.get(name) {
                    Some(serde_json::Value::String(s)) => s.clone(),
                    Some(other) => other.to_string(),
                    None => caps[0].to_string(),
                },
            }
        })
        .into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use std::collections::BTreeMap;

    fn lead() -> LeadRecord {
        let mut personalization = BTreeMap::new();
        personalization.insert(
            "city".to_string(),
            serde_json::Value::String("Oslo".to_string()),
        );
        LeadRecord {
            phone: "5551234567".to_string(),
            first_name: "Ada".to_string(),
            last_name: "Lovelace".to_string(),
            company_name: "Analytical Engines".to_string(),
            personalization,
            stop_sending: false,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_render_standard_placeholders() {
        let rendered = render("Hi {firstName} {lastName} at {companyName}!", &lead());
        assert_eq!(rendered, "Hi Ada Lovelace at Analytical Engines!");
    }

    #[test]
    fn test_render_personalization_key() {
        let rendered = render("Weather in {city} today?", &lead());
        assert_eq!(rendered, "Weather in Oslo today?");
    }

    #[test]
    fn test_unknown_placeholder_is_left_as_is() {
        let rendered = render("Hi {firstName}, about {discount}...", &lead());
        assert_eq!(rendered, "Hi Ada, about {discount}...");
    }

    #[test]
    fn test_plain_text_is_unchanged() {
        assert_eq!(render("No placeholders here.", &lead()), "No placeholders here.");
    }

    #[test]
    fn test_extract_variables_dedupes_in_order() {
        let vars = extract_variables("{firstName} {city} {firstName} {other}");
        assert_eq!(vars, vec!["{firstName}", "{city}", "{other}"]);
    }

    #[test]
    fn test_extract_variables_empty_template() {
        assert!(extract_variables("plain text").is_empty());
    }
}
