//! Recommendation generation.
//!
//! High-risk categories contribute one protective-measure line each, in
//! catalog order, followed by one line per selected risk factor in
//! selection order. Built-in category lines are prefixed with the category
//! title, so two categories matching the same template stay distinct.

use std::collections::BTreeMap;

use dpia_core::entities::Category;
use dpia_core::enums::RiskFactor;
use tracing::debug;

use crate::catalog::Catalog;

/// Built-in measures keyed on keywords in the category id.
const DOMAIN_TEMPLATES: &[(&[&str], &str)] = &[
    (
        &["security"],
        "Implement strong security controls: encrypt personal data at rest and in transit, \
         schedule regular security audits, and maintain an incident response plan (Article 32).",
    ),
    (
        &["sharing", "third-part", "transfer", "recipient"],
        "Put data processing agreements in place with every recipient, complete due diligence \
         on third parties, and use Standard Contractual Clauses for transfers outside the EEA \
         (Articles 28 and 46).",
    ),
    (
        &["sensitiv", "special"],
        "Confirm an Article 9 condition for special category data and pseudonymize it \
         wherever the purpose allows.",
    ),
    (
        &["subject", "rights"],
        "Document procedures for access, rectification and erasure requests and answer them \
         within one month (Articles 15 to 17).",
    ),
    (
        &["retention", "storage-limit"],
        "Define retention periods for each data set and delete records automatically once \
         the purpose is fulfilled (Article 5(1)(e)).",
    ),
    (
        &["lawful", "legal", "consent", "basis"],
        "Record the lawful basis for each processing purpose and keep consent evidence \
         auditable (Articles 6 and 7).",
    ),
    (
        &["purpose", "minimi", "necessity"],
        "Review every collected field against the stated purpose and drop what is not \
         strictly necessary (Article 5(1)(c)).",
    ),
    (
        &["transparen", "notice"],
        "Update privacy notices so data subjects understand what is processed and why \
         (Articles 13 and 14).",
    ),
];

/// Protective-measure line for one category.
///
/// Uses the catalog override when present, otherwise the first built-in
/// template whose keyword appears in the category id (as `"{title}: …"`),
/// otherwise a generic line naming the category.
#[must_use]
pub fn category_recommendation(category: &Category) -> String {
    if let Some(text) = category
        .recommendation
        .as_deref()
        .map(str::trim)
        .filter(|t| !t.is_empty())
    {
        return text.to_string();
    }

    let id = category.id.to_ascii_lowercase();
    DOMAIN_TEMPLATES
        .iter()
        .find(|(keywords, _)| keywords.iter().any(|k| id.contains(k)))
        .map_or_else(
            || {
                format!(
                    "High risk identified in {}. Review and strengthen the controls in this area.",
                    category.title
                )
            },
            |(_, text)| format!("{}: {text}", category.title),
        )
}

/// Line added when a risk factor is selected during the risk review.
#[must_use]
pub const fn factor_recommendation(factor: RiskFactor) -> &'static str {
    match factor {
        RiskFactor::SensitiveData => {
            "Special category data requires explicit consent or another Article 9 condition \
             and enhanced security measures."
        }
        RiskFactor::LargeScale => {
            "Large-scale processing: involve the Data Protection Officer and review data \
             minimization (Articles 35(3)(b) and 37)."
        }
        RiskFactor::SystematicMonitoring => {
            "Systematic monitoring needs a documented necessity test and clear notices to the \
             people observed (Article 35(3)(c))."
        }
        RiskFactor::VulnerableGroups => {
            "Data about children or other vulnerable people requires age-appropriate notices \
             and, for children, parental consent (Article 8)."
        }
        RiskFactor::AutomatedDecision => {
            "Offer human review and a way to contest automated decisions with legal or similar \
             effects (Article 22)."
        }
        RiskFactor::DataMatching => {
            "Check that combined datasets remain compatible with their original collection \
             purposes (Article 6(4))."
        }
        RiskFactor::InnovativeTechnology => {
            "Review the privacy implications of the new technology before deployment and apply \
             data protection by design (Article 25)."
        }
        RiskFactor::DenialOfService => {
            "Where processing can deny access to a service, document the decision criteria and \
             provide a route to challenge them."
        }
    }
}

/// Build the recommendation list.
///
/// `high_risk_areas` is expected in catalog order. Unknown category ids and
/// unrecognized factor ids are skipped. Each category and each factor
/// contributes exactly one line.
#[must_use]
pub fn generate(
    catalog: &Catalog,
    category_scores: &BTreeMap<String, f64>,
    high_risk_areas: &[String],
    risk_factors: &[String],
) -> Vec<String> {
    let mut lines: Vec<String> = Vec::new();

    let mut seen_categories: Vec<&str> = Vec::new();
    for area in high_risk_areas {
        if seen_categories.contains(&area.as_str()) || !category_scores.contains_key(area) {
            continue;
        }
        seen_categories.push(area.as_str());
        match catalog.category(area) {
            Some(category) => lines.push(category_recommendation(category)),
            None => debug!(category = %area, "high-risk area not in catalog, skipped"),
        }
    }

    let mut seen_factors: Vec<RiskFactor> = Vec::new();
    for raw in risk_factors {
        match raw.parse::<RiskFactor>() {
            Ok(factor) if !seen_factors.contains(&factor) => {
                seen_factors.push(factor);
                lines.push(factor_recommendation(factor).to_string());
            }
            Ok(_) => {}
            Err(_) => debug!(factor = %raw, "unrecognized risk factor ignored"),
        }
    }

    lines
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::test_support::sample_catalog;

    fn scores(pairs: &[(&str, f64)]) -> BTreeMap<String, f64> {
        pairs.iter().map(|(k, v)| ((*k).to_string(), *v)).collect()
    }

    fn strings(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| (*s).to_string()).collect()
    }

    #[test]
    fn nothing_high_and_no_factors_is_empty() {
        let catalog = sample_catalog();
        let out = generate(&catalog, &scores(&[("data-security", 0.1)]), &[], &[]);
        assert!(out.is_empty());
    }

    #[test]
    fn categories_then_factors_in_order() {
        let catalog = sample_catalog();
        let out = generate(
            &catalog,
            &scores(&[("data-security", 0.9), ("data-sharing", 0.7)]),
            &strings(&["data-security", "data-sharing"]),
            &strings(&["large-scale", "sensitive-data"]),
        );
        assert_eq!(out.len(), 4);
        assert!(out[0].contains("Article 32"));
        assert!(out[1].contains("Standard Contractual Clauses"));
        assert_eq!(out[2], factor_recommendation(RiskFactor::LargeScale));
        assert_eq!(out[3], factor_recommendation(RiskFactor::SensitiveData));
    }

    #[test]
    fn duplicate_factors_and_unknown_ids_are_dropped() {
        let catalog = sample_catalog();
        let out = generate(
            &catalog,
            &BTreeMap::new(),
            &[],
            &strings(&["large-scale", "telepathy", "large-scale"]),
        );
        assert_eq!(out, vec![factor_recommendation(RiskFactor::LargeScale).to_string()]);
    }

    #[test]
    fn repeated_area_contributes_once() {
        let catalog = sample_catalog();
        let out = generate(
            &catalog,
            &scores(&[("data-security", 0.9)]),
            &strings(&["data-security", "data-security"]),
            &[],
        );
        assert_eq!(out.len(), 1);
    }

    #[test]
    fn categories_sharing_a_template_each_get_a_line() {
        let doc = serde_json::json!({ "categories": [
            { "id": "data-security", "title": "Data Security", "questions": [] },
            { "id": "network-security", "title": "Network Security", "questions": [] }
        ]});
        let catalog = Catalog::from_json(&doc.to_string()).unwrap();
        let out = generate(
            &catalog,
            &scores(&[("data-security", 0.9), ("network-security", 0.7)]),
            &strings(&["data-security", "network-security"]),
            &[],
        );
        assert_eq!(out.len(), 2);
        assert!(out[0].starts_with("Data Security: "), "{}", out[0]);
        assert!(out[1].starts_with("Network Security: "), "{}", out[1]);
        assert!(out.iter().all(|line| line.contains("Article 32")));
    }

    #[test]
    fn catalog_override_wins() {
        let category = Category {
            id: "data-security".into(),
            title: "Security".into(),
            description: String::new(),
            recommendation: Some("Rotate the vault keys quarterly.".into()),
            questions: vec![],
        };
        assert_eq!(category_recommendation(&category), "Rotate the vault keys quarterly.");
    }

    #[test]
    fn unmatched_domain_names_the_title() {
        let category = Category {
            id: "financial".into(),
            title: "Financial Records".into(),
            description: String::new(),
            recommendation: None,
            questions: vec![],
        };
        let line = category_recommendation(&category);
        assert!(line.contains("Financial Records"), "{line}");
    }
}
