//! Template building: key points to a titled, numbered document body.

use crate::error::Result;
use crate::types::{KeyPointList, TemplateDocument, TemplateType};

/// Body used when there are no key points to list.
pub const EMPTY_BODY: &str = "No key points provided.";

/// Builder for business document templates.
#[derive(Debug, Clone, Default)]
pub struct TemplateBuilder;

impl TemplateBuilder {
    /// Create a new template builder.
    pub fn new() -> Self {
        Self
    }

    /// Build a template from a template-type tag such as `pitch_deck`.
    pub fn build_tagged(&self, template_type: &str, key_points: &KeyPointList) -> Result<TemplateDocument> {
        let template_type = template_type.parse::<TemplateType>()?;
        Ok(self.build(template_type, key_points))
    }

    /// Build a template document.
    ///
    /// # Example output
    /// ```text
    /// Business Plan:
    ///
    /// 1. Reduce churn
    /// 2. Expand to EU
    /// ```
    pub fn build(&self, template_type: TemplateType, key_points: &KeyPointList) -> TemplateDocument {
        let title = template_type.title();

        let content = if key_points.is_empty() {
            format!("{}:\n{}", title, EMPTY_BODY)
        } else {
            let numbered: Vec<String> = key_points
                .iter()
                .enumerate()
                .map(|(i, point)| format!("{}. {}", i + 1, point))
                .collect();
            format!("{}:\n\n{}", title, numbered.join("\n"))
        };

        TemplateDocument {
            template_type,
            title: title.to_string(),
            content,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;

    fn points(items: &[&str]) -> KeyPointList {
        KeyPointList::from_points(items.iter().copied())
    }

    #[test]
    fn test_business_plan_numbering() {
        let builder = TemplateBuilder::new();
        let doc = builder.build(TemplateType::BusinessPlan, &points(&["Reduce churn", "Expand to EU"]));
        assert_eq!(doc.title, "Business Plan");
        assert_eq!(doc.content, "Business Plan:\n\n1. Reduce churn\n2. Expand to EU");
    }

    #[test]
    fn test_empty_pitch_deck() {
        let builder = TemplateBuilder::new();
        let doc = builder.build_tagged("pitch_deck", &KeyPointList::new()).unwrap();
        assert_eq!(doc.content, "Pitch Deck:\nNo key points provided.");
    }

    #[test]
    fn test_marketing_strategy_title() {
        let builder = TemplateBuilder::new();
        let doc = builder.build_tagged("marketing_strategy", &points(&["Run a podcast"])).unwrap();
        assert_eq!(doc.template_type, TemplateType::MarketingStrategy);
        assert_eq!(doc.content, "Marketing Strategy:\n\n1. Run a podcast");
    }

    #[test]
    fn test_existing_numbering_is_regenerated() {
        let builder = TemplateBuilder::new();
        let doc = builder.build(TemplateType::PitchDeck, &points(&["3. Problem", "7. Solution"]));
        assert_eq!(doc.content, "Pitch Deck:\n\n1. Problem\n2. Solution");
    }

    #[test]
    fn test_build_is_deterministic() {
        let builder = TemplateBuilder::new();
        let list = points(&["Hire two engineers", "Close seed round", "Hire two engineers"]);
        for template_type in TemplateType::all() {
            let a = builder.build(template_type, &list);
            let b = builder.build(template_type, &list);
            assert_eq!(a.content.as_bytes(), b.content.as_bytes());
        }
    }

    #[test]
    fn test_unknown_template_type() {
        let builder = TemplateBuilder::new();
        for tag in ["", "memo", "BUSINESS_PLAN", "pitchdeck", " pitch_deck "] {
            let result = builder.build_tagged(tag, &points(&["A point"]));
            assert!(matches!(result, Err(Error::UnknownTemplateType(_))), "tag {:?}", tag);
        }
    }
}
