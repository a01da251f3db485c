//! Industry-specific section outlines for business templates.

use crate::types::TemplateType;
use serde::Serialize;

/// One section of a template outline.
#[derive(Debug, Clone, Serialize)]
pub struct TemplateSection {
    pub title: &'static str,
    pub subsections: &'static [&'static str],
}

/// The section outline of one template for one industry.
#[derive(Debug, Clone, Serialize)]
pub struct TemplateStructure {
    pub sections: &'static [TemplateSection],
}

impl TemplateStructure {
    /// Render the outline as indented text, one section per block.
    pub fn outline(&self) -> String {
        self.sections
            .iter()
            .map(|section| {
                let mut block = section.title.to_string();
                for sub in section.subsections {
                    block.push_str("\n  - ");
                    block.push_str(sub);
                }
                block
            })
            .collect::<Vec<_>>()
            .join("\n\n")
    }
}

struct IndustryEntry {
    industry: &'static str,
    templates: &'static [(TemplateType, TemplateStructure)],
}

static CATALOG: &[IndustryEntry] = &[
    IndustryEntry {
        industry: "saas",
        templates: &[(
            TemplateType::BusinessPlan,
            TemplateStructure {
                sections: &[
                    TemplateSection {
                        title: "Executive Summary",
                        subsections: &[
                            "Product Overview",
                            "Market Opportunity",
                            "Business Model",
                            "Financial Highlights",
                        ],
                    },
                    TemplateSection {
                        title: "Product Description",
                        subsections: &[
                            "Core Features",
                            "Technology Stack",
                            "Product Roadmap",
                            "Development Timeline",
                        ],
                    },
                    TemplateSection {
                        title: "Market Analysis",
                        subsections: &[
                            "Target Market Size",
                            "Customer Segments",
                            "Competitor Analysis",
                            "Market Trends",
                        ],
                    },
                    TemplateSection {
                        title: "Growth Strategy",
                        subsections: &[
                            "Customer Acquisition",
                            "Pricing Strategy",
                            "Marketing Channels",
                            "Sales Process",
                        ],
                    },
                    TemplateSection {
                        title: "Financial Plan",
                        subsections: &[
                            "Revenue Model",
                            "Cost Structure",
                            "Funding Requirements",
                            "Financial Projections",
                        ],
                    },
                ],
            },
        )],
    },
    IndustryEntry {
        industry: "ecommerce",
        templates: &[(
            TemplateType::BusinessPlan,
            TemplateStructure {
                sections: &[
                    TemplateSection {
                        title: "Executive Summary",
                        subsections: &[
                            "Business Concept",
                            "Market Opportunity",
                            "Competitive Advantage",
                            "Financial Overview",
                        ],
                    },
                    TemplateSection {
                        title: "Product Strategy",
                        subsections: &[
                            "Product Lines",
                            "Supplier Relations",
                            "Inventory Management",
                            "Quality Control",
                        ],
                    },
                    TemplateSection {
                        title: "Market Analysis",
                        subsections: &[
                            "Target Demographics",
                            "Market Size",
                            "Competition",
                            "Industry Trends",
                        ],
                    },
                    TemplateSection {
                        title: "Operations Plan",
                        subsections: &[
                            "Fulfillment Process",
                            "Supply Chain",
                            "Customer Service",
                            "Returns Management",
                        ],
                    },
                    TemplateSection {
                        title: "Marketing Strategy",
                        subsections: &[
                            "Digital Marketing",
                            "Social Media",
                            "SEO Strategy",
                            "Customer Retention",
                        ],
                    },
                ],
            },
        )],
    },
    IndustryEntry {
        industry: "b2b",
        templates: &[(
            TemplateType::BusinessPlan,
            TemplateStructure {
                sections: &[
                    TemplateSection {
                        title: "Executive Summary",
                        subsections: &[
                            "Company Overview",
                            "Value Proposition",
                            "Market Position",
                            "Growth Strategy",
                        ],
                    },
                    TemplateSection {
                        title: "Product/Service Offering",
                        subsections: &[
                            "Core Solutions",
                            "Technical Specifications",
                            "Implementation Process",
                            "Support Services",
                        ],
                    },
                    TemplateSection {
                        title: "Market Analysis",
                        subsections: &[
                            "Industry Analysis",
                            "Target Industries",
                            "Buyer Personas",
                            "Competitive Landscape",
                        ],
                    },
                    TemplateSection {
                        title: "Sales Strategy",
                        subsections: &[
                            "Sales Process",
                            "Account Management",
                            "Partnership Strategy",
                            "Revenue Model",
                        ],
                    },
                    TemplateSection {
                        title: "Operations",
                        subsections: &[
                            "Service Delivery",
                            "Quality Assurance",
                            "Team Structure",
                            "Scalability Plan",
                        ],
                    },
                ],
            },
        )],
    },
];

fn entry(industry: &str) -> Option<&'static IndustryEntry> {
    CATALOG.iter().find(|e| e.industry == industry)
}

/// Look up the outline for an industry and template type.
pub fn structure(industry: &str, template_type: TemplateType) -> Option<&'static TemplateStructure> {
    entry(industry)?
        .templates
        .iter()
        .find(|(t, _)| *t == template_type)
        .map(|(_, s)| s)
}

/// Industries with at least one outline.
pub fn industries() -> Vec<&'static str> {
    CATALOG.iter().map(|e| e.industry).collect()
}

/// Template types with an outline for the given industry.
pub fn templates_for(industry: &str) -> Vec<TemplateType> {
    entry(industry)
        .map(|e| e.templates.iter().map(|(t, _)| *t).collect())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_industries() {
        assert_eq!(industries(), vec!["saas", "ecommerce", "b2b"]);
    }

    #[test]
    fn test_every_business_plan_has_five_sections() {
        for industry in industries() {
            let s = structure(industry, TemplateType::BusinessPlan).unwrap();
            assert_eq!(s.sections.len(), 5, "{}", industry);
            assert!(s.sections.iter().all(|sec| sec.subsections.len() == 4));
        }
    }

    #[test]
    fn test_missing_structure() {
        assert!(structure("saas", TemplateType::PitchDeck).is_none());
        assert!(structure("biotech", TemplateType::BusinessPlan).is_none());
        assert!(templates_for("biotech").is_empty());
        assert_eq!(templates_for("b2b"), vec![TemplateType::BusinessPlan]);
    }

    #[test]
    fn test_outline() {
        let outline = structure("saas", TemplateType::BusinessPlan).unwrap().outline();
        assert!(outline.starts_with("Executive Summary\n  - Product Overview\n"));
        assert!(outline.contains("\n\nFinancial Plan\n"));
        assert!(outline.ends_with("  - Financial Projections"));
    }
}
