//! The immutable, ordered question catalog.

use once_cell::sync::Lazy;
use std::collections::HashSet;
use std::sync::Arc;

use super::Question;
use crate::domain::foundation::ValidationError;

static STANDARD: Lazy<Arc<QuestionCatalog>> = Lazy::new(|| Arc::new(QuestionCatalog::build_standard()));

/// Ordered questionnaire. Steps are 1-based; `len()` is N.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuestionCatalog {
    questions: Vec<Question>,
}

impl QuestionCatalog {
    /// Creates a catalog from `(prompt, field, options, multi_select)` rows.
    ///
    /// Steps are assigned from row order. Fails on an empty catalog,
    /// a blank field key, an empty option set or a duplicate field key.
    pub fn from_rows(rows: &[(&str, &str, &[&str], bool)]) -> Result<Self, ValidationError> {
        if rows.is_empty() {
            return Err(ValidationError::empty_field("questions"));
        }
        let mut seen = HashSet::new();
        let mut questions = Vec::with_capacity(rows.len());
        for (index, (prompt, field, options, multi)) in rows.iter().enumerate() {
            let question = Question::new(index + 1, *prompt, *field, options, *multi)?;
            if !seen.insert(question.field.clone()) {
                return Err(ValidationError::invalid_format(
                    "questions",
                    format!("duplicate field key '{}'", question.field),
                ));
            }
            questions.push(question);
        }
        Ok(Self { questions })
    }

    /// The seven-question cloud service catalog, built once per process.
    pub fn standard() -> Arc<QuestionCatalog> {
        Arc::clone(&STANDARD)
    }

    fn build_standard() -> Self {
        let rows: [(&str, &str, &[&str], bool); 7] = [
            (
                "What type of cloud service would you like to create?",
                "service_type",
                &[
                    "vFirewall",
                    "vRouter",
                    "vLoad Balancer",
                    "vVPN",
                    "vIDS/IPS",
                    "SD-WAN",
                    "Custom Service",
                ],
                false,
            ),
            (
                "Which vendor or technology would you prefer?",
                "vendor",
                &[
                    "Cisco (ASA, FTD, CSR1000v)",
                    "Palo Alto Networks",
                    "Fortinet",
                    "Check Point",
                    "Open Source",
                    "Multi-vendor",
                ],
                false,
            ),
            (
                "What deployment model do you need?",
                "deployment_model",
                &[
                    "Public Cloud (AWS/Azure/GCP)",
                    "Private Cloud",
                    "Hybrid Cloud",
                    "Multi-Cloud",
                    "On-Premises",
                ],
                false,
            ),
            (
                "Which features should the service support? (Select multiple)",
                "features",
                &[
                    "Traffic Filtering",
                    "Threat Detection",
                    "VPN Support",
                    "Load Balancing",
                    "High Availability",
                    "Auto-Scaling",
                    "Monitoring & Logging",
                    "API Management",
                    "User Portal",
                    "Billing Integration",
                ],
                true,
            ),
            (
                "What SLA requirements do you have?",
                "sla",
                &[
                    "99.9% (Standard)",
                    "99.95% (High)",
                    "99.99% (Mission Critical)",
                    "Custom SLA",
                ],
                false,
            ),
            (
                "What scalability do you need?",
                "scalability",
                &[
                    "Small (1-10 instances)",
                    "Medium (10-100 instances)",
                    "Large (100-1000 instances)",
                    "Enterprise (1000+ instances)",
                ],
                false,
            ),
            (
                "What systems should it integrate with?",
                "integration",
                &[
                    "Cloud Management Portal",
                    "ITSM (ServiceNow)",
                    "Billing System",
                    "Monitoring (Prometheus/Grafana)",
                    "SIEM",
                    "All of the above",
                ],
                false,
            ),
        ];
        // Static rows above are known-valid.
        match Self::from_rows(&rows) {
            Ok(catalog) => catalog,
            Err(e) => panic!("standard question catalog is malformed: {}", e),
        }
    }

    /// Number of questions (N).
    pub fn len(&self) -> usize {
        self.questions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }

    /// Question at a 1-based step, if in range.
    pub fn question(&self, step: usize) -> Option<&Question> {
        step.checked_sub(1).and_then(|i| self.questions.get(i))
    }

    /// The first question. Catalogs are never empty.
    pub fn first(&self) -> &Question {
        &self.questions[0]
    }

    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    /// Field keys in step order.
    pub fn fields(&self) -> impl Iterator<Item = &str> {
        self.questions.iter().map(|q| q.field.as_str())
    }
}
