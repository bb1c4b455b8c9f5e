//! Code-generation prompt construction.

use super::BlockMarkers;
use crate::domain::service::ServiceRecord;

/// Files the generator is asked to produce, with a one-line purpose each.
pub const EXPECTED_FILES: [(&str, &str); 6] = [
    ("backend_service.py", "Main service orchestration code"),
    ("api_routes.py", "REST API endpoints"),
    ("database_schema.sql", "Database schema"),
    ("config.yaml", "Configuration file"),
    ("requirements.txt", "Python dependencies"),
    ("README.md", "Setup and deployment guide"),
];

/// Builds the prompt sent to the text generator.
///
/// The output format section uses the same markers the parser expects,
/// so whatever comes back can be split into files directly.
pub fn build_generation_prompt(service: &ServiceRecord, markers: &BlockMarkers) -> String {
    let mut prompt = String::from(
        "You are an expert cloud service developer. Generate complete, production-ready \
         code for a cloud service based on these requirements:\n\n",
    );

    let features = if service.features.is_empty() {
        "N/A".to_string()
    } else {
        service.features.join(", ")
    };
    let requirements = [
        ("Service Type", service.service_type.as_str()),
        ("Vendor", service.vendor.as_str()),
        ("Deployment", service.deployment_model.as_str()),
        ("Features", features.as_str()),
        ("SLA", service.sla.as_str()),
        ("Scalability", service.scalability.as_str()),
        ("Integration", service.integration.as_str()),
    ];
    for (label, value) in requirements {
        prompt.push_str(&format!("{}: {}\n", label, value));
    }

    prompt.push_str("\nGenerate the following files:\n");
    for (i, (name, purpose)) in EXPECTED_FILES.iter().enumerate() {
        prompt.push_str(&format!("{}. {} - {}\n", i + 1, name, purpose));
    }

    prompt.push_str(
        "\nRequirements:\n\
         - Complete working code (no TODOs or placeholders)\n\
         - Follow best practices and security standards\n\
         - Include error handling and logging\n\
         - Add comments for complex logic\n\
         - Use async/await where appropriate\n\n\
         Format your response as:\n",
    );
    for (name, _) in EXPECTED_FILES.iter().take(2) {
        prompt.push_str(&format!("{} {}\n[code here]\n{}\n\n", markers.begin, name, markers.end));
    }
    prompt.push_str("And so on for each file.");
    prompt
}
