use crate::llm::InferenceClient;
use crate::models::GeneratedVulnerability;
use super::parser::{extract_list_items, extract_test_cases};
use super::prompts::{test_case_prompt, vulnerability_prompt};
use tracing::{debug, info};

/// Expands a threat into vulnerabilities and, for each, a list of test cases.
///
/// Calls are strictly sequential: one call for the threat, then one per
/// vulnerability in order. Identical vulnerability text is not deduplicated.
#[derive(Clone)]
pub struct Generator {
    client: InferenceClient,
}

impl Generator {
    pub fn new(client: InferenceClient) -> Self {
        Self { client }
    }

    pub async fn generate_vulnerabilities(&self, title: &str, description: &str) -> Vec<String> {
        let raw = self.client.generate(&vulnerability_prompt(title, description)).await;
        extract_list_items(&raw)
    }

    /// `index` is the 1-based position of the vulnerability within its threat.
    pub async fn generate_test_cases(&self, vulnerability: &str, index: usize) -> Vec<String> {
        let raw = self.client.generate(&test_case_prompt(vulnerability, index)).await;
        extract_test_cases(&raw)
    }

    pub async fn expand(&self, title: &str, description: &str) -> Vec<GeneratedVulnerability> {
        let vulnerabilities = self.generate_vulnerabilities(title, description).await;
        info!(title, count = vulnerabilities.len(), "Vulnerabilities generated");

        let mut expanded = Vec::with_capacity(vulnerabilities.len());
        for (i, description) in vulnerabilities.into_iter().enumerate() {
            let index = i + 1;
            debug!(index, vulnerability = %description, "Generating test cases");
            let test_cases = self.generate_test_cases(&description, index).await;
            debug!(index, count = test_cases.len(), "Test cases generated");
            expanded.push(GeneratedVulnerability { description, test_cases });
        }
        expanded
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use crate::errors::ThreatError;
    use crate::llm::fake::FakeProvider;

    fn scripted(prompt: &str) -> Result<String, ThreatError> {
        if prompt.starts_with("Title:") {
            Ok("- Predictable reset tokens\n- Reset link never expires\n".to_string())
        } else if prompt.contains("Predictable reset tokens") {
            Ok("✅ TC1.1: Request two tokens and compare\n✅ TC1.2: Brute force token space\nThat's all.".to_string())
        } else {
            Ok("No ideas.".to_string())
        }
    }

    #[tokio::test]
    async fn test_expand_builds_nested_result_in_order() {
        let fake = Arc::new(FakeProvider::new(scripted));
        let generator = Generator::new(InferenceClient::new(fake.clone()));

        let result = generator.expand("Password reset abuse", "Attacker hijacks reset flow").await;

        assert_eq!(result, vec![
            GeneratedVulnerability {
                description: "Predictable reset tokens".into(),
                test_cases: vec![
                    "✅ TC1.1: Request two tokens and compare".into(),
                    "✅ TC1.2: Brute force token space".into(),
                ],
            },
            GeneratedVulnerability {
                description: "Reset link never expires".into(),
                test_cases: vec![],
            },
        ]);

        let calls = fake.calls();
        assert_eq!(calls.len(), 3);
        assert!(calls[0].contains("Password reset abuse"));
        assert!(calls[1].contains("TC1.x"));
        assert!(calls[2].contains("TC2.x"));
        assert!(calls[2].contains("Reset link never expires"));
    }

    #[tokio::test]
    async fn test_expand_timeout_yields_no_vulnerabilities() {
        let fake = Arc::new(FakeProvider::new(|_| Err(ThreatError::Timeout("180s".into()))));
        let generator = Generator::new(InferenceClient::new(fake.clone()));

        let result = generator.expand("Ransomware", "Encrypts shared drives").await;
        assert!(result.is_empty());
        assert_eq!(fake.calls().len(), 1);
    }

    #[tokio::test]
    async fn test_duplicate_vulnerabilities_are_not_memoized() {
        let fake = Arc::new(FakeProvider::new(|prompt: &str| {
            if prompt.starts_with("Title:") {
                Ok("- Same weakness here\n- Same weakness here".to_string())
            } else {
                Ok("✅ TC: probe".to_string())
            }
        }));
        let generator = Generator::new(InferenceClient::new(fake.clone()));

        let result = generator.expand("Dup", "Duplicated output").await;
        assert_eq!(result.len(), 2);
        assert_eq!(fake.calls().len(), 3);
    }
}
