//! Integration tests for the Generator

#[cfg(test)]
mod tests {
    use crate::{Generator, GeneratorConfig, GeneratorError, LogOutcome};
    use outreach_domain::traits::RequestLog;
    use outreach_domain::{EffortLevel, ProspectQuery};
    use outreach_llm::MockGateway;
    use outreach_store::JsonlLog;
    use serde_json::json;
    use std::fs;
    use std::path::Path;
    use tempfile::TempDir;

    const KNOWLEDGE: &str = r#"
[organization]
name = "Labelwise"
overview = "Data annotation platform for computer vision teams."
key_capabilities = ["Auto-labeling", "Quality review"]
value_propositions = ["Faster model iteration"]

[organization.contact]
website = "https://labelwise.example"
"#;

    const RESPONSE: &str = "---EMAIL 1---
SUBJECT: Industry

Hi Jane, industry body.

---EMAIL 2---
SUBJECT: Company

Hi Jane, company body.

---EMAIL 3---
SUBJECT: Personal

Hi Jane, personal body.
";

    fn setup(dir: &TempDir) -> (GeneratorConfig, JsonlLog) {
        let knowledge = dir.path().join("knowledge.toml");
        fs::write(&knowledge, KNOWLEDGE).unwrap();
        let config = GeneratorConfig::default().with_knowledge_path(knowledge);
        let log = JsonlLog::new(dir.path().join("log.jsonl"));
        (config, log)
    }

    fn query() -> ProspectQuery {
        ProspectQuery::new("Jane Doe").with_company_website("https://acme.example")
    }

    fn line_count(path: &Path) -> usize {
        fs::read_to_string(path)
            .map(|s| s.lines().count())
            .unwrap_or(0)
    }

    #[test]
    fn test_full_generation_flow() {
        let dir = TempDir::new().unwrap();
        let (config, log) = setup(&dir);
        let gateway = MockGateway::new(RESPONSE)
            .with_usage(1200, 450, Some(1900))
            .with_grounding(json!({
                "groundingChunks": [
                    {"web": {"uri": "https://acme.example/about", "title": "About Acme"}},
                    {"web": {"uri": "https://acme.example/about", "title": "Duplicate"}}
                ]
            }));

        let generator = Generator::new(gateway, log, config);
        let result = generator.generate(&query(), EffortLevel::High).unwrap();

        assert!(result.is_complete());
        assert_eq!(result.emails[0].subject, "Industry");
        assert_eq!(result.emails[2].body, "Hi Jane, personal body.");
        assert_eq!(result.resources.len(), 1);
        assert_eq!(result.resources[0].title, "About Acme");
        assert_eq!(result.token_usage.total, 1900);
        assert_eq!(result.model, "mock");

        let id = result.log.entry_id().cloned().expect("entry recorded");
        let entries = generator.log().recent(10).unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].id, id);
        assert_eq!(entries[0].inputs.person_name, "Jane Doe");
        assert_eq!(entries[0].inputs.word_limit, 200);
        assert_eq!(entries[0].inputs.thinking_level, EffortLevel::High);
        assert_eq!(entries[0].outputs.generated_emails, result.emails);
        assert_eq!(entries[0].outputs.resources, result.resources);
    }

    #[test]
    fn test_validation_happens_before_gateway_call() {
        let dir = TempDir::new().unwrap();
        let (config, log) = setup(&dir);
        let gateway = MockGateway::new(RESPONSE);
        let calls = gateway.clone();
        let generator = Generator::new(gateway, log, config);

        let nameless = ProspectQuery::new("   ").with_linkedin("https://linkedin.com/in/x");
        let no_reference = ProspectQuery::new("Jane Doe");

        for query in [nameless, no_reference] {
            let result = generator.generate(&query, EffortLevel::Low);
            assert!(matches!(result, Err(GeneratorError::Validation(_))));
        }
        assert_eq!(calls.call_count(), 0);
        assert_eq!(line_count(&dir.path().join("log.jsonl")), 0);
    }

    #[test]
    fn test_word_limit_bounds() {
        let dir = TempDir::new().unwrap();
        let (config, log) = setup(&dir);
        let gateway = MockGateway::new(RESPONSE);
        let calls = gateway.clone();
        let generator = Generator::new(gateway, log, config);

        for limit in [0, 49, 501] {
            let result = generator.generate(&query().with_word_limit(limit), EffortLevel::Low);
            assert!(
                matches!(result, Err(GeneratorError::Validation(_))),
                "limit {limit} should be rejected"
            );
        }
        assert_eq!(calls.call_count(), 0);

        let result = generator
            .generate(&query().with_word_limit(75), EffortLevel::Low)
            .unwrap();
        let entries = generator.log().recent(1).unwrap();
        assert_eq!(entries[0].inputs.word_limit, 75);
        assert!(result.log.entry_id().is_some());
    }

    #[test]
    fn test_missing_knowledge_is_configuration_error() {
        let dir = TempDir::new().unwrap();
        let config = GeneratorConfig::default().with_knowledge_path(dir.path().join("absent.toml"));
        let log = JsonlLog::new(dir.path().join("log.jsonl"));
        let gateway = MockGateway::new(RESPONSE);
        let calls = gateway.clone();

        let generator = Generator::new(gateway, log, config);
        let result = generator.generate(&query(), EffortLevel::Low);

        assert!(matches!(result, Err(GeneratorError::Configuration(_))));
        assert_eq!(calls.call_count(), 0);
    }

    #[test]
    fn test_gateway_failure_writes_no_entry() {
        let dir = TempDir::new().unwrap();
        let (config, log) = setup(&dir);
        let generator = Generator::new(MockGateway::failing(), log, config);

        let result = generator.generate(&query(), EffortLevel::Low);

        assert!(matches!(result, Err(GeneratorError::Gateway(_))));
        assert_eq!(line_count(&dir.path().join("log.jsonl")), 0);
    }

    #[test]
    fn test_short_output_still_logged() {
        let dir = TempDir::new().unwrap();
        let (config, log) = setup(&dir);
        let gateway = MockGateway::new("I could not find anything about this person.");
        let generator = Generator::new(gateway, log, config);

        let result = generator.generate(&query(), EffortLevel::Low).unwrap();

        assert!(result.emails.is_empty());
        assert!(!result.is_complete());
        assert!(result.resources.is_empty());
        assert!(result.log.entry_id().is_some());
        assert_eq!(line_count(&dir.path().join("log.jsonl")), 1);
    }

    #[test]
    fn test_log_failure_still_returns_emails() {
        let dir = TempDir::new().unwrap();
        let (config, _) = setup(&dir);
        // A directory cannot be opened for appending
        let log = JsonlLog::new(dir.path());
        let generator = Generator::new(MockGateway::new(RESPONSE), log, config);

        let result = generator.generate(&query(), EffortLevel::Low).unwrap();

        assert_eq!(result.emails.len(), 3);
        assert!(matches!(result.log, LogOutcome::Failed(_)));
        assert!(result.log.entry_id().is_none());
    }

    #[test]
    fn test_knowledge_reloaded_per_request() {
        let dir = TempDir::new().unwrap();
        let (config, log) = setup(&dir);
        let knowledge_path = config.knowledge_path.clone();
        let generator = Generator::new(MockGateway::new(RESPONSE), log, config);

        assert!(generator.generate(&query(), EffortLevel::Low).is_ok());

        fs::write(&knowledge_path, "not = [valid").unwrap();
        let result = generator.generate(&query(), EffortLevel::Low);
        assert!(matches!(result, Err(GeneratorError::Configuration(_))));
    }
}
