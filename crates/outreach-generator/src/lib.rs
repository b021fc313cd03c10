//! Outreach Generator
//!
//! Turns a prospect query into three researched outreach emails.
//!
//! # Overview
//!
//! The generator assembles a prompt from the prospect and the organization's
//! knowledge document, sends it to a search-grounded model, and parses what
//! comes back into typed records. The model's output is untrusted: parsing
//! and citation extraction degrade to shorter results instead of failing.
//!
//! # Architecture
//!
//! ```text
//! ProspectQuery → PromptBuilder → GenerationGateway → { parser, grounding } → RequestLog
//! ```
//!
//! # Key Features
//!
//! - **Prompt Composition**: prospect details, knowledge base, angles and output markers
//! - **Response Parsing**: `---EMAIL n---` / `SUBJECT:` blocks with a `Subject:` fallback
//! - **Grounding Extraction**: layered best-effort recovery of source citations
//! - **Request Logging**: every generation is recorded; log failures never hide the emails
//!
//! # Example Usage
//!
//! ```no_run
//! use outreach_generator::{Generator, GeneratorConfig};
//! use outreach_domain::{EffortLevel, ProspectQuery};
//! use outreach_llm::MockGateway;
//! use outreach_store::JsonlLog;
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let gateway = MockGateway::new("---EMAIL 1---\nSUBJECT: Hello\n\nBody");
//! let log = JsonlLog::new("outreach_log.jsonl");
//! let generator = Generator::new(gateway, log, GeneratorConfig::default());
//!
//! let query = ProspectQuery::new("Jane Doe").with_company_website("https://acme.com");
//! let result = generator.generate(&query, EffortLevel::Low)?;
//!
//! println!("Emails: {}", result.emails.len());
//! println!("Sources: {}", result.resources.len());
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]

mod config;
mod error;
mod generator;
mod grounding;
mod knowledge;
mod parser;
mod prompt;
mod types;

#[cfg(test)]
mod tests;

pub use config::GeneratorConfig;
pub use error::GeneratorError;
pub use generator::Generator;
pub use grounding::extract_resources;
pub use knowledge::{Contact, KnowledgeBase, Organization};
pub use parser::{parse_email_response, MAX_EMAILS};
pub use prompt::PromptBuilder;
pub use types::{LogOutcome, OutreachResult};
