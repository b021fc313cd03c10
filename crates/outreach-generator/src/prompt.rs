//! LLM prompt engineering for outreach generation

use crate::knowledge::KnowledgeBase;
use outreach_domain::ProspectQuery;

/// Word limit applied when the builder is not given one
const FALLBACK_WORD_LIMIT: u32 = 200;

/// Builds the instruction document sent to the model
pub struct PromptBuilder<'a> {
    query: &'a ProspectQuery,
    knowledge: &'a KnowledgeBase,
    word_limit: u32,
}

impl<'a> PromptBuilder<'a> {
    /// Create a new prompt builder
    pub fn new(query: &'a ProspectQuery, knowledge: &'a KnowledgeBase) -> Self {
        Self {
            query,
            knowledge,
            word_limit: FALLBACK_WORD_LIMIT,
        }
    }

    /// Set the maximum words per email
    pub fn with_word_limit(mut self, word_limit: u32) -> Self {
        self.word_limit = word_limit;
        self
    }

    /// Build the complete generation prompt
    pub fn build(&self) -> String {
        let org = &self.knowledge.organization;
        let name = self.query.person_name.trim();
        let mut prompt = String::new();

        prompt.push_str(&format!(
            "You are an expert B2B outreach specialist for {}.\n\n",
            org.name
        ));

        // 1. Who we are writing to
        prompt.push_str("PROSPECT INFORMATION:\n");
        prompt.push_str(&self.prospect_section());
        prompt.push_str("\n\n");

        // 2. Research task
        prompt.push_str("YOUR TASK:\n");
        prompt.push_str(&format!(
            "Using Google Search, research {} and their company. Gather context about:\n",
            name
        ));
        prompt.push_str(RESEARCH_TOPICS);
        prompt.push_str("\n\n");

        // 3. What we sell
        prompt.push_str(&format!("{} OVERVIEW:\n{}\n\n", org.name.to_uppercase(), org.overview.trim()));
        prompt.push_str(&bullet_section("KEY CAPABILITIES", &org.key_capabilities));
        prompt.push_str(&bullet_section("SPECIALIZATIONS", &org.specializations));
        prompt.push_str(&bullet_section("VALUE PROPOSITIONS", &org.value_propositions));
        if let Some(website) = self.knowledge.website() {
            prompt.push_str(&format!("WEBSITE: {}\n\n", website));
        }

        // 4. Optional context from earlier contact
        if let Some(conversation) = self.query.conversation() {
            prompt.push_str("PAST CONVERSATION WITH THE PROSPECT:\n---\n");
            prompt.push_str(conversation);
            prompt.push_str("\n---\n");
            prompt.push_str(
                "Build on this conversation naturally. Do not repeat what was already said.\n\n",
            );
        }

        // 5. The three angles
        prompt.push_str("INSTRUCTIONS:\n");
        prompt.push_str("Generate 3 DISTINCT emails, each with a DIFFERENT angle as described below:\n\n");
        prompt.push_str(&self.angle_briefs());

        // 6. Constraints
        prompt.push_str("REQUIREMENTS FOR ALL EMAILS:\n");
        prompt.push_str(&format!(
            "- Each email should be {} words maximum\n",
            self.word_limit
        ));
        prompt.push_str(REQUIREMENTS);
        prompt.push_str("\n\n");

        if let Some(instructions) = self.query.instructions() {
            prompt.push_str("CUSTOM INSTRUCTIONS (take precedence over the style guidance above):\n");
            prompt.push_str(instructions);
            prompt.push_str("\n\n");
        }

        // 7. Output format the parser relies on
        prompt.push_str(OUTPUT_FORMAT);

        prompt
    }

    /// Prospect lines for the fields that are present
    fn prospect_section(&self) -> String {
        let mut lines = vec![format!("- Name: {}", self.query.person_name.trim())];
        if let Some(company) = self.query.company() {
            lines.push(format!("- Company Website: {}", company));
        }
        if let Some(linkedin) = self.query.linkedin() {
            lines.push(format!("- LinkedIn: {}", linkedin));
        }
        if let Some(x) = self.query.x_profile() {
            lines.push(format!("- X (Twitter): {}", x));
        }
        lines.join("\n")
    }

    fn angle_briefs(&self) -> String {
        let name = self.query.person_name.trim();
        let org = &self.knowledge.organization.name;
        format!(
            "**EMAIL 1 - INDUSTRY ANGLE:**\n\
             - Focus on the industry/domain {name} works in\n\
             - Reference a real trend, challenge, or development in their industry\n\
             - Connect how {org} helps companies in that specific industry\n\n\
             **EMAIL 2 - COMPANY ANGLE:**\n\
             - Focus specifically on {name}'s company\n\
             - Reference what the company does, its products, or its public initiatives\n\
             - Identify a specific way {org} could help their company\n\n\
             **EMAIL 3 - PERSONAL ANGLE:**\n\
             - Focus on {name} personally\n\
             - Reference their role, expertise, or any public posts/activity you found on LinkedIn or X\n\
             - Make it feel like a genuine 1-on-1 conversation\n\n"
        )
    }
}

fn bullet_section(title: &str, items: &[String]) -> String {
    if items.is_empty() {
        return String::new();
    }
    let mut section = format!("{}:\n", title);
    for item in items {
        section.push_str(&format!("- {}\n", item));
    }
    section.push('\n');
    section
}

const RESEARCH_TOPICS: &str = "\
- What industry they operate in and current trends/challenges in that industry
- What their company does, its products, and how it uses AI/ML/data
- Their professional background, role, and any public posts or activity on LinkedIn or X/Twitter";

const REQUIREMENTS: &str = "\
- Professional but conversational tone
- Focus on value, not features
- Avoid being overly salesy or generic
- Include a compelling subject line for each email
- Include a clear, low-pressure call-to-action
- DO NOT include any URLs or links in the email body
- Only reference information in plain text (e.g., \"I noticed your company recently expanded into computer vision\")";

const OUTPUT_FORMAT: &str = "FORMAT YOUR RESPONSE EXACTLY AS:

---EMAIL 1---
SUBJECT: [subject line]

[email body]

---EMAIL 2---
SUBJECT: [subject line]

[email body]

---EMAIL 3---
SUBJECT: [subject line]

[email body]

IMPORTANT:
- Ground all emails in real information found via Google Search. Do NOT make up facts
- DO NOT fabricate or hallucinate any URLs/links
- Each email must take a clearly different angle (industry vs company vs personal)";
