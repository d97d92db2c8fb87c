//! Narrative generation — builds the career-analysis prompt from a
//! computed PGD result and runs it through the LLM.
//!
//! The prompt renders defined slots only. An absent slot is "not
//! applicable for this gender", which is NOT the same thing as zero;
//! rendering it as 0 or null would poison the analysis. The formatter
//! below therefore skips absent slots entirely.

use async_trait::async_trait;

use crate::analysis::prompts::{
    CAREER_ANALYSIS_PROMPT_TEMPLATE, CAREER_ANALYSIS_SYSTEM, RESUME_SECTION_TEMPLATE,
};
use crate::errors::AppError;
use crate::llm_client::{LlmClient, LlmError};
use crate::pgd::{Gender, PgdResult};

/// Resume text beyond this many characters is truncated before it is
/// embedded in the prompt.
pub const RESUME_TEXT_LIMIT: usize = 4000;

/// Renders the defined slots of a `PgdResult` as an indented,
/// group-by-group prompt section. Absent slots produce no line at all.
pub fn format_pgd_section(pgd: &PgdResult) -> String {
    let mut out = String::from("Main points:\n");

    let main = &pgd.main_points;
    let fixed = [
        ("A", main.a),
        ("B", main.b),
        ("V", main.v),
        ("G", main.g),
        ("D", main.d),
        ("L", main.l),
        ("E", main.e),
        ("K", main.k),
        ("J", main.j),
        ("Z", main.z),
        ("I", main.i),
        ("Y", main.y),
    ];
    for (label, value) in fixed {
        push_slot(&mut out, label, Some(value));
    }
    for (label, value) in [("M", main.m), ("N", main.n), ("O", main.o), ("P", main.p)] {
        push_slot(&mut out, label, value);
    }

    out.push_str("\nAncestral data:\n");
    push_slot(&mut out, "RSD", Some(pgd.ancestral.rsd));
    push_slot(&mut out, "ROPP", pgd.ancestral.ropp);
    push_slot(&mut out, "RCO", pgd.ancestral.rco);
    push_slot(&mut out, "RUS", Some(pgd.ancestral.rus));

    let crossroads = pgd.crossroads.defined_values();
    if !crossroads.is_empty() {
        out.push_str("\nCrossroads (individual aspects):\n");
        push_slot(&mut out, "ISD", pgd.crossroads.isd);
        push_slot(&mut out, "IOPP", pgd.crossroads.iopp);
        push_slot(&mut out, "ICO", pgd.crossroads.ico);
        push_slot(&mut out, "IUS", pgd.crossroads.ius);
    }

    let tasks = [
        ("karma_of_genus", pgd.tasks.karma_of_genus),
        (
            "personal_karma_relationships",
            pgd.tasks.personal_karma_relationships,
        ),
        ("divine_tax", pgd.tasks.divine_tax),
    ];
    if tasks.iter().any(|(_, v)| v.is_some()) {
        out.push_str("\nKarmic tasks:\n");
        for (label, value) in tasks {
            push_slot(&mut out, label, value);
        }
    }

    if let Some(periods) = &pgd.business_periods {
        out.push_str("\nBusiness periods:\n");
        push_slot(&mut out, "period_1", periods.period_1);
        push_slot(&mut out, "period_2", periods.period_2);
        push_slot(&mut out, "period_3", periods.period_3);
        push_slot(&mut out, "period_4", periods.period_4);
    }

    out
}

fn push_slot(out: &mut String, label: &str, value: Option<u8>) {
    if let Some(value) = value {
        out.push_str(&format!("  {label}: {value}\n"));
    }
}

fn gender_label(gender: Gender) -> &'static str {
    match gender {
        Gender::Female => "female",
        Gender::Male => "male",
        Gender::Other => "not specified",
    }
}

/// Builds the full career-analysis prompt.
pub fn build_career_prompt(
    name: &str,
    date_of_birth: &str,
    gender: Gender,
    pgd: &PgdResult,
    resume_text: Option<&str>,
) -> String {
    let resume_section = match resume_text {
        Some(text) if !text.trim().is_empty() => {
            RESUME_SECTION_TEMPLATE.replace("{resume_text}", truncate_chars(text, RESUME_TEXT_LIMIT))
        }
        _ => String::new(),
    };

    CAREER_ANALYSIS_PROMPT_TEMPLATE
        .replace("{name}", name)
        .replace("{date_of_birth}", date_of_birth)
        .replace("{gender}", gender_label(gender))
        .replace("{pgd_section}", &format_pgd_section(pgd))
        .replace("{resume_section}", &resume_section)
}

/// Truncates to at most `limit` characters without splitting a
/// character.
fn truncate_chars(text: &str, limit: usize) -> &str {
    match text.char_indices().nth(limit) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}

/// Splits a narrative into (insights, recommendations) at the
/// recommendations heading. Falls back to a 2/3 split when the model
/// ignored the heading instruction.
pub fn split_insights(text: &str) -> (String, String) {
    static RECOMMENDATION: std::sync::OnceLock<regex::Regex> = std::sync::OnceLock::new();
    static DEVELOPMENT: std::sync::OnceLock<regex::Regex> = std::sync::OnceLock::new();

    // Checked in priority order: an explicit recommendations heading
    // wins over a development one wherever both occur.
    let keywords = [
        RECOMMENDATION.get_or_init(|| {
            regex::Regex::new(r"(?i)recommendations?").expect("keyword regex is valid")
        }),
        DEVELOPMENT.get_or_init(|| {
            regex::Regex::new(r"(?i)development").expect("keyword regex is valid")
        }),
    ];

    for keyword in keywords {
        if let Some(found) = keyword.find(text) {
            // The heading markup ("### ") belongs to the second half.
            let idx = text[..found.start()]
                .rfind('\n')
                .map_or(found.start(), |nl| nl + 1);
            return (
                text[..idx].trim().to_string(),
                text[idx..].trim().to_string(),
            );
        }
    }

    let split_at = text
        .char_indices()
        .nth(text.chars().count() * 2 / 3)
        .map_or(text.len(), |(idx, _)| idx);
    (
        text[..split_at].trim().to_string(),
        text[split_at..].trim().to_string(),
    )
}

/// The narrative generator seam. Carried in `AppState` as
/// `Arc<dyn NarrativeGenerator>` so tests can substitute a canned
/// backend for the live LLM.
#[async_trait]
pub trait NarrativeGenerator: Send + Sync {
    async fn generate(&self, prompt: &str) -> Result<String, AppError>;
}

/// Production backend: one Claude call through the shared LLM client.
pub struct LlmNarrativeGenerator {
    llm: LlmClient,
}

impl LlmNarrativeGenerator {
    pub fn new(llm: LlmClient) -> Self {
        Self { llm }
    }
}

#[async_trait]
impl NarrativeGenerator for LlmNarrativeGenerator {
    async fn generate(&self, prompt: &str) -> Result<String, AppError> {
        let response = self
            .llm
            .call(prompt, CAREER_ANALYSIS_SYSTEM)
            .await
            .map_err(|e| AppError::Llm(format!("narrative generation failed: {e}")))?;

        let text = response
            .text()
            .ok_or_else(|| AppError::Llm(LlmError::EmptyContent.to_string()))?;

        Ok(text.trim().to_string())
    }
}
