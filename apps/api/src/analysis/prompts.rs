// All LLM prompt constants for the Analysis module.
// The narrative is plain text with a fixed heading layout — the track
// and score headings below are load-bearing, the structured-field
// parser matches them verbatim.

/// System prompt for career-analysis narrative generation.
pub const CAREER_ANALYSIS_SYSTEM: &str =
    "You are a career consultant and HR analyst with 20 years of experience. \
    You produce deep, practical personality analysis and career development \
    recommendations. Speak as the consultant, never introduce yourself by name. \
    Never mention numeric point values, arcana numbers, or calculation terms — \
    translate the profile into plain language. Address the client by their name. \
    Use a professional but friendly tone. Use markdown only for headings (###), \
    never for bold emphasis except the exact Match Score and field labels \
    required by the output format.";

/// Career analysis prompt template.
/// Replace: {name}, {date_of_birth}, {gender}, {pgd_section}, {resume_section}
pub const CAREER_ANALYSIS_PROMPT_TEMPLATE: &str = r#"Analyze the personality below and provide professional career development recommendations.

CLIENT DATA:
Name: {name}
Date of birth: {date_of_birth}
Gender: {gender}

PSYCHOGRAPHIC PROFILE (PGD MATRIX):
{pgd_section}
{resume_section}
YOUR TASK:

1. ### PERSONALITY ANALYSIS (2-3 paragraphs):
   - Analyze the personality from the psychographic profile
   - Identify key character traits, motivation, and working style
   - Name strengths and growth areas

2. Career tracks (at least 3). For each track use EXACTLY this format:

   ### TRACK 1: [Profession / direction name]
   **Match Score: X%**
   **Description:** [2-3 sentences on why this fits]
   **Key Strengths:** [comma-separated list]
   **Develop:** [comma-separated list]

3. ### SKILLS BALANCE:
   - Rate current soft skills (0-100)
   - Rate current hard skills (0-100)
   - State the ratio (for example, 65% soft / 35% hard)
   - Recommend how to rebalance

4. ### RECOMMENDATIONS (concrete steps):
   - Next 3 months
   - 6-12 months
   - Long-term strategy (1-3 years)

IMPORTANT:
- Be specific and practical
- Ground every career track in the profile (and the resume, when provided)
- Keep the TRACK heading format exact: it is parsed by machine
"#;

/// Resume block template, inserted only when the caller supplied text.
/// Replace: {resume_text}
pub const RESUME_SECTION_TEMPLATE: &str = r#"
RESUME DATA (verbatim, provided by the client):
{resume_text}
"#;
