//! Structured-field extraction from the career-analysis narrative.
//!
//! The prompt pins an exact `### TRACK n:` heading layout; this module
//! recovers career tracks and skill scores from it. A narrative that
//! ignored the layout yields an empty track list and default scores —
//! never an error, the raw narrative is always returned to the caller
//! anyway.

use std::sync::OnceLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

/// One recommended career direction extracted from the narrative.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CareerTrack {
    pub title: String,
    pub match_score: f32,
    pub description: String,
    pub key_strengths: Vec<String>,
    pub development_areas: Vec<String>,
}

/// Soft/hard skill scoring recovered from the narrative.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SkillsBreakdown {
    pub soft_skills_score: f32,
    pub hard_skills_score: f32,
    /// "soft/hard" percentage split, e.g. "65/35".
    pub balance_ratio: String,
}

fn track_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(
            r"(?s)\ATRACK \d+: (.+?)\n\*\*Match Score: (\d+)%\*\*\n\*\*Description:\*\* (.+?)\n\*\*Key Strengths:\*\* (.+?)\n\*\*Develop:\*\* (.+)\z",
        )
        .expect("track regex is valid")
    })
}

/// Extracts all conforming `### TRACK n:` blocks. A block runs from its
/// heading to the next `###` heading or the end of the narrative.
///
/// The narrative is segmented on headings first and each slice matched
/// on its own: a single pattern with a consuming terminator would
/// swallow the `###` of the following heading, and back-to-back track
/// blocks — the layout the prompt mandates — would lose every second
/// one.
pub fn parse_career_tracks(narrative: &str) -> Vec<CareerTrack> {
    let text = format!("\n{narrative}");
    text.split("\n###")
        .filter_map(|segment| parse_track_block(segment.trim()))
        .collect()
}

fn parse_track_block(block: &str) -> Option<CareerTrack> {
    let caps = track_regex().captures(block)?;
    let match_score: f32 = caps[2].parse().ok()?;
    Some(CareerTrack {
        title: caps[1].trim().to_string(),
        match_score,
        description: caps[3].trim().to_string(),
        key_strengths: split_list(&caps[4]),
        development_areas: split_list(&caps[5]),
    })
}

fn split_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}

fn score_regex(label: &str) -> Regex {
    // "soft skills ... 72" on one line, first number after the label.
    Regex::new(&format!(r"(?i){label} skills[^\d\n]*(\d+)")).expect("score regex is valid")
}

/// Recovers the soft/hard skill scores and their balance ratio.
/// Missing scores default to 50 each.
pub fn parse_skills_breakdown(narrative: &str) -> SkillsBreakdown {
    static SOFT: OnceLock<Regex> = OnceLock::new();
    static HARD: OnceLock<Regex> = OnceLock::new();
    let soft_re = SOFT.get_or_init(|| score_regex("soft"));
    let hard_re = HARD.get_or_init(|| score_regex("hard"));

    let extract = |re: &Regex| -> f32 {
        re.captures(narrative)
            .and_then(|caps| caps[1].parse().ok())
            .unwrap_or(50.0)
    };

    let soft_skills_score = extract(soft_re);
    let hard_skills_score = extract(hard_re);

    let total = soft_skills_score + hard_skills_score;
    let soft_percent = if total > 0.0 {
        ((soft_skills_score / total) * 100.0).round() as u32
    } else {
        50
    };
    let balance_ratio = format!("{}/{}", soft_percent, 100 - soft_percent);

    SkillsBreakdown {
        soft_skills_score,
        hard_skills_score,
        balance_ratio,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const NARRATIVE: &str = "### PERSONALITY ANALYSIS\n\
        Anna combines analytical depth with a drive to lead.\n\n\
        ### TRACK 1: Product Analyst\n\
        **Match Score: 85%**\n\
        **Description:** Strong pattern recognition and a taste for evidence.\n\
        **Key Strengths:** analysis, structured thinking, persistence\n\
        **Develop:** stakeholder communication, SQL\n\
        ### TRACK 2: Team Lead\n\
        **Match Score: 70%**\n\
        **Description:** Natural coordinator under pressure.\n\
        **Key Strengths:** empathy, planning\n\
        **Develop:** delegation\n\
        ### SKILLS BALANCE:\n\
        Current soft skills: 72 out of 100.\n\
        Current hard skills: 48 out of 100.\n\
        Ratio: 60% soft / 40% hard.\n\n\
        ### RECOMMENDATIONS\n\
        Start with an SQL course.";

    #[test]
    fn test_parse_career_tracks_conforming() {
        let tracks = parse_career_tracks(NARRATIVE);
        assert_eq!(tracks.len(), 2);

        assert_eq!(tracks[0].title, "Product Analyst");
        assert_eq!(tracks[0].match_score, 85.0);
        assert_eq!(
            tracks[0].key_strengths,
            vec!["analysis", "structured thinking", "persistence"]
        );
        assert_eq!(
            tracks[0].development_areas,
            vec!["stakeholder communication", "SQL"]
        );

        assert_eq!(tracks[1].title, "Team Lead");
        assert_eq!(tracks[1].match_score, 70.0);
        assert_eq!(tracks[1].development_areas, vec!["delegation"]);
    }

    #[test]
    fn test_parse_career_tracks_three_adjacent_blocks() {
        // The prompt mandates at least three tracks, back to back. Each
        // block's terminating heading belongs to the NEXT block — none
        // may be lost to the previous match.
        let narrative = "### TRACK 1: Data Analyst\n\
            **Match Score: 90%**\n\
            **Description:** Evidence first.\n\
            **Key Strengths:** rigor\n\
            **Develop:** visualization\n\
            ### TRACK 2: Project Manager\n\
            **Match Score: 75%**\n\
            **Description:** Orchestrates delivery.\n\
            **Key Strengths:** planning\n\
            **Develop:** negotiation\n\
            ### TRACK 3: HR Partner\n\
            **Match Score: 60%**\n\
            **Description:** Reads people well.\n\
            **Key Strengths:** empathy\n\
            **Develop:** analytics\n";

        let tracks = parse_career_tracks(narrative);
        assert_eq!(tracks.len(), 3);
        assert_eq!(tracks[0].title, "Data Analyst");
        assert_eq!(tracks[1].title, "Project Manager");
        assert_eq!(tracks[1].match_score, 75.0);
        assert_eq!(tracks[2].title, "HR Partner");
        assert_eq!(tracks[2].development_areas, vec!["analytics"]);
    }

    #[test]
    fn test_parse_career_tracks_non_conforming_is_empty() {
        let tracks = parse_career_tracks("The model wrote free prose instead.");
        assert!(tracks.is_empty());
    }

    #[test]
    fn test_parse_skills_breakdown() {
        let breakdown = parse_skills_breakdown(NARRATIVE);
        assert_eq!(breakdown.soft_skills_score, 72.0);
        assert_eq!(breakdown.hard_skills_score, 48.0);
        assert_eq!(breakdown.balance_ratio, "60/40");
    }

    #[test]
    fn test_parse_skills_breakdown_defaults() {
        let breakdown = parse_skills_breakdown("No scores anywhere.");
        assert_eq!(breakdown.soft_skills_score, 50.0);
        assert_eq!(breakdown.hard_skills_score, 50.0);
        assert_eq!(breakdown.balance_ratio, "50/50");
    }
}
