//! Coaching report generation through an LLM.
//!
//! One pipeline serves every sport: a [`SportProfile`] carries the system
//! context, the prompt and the fields each recommendation must fill in.

use super::{create_llm, ChatMessage, LLMConfig, LLM};
use anyhow::{anyhow, Context, Result};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use std::fmt;
use std::path::Path;
use std::str::FromStr;
use tracing::{debug, info, warn};

/// Sports with a built-in report profile
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sport {
    Football,
    Pickleball,
}

impl Sport {
    pub fn name(&self) -> &'static str {
        match self {
            Sport::Football => "football",
            Sport::Pickleball => "pickleball",
        }
    }
}

impl fmt::Display for Sport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Sport {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "football" | "soccer" => Ok(Sport::Football),
            "pickleball" => Ok(Sport::Pickleball),
            other => Err(anyhow!("No report profile for sport: {}", other)),
        }
    }
}

/// One labelled entry of a recommendation's content
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportField {
    pub key: String,
    pub label: String,
}

impl ReportField {
    fn new(key: &str, label: &str) -> Self {
        Self {
            key: key.to_string(),
            label: label.to_string(),
        }
    }
}

/// Everything that differs between sports
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SportProfile {
    pub sport: Sport,
    pub banner: String,
    /// System message
    pub context: String,
    /// Instructions placed before the match data in the user message
    pub prompt: String,
    pub fields: Vec<ReportField>,
}

impl SportProfile {
    pub fn for_sport(sport: Sport) -> Self {
        match sport {
            Sport::Football => Self::football(),
            Sport::Pickleball => Self::pickleball(),
        }
    }

    pub fn football() -> Self {
        Self {
            sport: Sport::Football,
            banner: "COACHING REPORT - TACTICAL AI".to_string(),
            context: "You are an experienced football coach and video analyst. You review \
                      match statistics and key sequences and turn them into concrete, \
                      training-ground recommendations for the coaching staff."
                .to_string(),
            prompt: "Analyse the match data below. For each important sequence, identify \
                     what happened, why it happened and how to correct it in training."
                .to_string(),
            fields: vec![
                ReportField::new("observation", "Observation"),
                ReportField::new("analysis", "Analysis"),
                ReportField::new("corrective_action", "Corrective action"),
                ReportField::new("pro_tip", "Pro tip"),
            ],
        }
    }

    pub fn pickleball() -> Self {
        Self {
            sport: Sport::Pickleball,
            banner: "COACHING REPORT - NEXT MOVE".to_string(),
            context: "You are an expert pickleball coach. You study rally statistics and \
                      shot sequences and explain to a player how to improve shot selection, \
                      positioning and strategy."
                .to_string(),
            prompt: "Analyse the match data below. For each important rally, describe what \
                     happened, the shot-specific lessons, the strategic picture and the tips \
                     the player can apply next session."
                .to_string(),
            fields: vec![
                ReportField::new("observation", "Observation"),
                ReportField::new("analysis", "Analysis"),
                ReportField::new("shot_specific_insights", "Shot-specific insights"),
                ReportField::new("strategic_analysis", "Strategic analysis"),
                ReportField::new("actionable_tips", "Actionable tips"),
                ReportField::new("visual_breakdowns", "Visual breakdown"),
            ],
        }
    }

    /// Replace context and prompt with `{sport}_context.txt` / `{sport}_prompt.txt`
    /// from `prompt_dir` when those files exist
    pub async fn with_overrides_from(mut self, prompt_dir: &Path) -> Result<Self> {
        let context_path = prompt_dir.join(format!("{}_context.txt", self.sport));
        if context_path.exists() {
            self.context = tokio::fs::read_to_string(&context_path)
                .await
                .with_context(|| format!("Failed to read {}", context_path.display()))?
                .trim()
                .to_string();
            debug!("Loaded {} context from {}", self.sport, context_path.display());
        }

        let prompt_path = prompt_dir.join(format!("{}_prompt.txt", self.sport));
        if prompt_path.exists() {
            self.prompt = tokio::fs::read_to_string(&prompt_path)
                .await
                .with_context(|| format!("Failed to read {}", prompt_path.display()))?
                .trim()
                .to_string();
            debug!("Loaded {} prompt from {}", self.sport, prompt_path.display());
        }

        Ok(self)
    }

    /// JSON shape the model is asked to produce
    pub fn schema_hint(&self) -> String {
        let content = self
            .fields
            .iter()
            .map(|f| format!("\"{}\": \"...\"", f.key))
            .collect::<Vec<_>>()
            .join(", ");

        format!(
            "{{\"coach_recommendations\": [{{\"timestamp\": \"mm:ss\", \"title\": \"...\", \"content\": {{{}}}}}]}}",
            content
        )
    }

    /// User message: prompt, expected JSON shape, then the serialized match data
    pub fn user_prompt(&self, match_stats: &Value) -> String {
        format!(
            "{}\nAnswer with a single JSON object of the form: {}\nMatch data: {}",
            self.prompt,
            self.schema_hint(),
            match_stats
        )
    }
}

/// One sequence of the report
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CoachRecommendation {
    #[serde(default)]
    pub timestamp: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub content: BTreeMap<String, Value>,
}

impl CoachRecommendation {
    /// Field text, flattening lists into `; `-separated text
    pub fn field_text(&self, key: &str) -> Option<String> {
        self.content.get(key).map(value_text)
    }
}

fn value_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Array(items) => items.iter().map(value_text).collect::<Vec<_>>().join("; "),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

/// Structured document returned by the model
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CoachingReport {
    pub coach_recommendations: Vec<CoachRecommendation>,
}

impl CoachingReport {
    /// Parse the model output, tolerating code fences and surrounding prose
    pub fn parse(raw: &str) -> Result<Self> {
        let start = raw
            .find('{')
            .ok_or_else(|| anyhow!("No JSON object in LLM response"))?;
        let end = raw
            .rfind('}')
            .ok_or_else(|| anyhow!("Unterminated JSON object in LLM response"))?;
        if end < start {
            return Err(anyhow!("Malformed JSON object in LLM response"));
        }

        serde_json::from_str(&raw[start..=end]).context("LLM response does not match the report schema")
    }

    /// `(sequence index, field key)` for every schema field a sequence lacks
    pub fn missing_fields(&self, profile: &SportProfile) -> Vec<(usize, String)> {
        self.coach_recommendations
            .iter()
            .enumerate()
            .flat_map(|(index, rec)| {
                profile
                    .fields
                    .iter()
                    .filter(|f| !rec.content.contains_key(&f.key))
                    .map(move |f| (index, f.key.clone()))
            })
            .collect()
    }
}

/// Sends match statistics to an LLM and returns the parsed report
pub struct CoachReportGenerator {
    llm: Box<dyn LLM>,
    profile: SportProfile,
}

impl CoachReportGenerator {
    pub fn new(llm: Box<dyn LLM>, profile: SportProfile) -> Self {
        Self { llm, profile }
    }

    pub fn from_config(config: &LLMConfig, profile: SportProfile) -> Result<Self> {
        Ok(Self::new(create_llm(config)?, profile))
    }

    pub fn profile(&self) -> &SportProfile {
        &self.profile
    }

    pub async fn generate(&self, match_stats: &Value) -> Result<CoachingReport> {
        let messages = vec![
            ChatMessage::system(self.profile.context.clone()),
            ChatMessage::user(self.profile.user_prompt(match_stats)),
        ];

        info!(
            "🧠 Requesting {} coaching report from {:?}",
            self.profile.sport,
            self.llm.provider_type()
        );
        let response = self.llm.chat(messages).await?;
        debug!("Report generated (tokens: {:?})", response.tokens_used);

        let report = CoachingReport::parse(&response.content)?;
        for (index, key) in report.missing_fields(&self.profile) {
            warn!("Sequence {} is missing field '{}'", index + 1, key);
        }

        Ok(report)
    }
}

/// Plain-text rendering for the terminal
pub fn render_report(report: &CoachingReport, profile: &SportProfile) -> String {
    let rule = "=".repeat(profile.banner.chars().count() + 4);
    let mut out = format!("{}\n  {}\n{}\n", rule, profile.banner, rule);

    let label_width = profile
        .fields
        .iter()
        .map(|f| f.label.chars().count())
        .max()
        .unwrap_or(0);

    for rec in &report.coach_recommendations {
        out.push_str(&format!("\n⏱ Sequence: {} - {}\n", rec.timestamp, rec.title));
        for field in &profile.fields {
            let text = rec.field_text(&field.key).unwrap_or_else(|| "-".to_string());
            out.push_str(&format!(
                "  {:<width$} | {}\n",
                field.label,
                text,
                width = label_width
            ));
        }
    }

    out
}
