use log::{debug, error};
use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::Value;

use crate::llm::{LanguageModel, Prompt};

pub const DEFAULT_TITLE: &str = "New Chat";
pub const ECHO_TITLE: &str = "Chat Session";
pub const MAX_TITLE_CHARS: usize = 60;

const MAX_TITLE_WORDS: usize = 3;
const MAX_FALLBACK_WORDS: usize = 5;

const STOPWORDS: &[&str] = &[
    "records", "record", "data", "dataset", "list", "of", "the", "generate", "generated",
    "creating", "new", "with", "and", "for",
];

static CODE_FENCE: Lazy<Regex> = Lazy::new(|| Regex::new(r"```(?:json)?").unwrap());
static TITLE_FIELD: Lazy<Regex> = Lazy::new(|| Regex::new(r#""title"\s*:\s*"([^"]+)""#).unwrap());
static TITLE_WORD: Lazy<Regex> = Lazy::new(|| Regex::new(r"[A-Za-z][A-Za-z0-9_-]*").unwrap());
static PROMPT_WORD: Lazy<Regex> = Lazy::new(|| Regex::new(r"[A-Za-z0-9-]+").unwrap());

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TitleCandidate {
    pub raw: String,
    pub cleaned: String,
}

impl TitleCandidate {
    /// Pulls the title text out of a model response: a JSON `title` field if
    /// there is one, otherwise the whole response minus code fences.
    pub fn extract(model_response: &str) -> Self {
        let text = CODE_FENCE.replace_all(model_response, "");
        let text = text.trim_matches(|c: char| c == '`' || c.is_whitespace());

        let raw = match serde_json::from_str::<Value>(text) {
            Ok(Value::Object(map)) => match map.get("title") {
                Some(Value::String(title)) => Some(title.clone()),
                _ => None,
            },
            _ => None,
        }
        .or_else(|| TITLE_FIELD.captures(text).map(|caps| caps[1].to_string()))
        .unwrap_or_else(|| text.to_string());

        let cleaned = clean_title(&raw);
        Self { raw, cleaned }
    }
}

/// Turns a model response into a short display title. Never fails; the worst
/// case is [`DEFAULT_TITLE`].
///
/// A title that only repeats part of `original_prompt` is replaced by
/// [`ECHO_TITLE`].
pub fn make_title(model_response: &str, original_prompt: &str) -> String {
    let candidate = TitleCandidate::extract(model_response);
    debug!("Title candidate {:?} cleaned to {:?}", candidate.raw, candidate.cleaned);

    if candidate.cleaned != DEFAULT_TITLE
        && !original_prompt.trim().is_empty()
        && original_prompt
            .to_lowercase()
            .contains(&candidate.cleaned.to_lowercase())
    {
        return ECHO_TITLE.to_string();
    }

    candidate.cleaned
}

/// Title built from the user's prompt alone, used when the model can't help.
pub fn fallback_title(prompt: &str) -> String {
    let mut words: Vec<&str> = PROMPT_WORD
        .find_iter(prompt)
        .map(|m| m.as_str())
        .take(MAX_FALLBACK_WORDS)
        .collect();

    if words.len() < 3 {
        words = prompt.split_whitespace().take(MAX_TITLE_WORDS).collect();
    }

    finish(&title_case(&words.join(" ")))
}

fn clean_title(raw: &str) -> String {
    let kept: Vec<&str> = TITLE_WORD
        .find_iter(raw)
        .map(|m| m.as_str())
        .filter(|word| !is_stopword(word) && !word.chars().any(|c| c.is_ascii_digit()))
        .take(MAX_TITLE_WORDS)
        .collect();

    if kept.is_empty() {
        return DEFAULT_TITLE.to_string();
    }

    finish(&title_case(&kept.join(" ")))
}

fn is_stopword(word: &str) -> bool {
    STOPWORDS.iter().any(|stop| stop.eq_ignore_ascii_case(word))
}

/// Uppercases a letter that follows a non-letter, lowercases the rest.
fn title_case(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut after_letter = false;
    for c in text.chars() {
        if c.is_alphabetic() {
            if after_letter {
                out.extend(c.to_lowercase());
            } else {
                out.extend(c.to_uppercase());
            }
            after_letter = true;
        } else {
            out.push(c);
            after_letter = false;
        }
    }
    out
}

fn finish(title: &str) -> String {
    let truncated: String = title.chars().take(MAX_TITLE_CHARS).collect();
    let trimmed = truncated.trim_matches(|c: char| !c.is_alphanumeric());
    if trimmed.is_empty() {
        DEFAULT_TITLE.to_string()
    } else {
        trimmed.to_string()
    }
}

/// Asks the model for a title and cleans whatever comes back.
pub async fn generate_title(model: &dyn LanguageModel, prompt: &str) -> String {
    let prompt = prompt.trim();
    if prompt.is_empty() {
        return DEFAULT_TITLE.to_string();
    }

    match model.complete(&Prompt::title(prompt)).await {
        Ok(response) => make_title(&response, prompt),
        Err(e) => {
            error!("Error generating title: {e}");
            fallback_title(prompt)
        }
    }
}
