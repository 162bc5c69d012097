//! Podcast script generation with retry and completion handling.

use thiserror::Error;
use tokio::time::sleep;
use tracing::{info, warn};

use audio_core::{MAX_RETRIES, RETRY_DELAY};

use crate::GeminiClient;

/// Tagalog function words that signal a sentence was cut off mid-clause.
const DANGLING_WORDS: [&str; 5] = ["ni", "at", "ang", "ng", "sa"];

#[derive(Debug, Clone)]
pub struct ScriptRequest {
    pub topic: String,
    pub speaker1: String,
    pub speaker2: String,
    pub language: String,
    pub duration_minutes: u32,
}

#[derive(Debug, Error)]
pub enum ScriptError {
    #[error("the model returned an empty script for this topic")]
    Empty,

    #[error("the topic was rejected by the content filter; try a different topic")]
    ContentFiltered,

    #[error("script generation failed after {attempts} attempts: {last_error}")]
    Exhausted { attempts: u32, last_error: String },
}

pub(crate) fn language_instruction(language: &str) -> String {
    match language.to_ascii_lowercase().as_str() {
        "english" => String::new(),
        "tagalog" => "Generate the script entirely in Tagalog language. ".to_string(),
        "taglish" => "Generate the script in Taglish (a mix of Tagalog and English). \
                      Use both languages naturally as Filipinos would in conversation. "
            .to_string(),
        other => format!("Generate the script in {other} language. "),
    }
}

pub(crate) fn build_prompt(req: &ScriptRequest) -> String {
    // ~150 spoken words per minute; ask for a window around that.
    let min_words = req.duration_minutes * 120;
    let max_words = req.duration_minutes * 170;
    let d = req.duration_minutes;
    format!(
        "Create a podcast script on the topic: {topic}\n\n\
         {lang}The script should:\n\
         - Have exactly two speakers named \"{s1}\" and \"{s2}\"\n\
         - Include an introduction, discussion, and conclusion\n\
         - Be conversational, engaging, and informative\n\
         - Be EXACTLY {d}-{d_plus} minutes in length when read aloud\n\
         - Be approximately {min_words}-{max_words} words long to match this duration\n\
         - Format each line with the speaker name followed by their dialogue \
           (Example: \"{s1}: Hello everyone!\")\n\
         - Include a brief intro where speakers introduce themselves and the podcast topic\n\
         - Have a clear structure with logical flow between topics\n\
         - ALWAYS end with a proper conclusion and sign-off line\n\
         - Make sure the script is substantial enough to fill the entire {d}-minute duration\n\n\
         Please provide only the script with no additional comments or formatting.",
        topic = req.topic,
        lang = language_instruction(&req.language),
        s1 = req.speaker1,
        s2 = req.speaker2,
        d = d,
        d_plus = d + 1,
        min_words = min_words,
        max_words = max_words,
    )
}

fn conclusion_prompt(req: &ScriptRequest, script: &str) -> String {
    format!(
        "This is an incomplete podcast script that needs a proper conclusion.\n\
         Please provide ONLY a brief conclusion (1-2 exchanges between speakers) \
         that wraps up the conversation naturally.\n\
         Use the same speaker names ({s1} and {s2}) and same language.\n\n\
         Incomplete script:\n{script}",
        s1 = req.speaker1,
        s2 = req.speaker2,
        script = script,
    )
}

/// A script that stops without terminal punctuation, or on a dangling
/// function word, was probably truncated by the token limit.
pub(crate) fn looks_incomplete(script: &str) -> bool {
    let trimmed = script.trim_end();
    !trimmed.ends_with(['.', '!', '?']) || DANGLING_WORDS.iter().any(|w| trimmed.ends_with(w))
}

impl GeminiClient {
    /// Generate a two-speaker podcast script. Transient failures retry
    /// with a fixed delay; content-filter rejections are terminal.
    pub async fn generate_script(&self, req: &ScriptRequest) -> Result<String, ScriptError> {
        let prompt = build_prompt(req);
        let mut last_error = String::new();

        for attempt in 1..=MAX_RETRIES {
            match self.generate_text(&prompt, 0.8, 4000).await {
                Ok(text) => {
                    let script = text.trim().to_string();
                    if !script.is_empty() {
                        return Ok(self.finish_script(req, script).await);
                    }
                    warn!(attempt, max = MAX_RETRIES, "empty script response");
                    last_error = "empty response".to_string();
                    if attempt == MAX_RETRIES {
                        return Err(ScriptError::Empty);
                    }
                }
                Err(err) => {
                    let message = err.to_string();
                    if message.to_ascii_lowercase().contains("content_filter") {
                        return Err(ScriptError::ContentFiltered);
                    }
                    warn!(attempt, max = MAX_RETRIES, "script generation failed: {message}");
                    last_error = message;
                    if attempt == MAX_RETRIES {
                        break;
                    }
                }
            }
            sleep(RETRY_DELAY).await;
        }

        Err(ScriptError::Exhausted {
            attempts: MAX_RETRIES,
            last_error,
        })
    }

    /// Ask for a short conclusion when the script looks cut off. A failed
    /// follow-up call leaves the script as-is.
    async fn finish_script(&self, req: &ScriptRequest, mut script: String) -> String {
        if !looks_incomplete(&script) {
            return script;
        }
        info!("script appears incomplete, requesting a conclusion");
        match self
            .generate_text(&conclusion_prompt(req, &script), 0.7, 1000)
            .await
        {
            Ok(conclusion) => {
                let conclusion = conclusion.trim();
                if !conclusion.is_empty() {
                    script.push('\n');
                    script.push_str(conclusion);
                }
            }
            Err(err) => warn!("could not generate a conclusion: {err}"),
        }
        script
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request() -> ScriptRequest {
        ScriptRequest {
            topic: "the history of radio".to_string(),
            speaker1: "Ana".to_string(),
            speaker2: "Ben".to_string(),
            language: "english".to_string(),
            duration_minutes: 3,
        }
    }

    #[test]
    fn prompt_names_both_speakers_and_the_topic() {
        let prompt = build_prompt(&request());
        assert!(prompt.contains("the history of radio"));
        assert!(prompt.contains("\"Ana\""));
        assert!(prompt.contains("\"Ben\""));
        assert!(prompt.contains("Ana: Hello everyone!"));
    }

    #[test]
    fn prompt_scales_word_count_with_duration() {
        let mut req = request();
        req.duration_minutes = 5;
        let prompt = build_prompt(&req);
        assert!(prompt.contains("600-850 words"));
        assert!(prompt.contains("5-6 minutes"));
    }

    #[test]
    fn language_instruction_variants() {
        assert_eq!(language_instruction("english"), "");
        assert!(language_instruction("tagalog").contains("entirely in Tagalog"));
        assert!(language_instruction("Taglish").contains("mix of Tagalog and English"));
        assert!(language_instruction("french").contains("in french language"));
    }

    #[test]
    fn complete_scripts_are_left_alone() {
        assert!(!looks_incomplete("Ana: Thanks for listening!"));
        assert!(!looks_incomplete("Ben: Goodbye everyone.\n"));
        assert!(!looks_incomplete("Ana: Really?"));
    }

    #[test]
    fn truncated_scripts_are_detected() {
        assert!(looks_incomplete("Ana: And that is why the"));
        assert!(looks_incomplete("Ben: Kumain kami sa"));
        assert!(looks_incomplete("Ana: Sinabi ito ni"));
    }
}
