//! One-shot commands: `ask`, `samples`, and `catalog`.

use anyhow::Result;
use serde::Serialize;

use support_bot_core::engine::{QueryOptions, RetrievalEngine};
use support_bot_core::models::Response;

use crate::bot::build_engine;
use crate::catalog::SAMPLE_QUESTIONS;
use crate::config::Config;
use crate::conversation::format_confidence;

/// Output flags shared by `ask` and `samples`.
#[derive(Debug, Clone, Copy, Default)]
pub struct AskOptions {
    pub threshold: Option<f64>,
    pub json: bool,
    pub explain: bool,
}

impl AskOptions {
    fn query_options(&self) -> QueryOptions {
        QueryOptions {
            threshold: self.threshold,
            explain: self.explain,
        }
    }

    fn check_threshold(&self) -> Result<()> {
        if let Some(t) = self.threshold {
            if !(0.0..=1.0).contains(&t) {
                anyhow::bail!("--threshold must be in [0.0, 1.0]");
            }
        }
        Ok(())
    }
}

pub fn run_ask(config: &Config, question: &str, opts: AskOptions) -> Result<()> {
    opts.check_threshold()?;
    let engine = build_engine(config)?;
    let response = engine.query_with(question, &opts.query_options())?;

    if opts.json {
        println!("{}", serde_json::to_string_pretty(&response)?);
    } else {
        print!("{}", render_response(&response));
    }
    Ok(())
}

#[derive(Serialize)]
struct SampleResult<'a> {
    question: &'a str,
    #[serde(flatten)]
    response: Response,
}

/// Run the built-in sample questions through the engine.
pub fn run_samples(config: &Config, opts: AskOptions) -> Result<()> {
    opts.check_threshold()?;
    let engine = build_engine(config)?;
    let results = answer_samples(&engine, &opts.query_options())?;

    if opts.json {
        let rows: Vec<SampleResult> = results
            .into_iter()
            .map(|(question, response)| SampleResult { question, response })
            .collect();
        println!("{}", serde_json::to_string_pretty(&rows)?);
        return Ok(());
    }

    for (i, (question, response)) in results.iter().enumerate() {
        if i > 0 {
            println!("{}", "-".repeat(60));
        }
        println!("Q: {}", question);
        print!("{}", render_response(response));
    }
    Ok(())
}

fn answer_samples(
    engine: &RetrievalEngine,
    opts: &QueryOptions,
) -> Result<Vec<(&'static str, Response)>> {
    SAMPLE_QUESTIONS
        .iter()
        .map(|q| Ok((*q, engine.query_with(q, opts)?)))
        .collect()
}

/// List catalog entries with their indices and the catalog fingerprint.
pub fn run_catalog(config: &Config, json: bool) -> Result<()> {
    let engine = build_engine(config)?;
    let Some(corpus) = engine.corpus() else {
        anyhow::bail!("engine has no catalog");
    };

    if json {
        println!(
            "{}",
            serde_json::to_string_pretty(&serde_json::json!({
                "fingerprint": corpus.fingerprint(),
                "vocabulary_size": engine.vocabulary_size(),
                "entries": corpus.entries(),
            }))?
        );
        return Ok(());
    }

    for (i, question) in corpus.questions().enumerate() {
        println!("{:>3}  {}", i, question);
    }
    println!();
    println!("{} entries", corpus.len());
    println!(
        "vocabulary: {} terms",
        engine.vocabulary_size().unwrap_or(0)
    );
    println!("fingerprint: {}", corpus.fingerprint());
    Ok(())
}

/// Human-readable rendering of a response, ending in a newline.
pub fn render_response(response: &Response) -> String {
    let mut out = String::new();
    out.push_str(&response.answer);
    out.push('\n');

    match format_confidence(response.confidence) {
        Some(pct) => out.push_str(&format!("\nConfidence: {}\n", pct)),
        None => out.push_str("\nConfidence: no match\n"),
    }

    if let Some(explain) = &response.explain {
        out.push_str(&format!(
            "  best:       #{} \"{}\"\n",
            explain.best_index, explain.best_question
        ));
        out.push_str(&format!(
            "  similarity: {:.4} (threshold {:.2})\n",
            explain.similarity, explain.threshold
        ));
        let terms = if explain.query_terms.is_empty() {
            "(none)".to_string()
        } else {
            explain.query_terms.join(", ")
        };
        out.push_str(&format!(
            "  terms:      {} of {} known\n",
            terms, explain.vocabulary_size
        ));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use support_bot_core::models::ScoreExplanation;

    #[test]
    fn test_render_match() {
        let response = Response {
            answer: "Use 'My Orders'.".to_string(),
            confidence: 0.8123,
            matched: Some(5),
            explain: None,
        };
        assert_eq!(
            render_response(&response),
            "Use 'My Orders'.\n\nConfidence: 81%\n"
        );
    }

    #[test]
    fn test_render_fallback_with_explain() {
        let response = Response {
            answer: "Not sure.".to_string(),
            confidence: 0.0,
            matched: None,
            explain: Some(ScoreExplanation {
                best_index: 2,
                best_question: "Refund policy".to_string(),
                similarity: 0.12,
                threshold: 0.3,
                query_terms: vec![],
                vocabulary_size: 40,
            }),
        };
        let text = render_response(&response);
        assert!(text.contains("Confidence: no match"));
        assert!(text.contains("#2 \"Refund policy\""));
        assert!(text.contains("0.1200 (threshold 0.30)"));
        assert!(text.contains("(none) of 40 known"));
    }

    #[test]
    fn test_threshold_out_of_range_rejected() {
        let opts = AskOptions {
            threshold: Some(1.5),
            ..AskOptions::default()
        };
        assert!(opts.check_threshold().is_err());
        assert!(AskOptions::default().check_threshold().is_ok());
    }

    #[test]
    fn test_samples_all_answered_with_builtin_catalog() {
        let engine = build_engine(&Config::default()).unwrap();
        let results = answer_samples(&engine, &QueryOptions::default()).unwrap();
        assert_eq!(results.len(), SAMPLE_QUESTIONS.len());
        for (_, response) in &results {
            assert!(response.confidence == 0.0 || response.confidence > 0.3);
        }
    }
}
