use std::io::{BufRead, Write};
use std::path::Path;

use haven_assessment::catalog::{sections, therapy_areas};
use haven_assessment::scoring::{Contribution, KeywordMatch, ScoreBreakdown};
use haven_assessment::{AssessmentSession, ScoringEngine, summarize};
use haven_core::models::answer::{AnswerStore, AnswerValue};
use haven_core::models::question::Question;
use haven_core::models::record::AssessmentRecord;
use serde::Serialize;
use tracing::{info, warn};

use crate::config::OutputFormat;

/// JSON shape printed by `score`.
#[derive(Debug, Serialize)]
pub struct ScoreReport {
    #[serde(flatten)]
    pub record: AssessmentRecord,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub breakdown: Option<ScoreBreakdown>,
}

pub fn print_catalog(out: &mut impl Write) -> eyre::Result<()> {
    for section in sections() {
        writeln!(out, "## {} [{}]", section.title, section.id)?;
        writeln!(out, "{}", section.description)?;
        for question in &section.questions {
            writeln!(out, "- {} ({})", question.prompt, question.id)?;
            if let Some(scale) = question.scale {
                writeln!(out, "    scale {}–{}", scale.min, scale.max)?;
            } else {
                writeln!(out, "    options: {}", question.options.join(" | "))?;
            }
        }
        writeln!(out)?;
    }
    Ok(())
}

pub fn print_areas(out: &mut impl Write) -> eyre::Result<()> {
    for area in therapy_areas() {
        writeln!(out, "{} ({})", area.name, area.id)?;
        writeln!(out, "    {}", area.description)?;
        writeln!(out, "    keywords: {}", area.keywords.join(", "))?;
    }
    Ok(())
}

/// Score a JSON answers file and print the recommendations.
pub fn score_file(
    engine: &ScoringEngine,
    path: &Path,
    explain: bool,
    format: OutputFormat,
    out: &mut impl Write,
) -> eyre::Result<()> {
    let contents = std::fs::read_to_string(path)
        .map_err(|e| eyre::eyre!("failed to read answers at {}: {e}", path.display()))?;
    let answers = AnswerStore::from_json(&contents)?;

    let ranked = engine.rank(&answers);
    let breakdown = explain.then(|| engine.explain(&answers));
    info!(path = %path.display(), answers = answers.len(), "scored answers file");

    match format {
        OutputFormat::Json => {
            let report = ScoreReport {
                record: AssessmentRecord::new(answers, ranked),
                breakdown,
            };
            writeln!(out, "{}", serde_json::to_string_pretty(&report)?)?;
        }
        OutputFormat::Text => {
            write!(out, "{}", summarize(&ranked))?;
            if let Some(breakdown) = breakdown {
                write!(out, "\n{}", render_breakdown(&breakdown))?;
            }
        }
    }
    Ok(())
}

/// Run the questionnaire on `input`, then print the recommendations.
pub fn take(
    engine: ScoringEngine,
    format: OutputFormat,
    input: &mut impl BufRead,
    out: &mut impl Write,
) -> eyre::Result<()> {
    let mut session = AssessmentSession::new(sections().to_vec(), engine);

    loop {
        let section = session
            .current_section()
            .cloned()
            .ok_or_else(|| eyre::eyre!("questionnaire has no sections"))?;
        writeln!(out, "\n## {}\n{}\n", section.title, section.description)?;

        for question in &section.questions {
            ask(&mut session, question, input, out)?;
        }

        if session.is_last_section() {
            break;
        }
        session.advance()?;
    }

    session.complete()?;
    let record = session.into_record()?;

    match format {
        OutputFormat::Json => writeln!(out, "{}", serde_json::to_string_pretty(&record)?)?,
        OutputFormat::Text => write!(out, "\n{}", summarize(&record.recommendations))?,
    }
    Ok(())
}

fn ask(
    session: &mut AssessmentSession,
    question: &Question,
    input: &mut impl BufRead,
    out: &mut impl Write,
) -> eyre::Result<()> {
    loop {
        writeln!(out, "{}", question.prompt)?;
        if let Some(scale) = question.scale {
            writeln!(out, "  ({}–{})", scale.min, scale.max)?;
        } else {
            for (i, option) in question.options.iter().enumerate() {
                writeln!(out, "  {}. {}", i + 1, option)?;
            }
        }
        write!(out, "> ")?;
        out.flush()?;

        let mut line = String::new();
        if input.read_line(&mut line)? == 0 {
            return Err(eyre::eyre!(
                "input ended before question '{}' was answered",
                question.id
            ));
        }

        match session.record_answer(&question.id, parse_response(question, line.trim())) {
            Ok(()) => return Ok(()),
            Err(e) => {
                warn!(question = %question.id, error = %e, "answer rejected");
                writeln!(out, "  {e}")?;
            }
        }
    }
}

/// Numbers pick an option by position; anything else is taken literally.
fn parse_response(question: &Question, raw: &str) -> AnswerValue {
    if question.is_numeric() {
        return raw
            .parse::<f64>()
            .map(AnswerValue::Number)
            .unwrap_or_else(|_| AnswerValue::from(raw));
    }
    if let Ok(index) = raw.parse::<usize>()
        && let Some(option) = index.checked_sub(1).and_then(|i| question.options.get(i))
    {
        return AnswerValue::from(option.as_str());
    }
    AnswerValue::from(raw)
}

fn render_breakdown(breakdown: &ScoreBreakdown) -> String {
    let mut output = String::from("### Why these areas\n\n");
    for area in breakdown.areas.iter().filter(|a| a.score > 0) {
        output.push_str(&format!("- {} ({}):\n", area.name, area.score));
        for contribution in &area.contributions {
            let line = match contribution {
                Contribution::Keyword {
                    question_id,
                    keyword,
                    matched: KeywordMatch::Answer,
                } => format!("answer to {question_id} mentions \"{keyword}\""),
                Contribution::Keyword {
                    question_id,
                    keyword,
                    matched: KeywordMatch::QuestionId,
                } => format!("{question_id} answered affirmatively (\"{keyword}\")"),
                Contribution::Rule { question_id, .. } => format!("rule on {question_id}"),
            };
            output.push_str(&format!("    +{} {line}\n", contribution.points()));
        }
    }
    if !breakdown.areas.iter().any(|a| a.score > 0) {
        output.push_str("No answers contributed to any area.\n");
    }
    output
}
