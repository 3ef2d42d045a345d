use std::io::Cursor;

use clap::Parser;
use haven_cli::cli::{self, Cli, Command};
use haven_cli::commands::{print_areas, print_catalog, score_file, take};
use haven_cli::config::{ConfigSource, HavenConfig, OutputFormat, load_or_default};
use haven_assessment::ScoringEngine;

fn output_of(f: impl FnOnce(&mut Vec<u8>) -> eyre::Result<()>) -> String {
    let mut out = Vec::new();
    f(&mut out).unwrap();
    String::from_utf8(out).unwrap()
}

fn answers_file(dir: &tempfile::TempDir, json: &str) -> std::path::PathBuf {
    let path = dir.path().join("answers.json");
    std::fs::write(&path, json).unwrap();
    path
}

#[test]
fn parses_score_arguments() {
    let cli = Cli::try_parse_from([
        "haven",
        "--config",
        "/tmp/haven.json",
        "score",
        "answers.json",
        "--explain",
        "--format",
        "json",
    ])
    .unwrap();

    assert_eq!(cli.config.as_deref(), Some(std::path::Path::new("/tmp/haven.json")));
    match cli.command {
        Command::Score(args) => {
            assert!(args.explain);
            assert_eq!(args.format, Some(OutputFormat::Json));
            assert_eq!(args.answers, std::path::PathBuf::from("answers.json"));
        }
        other => panic!("unexpected command {other:?}"),
    }
}

#[test]
fn catalog_and_areas_list_everything() {
    let catalog = output_of(|out| print_catalog(out));
    assert!(catalog.contains("(anxiety-frequency)"));
    assert!(catalog.contains("(support-preference)"));
    assert!(catalog.contains("scale 1–10"));

    let areas = output_of(|out| print_areas(out));
    assert!(areas.starts_with("Anxiety (anxiety)"));
    assert!(areas.contains("Anger Management (anger)"));
}

#[test]
fn scores_answers_file_as_json() {
    let dir = tempfile::tempdir().unwrap();
    let path = answers_file(&dir, r#"{"trauma-experience": "Yes"}"#);

    let text = output_of(|out| {
        score_file(&ScoringEngine::standard(), &path, false, OutputFormat::Json, out)
    });
    let json: serde_json::Value = serde_json::from_str(&text).unwrap();

    assert_eq!(json["recommendations"][0]["id"], "trauma");
    assert_eq!(json["recommendations"].as_array().unwrap().len(), 3);
    assert_eq!(json["answers"]["trauma-experience"], "Yes");
    assert!(json.get("breakdown").is_none());
    assert!(json["id"].is_string());
}

#[test]
fn explains_scores_as_text() {
    let dir = tempfile::tempdir().unwrap();
    let path = answers_file(&dir, r#"{"trauma-experience": "Yes"}"#);

    let text = output_of(|out| {
        score_file(&ScoringEngine::standard(), &path, true, OutputFormat::Text, out)
    });

    assert!(text.contains("1. **Trauma & PTSD** (score 4)"));
    assert!(text.contains("### Why these areas"));
    assert!(text.contains("+3 rule on trauma-experience"));
    assert!(text.contains("+1 trauma-experience answered affirmatively (\"trauma\")"));
}

#[test]
fn rejects_answers_that_are_not_an_object() {
    let dir = tempfile::tempdir().unwrap();
    let path = answers_file(&dir, r#"["Yes"]"#);

    let mut out = Vec::new();
    let err = score_file(&ScoringEngine::standard(), &path, false, OutputFormat::Text, &mut out)
        .unwrap_err();
    assert!(err.to_string().contains("invalid answers payload"));
}

#[test]
fn interactive_run_reasks_invalid_answers() {
    let script = [
        "3", "2", "1", "Often", "11", "3", // feelings (11 is off the scale)
        "2", "2", "1", "1", "3", // experiences
        "2", "2", "2", // relationships
        "10", "1", // goals
    ]
    .join("\n");
    let mut input = Cursor::new(script.into_bytes());

    let text = output_of(|out| take(ScoringEngine::standard(), OutputFormat::Text, &mut input, out));

    assert!(text.contains("'11' is outside the scale for question 'wellbeing-scale'"));
    assert!(text.contains("1. **Sleep Difficulties** (score 6)"));
    assert!(text.contains("2. **Stress Management** (score 5)"));
    assert!(text.contains("3. **Anxiety** (score 4)"));
}

#[test]
fn interactive_run_fails_on_early_eof() {
    let mut input = Cursor::new(b"3\n".to_vec());
    let mut out = Vec::new();

    let err = take(ScoringEngine::standard(), OutputFormat::Text, &mut input, &mut out).unwrap_err();
    assert!(err.to_string().contains("input ended before question 'low-mood-frequency'"));
}

fn run_config(
    command: cli::ConfigCommand,
    config: eyre::Result<HavenConfig>,
    path: &std::path::Path,
) -> eyre::Result<String> {
    let mut out = Vec::new();
    cli::run(
        Command::Config { command },
        config,
        path,
        &mut Cursor::new(Vec::new()),
        &mut out,
    )?;
    Ok(String::from_utf8(out).unwrap())
}

#[test]
fn config_commands_manage_the_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.json");
    let init = |force: bool| {
        run_config(
            cli::ConfigCommand::Init { force },
            Ok(HavenConfig::default()),
            &path,
        )
    };

    init(false).unwrap();
    assert!(path.exists());
    assert!(init(false).is_err());
    init(true).unwrap();

    let shown = run_config(cli::ConfigCommand::Show, Ok(HavenConfig::default()), &path).unwrap();
    assert!(shown.contains("\"top_n\": 3"));
}

#[test]
fn broken_config_can_still_be_replaced() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.json");
    std::fs::write(&path, "{not json").unwrap();
    let loaded = || load_or_default(&path).map(|(config, _)| config);

    assert!(loaded().is_err());
    let err = run_config(cli::ConfigCommand::Show, loaded(), &path).unwrap_err();
    assert!(err.to_string().contains("not valid JSON"));

    let printed = run_config(cli::ConfigCommand::Path, loaded(), &path).unwrap();
    assert_eq!(printed.trim(), path.display().to_string());

    let mut out = Vec::new();
    let err = cli::run(
        Command::Score(cli::ScoreArgs {
            answers: answers_file(&dir, "{}"),
            explain: false,
            format: None,
        }),
        loaded(),
        &path,
        &mut Cursor::new(Vec::new()),
        &mut out,
    )
    .unwrap_err();
    assert!(err.to_string().contains("config.json"));

    run_config(cli::ConfigCommand::Init { force: true }, loaded(), &path).unwrap();
    let (config, source) = load_or_default(&path).unwrap();
    assert_eq!(config.top_n, 3);
    assert_eq!(source, ConfigSource::File);
}

#[test]
fn configured_top_n_applies_to_score() {
    let dir = tempfile::tempdir().unwrap();
    let path = answers_file(&dir, "{}");
    let config = HavenConfig {
        top_n: 5,
        output: OutputFormat::Json,
        ..HavenConfig::default()
    };

    let text = output_of(|out| {
        cli::run(
            Command::Score(cli::ScoreArgs {
                answers: path.clone(),
                explain: false,
                format: None,
            }),
            Ok(config),
            &dir.path().join("config.json"),
            &mut Cursor::new(Vec::new()),
            out,
        )
    });
    let json: serde_json::Value = serde_json::from_str(&text).unwrap();
    assert_eq!(json["recommendations"].as_array().unwrap().len(), 5);
}
