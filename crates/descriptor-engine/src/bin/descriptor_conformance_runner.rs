use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, anyhow};
use chrono::Utc;
use descriptor_engine::conformance::{
    COMPONENT, ConformanceRunResult, ConformanceRunSummary, ScenarioRunner,
};
use descriptor_engine::config::RealmConfig;
use serde::Serialize;

#[derive(Debug, Clone)]
struct CliArgs {
    manifest: PathBuf,
    config: Option<PathBuf>,
    output_root: PathBuf,
}

fn default_manifest() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/conformance/es5_object_model.json")
}

fn default_output_root() -> PathBuf {
    PathBuf::from("artifacts/descriptor_conformance")
}

fn parse_args() -> Result<CliArgs, String> {
    let mut manifest = default_manifest();
    let mut config = None;
    let mut output_root = default_output_root();

    let mut args = std::env::args().skip(1);
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--manifest" => {
                let value = args
                    .next()
                    .ok_or_else(|| "--manifest requires a value".to_string())?;
                manifest = PathBuf::from(value);
            }
            "--config" => {
                let value = args
                    .next()
                    .ok_or_else(|| "--config requires a value".to_string())?;
                config = Some(PathBuf::from(value));
            }
            "--output-root" => {
                let value = args
                    .next()
                    .ok_or_else(|| "--output-root requires a value".to_string())?;
                output_root = PathBuf::from(value);
            }
            "--help" | "-h" => {
                return Err("usage: descriptor_conformance_runner [--manifest <path>] [--config <realm.toml>] [--output-root <path>]".to_string());
            }
            other => {
                return Err(format!("unknown argument: {other}"));
            }
        }
    }

    Ok(CliArgs {
        manifest,
        config,
        output_root,
    })
}

fn write_atomic(path: &Path, bytes: &[u8]) -> Result<()> {
    let tmp = path.with_extension("tmp");
    fs::write(&tmp, bytes).with_context(|| format!("writing {}", tmp.display()))?;
    fs::rename(&tmp, path).with_context(|| format!("renaming to {}", path.display()))?;
    Ok(())
}

#[derive(Debug, Serialize)]
struct RunSummaryLine<'a> {
    component: &'static str,
    event: &'static str,
    outcome: &'static str,
    error_code: Option<&'static str>,
    generated_at_utc: String,
    manifest_path: String,
    #[serde(flatten)]
    summary: &'a ConformanceRunSummary,
}

fn render_evidence(result: &ConformanceRunResult, manifest: &Path) -> Result<String> {
    let gate_pass = result.enforce_gate().is_ok();
    let summary_line = RunSummaryLine {
        component: COMPONENT,
        event: "summary",
        outcome: if gate_pass { "pass" } else { "fail" },
        error_code: if gate_pass {
            None
        } else {
            Some("OM-SCENARIO-GATE")
        },
        generated_at_utc: Utc::now().to_rfc3339(),
        manifest_path: manifest.display().to_string(),
        summary: &result.summary,
    };

    let mut lines = serde_json::to_string(&summary_line)?;
    lines.push('\n');
    for log in &result.logs {
        lines.push_str(&serde_json::to_string(log)?);
        lines.push('\n');
    }
    Ok(lines)
}

fn main() -> Result<()> {
    let args = parse_args().map_err(|err| anyhow!(err))?;

    let config = match &args.config {
        Some(path) => RealmConfig::load_toml(path)
            .with_context(|| format!("loading realm config {}", path.display()))?,
        None => RealmConfig::default(),
    };
    let runner = ScenarioRunner::new(config)?;
    let result = runner
        .run_path(&args.manifest)
        .with_context(|| format!("running {}", args.manifest.display()))?;

    let run_root = args.output_root.join(&result.run_id);
    fs::create_dir_all(&run_root)?;
    let evidence_path = run_root.join("descriptor_conformance_evidence.jsonl");
    write_atomic(&evidence_path, render_evidence(&result, &args.manifest)?.as_bytes())?;

    println!("descriptor run_id={}", result.run_id);
    println!("descriptor manifest_hash={}", result.manifest_hash);
    println!("descriptor evidence={}", evidence_path.display());
    println!("descriptor total={}", result.summary.total_scenarios);
    println!("descriptor passed={}", result.summary.passed);
    println!("descriptor failed={}", result.summary.failed);
    println!("descriptor errored={}", result.summary.errored);
    for failure in result.failures() {
        println!(
            "descriptor failure scenario={} step={} detail={}",
            failure.scenario_id,
            failure.failed_step.as_deref().unwrap_or("-"),
            failure.error_detail.as_deref().unwrap_or("-"),
        );
    }

    result.enforce_gate()?;
    Ok(())
}
