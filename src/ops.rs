use std::path::Path;

use anyhow::{bail, Context, Result};
use log::info;
use serde_json::Value;
use tokio::process::Command;

use rowlog::{log_row, try_timed_async, Row};

/// Outcome label for a command's exit status.
pub fn result_label(success: bool) -> &'static str {
    if success {
        "pass"
    } else {
        "fail"
    }
}

fn parse_values(values: &str) -> Result<Value> {
    serde_json::from_str(values).with_context(|| format!("--values is not valid JSON: {values}"))
}

/// Time `argv`, append a row describing it, and return whether it passed.
///
/// Nothing is logged when the command cannot be started.
pub async fn run_command(
    out: &Path,
    file: &str,
    func: Option<&str>,
    values: Option<&str>,
    argv: &[String],
) -> Result<bool> {
    let Some((program, args)) = argv.split_first() else {
        bail!("no command given");
    };
    let values = match values {
        Some(v) => parse_values(v)?,
        None => Value::from(args.to_vec()),
    };
    let func = func.unwrap_or(program);

    let mut cmd = Command::new(program);
    cmd.args(args);
    let timed = try_timed_async(move || async move { cmd.status().await })
        .await
        .with_context(|| format!("failed to run {program}"))?;
    let passed = timed.res.success();

    log_row(
        out,
        &Row {
            file,
            func,
            values: &values,
            result: result_label(passed),
            elapsed: timed.elapsed,
        },
    )?;
    info!(
        "{func}: {} in {:.4}s ({})",
        result_label(passed),
        timed.elapsed,
        timed.res
    );
    Ok(passed)
}

/// Append a row whose fields were all supplied by the caller.
pub fn append(
    out: &Path,
    file: &str,
    func: &str,
    values: &str,
    result: &str,
    elapsed: f64,
) -> Result<()> {
    if !elapsed.is_finite() || elapsed < 0.0 {
        bail!("elapsed must be a non-negative number of seconds, got {elapsed}");
    }
    let values = parse_values(values)?;
    log_row(
        out,
        &Row {
            file,
            func,
            values: &values,
            result,
            elapsed,
        },
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use rowlog::row::HEADER;

    fn args(v: &[&str]) -> Vec<String> {
        v.iter().map(|s| s.to_string()).collect()
    }

    fn read(path: &Path) -> String {
        std::fs::read_to_string(path).unwrap()
    }

    #[tokio::test]
    async fn passing_command_logs_pass() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("reports/out.md");
        let passed = run_command(&out, "suite", None, None, &args(&["true"]))
            .await
            .unwrap();
        assert!(passed);
        let contents = read(&out);
        assert!(contents.starts_with(HEADER));
        let row = contents.lines().nth(2).unwrap();
        assert!(row.starts_with("| suite | true | [] | pass | "), "{row}");
        assert!(row.ends_with("s |"), "{row}");
    }

    #[tokio::test]
    async fn failing_command_logs_fail() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("out.md");
        let passed = run_command(
            &out,
            "suite",
            Some("lint"),
            None,
            &args(&["sh", "-c", "exit 3"]),
        )
        .await
        .unwrap();
        assert!(!passed);
        let row = read(&out).lines().nth(2).unwrap().to_string();
        assert!(
            row.starts_with("| suite | lint | [\"-c\",\"exit 3\"] | fail | "),
            "{row}"
        );
    }

    #[tokio::test]
    async fn explicit_values_are_used() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("out.md");
        run_command(&out, "f", None, Some(r#"{"n":2}"#), &args(&["true"]))
            .await
            .unwrap();
        assert!(read(&out).contains("| f | true | {\"n\":2} | pass | "));
    }

    #[tokio::test]
    async fn missing_program_logs_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("out.md");
        let res = run_command(
            &out,
            "f",
            None,
            None,
            &args(&["definitely-not-a-real-program-rowlog"]),
        )
        .await;
        assert!(res.is_err());
        assert!(!out.exists());
    }

    #[tokio::test]
    async fn invalid_values_fail_before_running() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("out.md");
        let res = run_command(&out, "f", None, Some("{nope"), &args(&["true"])).await;
        assert!(res.is_err());
        assert!(!out.exists());
    }

    #[test]
    fn append_writes_row() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("out.md");
        append(&out, "math.ts", "add", "[1,2]", "3", 0.0123).unwrap();
        append(&out, "math.ts", "sub", "[2,1]", "1", 0.5).unwrap();
        assert_eq!(
            read(&out),
            format!(
                "{HEADER}| math.ts | add | [1,2] | 3 | 0.0123s |\n| math.ts | sub | [2,1] | 1 | 0.5000s |\n"
            )
        );
    }

    #[test]
    fn append_keeps_values_text_intact() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("out.md");
        append(&out, "f", "g", r#"{"b":1,"a":2}"#, "pass", 0.1).unwrap();
        append(&out, "f", "g", "12345678901234567890123", "pass", 0.1).unwrap();
        append(&out, "f", "g", r#"[ 1.50, {"z": null, "y": true} ]"#, "pass", 0.1).unwrap();
        let contents = read(&out);
        let rows: Vec<&str> = contents.lines().skip(2).collect();
        assert_eq!(
            rows,
            vec![
                "| f | g | {\"b\":1,\"a\":2} | pass | 0.1000s |",
                "| f | g | 12345678901234567890123 | pass | 0.1000s |",
                "| f | g | [1.50,{\"z\":null,\"y\":true}] | pass | 0.1000s |",
            ]
        );
    }

    #[test]
    fn append_rejects_bad_elapsed() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("out.md");
        assert!(append(&out, "a", "b", "null", "pass", -1.0).is_err());
        assert!(append(&out, "a", "b", "null", "pass", f64::NAN).is_err());
        assert!(append(&out, "a", "b", "null", "pass", f64::INFINITY).is_err());
        assert!(!out.exists());
    }

    #[test]
    fn labels() {
        assert_eq!(result_label(true), "pass");
        assert_eq!(result_label(false), "fail");
    }
}
