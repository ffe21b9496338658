use crate::config::Window;
use crate::fetch::FetchOutcome;
use crate::ranking::display_rate;
use crate::types::Repository;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::fmt::Write;
use std::fs;
use std::path::Path;

pub fn render_text(outcome: &FetchOutcome, window: Window, now: DateTime<Utc>) -> String {
    let mut out = String::new();

    let source = match outcome {
        FetchOutcome::Live(_) => "live",
        FetchOutcome::Cached(_) => "cached, live fetch failed",
        FetchOutcome::Empty => {
            out.push_str("No data available: live fetch failed and nothing is cached yet.\n");
            return out;
        }
    };

    let repos = outcome.repositories();
    let _ = writeln!(
        out,
        "\nTrending repositories created in the last {} ({}):\n",
        window, source
    );
    for (i, repo) in repos.iter().enumerate() {
        write_repo(&mut out, i + 1, repo, now);
    }
    out
}

fn write_repo(out: &mut String, rank: usize, repo: &Repository, now: DateTime<Utc>) {
    let _ = writeln!(out, "{:>3}. {}", rank, repo.full_name);

    let mut line = format!(
        "     ⭐ {} ({:.1}/day)",
        repo.stargazers_count,
        display_rate(repo, now)
    );
    if let Some(language) = &repo.language {
        let _ = write!(line, "  {}", language);
    }
    if repo.archived {
        line.push_str("  [archived]");
    }
    let _ = writeln!(out, "{}", line);

    if let Some(desc) = repo.description.as_deref().filter(|d| !d.trim().is_empty()) {
        let _ = writeln!(out, "     {}", desc.trim());
    }
    if !repo.topics.is_empty() {
        let _ = writeln!(out, "     #{}", repo.topics.join(" #"));
    }
    let _ = writeln!(out, "     {}\n", repo.html_url);
}

#[derive(Serialize)]
struct JsonReport<'a> {
    source: &'static str,
    items: &'a [Repository],
}

/// `{"source": "live" | "cached" | "none", "items": [...]}`
pub fn render_json(outcome: &FetchOutcome) -> serde_json::Result<String> {
    serde_json::to_string_pretty(&JsonReport {
        source: outcome.source(),
        items: outcome.repositories(),
    })
}

pub fn save_output(path: &Path, contents: &str) -> std::io::Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    fs::write(path, contents)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::sample_repo;
    use std::io;
    use std::sync::{Arc, Mutex};

    fn now() -> DateTime<Utc> {
        DateTime::parse_from_rfc3339("2026-10-19T12:00:00Z")
            .unwrap()
            .with_timezone(&Utc)
    }

    #[test]
    fn text_marks_provenance_and_rate() {
        let repos = vec![sample_repo("new/rocket", 50, "2026-10-17T12:00:00Z")];

        let live = render_text(&FetchOutcome::Live(repos.clone()), Window::Week, now());
        assert!(live.contains("last week (live)"));
        assert!(live.contains("  1. new/rocket"));
        assert!(live.contains("⭐ 50 (25.0/day)  Rust"));
        assert!(live.contains("https://github.com/new/rocket"));

        let cached = render_text(&FetchOutcome::Cached(repos), Window::Day, now());
        assert!(cached.contains("(cached, live fetch failed)"));
    }

    #[test]
    fn empty_outcome_says_no_data() {
        let text = render_text(&FetchOutcome::Empty, Window::Week, now());
        assert!(text.starts_with("No data available"));

        let json: serde_json::Value =
            serde_json::from_str(&render_json(&FetchOutcome::Empty).unwrap()).unwrap();
        assert_eq!(json, serde_json::json!({"source": "none", "items": []}));
    }

    #[test]
    fn json_carries_source_and_ranked_order() {
        let repos = vec![
            sample_repo("b/first", 10, "2026-10-18T12:00:00Z"),
            sample_repo("a/second", 5, "2026-10-18T12:00:00Z"),
        ];

        for (outcome, source) in [
            (FetchOutcome::Live(repos.clone()), "live"),
            (FetchOutcome::Cached(repos.clone()), "cached"),
        ] {
            let json: serde_json::Value =
                serde_json::from_str(&render_json(&outcome).unwrap()).unwrap();
            assert_eq!(json["source"], source);
            let items: Vec<Repository> = serde_json::from_value(json["items"].clone()).unwrap();
            assert_eq!(items, repos);
        }
    }

    #[derive(Clone, Default)]
    struct CapturedLogs(Arc<Mutex<Vec<u8>>>);

    impl io::Write for CapturedLogs {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    fn logs_during<T>(f: impl FnOnce() -> T) -> (T, String) {
        let logs = CapturedLogs::default();
        let writer = logs.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_writer(move || writer.clone())
            .with_ansi(false)
            .finish();
        let value = tracing::subscriber::with_default(subscriber, f);
        let text = String::from_utf8_lossy(&logs.0.lock().unwrap()).into_owned();
        (value, text)
    }

    #[test]
    fn malformed_timestamp_is_reported_once_per_cycle() {
        let mut repos = vec![
            sample_repo("a/broken", 60, "last tuesday"),
            sample_repo("a/ok", 700, "2026-10-12T12:00:00Z"),
        ];

        let (_, ranking_logs) = logs_during(|| crate::ranking::rank(&mut repos, now()));
        assert_eq!(ranking_logs.matches("unparsable creation timestamp").count(), 1);

        let outcome = FetchOutcome::Cached(repos);
        let (text, render_logs) = logs_during(|| render_text(&outcome, Window::Week, now()));
        assert!(text.contains("⭐ 60 (60.0/day)"));
        assert!(render_logs.is_empty(), "rendering logged: {}", render_logs);
    }

    #[test]
    fn save_output_creates_parent_dirs() {
        let dir = tempfile::TempDir::new().unwrap();
        let target = dir.path().join("out").join("trending.txt");
        save_output(&target, "hello").unwrap();
        assert_eq!(fs::read_to_string(target).unwrap(), "hello");
    }
}
