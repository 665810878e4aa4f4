//! Release version discovery from `git describe`.

use regex::Regex;
use serde::Serialize;
use std::path::Path;
use std::process::Stdio;
use std::sync::OnceLock;
use std::time::Duration;
use tokio::process::Command;
use tokio::time::timeout;

/// Default upper bound for the `git describe` call.
pub const DEFAULT_DESCRIBE_TIMEOUT: Duration = Duration::from_secs(5);

/// Released tag and abbreviated commit hash of the running checkout.
///
/// Both are absent outside a repository checkout or when no numeric tag
/// is reachable.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct VersionInfo {
    pub tag: Option<String>,
    pub commit: Option<String>,
}

impl VersionInfo {
    /// Version info with both parts absent.
    pub fn unknown() -> Self {
        Self::default()
    }

    pub fn is_known(&self) -> bool {
        self.tag.is_some()
    }

    /// Human-readable form: `"1.2.0 (abc123)"`, or `None` when unknown.
    pub fn display(&self) -> Option<String> {
        match (&self.tag, &self.commit) {
            (Some(tag), Some(commit)) => Some(format!("{} ({})", tag, commit)),
            (Some(tag), None) => Some(tag.clone()),
            _ => None,
        }
    }
}

fn describe_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"^([\w.]+)-\d+-g(\w+)").expect("describe pattern is valid")
    })
}

/// Parse `git describe --long` output of the form `<tag>-<count>-g<hash>`.
pub fn parse_describe(output: &str) -> Option<VersionInfo> {
    let caps = describe_pattern().captures(output)?;
    Some(VersionInfo {
        tag: Some(caps[1].to_string()),
        commit: Some(caps[2].to_string()),
    })
}

/// Run `git describe` in `repo_dir` (the inherited working directory when
/// `None`) and parse the result.
///
/// Every failure (git missing, not a checkout, no matching tag, timeout,
/// unparseable output) yields [`VersionInfo::unknown`].
pub async fn get_version(repo_dir: Option<&Path>, limit: Duration) -> VersionInfo {
    match describe(repo_dir, limit).await {
        Some(output) => parse_describe(&output).unwrap_or_else(|| {
            tracing::debug!(output = %output.trim(), "Unrecognized git describe output");
            VersionInfo::unknown()
        }),
        None => VersionInfo::unknown(),
    }
}

async fn describe(repo_dir: Option<&Path>, limit: Duration) -> Option<String> {
    let mut cmd = Command::new("git");
    cmd.args(["describe", "--long", "--match", "[0-9].*"])
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::null())
        .kill_on_drop(true);
    if let Some(dir) = repo_dir {
        cmd.current_dir(dir);
    }

    let child = match cmd.spawn() {
        Ok(child) => child,
        Err(e) => {
            tracing::debug!(error = %e, dir = ?repo_dir, "Failed to spawn git");
            return None;
        }
    };

    let output = match timeout(limit, child.wait_with_output()).await {
        Ok(Ok(output)) => output,
        Ok(Err(e)) => {
            tracing::debug!(error = %e, "Failed to wait for git");
            return None;
        }
        Err(_) => {
            // The child is dropped with the future and killed.
            tracing::debug!(timeout = ?limit, "git describe timed out");
            return None;
        }
    };

    if !output.status.success() {
        tracing::debug!(
            dir = ?repo_dir,
            exit_code = ?output.status.code(),
            "git describe found no release tag"
        );
        return None;
    }

    String::from_utf8(output.stdout).ok()
}
