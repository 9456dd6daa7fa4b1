//! Poppler `pdftotext` extraction backend.

use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};
use std::time::{Duration, Instant};

use tracing::{debug, warn};

use super::TextExtractor;
use crate::error::ExtractionError;
use crate::models::config::ConverterConfig;

/// How often the child process is polled for exit.
const POLL_INTERVAL: Duration = Duration::from_millis(50);

/// Text extraction backend wrapping Poppler's `pdftotext`.
///
/// Invoked as `pdftotext -layout -q <input> <tmpfile>`; `-layout` keeps the
/// column alignment the format extractors depend on. The child is killed if
/// it does not finish within the configured deadline, so a wedged converter
/// cannot stall a worker slot.
pub struct PopplerExtractor {
    tool: String,
    layout: bool,
    timeout: Duration,
}

impl PopplerExtractor {
    /// Create a backend from converter configuration.
    ///
    /// The tool path is resolved per invocation, not here: a missing
    /// binary is a per-document [`ExtractionError::ToolMissing`], never a
    /// construction failure.
    pub fn new(config: &ConverterConfig) -> Self {
        Self {
            tool: config.tool.clone(),
            layout: config.layout,
            timeout: Duration::from_secs(config.timeout_secs),
        }
    }

    fn resolve_tool(&self) -> Result<PathBuf, ExtractionError> {
        let candidate = Path::new(&self.tool);
        if candidate.is_absolute() {
            if candidate.exists() {
                return Ok(candidate.to_path_buf());
            }
            return Err(ExtractionError::ToolMissing(self.tool.clone()));
        }
        which::which(&self.tool).map_err(|_| ExtractionError::ToolMissing(self.tool.clone()))
    }

    fn wait_with_deadline(
        &self,
        child: &mut std::process::Child,
    ) -> Result<std::process::ExitStatus, ExtractionError> {
        let deadline = Instant::now() + self.timeout;
        loop {
            if let Some(status) = child.try_wait()? {
                return Ok(status);
            }
            if Instant::now() >= deadline {
                warn!("converter exceeded {}s deadline, killing", self.timeout.as_secs());
                let _ = child.kill();
                let _ = child.wait();
                return Err(ExtractionError::Timeout(self.timeout.as_secs()));
            }
            std::thread::sleep(POLL_INTERVAL);
        }
    }
}

impl TextExtractor for PopplerExtractor {
    fn extract_lines(&self, path: &Path) -> Result<Vec<String>, ExtractionError> {
        let tool = self.resolve_tool()?;

        // Output goes to a temp file rather than a pipe so the poll loop
        // cannot deadlock on a full pipe buffer.
        let out_file = tempfile::Builder::new()
            .prefix("untcc-")
            .suffix(".txt")
            .tempfile()?;

        let mut cmd = Command::new(&tool);
        if self.layout {
            cmd.arg("-layout");
        }
        cmd.arg("-q")
            .arg(path)
            .arg(out_file.path())
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::piped());

        debug!("running {} on {}", tool.display(), path.display());

        let mut child = cmd.spawn()?;
        let status = self.wait_with_deadline(&mut child)?;

        if !status.success() {
            let stderr = child
                .stderr
                .take()
                .and_then(|mut s| {
                    use std::io::Read;
                    let mut buf = String::new();
                    s.read_to_string(&mut buf).ok().map(|_| buf)
                })
                .unwrap_or_default();
            return Err(ExtractionError::Failed {
                status: status.to_string(),
                stderr: stderr.trim().to_string(),
            });
        }

        let text = std::fs::read_to_string(out_file.path())?;
        if text.trim().is_empty() {
            return Err(ExtractionError::NoOutput(path.display().to_string()));
        }

        let lines: Vec<String> = text
            .lines()
            .map(|l| l.replace('\u{000C}', ""))
            .collect();

        debug!("extracted {} lines from {}", lines.len(), path.display());
        Ok(lines)
    }

    fn backend_name(&self) -> &str {
        "poppler-pdftotext"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_tool_is_typed_failure() {
        let config = ConverterConfig {
            tool: "definitely-not-a-real-converter".to_string(),
            ..ConverterConfig::default()
        };
        let extractor = PopplerExtractor::new(&config);
        let err = extractor
            .extract_lines(Path::new("UN_country_contributions_2020_01.pdf"))
            .unwrap_err();
        assert!(matches!(err, ExtractionError::ToolMissing(_)));
    }
}
