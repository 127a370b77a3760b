use std::path::Path;
use std::process::Stdio;
use std::time::{Duration, Instant};
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::process::Command;
use tracing::{debug, trace};

use crate::{AgentError, GenerationConfig};

/// Captured result of a finished process
#[derive(Debug, Clone)]
pub struct ProcessOutput {
    pub stdout: String,
    pub stderr: String,
    pub exit_code: i32,
    pub duration: Duration,
}

impl ProcessOutput {
    pub fn success(&self) -> bool {
        self.exit_code == 0
    }
}

/// Utility for spawning CLI agents
pub struct ProcessSpawner;

impl ProcessSpawner {
    /// Spawn a process and capture its output, honoring the config timeout
    pub async fn spawn(
        binary: &Path,
        args: &[&str],
        config: &GenerationConfig,
    ) -> Result<ProcessOutput, AgentError> {
        match config.timeout {
            Some(limit) => tokio::time::timeout(limit, Self::run(binary, args, config))
                .await
                .map_err(|_| AgentError::Timeout(limit))?,
            None => Self::run(binary, args, config).await,
        }
    }

    async fn run(
        binary: &Path,
        args: &[&str],
        config: &GenerationConfig,
    ) -> Result<ProcessOutput, AgentError> {
        let start = Instant::now();

        debug!(
            binary = %binary.display(),
            arg_count = args.len(),
            working_dir = %config.working_dir.display(),
            "Spawning agent process"
        );

        let mut child = Command::new(binary)
            .args(args)
            .current_dir(&config.working_dir)
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .stdin(Stdio::null())
            .kill_on_drop(true)
            .spawn()?;

        let stdout_handle = child
            .stdout
            .take()
            .ok_or_else(|| AgentError::ExecutionFailed("stdout not captured".into()))?;
        let stderr_handle = child
            .stderr
            .take()
            .ok_or_else(|| AgentError::ExecutionFailed("stderr not captured".into()))?;

        let mut stdout_reader = BufReader::new(stdout_handle).lines();
        let mut stderr_reader = BufReader::new(stderr_handle).lines();

        let mut stdout = String::new();
        let mut stderr = String::new();

        loop {
            tokio::select! {
                biased;

                result = stdout_reader.next_line() => {
                    match result {
                        Ok(Some(line)) => {
                            trace!(line = %line, "stdout");
                            push_line(&mut stdout, &line);
                        }
                        Ok(None) => {
                            // stdout closed, drain stderr
                            while let Ok(Some(line)) = stderr_reader.next_line().await {
                                trace!(line = %line, "stderr");
                                push_line(&mut stderr, &line);
                            }
                            break;
                        }
                        Err(e) => {
                            return Err(AgentError::ExecutionFailed(format!(
                                "Failed to read stdout: {}",
                                e
                            )));
                        }
                    }
                }
                result = stderr_reader.next_line() => {
                    match result {
                        Ok(Some(line)) => {
                            trace!(line = %line, "stderr");
                            push_line(&mut stderr, &line);
                        }
                        Ok(None) => {}
                        Err(e) => {
                            return Err(AgentError::ExecutionFailed(format!(
                                "Failed to read stderr: {}",
                                e
                            )));
                        }
                    }
                }
            }
        }

        let status = child.wait().await?;
        let duration = start.elapsed();
        let exit_code = status.code().unwrap_or(-1);

        debug!(
            exit_code,
            duration_ms = duration.as_millis(),
            "Agent process completed"
        );

        Ok(ProcessOutput {
            stdout,
            stderr,
            exit_code,
            duration,
        })
    }
}

fn push_line(buffer: &mut String, line: &str) {
    if !buffer.is_empty() {
        buffer.push('\n');
    }
    buffer.push_str(line);
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[tokio::test]
    async fn test_spawn_captures_both_streams() {
        let config = GenerationConfig::default();
        let output = ProcessSpawner::spawn(
            &PathBuf::from("sh"),
            &["-c", "echo uno; echo dos >&2; echo tres"],
            &config,
        )
        .await
        .unwrap();
        assert!(output.success());
        assert_eq!(output.stdout, "uno\ntres");
        assert_eq!(output.stderr, "dos");
    }

    #[tokio::test]
    async fn test_spawn_times_out() {
        let config = GenerationConfig::default().with_timeout(Duration::from_millis(100));
        let err = ProcessSpawner::spawn(&PathBuf::from("sleep"), &["5"], &config)
            .await
            .unwrap_err();
        assert!(matches!(err, AgentError::Timeout(_)));
    }

    #[tokio::test]
    async fn test_spawn_missing_binary() {
        let config = GenerationConfig::default();
        let err = ProcessSpawner::spawn(
            &PathBuf::from("/nonexistent/matriz-agent-binary"),
            &[],
            &config,
        )
        .await
        .unwrap_err();
        assert!(matches!(err, AgentError::SpawnFailed(_)));
    }
}
