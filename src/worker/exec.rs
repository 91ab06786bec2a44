//! Running one requested command.

use super::error::WorkerError;
use super::request::WorkerRequest;
use std::process::Stdio;
use tokio::process::Command;
use tracing::{debug, instrument};

/// Environment variable carrying the identity token into the command.
pub const TOKEN_ENV: &str = "APG_REGISTRY_TOKEN";

/// What a finished command left behind.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandOutcome {
    /// Exit code; `None` when the process was killed by a signal.
    pub code: Option<i32>,
    /// Standard output followed by standard error.
    pub output: String,
}

impl CommandOutcome {
    pub fn success(&self) -> bool {
        self.code == Some(0)
    }
}

/// Run `request.command` with `request.resource` appended as its last argument.
///
/// The command is split on whitespace; no shell is involved.
#[instrument(skip(token), fields(command = %request.command, resource = %request.resource))]
pub async fn execute(request: &WorkerRequest, token: &str) -> Result<CommandOutcome, WorkerError> {
    let mut words = request.command.split_whitespace();
    let program = words.next().ok_or(WorkerError::EmptyCommand)?;

    debug!(program, "Spawning");
    let output = Command::new(program)
        .args(words)
        .arg(&request.resource)
        .env(TOKEN_ENV, token)
        .stdin(Stdio::null())
        .output()
        .await
        .map_err(|source| WorkerError::Spawn {
            program: program.to_string(),
            source,
        })?;

    let mut combined = String::from_utf8_lossy(&output.stdout).into_owned();
    combined.push_str(&String::from_utf8_lossy(&output.stderr));
    Ok(CommandOutcome {
        code: output.status.code(),
        output: combined,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(command: &str, resource: &str) -> WorkerRequest {
        WorkerRequest {
            command: command.into(),
            resource: resource.into(),
        }
    }

    #[tokio::test]
    async fn appends_resource_as_last_argument() {
        let outcome = execute(&request("echo  lint   --fast", "projects/p/apis/a"), "t")
            .await
            .unwrap();
        assert!(outcome.success());
        assert_eq!(outcome.output, "lint --fast projects/p/apis/a\n");
    }

    #[tokio::test]
    async fn passes_token_in_environment() {
        let outcome = execute(&request("printenv", TOKEN_ENV), "secret-token")
            .await
            .unwrap();
        assert_eq!(outcome.output.trim(), "secret-token");
    }

    #[tokio::test]
    async fn nonzero_exit_is_an_outcome() {
        let outcome = execute(&request("ls", "/definitely/not/here"), "t")
            .await
            .unwrap();
        assert!(!outcome.success());
        assert!(!outcome.output.is_empty());
    }

    #[tokio::test]
    async fn empty_command_is_rejected() {
        let result = execute(&request("   ", "projects/p"), "t").await;
        assert!(matches!(result, Err(WorkerError::EmptyCommand)));
    }

    #[tokio::test]
    async fn missing_program_fails_to_spawn() {
        let result = execute(&request("no-such-program-anywhere", "projects/p"), "t").await;
        assert!(matches!(result, Err(WorkerError::Spawn { .. })));
    }
}
