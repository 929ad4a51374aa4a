use std::process::Stdio;

use tokio::process::Command;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info, warn};

use crate::llm::LlmSettings;

/// Program, arguments and extra environment used to launch the model server.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerCommand {
    program: String,
    args: Vec<String>,
    envs: Vec<(String, String)>,
}

impl ServerCommand {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
            envs: Vec::new(),
        }
    }

    /// `<server_binary> serve` listening on the loopback port from `settings`.
    pub fn ollama(settings: &LlmSettings) -> Self {
        Self::new(settings.server_binary.clone())
            .arg("serve")
            .env("OLLAMA_HOST", settings.server_host())
    }

    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    /// Added on top of the inherited parent environment.
    pub fn env(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.envs.push((key.into(), value.into()));
        self
    }

    #[cfg(test)]
    fn program(&self) -> &str {
        &self.program
    }

    #[cfg(test)]
    fn args(&self) -> &[String] {
        &self.args
    }

    #[cfg(test)]
    fn envs(&self) -> &[(String, String)] {
        &self.envs
    }

    fn command(&self) -> Command {
        let mut command = Command::new(&self.program);
        command
            .args(&self.args)
            .envs(self.envs.iter().map(|(k, v)| (k, v)))
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .kill_on_drop(true);
        command
    }
}

/// Handle to a model server process supervised in the background.
///
/// The process lives until [`ModelServer::shutdown`] cancels it or the
/// runtime drops the supervising task.
pub struct ModelServer {
    cancel: CancellationToken,
    task: JoinHandle<()>,
}

impl ModelServer {
    /// Launch the server on the current tokio runtime.
    ///
    /// Launch failures are logged; requests against a missing server fail
    /// per file instead.
    pub fn spawn(command: ServerCommand) -> Self {
        let cancel = CancellationToken::new();
        let task = tokio::spawn(supervise(command, cancel.clone()));
        Self { cancel, task }
    }

    #[cfg(test)]
    fn cancellation_token(&self) -> CancellationToken {
        self.cancel.clone()
    }

    /// Whether the supervising task (and therefore the child) is still alive.
    #[cfg(test)]
    fn is_running(&self) -> bool {
        !self.task.is_finished()
    }

    pub async fn shutdown(self) {
        self.cancel.cancel();
        if let Err(err) = self.task.await {
            warn!(error = %err, "model server supervisor did not finish cleanly");
        }
    }
}

async fn supervise(command: ServerCommand, cancel: CancellationToken) {
    let mut child = match command.command().spawn() {
        Ok(child) => child,
        Err(err) => {
            error!(program = %command.program, error = %err, "failed to start model server");
            return;
        }
    };
    info!(program = %command.program, pid = ?child.id(), "model server started");

    tokio::select! {
        status = child.wait() => match status {
            Ok(status) => warn!(%status, "model server exited"),
            Err(err) => error!(error = %err, "failed to wait on model server"),
        },
        _ = cancel.cancelled() => match child.kill().await {
            Ok(()) => debug!("model server stopped"),
            Err(err) => warn!(error = %err, "failed to stop model server"),
        },
    }
}
