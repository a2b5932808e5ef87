use std::path::Path;
use std::process::{Command, ExitStatus};

/// Editor used when neither `$EDITOR` nor the config names one.
pub const FALLBACK_EDITOR: &str = "vim";

#[derive(Debug, thiserror::Error)]
pub enum EditorError {
    #[error("editor command is empty")]
    Empty,
    #[error("could not start {program}: {source}")]
    Spawn {
        program: String,
        source: std::io::Error,
    },
    #[error("{program} exited with {status}")]
    ExitStatus { program: String, status: ExitStatus },
}

/// Pick the editor command: `$EDITOR`, then the configured one, then vim.
pub fn resolve_editor(env_editor: Option<&str>, configured: Option<&str>) -> String {
    [env_editor, configured]
        .into_iter()
        .flatten()
        .map(str::trim)
        .find(|s| !s.is_empty())
        .unwrap_or(FALLBACK_EDITOR)
        .to_string()
}

/// Split an editor command like `code --wait` into program and leading args.
pub fn split_command(editor: &str) -> Option<(&str, Vec<&str>)> {
    let mut parts = editor.split_whitespace();
    let program = parts.next()?;
    Some((program, parts.collect()))
}

/// Run `editor` on `path` with inherited stdio and wait for it to exit.
pub fn launch_editor(editor: &str, path: &Path) -> Result<(), EditorError> {
    let (program, args) = split_command(editor).ok_or(EditorError::Empty)?;
    let status = Command::new(program)
        .args(&args)
        .arg(path)
        .status()
        .map_err(|e| EditorError::Spawn {
            program: program.to_string(),
            source: e,
        })?;
    if status.success() {
        Ok(())
    } else {
        Err(EditorError::ExitStatus {
            program: program.to_string(),
            status,
        })
    }
}
