use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command as Process;

use color_eyre::Result;
use color_eyre::eyre::{WrapErr, bail, eyre};
use tracing::{info, warn};

use crate::tui::Tui;

/// Editor program plus its leading arguments, e.g. `code --wait`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditorCommand {
    program: String,
    args: Vec<String>,
}

impl EditorCommand {
    pub fn parse(command: &str) -> Result<Self> {
        let mut parts = command.split_whitespace().map(str::to_string);
        let program = parts.next().ok_or_else(|| eyre!("editor command is empty"))?;
        Ok(Self {
            program,
            args: parts.collect(),
        })
    }

    /// Run the editor on `path` and wait for it to exit.
    pub fn run(&self, path: &Path) -> Result<()> {
        info!(program = %self.program, path = %path.display(), "Launching editor");
        let status = Process::new(&self.program)
            .args(&self.args)
            .arg(path)
            .status()
            .wrap_err_with(|| format!("failed to launch editor '{}'", self.program))?;
        if !status.success() {
            bail!("editor '{}' exited with {status}", self.program);
        }
        Ok(())
    }
}

/// Temp file removed on drop.
struct DetailFile(PathBuf);

impl DetailFile {
    fn create(text: &str) -> Result<Self> {
        let path = detail_path(&std::env::temp_dir(), chrono::Utc::now().timestamp());
        fs::write(&path, text).wrap_err_with(|| format!("failed to write {}", path.display()))?;
        Ok(Self(path))
    }
}

impl Drop for DetailFile {
    fn drop(&mut self) {
        if let Err(err) = fs::remove_file(&self.0) {
            warn!(path = %self.0.display(), error = %err, "Failed to remove temp file");
        }
    }
}

fn detail_path(dir: &Path, unix: i64) -> PathBuf {
    dir.join(format!("tali_detail_{unix}.json"))
}

/// Show `text` in the external editor. The TUI is released while the
/// editor runs and restored afterwards, whether or not it succeeded.
pub fn open_in_editor(tui: &mut Tui, editor: &EditorCommand, text: &str) -> Result<()> {
    let file = DetailFile::create(text)?;
    let _guard = tui.suspend_scoped()?;
    editor.run(&file.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_splits_arguments() {
        let editor = EditorCommand::parse("  code --wait  -n ").unwrap();
        assert_eq!(editor.program, "code");
        assert_eq!(editor.args, vec!["--wait", "-n"]);
    }

    #[test]
    fn test_parse_rejects_blank() {
        assert!(EditorCommand::parse("   ").is_err());
    }

    #[test]
    fn test_detail_path_naming() {
        let path = detail_path(Path::new("/tmp"), 1_700_000_000);
        assert_eq!(path, PathBuf::from("/tmp/tali_detail_1700000000.json"));
    }

    #[test]
    fn test_detail_file_is_removed() {
        let file = DetailFile::create("{}").unwrap();
        let path = file.0.clone();
        assert_eq!(fs::read_to_string(&path).unwrap(), "{}");
        drop(file);
        assert!(!path.exists());
    }

    #[cfg(unix)]
    #[test]
    fn test_run_reports_exit_status() {
        let path = Path::new("/dev/null");
        assert!(EditorCommand::parse("true").unwrap().run(path).is_ok());
        assert!(EditorCommand::parse("false").unwrap().run(path).is_err());
        assert!(EditorCommand::parse("tali-no-such-editor").unwrap().run(path).is_err());
    }
}
