//! Python interpreter, package-manager and VCS probes.

use std::ffi::OsStr;
use std::fs;
use std::path::Path;

use tracing::debug;

use crate::command::probe_stdout;

const VERSION_SCRIPT: &str = "import sys; print(sys.version)";

/// First line of `sys.version` from the first interpreter that runs.
pub fn version_line(interpreters: &[String]) -> Option<String> {
    interpreters.iter().find_map(|python| {
        let output = probe_stdout(python, ["-c", VERSION_SCRIPT])?;
        let line = output.lines().next().unwrap_or_default().trim();
        if line.is_empty() {
            debug!(interpreter = %python, "empty version output");
            return None;
        }
        Some(line.to_string())
    })
}

/// Lines of the installed-package listing.
pub fn installed_packages(command: &[String]) -> Option<Vec<String>> {
    let (program, args) = command.split_first()?;
    let output = probe_stdout(program, args)?;
    Some(output.lines().map(ToString::to_string).collect())
}

/// Commit checked out in the work tree rooted at `path`.
///
/// `path` must be the top of the work tree; a directory nested inside some
/// other repository gives `None`.
pub fn vcs_head(git: &str, path: &Path) -> Option<String> {
    if !path.is_dir() {
        debug!(path = %path.display(), "package location is not a directory");
        return None;
    }

    let toplevel = git_in(git, path, ["rev-parse", "--show-toplevel"])?;
    if !same_dir(Path::new(toplevel.trim()), path) {
        debug!(
            path = %path.display(),
            toplevel = toplevel.trim(),
            "package location is inside another work tree"
        );
        return None;
    }

    let output = git_in(git, path, ["rev-parse", "HEAD"])?;
    let hash = output.trim();
    (!hash.is_empty()).then(|| hash.to_string())
}

fn git_in(git: &str, dir: &Path, args: [&str; 2]) -> Option<String> {
    let args: [&OsStr; 4] = [
        OsStr::new("-C"),
        dir.as_os_str(),
        OsStr::new(args[0]),
        OsStr::new(args[1]),
    ];
    probe_stdout(git, args)
}

fn same_dir(a: &Path, b: &Path) -> bool {
    match (fs::canonicalize(a), fs::canonicalize(b)) {
        (Ok(a), Ok(b)) => a == b,
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MISSING: &str = "definitely_not_python_12345";

    #[test]
    fn test_missing_interpreters_give_none() {
        assert!(version_line(&[MISSING.to_string()]).is_none());
        assert!(version_line(&[]).is_none());
    }

    #[test]
    fn test_missing_listing_command_gives_none() {
        assert!(installed_packages(&[MISSING.to_string(), "list".to_string()]).is_none());
        assert!(installed_packages(&[]).is_none());
    }

    #[cfg(unix)]
    #[test]
    fn test_listing_lines_are_split() {
        let command = vec!["printf".to_string(), "torch 2.1.0\\nnumpy 1.26.4\\n".to_string()];
        let lines = installed_packages(&command).unwrap();
        assert_eq!(lines, vec!["torch 2.1.0", "numpy 1.26.4"]);
    }

    #[test]
    fn test_vcs_head_requires_directory() {
        assert!(vcs_head("git", Path::new("/definitely/not/a/dir")).is_none());
    }

    fn git(dir: &Path, args: &[&str]) -> bool {
        std::process::Command::new("git")
            .arg("-C")
            .arg(dir)
            .args(args)
            .output()
            .is_ok_and(|out| out.status.success())
    }

    #[test]
    fn test_vcs_head_only_for_work_tree_root() {
        let repo = tempfile::tempdir().unwrap();
        let committed = git(repo.path(), &["init", "-q"])
            && git(
                repo.path(),
                &[
                    "-c",
                    "user.name=mlu",
                    "-c",
                    "user.email=mlu@localhost",
                    "commit",
                    "-q",
                    "--allow-empty",
                    "-m",
                    "init",
                ],
            );
        if !committed {
            // git is not installed here
            return;
        }

        let hash = vcs_head("git", repo.path()).unwrap();
        assert!(!hash.is_empty() && hash.chars().all(|c| c.is_ascii_hexdigit()));

        let nested = repo.path().join("src").join("package");
        fs::create_dir_all(&nested).unwrap();
        assert!(vcs_head("git", &nested).is_none());
    }

    #[test]
    fn test_vcs_head_outside_repository() {
        let dir = std::env::temp_dir();
        // Either git is missing or the temp dir is not a work tree.
        if let Some(hash) = vcs_head("git", &dir) {
            assert!(hash.chars().all(|c| c.is_ascii_hexdigit()));
        }
    }
}
