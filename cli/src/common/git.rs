//! # BeFast Git Utilities (`common::git`)
//!
//! File: cli/src/common/git.rs
//!
//! ## Overview
//!
//! The two git sequences the CLI needs, executed through `CommandRunner`:
//!
//! - **`clone_shallow`**: `git clone --depth 1 <repo> <dest>`, used by
//!   `befast init` to fetch the template repository.
//! - **`push_for_deploy`**: stages and commits the working tree (skipping the
//!   commit when nothing changed) and force-pushes `HEAD` to the `main` branch
//!   of the GitHub repository the BeFast host assigned.
//!
//! `clone` and `push` stream their output so the user sees git's progress;
//! the bookkeeping calls are captured. Any non-zero exit becomes
//! `BefastError::ExternalCommand`.
//!
use crate::common::process::{args, ensure_success, CommandRunner};
use crate::core::error::Result;
use std::path::Path;
use tracing::{debug, info};

/// Branch deploys are pushed to.
pub const DEPLOY_BRANCH: &str = "main";

/// HTTPS remote of `owner/repo` on GitHub.
pub fn github_remote(owner: &str, repo: &str) -> String {
    format!("https://github.com/{}/{}.git", owner, repo)
}

/// Shallow-clones `repo` into `dest`.
pub async fn clone_shallow<R: CommandRunner>(runner: &R, repo: &str, dest: &Path) -> Result<()> {
    let dest_str = dest.to_string_lossy();
    let clone_args = args(&["clone", "--depth", "1", repo, &dest_str]);
    let output = runner.stream("git", &clone_args, None).await?;
    ensure_success("git", &clone_args, output)?;
    info!("Cloned {} into {}", repo, dest.display());
    Ok(())
}

/// Commits everything in `dir` and force-pushes it to `owner/repo`.
///
/// Sequence: `git init` (only when `dir` has no `.git`), `git add -A`,
/// `git commit -m <message>` (skipped when `git status --porcelain` reports a
/// clean tree), then `git push --force <remote> HEAD:main`. The push replaces
/// whatever the assigned repository held, since the host builds from `main`.
///
/// # Arguments
///
/// * `runner` - Executes the `git` calls (`SystemRunner` outside tests).
/// * `dir` - Working tree to deploy.
/// * `owner` / `repo` - GitHub repository assigned by `POST /api/deploy`.
/// * `message` - Commit message for the deploy commit.
///
/// # Returns
///
/// * `Result<String>` - The HTTPS remote URL that was pushed to.
///
/// # Errors
///
/// Returns `BefastError::ExternalCommand` for the first git call that exits
/// non-zero, or an `Err` if `git` cannot be spawned.
pub async fn push_for_deploy<R: CommandRunner>(
    runner: &R,
    dir: &Path,
    owner: &str,
    repo: &str,
    message: &str,
) -> Result<String> {
    if !dir.join(".git").exists() {
        info!("No git repository in {}, initializing one", dir.display());
        run_checked(runner, dir, &["init"]).await?;
    }

    run_checked(runner, dir, &["add", "-A"]).await?;

    let status = run_checked(runner, dir, &["status", "--porcelain"]).await?;
    if status.trim().is_empty() {
        debug!("Working tree clean, nothing to commit");
    } else {
        run_checked(runner, dir, &["commit", "-m", message]).await?;
    }

    let remote = github_remote(owner, repo);
    let refspec = format!("HEAD:{}", DEPLOY_BRANCH);
    let push_args = args(&["push", "--force", &remote, &refspec]);
    let output = runner.stream("git", &push_args, Some(dir)).await?;
    ensure_success("git", &push_args, output)?;
    info!("Pushed {} to {}", dir.display(), remote);
    Ok(remote)
}

/// Runs a captured git command in `dir`, failing on non-zero exit; returns stdout.
async fn run_checked<R: CommandRunner>(runner: &R, dir: &Path, parts: &[&str]) -> Result<String> {
    let git_args = args(parts);
    let output = runner.capture("git", &git_args, Some(dir)).await?;
    Ok(ensure_success("git", &git_args, output)?.stdout)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::process::testing::{failed, ok, ScriptedRunner};
    use crate::common::process::CommandOutput;
    use crate::core::error::BefastError;
    use tempfile::tempdir;

    fn subcommands(runner: &ScriptedRunner) -> Vec<String> {
        runner
            .calls
            .borrow()
            .iter()
            .map(|(_, a)| a[0].clone())
            .collect()
    }

    #[test]
    fn test_github_remote() {
        assert_eq!(github_remote("acme", "shop"), "https://github.com/acme/shop.git");
    }

    #[tokio::test]
    async fn test_clone_shallow_args() {
        let runner = ScriptedRunner::succeeding();
        clone_shallow(&runner, "https://git.example.com/t.git", Path::new("/tmp/t"))
            .await
            .unwrap();
        assert_eq!(
            runner.calls.borrow()[0].1,
            vec!["clone", "--depth", "1", "https://git.example.com/t.git", "/tmp/t"]
        );
    }

    #[tokio::test]
    async fn test_clone_failure_is_external_command_error() {
        let runner = ScriptedRunner::new(|_, _| failed("fatal: repository not found"));
        let err = clone_shallow(&runner, "nope", Path::new("/tmp/x"))
            .await
            .unwrap_err();
        assert!(matches!(
            err.downcast_ref::<BefastError>(),
            Some(BefastError::ExternalCommand { .. })
        ));
    }

    #[tokio::test]
    async fn test_push_initializes_and_commits_dirty_tree() {
        let dir = tempdir().unwrap();
        let runner = ScriptedRunner::new(|_, a| {
            if a[0] == "status" {
                CommandOutput {
                    code: Some(0),
                    stdout: "?? index.js\n".into(),
                    stderr: String::new(),
                }
            } else {
                ok()
            }
        });

        let remote = push_for_deploy(&runner, dir.path(), "acme", "shop", "deploy")
            .await
            .unwrap();

        assert_eq!(remote, "https://github.com/acme/shop.git");
        assert_eq!(subcommands(&runner), vec!["init", "add", "status", "commit", "push"]);
        let pushes = runner.calls_starting_with("git", "push");
        assert_eq!(
            pushes[0],
            vec!["push", "--force", "https://github.com/acme/shop.git", "HEAD:main"]
        );
    }

    #[tokio::test]
    async fn test_push_skips_commit_on_clean_tree() {
        let dir = tempdir().unwrap();
        std::fs::create_dir(dir.path().join(".git")).unwrap();
        let runner = ScriptedRunner::succeeding();

        push_for_deploy(&runner, dir.path(), "acme", "shop", "deploy")
            .await
            .unwrap();

        assert_eq!(subcommands(&runner), vec!["add", "status", "push"]);
    }
}
