//! Release workflow orchestration
//!
//! The workflow is a saga of irreversible steps: bump the manifest, commit,
//! push the branch, tag, push the tag. A failure at any step stops the run
//! and leaves every earlier step applied; nothing is retried or rolled back.
//!
//! All collaborators are injected so the sequence can be driven against a
//! recording repository and scripted answers in tests.

use std::fmt;

use log::*;

use crate::config::Config;
use crate::error::{ReleaseError, Result};
use crate::git::Repository;
use crate::manifest::ManifestStore;
use crate::ui::{self, Prompter};
use crate::version::{plan_increment, VersionIncrement};

/// Operator intent for a single run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ReleaseWorkflowArgs {
    /// Accept every confirmation without prompting
    pub auto: bool,
}

/// The ordered steps of a release
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    IncrementVersion,
    PersistManifest,
    Commit,
    PushBranch,
    CreateTag,
    PushTag,
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Step::IncrementVersion => "increment version",
            Step::PersistManifest => "persist manifest",
            Step::Commit => "commit",
            Step::PushBranch => "push branch",
            Step::CreateTag => "create tag",
            Step::PushTag => "push tag",
        };
        f.write_str(name)
    }
}

/// Answer to "use this version?"
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Confirmation {
    Proceed(String),
    Declined,
}

/// What a completed release did
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReleaseSummary {
    pub previous_version: String,
    pub version: String,
    pub remote: String,
    pub branch: String,
    pub commit: String,
}

/// Result of a workflow run that did not fail
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WorkflowOutcome {
    /// Every step ran
    Released(ReleaseSummary),
    /// The operator said no; nothing was changed
    Declined { candidate: String },
}

/// Shows the proposed version and its notices, then asks for confirmation
/// unless `auto` is set.
pub fn confirm_version<P>(
    plan: &VersionIncrement,
    args: &ReleaseWorkflowArgs,
    prompter: &P,
) -> Result<Confirmation>
where
    P: Prompter + ?Sized,
{
    ui::display_proposed_version(&plan.previous, &plan.next);
    for notice in &plan.notices {
        debug!("version notice: {}", notice);
        ui::display_boundary_warning(notice);
    }

    if args.auto {
        debug!("auto mode: accepting version {}", plan.next);
        return Ok(Confirmation::Proceed(plan.next.clone()));
    }

    let prompt = format!("Use version {}?", plan.next);
    if prompter.confirm(&prompt, false)? {
        Ok(Confirmation::Proceed(plan.next.clone()))
    } else {
        Ok(Confirmation::Declined)
    }
}

/// Runs the full release.
///
/// 1. Increment the manifest version and confirm it
/// 2. Write the manifest back
/// 3. Stage the manifest and commit
/// 4. Push the branch to the configured remote
/// 5. Create a tag named after the version and push it
///
/// # Returns
///
/// * `Ok(WorkflowOutcome::Declined)` - The operator declined; no file or repository was touched
/// * `Ok(WorkflowOutcome::Released)` - Every step succeeded
/// * `Err` - The first failing step; earlier steps stay applied
pub fn run_release_workflow<M, R, P>(
    args: &ReleaseWorkflowArgs,
    config: &Config,
    manifest: &M,
    repo: &R,
    prompter: &P,
) -> Result<WorkflowOutcome>
where
    M: ManifestStore + ?Sized,
    R: Repository + ?Sized,
    P: Prompter + ?Sized,
{
    let remote = config.git.remote.as_str();
    let branch = config.git.branch.as_str();

    debug!("starting step '{}'", Step::IncrementVersion);
    let mut record = manifest.load()?;
    let current = record.version()?;
    let plan = plan_increment(&current);
    info!("current version {}, candidate {}", plan.previous, plan.next);

    let version = match confirm_version(&plan, args, prompter)? {
        Confirmation::Proceed(version) => version,
        Confirmation::Declined => {
            info!("version {} declined, nothing changed", plan.next);
            return Ok(WorkflowOutcome::Declined {
                candidate: plan.next,
            });
        }
    };

    debug!("starting step '{}'", Step::PersistManifest);
    ui::display_status(&format!("Updating version to {}", version));
    record.set_version(&version);
    manifest.save(&record)?;
    ui::display_success(&format!(
        "Updated {} to version {}",
        manifest.path().display(),
        version
    ));

    debug!("starting step '{}'", Step::Commit);
    repo.add(manifest.path())
        .map_err(|e| ReleaseError::version_control(Step::Commit, e))?;
    let commit = repo
        .commit(&config.git.commit_message)
        .map_err(|e| ReleaseError::version_control(Step::Commit, e))?;
    ui::display_success(&format!("Committed version {}", version));

    debug!("starting step '{}'", Step::PushBranch);
    repo.push(remote, branch)
        .map_err(|e| ReleaseError::version_control(Step::PushBranch, e))?;
    ui::display_success(&format!("Pushed {} to {}", branch, remote));

    debug!("starting step '{}'", Step::CreateTag);
    repo.create_tag(&version)
        .map_err(|e| ReleaseError::version_control(Step::CreateTag, e))?;
    ui::display_success(&format!("Created tag {}", version));

    debug!("starting step '{}'", Step::PushTag);
    repo.push(remote, &version)
        .map_err(|e| ReleaseError::version_control(Step::PushTag, e))?;
    ui::display_success(&format!("Pushed tag {} to {}", version, remote));

    info!("released {} ({})", version, commit);
    Ok(WorkflowOutcome::Released(ReleaseSummary {
        previous_version: plan.previous,
        version,
        remote: remote.to_string(),
        branch: branch.to_string(),
        commit,
    }))
}
