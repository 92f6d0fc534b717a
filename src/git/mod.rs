//! Git operations abstraction layer
//!
//! This module provides a trait-based abstraction over the handful of Git
//! operations a release needs, so the workflow can run against a real
//! repository or a recording mock.
//!
//! # Overview
//!
//! The primary abstraction is the [Repository] trait. The concrete
//! implementations are:
//!
//! - [repository::Git2Repository]: A real implementation using the `git2` crate
//! - [mock::MockRepository]: A recording implementation for testing
//!
//! # Usage
//!
//! ```rust
//! # use revbump::git::Repository;
//! # use std::path::Path;
//! # fn example<R: Repository>(repo: &R) -> Result<(), Box<dyn std::error::Error>> {
//! repo.add(Path::new("composer.json"))?;
//! repo.commit("Automated version bump [ci skip]")?;
//! repo.push("upstream", "master")?;
//! repo.create_tag("1.4.10")?;
//! repo.push("upstream", "1.4.10")?;
//! # Ok(())
//! # }
//! ```

pub mod mock;
pub mod repository;

pub use mock::{MockRepository, Operation, OperationKind};
pub use repository::{Git2Repository, TagStyle};

use std::path::Path;

use crate::error::Result;

/// Version control operations consumed by the release workflow
///
/// Every method is attempted once; implementations must report failure as
/// an `Err` and never retry on their own.
///
/// ## Implementations
///
/// - [Git2Repository](repository::Git2Repository): Real Git implementation using the `git2` crate
/// - [MockRepository](mock::MockRepository): Test implementation recording each call
pub trait Repository {
    /// Stage a file
    ///
    /// # Arguments
    /// * `path` - Path relative to the work tree, or an absolute path inside it
    fn add(&self, path: &Path) -> Result<()>;

    /// Commit the staged changes on HEAD
    ///
    /// # Returns
    /// * `Ok(String)` - The id of the new commit
    /// * `Err` - If there is no signature configured or the commit fails
    fn commit(&self, message: &str) -> Result<String>;

    /// Push a branch or tag to a remote
    ///
    /// # Arguments
    /// * `remote` - Name of the remote (e.g., "upstream", "origin")
    /// * `reference` - Short name (`master`, `1.4.10`) or full reference name
    ///
    /// # Returns
    /// * `Ok(())` - The remote accepted the update
    /// * `Err` - If the remote is unknown, unreachable, or rejects the update
    fn push(&self, remote: &str, reference: &str) -> Result<()>;

    /// Create a tag at HEAD
    ///
    /// # Returns
    /// * `Ok(())` - Success
    /// * `Err` - If the tag already exists or HEAD cannot be resolved
    fn create_tag(&self, name: &str) -> Result<()>;
}
