use std::cell::RefCell;
use std::path::{Path, PathBuf};

use crate::error::{ReleaseError, Result};
use crate::git::Repository;

/// A call made against the repository
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Operation {
    Add(PathBuf),
    Commit(String),
    Push { remote: String, reference: String },
    CreateTag(String),
}

impl Operation {
    pub fn kind(&self) -> OperationKind {
        match self {
            Operation::Add(_) => OperationKind::Add,
            Operation::Commit(_) => OperationKind::Commit,
            Operation::Push { .. } => OperationKind::Push,
            Operation::CreateTag(_) => OperationKind::CreateTag,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OperationKind {
    Add,
    Commit,
    Push,
    CreateTag,
}

/// Mock repository that records operations instead of touching git
///
/// Every attempted operation is recorded, including ones that were made
/// to fail, so tests can assert exactly how far a workflow got.
#[derive(Default)]
pub struct MockRepository {
    operations: RefCell<Vec<Operation>>,
    failing_kinds: Vec<OperationKind>,
    failing_pushes: Vec<String>,
}

impl MockRepository {
    /// Create a new mock repository where every operation succeeds
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every operation of the given kind fail
    pub fn fail_on(mut self, kind: OperationKind) -> Self {
        self.failing_kinds.push(kind);
        self
    }

    /// Make pushes of one reference fail while other pushes succeed
    pub fn fail_on_push_of(mut self, reference: impl Into<String>) -> Self {
        self.failing_pushes.push(reference.into());
        self
    }

    /// Operations attempted so far, in call order
    pub fn operations(&self) -> Vec<Operation> {
        self.operations.borrow().clone()
    }

    fn record(&self, operation: Operation) -> Result<()> {
        let should_fail = self.failing_kinds.contains(&operation.kind())
            || matches!(&operation, Operation::Push { reference, .. }
                if self.failing_pushes.contains(reference));

        let description = format!("{:?}", operation);
        self.operations.borrow_mut().push(operation);

        if should_fail {
            return Err(ReleaseError::remote(format!(
                "simulated failure: {}",
                description
            )));
        }
        Ok(())
    }
}

impl Repository for MockRepository {
    fn add(&self, path: &Path) -> Result<()> {
        self.record(Operation::Add(path.to_path_buf()))
    }

    fn commit(&self, message: &str) -> Result<String> {
        self.record(Operation::Commit(message.to_string()))?;
        let count = self.operations.borrow().len();
        Ok(format!("{:040x}", count))
    }

    fn push(&self, remote: &str, reference: &str) -> Result<()> {
        self.record(Operation::Push {
            remote: remote.to_string(),
            reference: reference.to_string(),
        })
    }

    fn create_tag(&self, name: &str) -> Result<()> {
        self.record(Operation::CreateTag(name.to_string()))
    }
}
