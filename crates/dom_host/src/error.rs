use host_tree::{HostTreeError, NodeKey};
use std::fmt;

/// Contract breach raised by an adapter operation.
///
/// A correct reconciler never triggers any of these; callers are expected to
/// propagate them and abandon the commit (the commit session still restores
/// event delivery and focus on the way out).
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum HostError {
    /// The underlying tree rejected the operation (stale or foreign reference).
    Tree(HostTreeError),
    /// A mutation targeted an anchor container that is not attached anywhere.
    AnchorWithoutParent(NodeKey),
    /// The node cannot serve as a root container (text nodes, missing keys).
    NotAContainer(NodeKey),
    /// A commit bracket was opened while another one was still active.
    CommitInProgress,
}

impl fmt::Display for HostError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HostError::Tree(err) => write!(f, "host tree: {err}"),
            HostError::AnchorWithoutParent(key) => {
                write!(f, "anchor container {key} has no parent node")
            }
            HostError::NotAContainer(key) => write!(f, "node {key} cannot be a root container"),
            HostError::CommitInProgress => write!(f, "a commit is already in progress"),
        }
    }
}

impl std::error::Error for HostError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            HostError::Tree(err) => Some(err),
            _ => None,
        }
    }
}

impl From<HostTreeError> for HostError {
    fn from(err: HostTreeError) -> Self {
        HostError::Tree(err)
    }
}
