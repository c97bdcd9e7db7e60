//! Identifiers shared between the reconciler and the host adapter.

/// Opaque handle for a node of the abstract (reconciler-side) tree.
///
/// The host layer never interprets the value; it only stores it next to the
/// host node it created so that either side can be found from the other.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FiberHandle(pub u64);

impl FiberHandle {
    #[inline]
    pub const fn from_raw(raw: u64) -> Self {
        Self(raw)
    }

    #[inline]
    pub const fn as_raw(self) -> u64 {
        self.0
    }
}

impl From<u64> for FiberHandle {
    #[inline]
    fn from(raw: u64) -> Self {
        Self(raw)
    }
}

/// Identifier of an event handler registered through props.
///
/// Event delivery resolves handlers by reading the latest committed props of
/// a node, so the id alone is enough to compare two prop snapshots.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct HandlerId(pub u32);
