//! The commit bracket.
//!
//! [`DomHost::prepare_for_commit`] captures focus and selection and turns
//! event delivery off. The returned [`CommitSession`] puts both back when it
//! is closed with [`CommitSession::reset_after_commit`] or dropped, so an
//! early `?` return or a panic during mutation still restores them.

use crate::container::Container;
use crate::error::HostError;
use crate::host::{CommitPhase, DomHost};
use crate::selection::SelectionSnapshot;
use std::ops::{Deref, DerefMut};

/// State captured when the bracket opened.
#[derive(Debug)]
struct SavedState {
    events_enabled: bool,
    selection: SelectionSnapshot,
}

/// An open commit bracket. Mutations are issued through it (it derefs to
/// [`DomHost`]).
pub struct CommitSession<'host> {
    host: &'host mut DomHost,
    container: Container,
    saved: Option<SavedState>,
}

impl DomHost {
    /// Opens the commit bracket for `container`.
    ///
    /// Only one bracket can be open at a time; a second call before the first
    /// session ends fails with [`HostError::CommitInProgress`].
    pub fn prepare_for_commit(
        &mut self,
        container: Container,
    ) -> Result<CommitSession<'_>, HostError> {
        if self.phase != CommitPhase::Idle {
            return Err(HostError::CommitInProgress);
        }
        self.phase = CommitPhase::Preparing;
        let selection = self.selection.capture(&self.document);
        let events_enabled = self.events.is_enabled();
        self.events.set_enabled(false);
        self.phase = CommitPhase::Mutating;
        log::debug!(
            target: "dom_host.commit",
            "commit opened on {container:?} (focused: {:?}, events were {})",
            selection.focused,
            if events_enabled { "on" } else { "off" }
        );
        Ok(CommitSession {
            host: self,
            container,
            saved: Some(SavedState {
                events_enabled,
                selection,
            }),
        })
    }
}

impl CommitSession<'_> {
    pub fn container(&self) -> Container {
        self.container
    }

    /// Focus and selection as they were when the bracket opened.
    pub fn snapshot(&self) -> Option<&SelectionSnapshot> {
        self.saved.as_ref().map(|saved| &saved.selection)
    }

    /// Closes the bracket: restores focus, selection and event delivery.
    pub fn reset_after_commit(mut self) {
        self.restore();
    }

    fn restore(&mut self) {
        let Some(saved) = self.saved.take() else {
            return;
        };
        let host = &mut *self.host;
        host.phase = CommitPhase::Restoring;
        host.selection.restore(&mut host.document, saved.selection);
        host.events.set_enabled(saved.events_enabled);
        host.phase = CommitPhase::Idle;
        log::debug!(target: "dom_host.commit", "commit closed on {:?}", self.container);
    }
}

impl Deref for CommitSession<'_> {
    type Target = DomHost;

    fn deref(&self) -> &DomHost {
        &*self.host
    }
}

impl DerefMut for CommitSession<'_> {
    fn deref_mut(&mut self) -> &mut DomHost {
        &mut *self.host
    }
}

impl Drop for CommitSession<'_> {
    fn drop(&mut self) {
        if self.saved.is_some() {
            if std::thread::panicking() {
                log::warn!(target: "dom_host.commit", "restoring after a panic during commit");
            }
            self.restore();
        }
    }
}
