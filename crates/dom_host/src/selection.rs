//! Focus and selection preservation across a commit.

use host_tree::{HostDocument, NodeKey, SelectionRange};

/// Focus and selection state captured before a commit.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SelectionSnapshot {
    pub focused: Option<NodeKey>,
    pub selection: Option<SelectionRange>,
}

/// Focus/selection subsystem the commit bracket coordinates with.
pub trait FocusSelection {
    fn capture(&self, doc: &HostDocument) -> SelectionSnapshot;

    /// Puts back a captured state. Snapshots that refer to nodes no longer in
    /// the document are ignored.
    fn restore(&mut self, doc: &mut HostDocument, snapshot: SelectionSnapshot);

    /// Focuses `element`; returns whether focus moved there.
    fn focus(&mut self, doc: &mut HostDocument, element: NodeKey) -> bool {
        doc.focus(element)
    }
}

/// Focus/selection handling backed directly by the document's own state.
#[derive(Debug, Default)]
pub struct DocumentSelection;

impl FocusSelection for DocumentSelection {
    fn capture(&self, doc: &HostDocument) -> SelectionSnapshot {
        SelectionSnapshot {
            focused: doc.active_element(),
            selection: doc.selection(),
        }
    }

    fn restore(&mut self, doc: &mut HostDocument, snapshot: SelectionSnapshot) {
        let Some(focused) = snapshot.focused else {
            return;
        };
        if doc.active_element() == Some(focused) {
            return;
        }
        if !doc.is_connected(focused) {
            log::trace!(
                target: "dom_host.commit",
                "previously focused node {focused} is gone; nothing to restore"
            );
            return;
        }
        if doc.focus(focused)
            && let Some(range) = snapshot.selection
        {
            doc.set_selection(range);
        }
    }
}
