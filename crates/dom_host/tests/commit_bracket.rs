use core_types::{FiberHandle, HandlerId};
use dom_host::{
    CommitPhase, DocumentSelection, DomHost, ElementInstance, FocusSelection, HostContext,
    HostError, Props, SelectionSnapshot, UpdatePayload,
};
use host_tree::{HostDocument, Namespace, NodeKey, SelectionRange};
use std::cell::Cell;
use std::panic::{AssertUnwindSafe, catch_unwind};
use std::rc::Rc;

fn html() -> HostContext {
    HostContext::Production(Namespace::Html)
}

fn mounted_body(host: &mut DomHost) -> ElementInstance {
    let body = host.create_element_instance("body", &Props::new(), &html(), FiberHandle(0));
    let root = host.document().root();
    host.document_mut().append_child(root, body.key()).unwrap();
    body
}

/// One batch where the second mutation breaks the contract.
fn faulting_batch(host: &mut DomHost, body: ElementInstance) -> Result<(), HostError> {
    let root = host.container(host.document().root())?;
    let mut session = host.prepare_for_commit(root)?;
    assert!(!session.events().is_enabled());
    assert_eq!(session.commit_phase(), CommitPhase::Mutating);

    let ok = session.create_text_instance("ok", &html(), FiberHandle(1));
    session.append_child(body, ok)?;
    let stray = session.create_text_instance("stray", &html(), FiberHandle(2));
    session.remove_child(body, stray)?;
    session.reset_after_commit();
    Ok(())
}

#[test]
fn fault_mid_batch_still_restores_event_delivery() {
    let mut host = DomHost::default();
    let body = mounted_body(&mut host);
    assert!(host.events().is_enabled());

    let result = faulting_batch(&mut host, body);
    assert!(matches!(result, Err(HostError::Tree(_))));
    assert!(host.events().is_enabled());
    assert_eq!(host.commit_phase(), CommitPhase::Idle);
    assert_eq!(host.document().text_content(body.key()), "ok");
}

#[test]
fn panic_mid_batch_still_restores_focus_and_events() {
    let mut host = DomHost::default();
    let body = mounted_body(&mut host);
    let input = host.create_element_instance("textarea", &Props::new(), &html(), FiberHandle(1));
    host.append_child(body, input).unwrap();
    host.document_mut().set_text_content(input.key(), "query").unwrap();
    host.document_mut().focus(input.key());
    host.document_mut().set_selection(SelectionRange::caret(2));

    let root = host.container(host.document().root()).unwrap();
    let outcome = catch_unwind(AssertUnwindSafe(|| {
        let mut session = host.prepare_for_commit(root).unwrap();
        session.remove_child(body, input).unwrap();
        session.append_child(body, input).unwrap();
        panic!("reconciler bug");
    }));
    assert!(outcome.is_err());

    assert!(host.events().is_enabled());
    assert_eq!(host.commit_phase(), CommitPhase::Idle);
    assert_eq!(host.document().active_element(), Some(input.key()));
    assert_eq!(host.document().selection(), Some(SelectionRange::caret(2)));
}

#[test]
fn nested_bracket_is_rejected() {
    let mut host = DomHost::default();
    let root = host.container(host.document().root()).unwrap();
    let mut session = host.prepare_for_commit(root).unwrap();
    assert!(matches!(
        session.prepare_for_commit(root),
        Err(HostError::CommitInProgress)
    ));
    // The failed attempt leaves the open bracket intact.
    assert_eq!(session.commit_phase(), CommitPhase::Mutating);
    session.reset_after_commit();
    assert!(host.events().is_enabled());
}

#[test]
fn handlers_are_unreachable_while_mutating() {
    let mut host = DomHost::default();
    let body = mounted_body(&mut host);
    let old = Props::new();
    let new = Props::new().with("onClick", HandlerId(5));
    let root = host.container(host.document().root()).unwrap();

    let mut session = host.prepare_for_commit(root).unwrap();
    session
        .commit_update(body, &UpdatePayload::new(), "body", &old, &new)
        .unwrap();
    assert_eq!(session.event_handler(body.key(), "onClick"), None);
    session.reset_after_commit();

    assert_eq!(host.event_handler(body.key(), "onClick"), Some(HandlerId(5)));
}

#[test]
fn empty_payload_update_is_visible_to_event_reads() {
    let mut host = DomHost::default();
    let body = mounted_body(&mut host);
    let old = Props::new().with("onClick", HandlerId(1)).with("id", "same");
    let new = Props::new().with("onClick", HandlerId(2)).with("id", "same");
    let root = host.container(host.document().root()).unwrap();

    let mut session = host.prepare_for_commit(root).unwrap();
    session
        .commit_update(body, &UpdatePayload::new(), "body", &old, &new)
        .unwrap();
    session.reset_after_commit();

    assert_eq!(host.current_props(body.key()), Some(&new));
    assert_eq!(host.event_handler(body.key(), "onClick"), Some(HandlerId(2)));
}

/// Focus collaborator that counts `focus` calls.
struct CountingFocus {
    inner: DocumentSelection,
    calls: Rc<Cell<usize>>,
}

impl FocusSelection for CountingFocus {
    fn capture(&self, doc: &HostDocument) -> SelectionSnapshot {
        self.inner.capture(doc)
    }

    fn restore(&mut self, doc: &mut HostDocument, snapshot: SelectionSnapshot) {
        self.inner.restore(doc, snapshot);
    }

    fn focus(&mut self, doc: &mut HostDocument, element: NodeKey) -> bool {
        self.calls.set(self.calls.get() + 1);
        doc.focus(element)
    }
}

#[test]
fn auto_focus_is_applied_once_after_mount() {
    let calls = Rc::new(Cell::new(0));
    let mut host = DomHost::default().with_focus_selection(CountingFocus {
        inner: DocumentSelection,
        calls: Rc::clone(&calls),
    });
    let body = mounted_body(&mut host);

    let focus_props = Props::new().with("autoFocus", true);
    let input = host.create_element_instance("input", &focus_props, &html(), FiberHandle(1));
    let wants_focus = host.finalize_new_instance(input, "input", &focus_props).unwrap();
    let div = host.create_element_instance("div", &focus_props, &html(), FiberHandle(2));
    let div_wants_focus = host.finalize_new_instance(div, "div", &focus_props).unwrap();
    assert!(wants_focus);
    assert!(!div_wants_focus);

    let root = host.container(host.document().root()).unwrap();
    let mut session = host.prepare_for_commit(root).unwrap();
    session.append_child(body, input).unwrap();
    session.append_child(body, div).unwrap();
    session.reset_after_commit();

    host.commit_mount(input, "input", &focus_props);
    host.commit_mount(div, "div", &focus_props);
    assert_eq!(calls.get(), 1);
    assert_eq!(host.document().active_element(), Some(input.key()));
}

fn counting_host() -> (DomHost, Rc<Cell<usize>>) {
    let calls = Rc::new(Cell::new(0));
    let host = DomHost::default().with_focus_selection(CountingFocus {
        inner: DocumentSelection,
        calls: Rc::clone(&calls),
    });
    (host, calls)
}

#[test]
fn commit_mount_follows_props_that_dropped_auto_focus() {
    let (mut host, calls) = counting_host();
    let body = mounted_body(&mut host);
    let created = Props::new().with("autoFocus", true);
    let input = host.create_element_instance("input", &created, &html(), FiberHandle(1));
    assert!(host.finalize_new_instance(input, "input", &created).unwrap());
    host.append_child(body, input).unwrap();

    host.commit_mount(input, "input", &Props::new().with("autoFocus", false));
    assert_eq!(calls.get(), 0);
    assert_eq!(host.document().active_element(), None);
}

#[test]
fn commit_mount_follows_props_that_gained_auto_focus() {
    let (mut host, calls) = counting_host();
    let body = mounted_body(&mut host);
    let created = Props::new();
    let input = host.create_element_instance("input", &created, &html(), FiberHandle(1));
    assert!(!host.finalize_new_instance(input, "input", &created).unwrap());
    host.append_child(body, input).unwrap();

    host.commit_mount(input, "input", &Props::new().with("autoFocus", true));
    assert_eq!(calls.get(), 1);
    assert_eq!(host.document().active_element(), Some(input.key()));
}
