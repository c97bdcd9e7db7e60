use core_types::FiberHandle;
use criterion::{BatchSize, Criterion, black_box, criterion_group, criterion_main};
use dom_host::{Container, DomHost, DomHostConfig, ElementInstance, HostContext, Props};

const SMALL_ROWS: usize = 64;
const LARGE_ROWS: usize = 5_000;

/// Builds `<ul>` with `rows` `<li class=row>text</li>` children, the way a
/// reconciler mounts a fresh list.
fn mount_list(host: &mut DomHost, rows: usize) -> ElementInstance {
    let root = host.container(host.document().root()).expect("document container");
    let ctx = host.root_host_context(root).expect("root context");
    let body_ctx = ctx.child("html").child("body");
    let list_ctx = body_ctx.child("ul");

    let list = host.create_element_instance("ul", &Props::new(), &body_ctx, FiberHandle(0));
    for row in 0..rows {
        let props = Props::new()
            .with("className", "row")
            .with("children", format!("item {row}"));
        let handle = FiberHandle(row as u64 + 1);
        let item = host.create_element_instance("li", &props, &list_ctx, handle);
        host.finalize_new_instance(item, "li", &props)
            .expect("finalize");
        host.append_initial_child(list, item).expect("append");
    }
    list
}

fn bench_mount(c: &mut Criterion, name: &str, config: DomHostConfig, rows: usize) {
    c.bench_function(name, |b| {
        b.iter_batched(
            || DomHost::new(config.clone()),
            |mut host| {
                let list = mount_list(&mut host, black_box(rows));
                let root = host.container(host.document().root()).expect("container");
                let mut session = host.prepare_for_commit(root).expect("commit");
                session.append_child_to_container(root, list).expect("attach");
                session.reset_after_commit();
                black_box(host.document().len());
            },
            BatchSize::SmallInput,
        );
    });
}

fn bench_mount_small(c: &mut Criterion) {
    bench_mount(c, "bench_mount_small", DomHostConfig::default(), SMALL_ROWS);
}

fn bench_mount_large(c: &mut Criterion) {
    bench_mount(c, "bench_mount_large", DomHostConfig::default(), LARGE_ROWS);
}

fn bench_mount_large_validating(c: &mut Criterion) {
    bench_mount(
        c,
        "bench_mount_large_validating",
        DomHostConfig::development(),
        LARGE_ROWS,
    );
}

fn bench_portal_reorder(c: &mut Criterion) {
    c.bench_function("bench_portal_reorder", |b| {
        b.iter_batched(
            || {
                let mut host = DomHost::default();
                let ctx = HostContext::Production(host_tree::Namespace::Html);
                let parent = host.create_element_instance("div", &Props::new(), &ctx, FiberHandle(0));
                let anchor = host.document_mut().create_comment("portal");
                host.document_mut()
                    .append_child(parent.key(), anchor)
                    .expect("anchor");
                let texts: Vec<_> = (0..SMALL_ROWS)
                    .map(|i| host.create_text_instance("t", &ctx, FiberHandle(i as u64 + 1)))
                    .collect();
                (host, anchor, texts)
            },
            |(mut host, anchor, texts)| {
                let container = Container::Anchor(anchor);
                for text in &texts {
                    host.append_child_to_container(container, *text).expect("append");
                }
                for pair in texts.windows(2).rev() {
                    host.insert_in_container_before(container, pair[1], pair[0])
                        .expect("insert");
                }
                black_box(host.document().children(anchor).len());
            },
            BatchSize::SmallInput,
        );
    });
}

criterion_group!(
    benches,
    bench_mount_small,
    bench_mount_large,
    bench_mount_large_validating,
    bench_portal_reorder
);
criterion_main!(benches);
