//! Integration Tests for the Rendering Runtime
//!
//! These tests drive the whole pipeline end to end: component functions with
//! hooks, reconciliation against the in-memory host, and both scheduling
//! strategies.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use parking_lot::Mutex;

use trellis_core::hooks::{Dep, SetState};
use trellis_core::host::MemoryHost;
use trellis_core::render::{DeferredScheduler, RenderPhase, Renderer};
use trellis_core::vdom::{attrs, jsx, JsxChild};

type SharedSetter<T> = Arc<Mutex<Option<SetState<T>>>>;

fn setter_slot<T>() -> SharedSetter<T> {
    Arc::new(Mutex::new(None))
}

/// A single tag renders to its markup form.
#[test]
fn renders_a_single_tag() {
    let host = MemoryHost::new();
    let root = host.create_root("div");

    trellis_core::render::render(host, root.clone(), |_| {
        Ok(jsx("div", None, ["hello".into()]))
    })
    .unwrap();

    assert_eq!(root.inner_html(), "<div>hello</div>");
}

/// Truthy props become attributes; children keep their order.
#[test]
fn renders_props_and_children() {
    let host = MemoryHost::new();
    let root = host.create_root("div");

    trellis_core::render::render(host, root.clone(), |_| {
        Ok(jsx(
            "div",
            Some(attrs([("id", "test-id"), ("class", "test-class")])),
            [
                jsx("p", None, ["first".into()]).into(),
                jsx("p", None, ["second".into()]).into(),
            ],
        ))
    })
    .unwrap();

    assert_eq!(
        root.inner_html(),
        r#"<div id="test-id" class="test-class"><p>first</p><p>second</p></div>"#
    );
}

/// Re-rendering the same shape with a new attribute reuses the host nodes.
///
/// This is the literal scenario: `<div>hello</div>` gains an id and both the
/// div and its text node survive.
#[test]
fn attribute_only_change_reuses_the_host_nodes() {
    let host = MemoryHost::new();
    let root = host.create_root("div");
    let with_id = setter_slot::<bool>();

    let slot = with_id.clone();
    let renderer = Renderer::mount(host, root.clone(), move |hooks| {
        let (tagged, set_tagged) = hooks.use_state(false)?;
        *slot.lock() = Some(set_tagged);
        let props = tagged.then(|| attrs([("id", "t")]));
        Ok(jsx("div", props, ["hello".into()]))
    })
    .unwrap();

    assert_eq!(root.inner_html(), "<div>hello</div>");
    let div = root.child(0).unwrap();
    let text = div.child(0).unwrap();

    let set = with_id.lock().clone().unwrap();
    set.set(true).unwrap();

    assert_eq!(root.inner_html(), r#"<div id="t">hello</div>"#);
    assert!(div.ptr_eq(&root.child(0).unwrap()));
    assert!(text.ptr_eq(&root.child(0).unwrap().child(0).unwrap()));
    assert_eq!(renderer.phase(), RenderPhase::Idle);
}

/// Growing a child list by appending keeps every earlier host node.
#[test]
fn appended_children_preserve_sibling_identity() {
    let host = MemoryHost::new();
    let root = host.create_root("div");
    let sizer = setter_slot::<usize>();

    let slot = sizer.clone();
    let _renderer = Renderer::mount(host, root.clone(), move |hooks| {
        let (size, set_size) = hooks.use_state(1usize)?;
        *slot.lock() = Some(set_size);
        let children: Vec<JsxChild> = (1..=size)
            .map(|i| jsx("p", None, [format!("child {i}").into()]).into())
            .collect();
        Ok(jsx("div", None, [children.into()]))
    })
    .unwrap();

    assert_eq!(root.inner_html(), "<div><p>child 1</p></div>");
    let div = root.child(0).unwrap();
    let first = div.child(0).unwrap();

    let set = sizer.lock().clone().unwrap();
    set.set(2).unwrap();
    assert_eq!(root.inner_html(), "<div><p>child 1</p><p>child 2</p></div>");
    let second = div.child(1).unwrap();

    set.set(3).unwrap();
    assert_eq!(
        root.inner_html(),
        "<div><p>child 1</p><p>child 2</p><p>child 3</p></div>"
    );

    assert!(first.ptr_eq(&div.child(0).unwrap()));
    assert!(second.ptr_eq(&div.child(1).unwrap()));
}

/// Dropping the prop map removes the attributes from the surviving node.
#[test]
fn removed_props_strip_attributes_in_place() {
    let host = MemoryHost::new();
    let root = host.create_root("div");
    let toggler = setter_slot::<bool>();

    let slot = toggler.clone();
    let _renderer = Renderer::mount(host, root.clone(), move |hooks| {
        let (decorated, set_decorated) = hooks.use_state(true)?;
        *slot.lock() = Some(set_decorated);
        let props = decorated.then(|| attrs([("id", "x"), ("class", "y")]));
        Ok(jsx("div", props, ["body".into()]))
    })
    .unwrap();

    assert_eq!(root.inner_html(), r#"<div id="x" class="y">body</div>"#);
    let div = root.child(0).unwrap();

    let set = toggler.lock().clone().unwrap();
    set.set(false).unwrap();

    assert!(div.ptr_eq(&root.child(0).unwrap()));
    assert_eq!(root.inner_html(), "<div>body</div>");
}

/// Writing the current value back does not run another pass.
#[test]
fn noop_set_state_does_not_rerender() {
    let host = MemoryHost::new();
    let root = host.create_root("div");
    let passes = Arc::new(AtomicUsize::new(0));
    let setter = setter_slot::<String>();

    let counter = passes.clone();
    let slot = setter.clone();
    let _renderer = Renderer::mount(host, root, move |hooks| {
        counter.fetch_add(1, Ordering::SeqCst);
        let (value, set_value) = hooks.use_state("foo".to_string())?;
        *slot.lock() = Some(set_value);
        Ok(jsx("p", None, [value.into()]))
    })
    .unwrap();

    assert_eq!(passes.load(Ordering::SeqCst), 1);
    let set = setter.lock().clone().unwrap();

    set.set("test".to_string()).unwrap();
    assert_eq!(passes.load(Ordering::SeqCst), 2);

    set.set("test".to_string()).unwrap();
    assert_eq!(passes.load(Ordering::SeqCst), 2);
}

/// State lands in the order it was written, one committed pass per write.
#[test]
fn state_follows_the_sequence_of_writes() {
    let host = MemoryHost::new();
    let root = host.create_root("div");
    let setter_a = setter_slot::<String>();
    let setter_b = setter_slot::<String>();

    let slot_a = setter_a.clone();
    let slot_b = setter_b.clone();
    let _renderer = Renderer::mount(host, root.clone(), move |hooks| {
        let (a, set_a) = hooks.use_state("foo".to_string())?;
        let (b, set_b) = hooks.use_state("bar".to_string())?;
        *slot_a.lock() = Some(set_a);
        *slot_b.lock() = Some(set_b);
        Ok(jsx("p", None, [format!("a: {a}, b: {b}").into()]))
    })
    .unwrap();

    assert_eq!(root.inner_html(), "<p>a: foo, b: bar</p>");

    let set_a = setter_a.lock().clone().unwrap();
    set_a.set("foo-change".to_string()).unwrap();
    assert_eq!(root.inner_html(), "<p>a: foo-change, b: bar</p>");

    let set_b = setter_b.lock().clone().unwrap();
    set_b.set("bar-change".to_string()).unwrap();
    assert_eq!(root.inner_html(), "<p>a: foo-change, b: bar-change</p>");
}

/// A memo inside a component keeps its reference while its dep holds.
#[test]
fn memo_is_stable_across_rerenders() {
    let host = MemoryHost::new();
    let root = host.create_root("div");
    let bumper = setter_slot::<i64>();
    let memos = Arc::new(Mutex::new(Vec::new()));

    let slot = bumper.clone();
    let seen = memos.clone();
    let _renderer = Renderer::mount(host, root, move |hooks| {
        let (count, set_count) = hooks.use_state(0i64)?;
        *slot.lock() = Some(set_count);
        let labels = hooks.use_memo(|| vec!["a", "b"], &[Dep::of(count / 10)])?;
        seen.lock().push(labels.clone());
        Ok(jsx("p", None, [format!("{count}:{}", labels.len()).into()]))
    })
    .unwrap();

    let set = bumper.lock().clone().unwrap();
    set.set(1).unwrap();
    set.set(2).unwrap();
    // Crossing the dep boundary invalidates the cache.
    set.set(10).unwrap();

    let seen = memos.lock();
    assert_eq!(seen.len(), 4);
    assert!(Arc::ptr_eq(&seen[0], &seen[1]));
    assert!(Arc::ptr_eq(&seen[1], &seen[2]));
    assert!(!Arc::ptr_eq(&seen[2], &seen[3]));
}

/// Five synchronous writes inside one scheduling window coalesce into one
/// additional pass that commits the final value.
#[test]
fn deferred_scheduler_coalesces_writes() {
    let host = MemoryHost::new();
    let root = host.create_root("div");
    let scheduler = Arc::new(DeferredScheduler::new());
    let passes = Arc::new(AtomicUsize::new(0));
    let setter = setter_slot::<String>();

    let counter = passes.clone();
    let slot = setter.clone();
    let _renderer = Renderer::mount_with_scheduler(
        host,
        root.clone(),
        move |hooks| {
            counter.fetch_add(1, Ordering::SeqCst);
            let (value, set_value) = hooks.use_state("foo".to_string())?;
            *slot.lock() = Some(set_value);
            Ok(jsx("p", None, [value.into()]))
        },
        scheduler.clone(),
    )
    .unwrap();

    assert_eq!(passes.load(Ordering::SeqCst), 1);
    let set = setter.lock().clone().unwrap();

    for value in ["test1", "test2", "test3", "test4", "test5"] {
        set.set(value.to_string()).unwrap();
    }
    // Slots mutate synchronously, the pass waits for the flush.
    assert_eq!(passes.load(Ordering::SeqCst), 1);
    assert_eq!(root.inner_html(), "<p>foo</p>");

    scheduler.flush().unwrap();
    assert_eq!(passes.load(Ordering::SeqCst), 2);
    assert_eq!(root.inner_html(), "<p>test5</p>");
}

/// The waker arms once per window, and a flush without writes stays quiet.
#[test]
fn deferred_scheduler_windows_are_bounded_by_flush() {
    let host = MemoryHost::new();
    let root = host.create_root("div");
    let wakes = Arc::new(AtomicUsize::new(0));
    let setter = setter_slot::<i64>();

    let counter = wakes.clone();
    let scheduler = Arc::new(DeferredScheduler::with_waker(move || {
        counter.fetch_add(1, Ordering::SeqCst);
    }));

    let slot = setter.clone();
    let _renderer = Renderer::mount_with_scheduler(
        host,
        root,
        move |hooks| {
            let (value, set_value) = hooks.use_state(0i64)?;
            *slot.lock() = Some(set_value);
            Ok(jsx("p", None, [value.to_string().into()]))
        },
        scheduler.clone(),
    )
    .unwrap();

    let set = setter.lock().clone().unwrap();
    set.set(1).unwrap();
    set.set(2).unwrap();
    assert_eq!(wakes.load(Ordering::SeqCst), 1);

    scheduler.flush().unwrap();
    assert_eq!(wakes.load(Ordering::SeqCst), 1);
    scheduler.flush().unwrap();

    set.set(3).unwrap();
    assert_eq!(wakes.load(Ordering::SeqCst), 2);
    scheduler.flush().unwrap();
}

/// Two mounted roots never see each other's state.
#[test]
fn independent_roots_do_not_share_state() {
    let host = MemoryHost::new();
    let root_a = host.create_root("div");
    let root_b = host.create_root("div");
    let setter_a = setter_slot::<i64>();

    let slot = setter_a.clone();
    let _renderer_a = Renderer::mount(host, root_a.clone(), move |hooks| {
        let (value, set_value) = hooks.use_state(0i64)?;
        *slot.lock() = Some(set_value);
        Ok(jsx("p", None, [format!("a{value}").into()]))
    })
    .unwrap();

    let _renderer_b = Renderer::mount(host, root_b.clone(), move |hooks| {
        let (value, _) = hooks.use_state(0i64)?;
        Ok(jsx("p", None, [format!("b{value}").into()]))
    })
    .unwrap();

    let set = setter_a.lock().clone().unwrap();
    set.set(7).unwrap();

    assert_eq!(root_a.inner_html(), "<p>a7</p>");
    assert_eq!(root_b.inner_html(), "<p>b0</p>");
}
