mod common;

use serde_json::json;
use widget_core::{Phase, WidgetConfig};
use widget_engine::WidgetRuntime;

use common::{init_logging, FakeDocument, FakeHost, BODY};

const A: &str = "https://a.example.com/checkout";
const B: &str = "https://b.example.com/checkout";

fn setup() -> (WidgetRuntime<FakeHost>, FakeDocument) {
    let config = WidgetConfig::default();
    let document = FakeDocument::new(&config);
    (WidgetRuntime::new(FakeHost::default(), config), document)
}

fn click(runtime: &mut WidgetRuntime<FakeHost>, document: &FakeDocument, node: usize) {
    let target = document.click_target(node).expect("trigger is bound");
    runtime.trigger_clicked(target.as_deref());
}

#[test]
fn repeated_shows_of_one_address_load_once() {
    init_logging();
    let (mut runtime, _) = setup();

    for _ in 0..5 {
        runtime.show(A);
        runtime.hide();
    }
    assert_eq!(runtime.host().sources, vec![A.to_string()]);
}

#[test]
fn click_before_idle_cancels_the_preload() {
    init_logging();
    let (mut runtime, mut document) = setup();
    let first = document.append_trigger(BODY, A);
    let second = document.append_trigger(BODY, B);

    runtime.discover(&mut document, &BODY);
    runtime.page_loaded();
    assert_eq!(runtime.host().scheduled.len(), 1);
    let token = runtime.host().scheduled[0];

    click(&mut runtime, &document, second);
    assert_eq!(runtime.host().cancelled, vec![token]);

    // The idle callback may still run after cancellation.
    runtime.preload_fired(token);
    click(&mut runtime, &document, second);

    assert_eq!(runtime.host().sources, vec![B.to_string()]);
    assert_eq!(runtime.state().loaded_url(), Some(B));
    assert!(document.click_target(first).is_some());
}

#[test]
fn late_triggers_work_like_initial_ones() {
    init_logging();
    let (mut runtime, mut document) = setup();
    let early = document.append_trigger(BODY, A);
    assert_eq!(runtime.discover(&mut document, &BODY), 1);

    let section = document.append(BODY, &["promo"], None);
    let nested = document.append(section, &["card"], None);
    let late = document.append_trigger(nested, A);
    // Mutation records may report the same subtree more than once.
    assert_eq!(runtime.discover(&mut document, &section), 1);
    assert_eq!(runtime.discover(&mut document, &section), 0);
    assert_eq!(runtime.discover(&mut document, &BODY), 0);
    assert_eq!(document.bind_calls, 2);
    assert_eq!(runtime.triggers().len(), 2);

    assert_eq!(document.click_target(early), document.click_target(late));
    assert_eq!(
        document.attribute(late, &runtime.config().bound_attribute),
        Some("true")
    );
    click(&mut runtime, &document, late);
    assert_eq!(runtime.state().phase(), Phase::OpenLoading);
}

#[test]
fn trigger_injected_after_load_opens_then_reveals() {
    init_logging();
    let (mut runtime, mut document) = setup();
    assert_eq!(runtime.discover(&mut document, &BODY), 0);
    runtime.page_loaded();
    assert!(runtime.host().scheduled.is_empty());

    // Three seconds later the page injects a trigger.
    let trigger = document.append_trigger(BODY, A);
    assert_eq!(runtime.discover(&mut document, &trigger), 1);
    assert_eq!(runtime.host().scheduled.len(), 1);

    click(&mut runtime, &document, trigger);
    assert!(runtime.host().spinner_showing());
    assert_eq!(runtime.host().sources, vec![A.to_string()]);

    runtime.receive(&json!({"type": "VV_WIDGET_READY"}), Some("https://a.example.com"));
    assert!(runtime.host().content_showing());
    assert_eq!(runtime.state().phase(), Phase::OpenReady);
}

#[test]
fn stale_ready_for_superseded_address_is_not_revealed() {
    init_logging();
    let (mut runtime, mut document) = setup();
    let trigger_a = document.append_trigger(BODY, A);
    let trigger_b = document.append_trigger(BODY, B);
    runtime.discover(&mut document, &BODY);

    click(&mut runtime, &document, trigger_a);
    runtime.hide();
    click(&mut runtime, &document, trigger_b);
    assert_eq!(runtime.host().sources.last().map(String::as_str), Some(B));

    runtime.receive(&json!({"type": "VV_WIDGET_READY"}), Some("https://a.example.com"));
    assert!(runtime.host().spinner_showing());
    assert_eq!(runtime.state().phase(), Phase::OpenLoading);

    runtime.receive(&json!({"type": "VV_WIDGET_READY"}), Some("https://b.example.com"));
    assert!(runtime.host().content_showing());

    runtime.receive(&json!({"type": "VV_WIDGET_READY"}), Some("https://a.example.com"));
    assert!(runtime.host().content_showing());
    assert_eq!(runtime.state().dropped_ready_count(), 2);
}

#[test]
fn redirected_surface_is_revealed_on_first_load() {
    init_logging();
    let (mut runtime, mut document) = setup();
    let trigger = document.append_trigger(BODY, "http://shop.example.com/checkout");
    runtime.discover(&mut document, &BODY);

    click(&mut runtime, &document, trigger);
    assert!(runtime.host().spinner_showing());

    runtime.receive(&json!({"type": "VV_WIDGET_READY"}), Some("https://shop.example.com"));
    assert!(runtime.host().content_showing());
    assert_eq!(runtime.state().phase(), Phase::OpenReady);
    assert_eq!(runtime.state().dropped_ready_count(), 0);
}

#[test]
fn ready_while_closed_is_honoured_on_next_open() {
    init_logging();
    let (mut runtime, mut document) = setup();
    document.append_trigger(BODY, A);
    runtime.discover(&mut document, &BODY);
    runtime.page_loaded();
    let token = runtime.host().scheduled[0];

    runtime.preload_fired(token);
    runtime.receive(&json!({"type": "VV_WIDGET_READY"}), Some("https://a.example.com"));
    assert!(!runtime.host().overlay_visible);

    runtime.show(A);
    assert!(runtime.host().content_showing());
    assert_eq!(runtime.host().sources, vec![A.to_string()]);
}
