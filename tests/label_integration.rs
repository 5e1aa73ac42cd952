// Integration tests for the label/control linkage

use std::cell::RefCell;
use std::rc::Rc;

use orbit_label::prelude::*;

const LABELLEDBY: &str = "aria-labelledby";

fn setup() -> (Document, Context) {
    let document = Document::new();
    let context = Context::new(&document);
    (document, context)
}

fn add_control(document: &Document, tag: &str, id: &str) -> Element {
    let control = document.create_element(tag);
    control.set_attribute("id", id);
    document.body().append_child(&control).unwrap();
    control
}

fn record(control: &Element) -> Rc<RefCell<Vec<EventKind>>> {
    let log = Rc::new(RefCell::new(Vec::new()));
    for kind in [EventKind::Click, EventKind::Focus] {
        let log = log.clone();
        control.add_event_listener(kind, move |event| log.borrow_mut().push(event.kind()));
    }
    log
}

fn mounted_label(document: &Document, context: &Context, props: LabelProps) -> Label {
    let mut label = Label::create(props, context.clone());
    label.mount(&document.body()).unwrap();
    label
}

fn user_click(element: &Element) {
    element.dispatch_event(DomEvent::trusted(EventKind::Click));
}

#[test]
fn test_email_scenario_mount_and_unmount() {
    let (document, context) = setup();
    let input = add_control(&document, "input", "email");

    let mut label = mounted_label(&document, &context, LabelProps::new().html_for("email"));
    assert_eq!(
        input.get_attribute(LABELLEDBY).as_deref(),
        Some(label.id())
    );
    // Never written to the label itself
    assert!(!label.element().unwrap().has_attribute(LABELLEDBY));

    label.unmount().unwrap();
    assert!(!input.has_attribute(LABELLEDBY));
}

#[test]
fn test_trusted_click_forwards_exactly_one_click_then_focus() {
    let (document, context) = setup();
    let input = add_control(&document, "input", "email");
    let log = record(&input);
    let label = mounted_label(&document, &context, LabelProps::new().html_for("email"));

    user_click(&label.element().unwrap());

    assert_eq!(*log.borrow(), vec![EventKind::Click, EventKind::Focus]);
    assert_eq!(document.active_element(), Some(input));
}

#[test]
fn test_untrusted_click_is_ignored() {
    let (document, context) = setup();
    let input = add_control(&document, "input", "email");
    let log = record(&input);
    let label = mounted_label(&document, &context, LabelProps::new().html_for("email"));

    label.element().unwrap().click();

    assert!(log.borrow().is_empty());
    assert!(document.active_element().is_none());
}

#[test]
fn test_double_click_prevents_selection_single_click_does_not() {
    let (document, context) = setup();
    let label = mounted_label(&document, &context, LabelProps::new());
    let element = label.element().unwrap();

    assert!(element.dispatch_event(DomEvent::trusted(EventKind::MouseDown).with_detail(1)));
    assert!(!element.dispatch_event(DomEvent::trusted(EventKind::MouseDown).with_detail(2)));
    assert!(!element.dispatch_event(DomEvent::trusted(EventKind::MouseDown).with_detail(3)));
}

#[test]
fn test_click_inside_control_is_not_forwarded() {
    let (document, context) = setup();
    let mut label = mounted_label(&document, &context, LabelProps::new().html_for("agree"));
    // Control rendered inside the label after the label mounted
    let checkbox = document.create_element("button");
    checkbox.set_attribute("id", "agree");
    label.element().unwrap().append_child(&checkbox).unwrap();
    label
        .update(LabelProps::new().html_for("agree").id("agree-label"))
        .unwrap();
    let log = record(&checkbox);

    user_click(&checkbox);

    assert_eq!(*log.borrow(), vec![EventKind::Click]);
}

#[test]
fn test_missing_control_is_inert_until_dependencies_change() {
    let (document, context) = setup();
    let mut label = mounted_label(
        &document,
        &context,
        LabelProps::new().id("l1").html_for("later"),
    );
    assert!(!label.is_linked());

    // Mounting the control alone does not link: there is no observer
    let control = add_control(&document, "input", "later");
    label
        .update(LabelProps::new().id("l1").html_for("later"))
        .unwrap();
    assert!(!label.is_linked());
    assert!(!control.has_attribute(LABELLEDBY));

    // A change of identity re-evaluates the linkage
    label
        .update(LabelProps::new().id("l2").html_for("later"))
        .unwrap();
    assert!(label.is_linked());
    assert_eq!(control.get_attribute(LABELLEDBY).as_deref(), Some("l2"));
}

#[test]
fn test_round_trip_restores_prior_attribute() {
    let priors = [
        None,
        Some("hint"),
        Some("a b"),
        Some("other-label hint"),
        Some("a  b"),
        Some(" hint\t"),
    ];
    for prior in priors {
        let (document, context) = setup();
        let input = add_control(&document, "input", "field");
        if let Some(prior) = prior {
            input.set_attribute(LABELLEDBY, prior);
        }

        let mut label = mounted_label(&document, &context, LabelProps::new().html_for("field"));
        let linked = input.get_attribute(LABELLEDBY).unwrap();
        assert_eq!(linked.split(' ').filter(|t| *t == label.id()).count(), 1);

        label.unmount().unwrap();
        assert_eq!(input.get_attribute(LABELLEDBY).as_deref(), prior, "prior {prior:?}");
    }
}

#[test]
fn test_relinking_does_not_duplicate_token() {
    let (document, context) = setup();
    let input = add_control(&document, "input", "email");
    let mut label = mounted_label(
        &document,
        &context,
        LabelProps::new().id("l1").html_for("email"),
    );

    for class in ["a", "b", "c"] {
        label
            .update(LabelProps::new().id("l1").html_for("email").attribute("class", class))
            .unwrap();
    }
    assert_eq!(input.get_attribute(LABELLEDBY).as_deref(), Some("l1"));

    // A second label using the same id does not add a second token either
    let mut twin = mounted_label(
        &document,
        &context,
        LabelProps::new().id("l1").html_for("email"),
    );
    assert_eq!(input.get_attribute(LABELLEDBY).as_deref(), Some("l1"));
    twin.unmount().unwrap();
    label.unmount().unwrap();
    assert!(!input.has_attribute(LABELLEDBY));
}

#[test]
fn test_two_labels_share_one_control() {
    let (document, context) = setup();
    let input = add_control(&document, "input", "email");
    let mut a = mounted_label(&document, &context, LabelProps::new().id("a").html_for("email"));
    let mut b = mounted_label(&document, &context, LabelProps::new().id("b").html_for("email"));
    assert_eq!(input.get_attribute(LABELLEDBY).as_deref(), Some("a b"));

    a.unmount().unwrap();
    assert_eq!(input.get_attribute(LABELLEDBY).as_deref(), Some("b"));

    b.unmount().unwrap();
    assert!(!input.has_attribute(LABELLEDBY));
}

#[test]
fn test_teardown_reads_live_attribute() {
    let (document, context) = setup();
    let input = add_control(&document, "input", "email");
    let mut label = mounted_label(&document, &context, LabelProps::new().id("l1").html_for("email"));

    // Someone else writes after the label linked
    input.set_attribute(LABELLEDBY, "l1 late-writer");

    label.unmount().unwrap();
    assert_eq!(input.get_attribute(LABELLEDBY).as_deref(), Some("late-writer"));
}

#[test]
fn test_retargeting_moves_linkage() {
    let (document, context) = setup();
    let first = add_control(&document, "input", "first");
    let second = add_control(&document, "input", "second");
    let first_log = record(&first);
    let second_log = record(&second);
    let mut label = mounted_label(&document, &context, LabelProps::new().id("l").html_for("first"));

    label.update(LabelProps::new().id("l").html_for("second")).unwrap();
    assert!(!first.has_attribute(LABELLEDBY));
    assert_eq!(second.get_attribute(LABELLEDBY).as_deref(), Some("l"));

    user_click(&label.element().unwrap());
    assert!(first_log.borrow().is_empty());
    assert_eq!(*second_log.borrow(), vec![EventKind::Click, EventKind::Focus]);

    // Dropping the target ends the linkage window
    label.update(LabelProps::new().id("l")).unwrap();
    assert!(!label.is_linked());
    assert!(!second.has_attribute(LABELLEDBY));
}

#[test]
fn test_forwarding_listeners_match_linked_labels() {
    let (document, context) = setup();
    let input = add_control(&document, "input", "email");
    let log = record(&input);

    let mut labels: Vec<Label> = (0..3)
        .map(|_| mounted_label(&document, &context, LabelProps::new().html_for("email")))
        .collect();

    let click_listeners = |labels: &[Label]| -> usize {
        labels
            .iter()
            .filter_map(Label::element)
            .map(|element| element.listener_count(EventKind::Click))
            .sum()
    };
    assert_eq!(click_listeners(&labels), 3);

    labels[1].unmount().unwrap();
    assert_eq!(click_listeners(&labels), 2);

    // Each remaining label forwards exactly once per click
    for label in labels.iter().filter(|label| label.element().is_some()) {
        log.borrow_mut().clear();
        user_click(&label.element().unwrap());
        assert_eq!(*log.borrow(), vec![EventKind::Click, EventKind::Focus]);
    }

    for label in labels.iter_mut().filter(|label| label.element().is_some()) {
        label.unmount().unwrap();
    }
    assert_eq!(click_listeners(&labels), 0);
    assert!(!input.has_attribute(LABELLEDBY));
}

#[test]
fn test_wrapped_control_through_context() {
    let (document, context) = setup();
    let label = mounted_label(&document, &context, LabelProps::new().id("wrap"));
    let label_element = label.element().unwrap();

    let text = document.create_element("span");
    let control = document.create_element("button");
    label_element.append_child(&text).unwrap();
    label_element.append_child(&control).unwrap();
    let log = record(&control);

    let child_context = label.child_context();
    let mut consumer = LabelContextConsumer::new();
    let id = use_label_context(&child_context, &mut consumer, Some(&control));
    assert_eq!(id.as_deref(), Some("wrap"));
    // The consumer leaves attributes to the caller
    assert!(!control.has_attribute(LABELLEDBY));
    control.set_attribute(LABELLEDBY, id.as_deref().unwrap());

    user_click(&text);
    assert_eq!(*log.borrow(), vec![EventKind::Click, EventKind::Focus]);

    log.borrow_mut().clear();
    user_click(&control);
    assert_eq!(*log.borrow(), vec![EventKind::Click]);

    consumer.dispose();
    log.borrow_mut().clear();
    user_click(&text);
    assert!(log.borrow().is_empty());
}

#[test]
fn test_consumer_outside_label() {
    let (document, context) = setup();
    let control = add_control(&document, "input", "free");
    let mut consumer = LabelContextConsumer::new();

    assert_eq!(consumer.consume(&context, Some(&control)), None);
    assert!(!consumer.is_forwarding());
}

#[test]
fn test_consumer_reattaches_when_control_changes() {
    let (document, context) = setup();
    let label = mounted_label(&document, &context, LabelProps::new());
    let label_element = label.element().unwrap();
    let first = document.create_element("input");
    let second = document.create_element("input");
    label_element.append_child(&first).unwrap();
    label_element.append_child(&second).unwrap();
    let child_context = label.child_context();

    let mut consumer = LabelContextConsumer::new();
    consumer.consume(&child_context, Some(&first));
    consumer.consume(&child_context, Some(&first));
    assert_eq!(label_element.listener_count(EventKind::Click), 1);

    consumer.consume(&child_context, Some(&second));
    assert_eq!(label_element.listener_count(EventKind::Click), 1);
    let second_log = record(&second);
    user_click(&label_element);
    assert_eq!(*second_log.borrow(), vec![EventKind::Click, EventKind::Focus]);

    consumer.consume(&child_context, None);
    assert!(!consumer.is_forwarding());
    assert_eq!(label_element.listener_count(EventKind::Click), 0);
}

#[test]
fn test_dropping_consumer_detaches() {
    let (document, context) = setup();
    let label = mounted_label(&document, &context, LabelProps::new());
    let label_element = label.element().unwrap();
    let control = document.create_element("input");
    label_element.append_child(&control).unwrap();

    {
        let mut consumer = LabelContextConsumer::new();
        consumer.consume(&label.child_context(), Some(&control));
        assert_eq!(label_element.listener_count(EventKind::Click), 1);
    }
    assert_eq!(label_element.listener_count(EventKind::Click), 0);
}

#[test]
fn test_consumer_does_not_keep_unmounted_label_alive() {
    let (document, context) = setup();
    let mut label = mounted_label(&document, &context, LabelProps::new());
    let control = document.create_element("input");
    label.element().unwrap().append_child(&control).unwrap();

    let mut consumer = LabelContextConsumer::new();
    consumer.consume(&label.child_context(), Some(&control));
    assert!(consumer.is_forwarding());

    let removed = label.element().unwrap().downgrade();
    label.unmount().unwrap();
    assert!(removed.upgrade().is_none());

    // The next read sees no label and drops the stale attachment
    assert_eq!(consumer.consume(&label.child_context(), Some(&control)), None);
    assert!(!consumer.is_forwarding());
}

#[test]
fn test_root_alias() {
    let (document, context) = setup();
    let mut root = Root::create(LabelProps::new().as_tag("label"), context);
    root.mount(&document.body()).unwrap();
    assert_eq!(root.element().unwrap().tag_name(), "label");
    assert_eq!(orbit_label::kit::components::label::NAME, "Label");
}
