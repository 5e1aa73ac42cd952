// Label component for OrbitKit

use std::collections::BTreeMap;

use log::{debug, warn};

use crate::component::props::{non_blank, single_token, CompositeValidator};
use crate::component::{
    compose_refs, on_release, Cleanup, Component, ComponentError, Context, EffectSlot,
    LifecycleManager, LifecycleOp, LifecyclePhase, NodeRef, PropValidationError, PropValidator,
    StableId,
};
use crate::dom::{Document, Element, WeakElement};
use crate::kit::forwarding::{attach_click_forwarding, attach_selection_guard};
use crate::kit::primitive::Primitive;
use crate::kit::token_set::{apply_token_update, TokenOp};

/// Display name of the label component
pub const NAME: &str = "Label";

/// Role every rendered label carries
pub const LABEL_ROLE: &str = "label";

/// Properties for the Label component
#[derive(Debug, Clone, Default)]
pub struct LabelProps {
    /// Element type to render as (defaults to the kit's `default_label_tag`)
    pub as_tag: Option<String>,
    /// Id of the control this label names
    pub html_for: Option<String>,
    /// Explicit id for the label; generated when absent
    pub id: Option<String>,
    /// Attributes passed through to the rendered element verbatim
    pub attributes: BTreeMap<String, String>,
    /// Caller's ref, assigned alongside the label's own
    pub forwarded_ref: Option<NodeRef>,
}

impl LabelProps {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn as_tag(mut self, tag: impl Into<String>) -> Self {
        self.as_tag = Some(tag.into());
        self
    }

    pub fn html_for(mut self, target: impl Into<String>) -> Self {
        self.html_for = Some(target.into());
        self
    }

    pub fn id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn attribute(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.insert(name.into(), value.into());
        self
    }

    pub fn forwarded_ref(mut self, node_ref: NodeRef) -> Self {
        self.forwarded_ref = Some(node_ref);
        self
    }
}

/// Validator applied to label props before every render
pub fn label_props_validator() -> CompositeValidator<LabelProps> {
    CompositeValidator::new()
        .add(|props: &LabelProps| non_blank("as_tag", props.as_tag.as_deref()))
        .add(|props: &LabelProps| non_blank("id", props.id.as_deref()))
        .add(|props: &LabelProps| non_blank("html_for", props.html_for.as_deref()))
        // Both end up as single tokens: one in the control's id list, one as an element id
        .add(|props: &LabelProps| single_token("id", props.id.as_deref()))
        .add(|props: &LabelProps| single_token("html_for", props.html_for.as_deref()))
        .add(|props: &LabelProps| {
            // `id` has its own prop; a passthrough copy would desync the linkage
            if props.attributes.contains_key("id") {
                Err(PropValidationError::ReservedAttribute("id".to_string()))
            } else {
                Ok(())
            }
        })
}

/// Ambient value a label publishes to its descendants
#[derive(Debug, Clone)]
pub struct LabelContextValue {
    id: String,
    label_ref: NodeRef,
}

impl PartialEq for LabelContextValue {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id && self.label_ref == other.label_ref
    }
}

impl LabelContextValue {
    /// Id of the enclosing label
    pub fn id(&self) -> &str {
        &self.id
    }

    /// The enclosing label's element, while it is mounted
    pub fn label_element(&self) -> Option<Element> {
        self.label_ref.get()
    }
}

type LinkageKey = (String, Option<String>, Option<Element>);

/// Label component that names a control and forwards clicks to it
///
/// With `html_for` set, the control with that id gets this label's id in its
/// `aria-labelledby` and receives a click and focus whenever the user clicks the
/// label. A control rendered inside the label can get the same forwarding through
/// [`LabelContextConsumer`] instead.
///
/// # Examples
///
/// ```
/// use orbit_label::prelude::*;
///
/// let document = Document::new();
/// let input = document.create_element("input");
/// input.set_attribute("id", "email");
/// document.body().append_child(&input).unwrap();
///
/// let context = Context::new(&document);
/// let mut label = Label::create(LabelProps::new().id("email-label").html_for("email"), context);
/// label.mount(&document.body()).unwrap();
/// assert_eq!(input.get_attribute("aria-labelledby").as_deref(), Some("email-label"));
///
/// label.unmount().unwrap();
/// assert!(!input.has_attribute("aria-labelledby"));
/// ```
pub struct Label {
    props: LabelProps,
    context: Context,
    lifecycle: LifecycleManager,
    stable_id: StableId,
    id: String,
    label_ref: NodeRef,
    element: Option<Element>,
    published: Option<LabelContextValue>,
    selection_guard: EffectSlot<Option<Element>>,
    linkage: EffectSlot<LinkageKey>,
}

/// Alias matching the primitive's root part
pub type Root = Label;

impl std::fmt::Debug for Label {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct(NAME)
            .field("id", &self.id)
            .field("props", &self.props)
            .field("phase", &self.lifecycle.current_phase())
            .field("element", &self.element)
            .field("selection_guard", &self.selection_guard)
            .field("linkage", &self.linkage)
            .finish()
    }
}

impl Label {
    /// Resolved id of the label (empty until the first render)
    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn props(&self) -> &LabelProps {
        &self.props
    }

    /// The rendered element, while mounted
    pub fn element(&self) -> Option<Element> {
        self.label_ref.get()
    }

    /// The label's own context; descendants consume [`LabelContextValue`] from it
    pub fn context(&self) -> &Context {
        &self.context
    }

    /// A fresh context for a component rendered inside this label
    pub fn child_context(&self) -> Context {
        Context::with_parent(&self.context)
    }

    /// Whether click forwarding and `aria-labelledby` are currently in effect
    pub fn is_linked(&self) -> bool {
        self.linkage.is_active()
    }

    fn publish_context(&mut self) {
        if self.published.as_ref().map(LabelContextValue::id) == Some(self.id.as_str()) {
            return;
        }
        let value = LabelContextValue {
            id: self.id.clone(),
            label_ref: self.label_ref.clone(),
        };
        self.context.provide(value.clone());
        self.published = Some(value);
    }

    /// Run effect windows in registration order after a commit
    fn commit_effects(&mut self) {
        let label_element = self.label_ref.get();

        self.selection_guard
            .run(label_element.clone(), |element| {
                let guard = attach_selection_guard(element.as_ref()?);
                on_release(move || {
                    guard.detach();
                })
            });

        let document = self.context.document().clone();
        let attribute = self.context.config().labelledby_attribute.clone();
        let key = (self.id.clone(), self.props.html_for.clone(), label_element);
        self.linkage.run(key, |(id, html_for, label)| {
            link_control(&document, label.as_ref()?, id, html_for.as_deref()?, attribute)
        });
    }

    /// Tear down effect windows in reverse registration order
    fn release_effects(&mut self) {
        self.linkage.dispose();
        self.selection_guard.dispose();
    }

    fn assign_refs(&self, element: Option<&Element>) {
        let refs = std::iter::once(self.label_ref.clone()).chain(self.props.forwarded_ref.clone());
        compose_refs(refs).set(element);
    }
}

/// Point `html_for`'s control at this label and forward clicks to it
///
/// A missing control leaves the window inert until the key changes again.
fn link_control(
    document: &Document,
    label: &Element,
    id: &str,
    html_for: &str,
    attribute: String,
) -> Option<Cleanup> {
    if id.bytes().any(|b| b.is_ascii_whitespace()) {
        // Only reachable through an id prefix containing whitespace
        warn!("label id `{id}` contains whitespace, linkage skipped");
        return None;
    }
    let Some(control) = document.get_element_by_id(html_for) else {
        debug!("label {id}: no element with id `{html_for}`, linkage inert");
        return None;
    };

    let forwarding = attach_click_forwarding(label, &control);
    apply_token_update(&control, &attribute, id, TokenOp::Add);
    debug!("label {id}: linked to {:?}", control);

    let control = control.downgrade();
    let id = id.to_string();
    on_release(move || {
        forwarding.detach();
        // Re-read the live value; other labels may have written since setup
        if let Some(control) = control.upgrade() {
            apply_token_update(&control, &attribute, &id, TokenOp::Remove);
            debug!("label {id}: unlinked from {:?}", control);
        }
    })
}

impl Component for Label {
    type Props = LabelProps;

    fn create(props: Self::Props, context: Context) -> Self {
        let stable_id = StableId::new(context.config().id_prefix.clone());
        Self {
            props,
            context: Context::with_parent(&context),
            lifecycle: LifecycleManager::new(),
            stable_id,
            id: String::new(),
            label_ref: NodeRef::new(),
            element: None,
            published: None,
            selection_guard: EffectSlot::new("label selection guard"),
            linkage: EffectSlot::new("label control linkage"),
        }
    }

    fn mount(&mut self, parent: &Element) -> Result<(), ComponentError> {
        self.lifecycle.begin(LifecycleOp::Mount)?;

        let rendered = self
            .render()
            .and_then(|element| parent.append_child(&element).map_err(ComponentError::from));
        if let Err(err) = rendered {
            if let Some(element) = self.element.take() {
                element.remove();
            }
            self.assign_refs(None);
            self.lifecycle.abort(LifecycleOp::Mount);
            return Err(err);
        }

        self.lifecycle.complete(LifecycleOp::Mount);
        self.commit_effects();
        Ok(())
    }

    fn update(&mut self, props: Self::Props) -> Result<(), ComponentError> {
        self.lifecycle.begin(LifecycleOp::Update)?;

        let previous = std::mem::replace(&mut self.props, props);
        if previous.forwarded_ref != self.props.forwarded_ref {
            if let Some(old_ref) = &previous.forwarded_ref {
                old_ref.set(None);
            }
        }

        if let Err(err) = self.render() {
            if previous.forwarded_ref != self.props.forwarded_ref {
                if let Some(new_ref) = &self.props.forwarded_ref {
                    new_ref.set(None);
                }
            }
            self.props = previous;
            self.assign_refs(self.element.as_ref());
            self.lifecycle.abort(LifecycleOp::Update);
            return Err(err);
        }

        self.lifecycle.complete(LifecycleOp::Update);
        self.commit_effects();
        Ok(())
    }

    fn unmount(&mut self) -> Result<(), ComponentError> {
        self.lifecycle.begin(LifecycleOp::Unmount)?;

        self.release_effects();
        if let Some(element) = self.element.take() {
            element.remove();
        }
        self.assign_refs(None);
        self.context.withdraw::<LabelContextValue>();
        self.published = None;

        self.lifecycle.complete(LifecycleOp::Unmount);
        Ok(())
    }

    fn render(&mut self) -> Result<Element, ComponentError> {
        if let Err(err) = label_props_validator().validate(&self.props) {
            warn!("{NAME}: rejecting props: {err}");
            return Err(err.into());
        }

        let id = self.stable_id.resolve(self.props.id.as_deref());
        let as_tag = self
            .props
            .as_tag
            .clone()
            .unwrap_or_else(|| self.context.config().default_label_tag.clone());

        let element = Primitive::render(
            self.context.document(),
            self.element.as_ref(),
            &as_tag,
            &[("role", LABEL_ROLE), ("id", id.as_str())],
            &self.props.attributes,
        )?;

        self.assign_refs(Some(&element));
        self.element = Some(element.clone());
        self.id = id;
        self.publish_context();
        Ok(element)
    }

    fn phase(&self) -> LifecyclePhase {
        self.lifecycle.current_phase()
    }
}

impl Drop for Label {
    fn drop(&mut self) {
        if self.lifecycle.is_mounted() {
            // Only fails on a phase mismatch, which is_mounted rules out
            let _ = self.unmount();
        }
    }
}

/// Registers a control rendered inside a [`Label`] as its click target
///
/// The consumer only forwards clicks; the caller sets its own `aria-labelledby`
/// from the returned id. Both elements are held weakly, so an unmounted label is
/// freed even while its consumer lives on.
#[derive(Debug)]
pub struct LabelContextConsumer {
    forwarding: EffectSlot<(Option<LabelContextValue>, WeakElement, WeakElement)>,
}

impl Default for LabelContextConsumer {
    fn default() -> Self {
        Self::new()
    }
}

impl LabelContextConsumer {
    pub fn new() -> Self {
        Self {
            forwarding: EffectSlot::new("label context forwarding"),
        }
    }

    /// Read the enclosing label and (re)attach forwarding to `control`
    ///
    /// Returns the enclosing label's id, or `None` outside any label.
    pub fn consume(&mut self, context: &Context, control: Option<&Element>) -> Option<String> {
        let value = context.consume::<LabelContextValue>();
        let id = value.as_ref().map(|value| value.id.clone());
        let label = value
            .as_ref()
            .and_then(LabelContextValue::label_element)
            .map(|label| label.downgrade())
            .unwrap_or_default();
        let control = control.map(Element::downgrade).unwrap_or_default();

        self.forwarding
            .run((value, label, control), |(_, label, control)| {
                let forwarding = attach_click_forwarding(&label.upgrade()?, &control.upgrade()?);
                on_release(move || {
                    forwarding.detach();
                })
            });
        id
    }

    /// Whether forwarding is currently attached
    pub fn is_forwarding(&self) -> bool {
        self.forwarding.is_active()
    }

    /// Detach forwarding; a later `consume` attaches again
    pub fn dispose(&mut self) {
        self.forwarding.dispose();
    }
}

/// Hook form of [`LabelContextConsumer::consume`]
pub fn use_label_context(
    context: &Context,
    consumer: &mut LabelContextConsumer,
    control: Option<&Element>,
) -> Option<String> {
    consumer.consume(context, control)
}
