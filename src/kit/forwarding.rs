//! Click and selection wiring between a label element and a control element
//!
//! Both functions only attach listeners. The returned [`ListenerHandle`]s are the
//! only state; every attachment must be detached on its own.

use log::trace;

use crate::dom::{Element, ListenerHandle};
use crate::events::EventKind;

/// Prevent text selection when the label is double (or triple) clicked
///
/// Only the default action is prevented; the event keeps propagating.
pub fn attach_selection_guard(label: &Element) -> ListenerHandle {
    label.listen(EventKind::MouseDown, |event| {
        if event.detail() > 1 {
            trace!("suppressing selection for click #{}", event.detail());
            event.prevent_default();
        }
    })
}

/// Forward user clicks on `label` to `control` as a click followed by focus
///
/// Clicks that land inside the control are left alone so the control does not act
/// twice. Untrusted clicks are never forwarded: the forwarded click is itself
/// synthetic, and forwarding those would recurse or let scripts spoof input.
/// The control is held weakly; once it is gone, or while either element is detached
/// from its document, the listener does nothing.
pub fn attach_click_forwarding(label: &Element, control: &Element) -> ListenerHandle {
    let control = control.downgrade();
    label.listen(EventKind::Click, move |event| {
        let Some(control) = control.upgrade() else {
            return;
        };
        let clicking_control = event
            .target()
            .is_some_and(|target| control.contains(target));
        if clicking_control {
            return;
        }
        if !event.is_trusted() {
            trace!("ignoring untrusted click on label for {:?}", control);
            return;
        }
        let label_detached = event
            .current_target()
            .is_some_and(|label| !label.is_connected());
        if label_detached || !control.is_connected() {
            trace!("label or control {:?} detached, not forwarding", control);
            return;
        }

        trace!("forwarding label click to {:?}", control);
        control.click();
        control.focus();
    })
}
