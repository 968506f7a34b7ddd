//! The real `document` behind [`DocumentHost`].
//!
//! Each observer is an [`EventListener`] owning its JS closure; dropping it
//! calls `removeEventListener` with the same function, so the guard returned
//! by [`BrowserDocument::observe`] takes every listener with it.

use std::cell::Cell;
use std::rc::Rc;

use common::workflow::{AmbientEvent, ClipboardAction, DocumentHost, IntegrityPolicy, KeyCombo};
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys::{Document, Event, EventTarget, KeyboardEvent};

thread_local! {
    static OBSERVED: Cell<bool> = const { Cell::new(false) };
}

fn document() -> Option<Document> {
    web_sys::window()?.document()
}

/// Handle on the page's `window.document`. Looked up on every call, like
/// the rest of the UI does.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct BrowserDocument;

struct EventListener {
    target: EventTarget,
    event_type: &'static str,
    callback: Closure<dyn FnMut(Event)>,
}

impl EventListener {
    fn attach(target: &EventTarget, event_type: &'static str, handler: impl FnMut(Event) + 'static) -> Option<Self> {
        let callback = Closure::wrap(Box::new(handler) as Box<dyn FnMut(Event)>);
        match target.add_event_listener_with_callback(event_type, callback.as_ref().unchecked_ref()) {
            Ok(()) => Some(Self {
                target: target.clone(),
                event_type,
                callback,
            }),
            Err(err) => {
                log::error!("could not listen for {}: {:?}", event_type, err);
                None
            }
        }
    }
}

impl Drop for EventListener {
    fn drop(&mut self) {
        if let Err(err) = self
            .target
            .remove_event_listener_with_callback(self.event_type, self.callback.as_ref().unchecked_ref())
        {
            log::warn!("could not remove {} listener: {:?}", self.event_type, err);
        }
    }
}

/// Every listener registered for one integrity session.
pub struct DocumentObservers {
    listeners: Vec<EventListener>,
}

impl Drop for DocumentObservers {
    fn drop(&mut self) {
        let count = self.listeners.len();
        self.listeners.clear();
        OBSERVED.with(|observed| observed.set(false));
        log::debug!("removed {} document listeners", count);
    }
}

impl BrowserDocument {
    fn listen(
        &self,
        target: &EventTarget,
        event_type: &'static str,
        policy: &Rc<IntegrityPolicy>,
        translate: impl Fn(&Event) -> Option<AmbientEvent> + 'static,
    ) -> Option<EventListener> {
        let host = *self;
        let policy = Rc::clone(policy);
        EventListener::attach(target, event_type, move |event: Event| {
            let Some(ambient) = translate(&event) else {
                return;
            };
            if policy.dispatch(&host, &ambient).suppress {
                event.prevent_default();
            }
        })
    }
}

impl DocumentHost for BrowserDocument {
    type Observers = DocumentObservers;

    fn observe(&self, policy: Rc<IntegrityPolicy>) -> Option<DocumentObservers> {
        let page = document()?;
        if OBSERVED.with(|observed| observed.replace(true)) {
            return None;
        }
        let target: &EventTarget = page.as_ref();
        let mut listeners = Vec::new();

        listeners.extend(self.listen(target, "visibilitychange", &policy, |_| {
            let hidden = document().map(|d| d.hidden()).unwrap_or(false);
            Some(AmbientEvent::VisibilityChanged { hidden })
        }));
        for action in ClipboardAction::ALL {
            listeners.extend(self.listen(target, action.event_type(), &policy, move |_| {
                Some(AmbientEvent::Clipboard(action))
            }));
        }
        listeners.extend(self.listen(target, "keydown", &policy, |event| {
            let key = event.dyn_ref::<KeyboardEvent>()?;
            Some(AmbientEvent::KeyDown(KeyCombo {
                key: key.key(),
                ctrl: key.ctrl_key(),
                alt: key.alt_key(),
                meta: key.meta_key(),
                shift: key.shift_key(),
            }))
        }));
        listeners.extend(self.listen(target, "contextmenu", &policy, |_| {
            Some(AmbientEvent::ContextMenu)
        }));

        log::debug!("attached {} document listeners", listeners.len());
        Some(DocumentObservers { listeners })
    }

    fn title(&self) -> String {
        document().map(|d| d.title()).unwrap_or_default()
    }

    fn set_title(&self, title: &str) {
        if let Some(document) = document() {
            document.set_title(title);
        }
    }

    fn alert(&self, message: &str) {
        if let Some(window) = web_sys::window() {
            let _ = window.alert_with_message(message);
        }
    }
}
