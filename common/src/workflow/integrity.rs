//! Session-integrity restrictions shown while an application is in progress.
//!
//! These are friction for the honest applicant, nothing more: they only
//! apply inside the observing document and anyone can switch them off from
//! the browser. The server never hears about them.
//!
//! The session is a two-state machine (`Inactive` / `Active`). Activation asks
//! the [`DocumentHost`] to attach its observers and keeps the returned guard;
//! deactivation drops that guard, which is the host's cue to remove every
//! listener. Dropping the session deactivates it, so teardown cannot leak
//! observers.

use std::cell::Cell;
use std::fmt;
use std::rc::Rc;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClipboardAction {
    Copy,
    Cut,
    Paste,
}

impl ClipboardAction {
    pub const ALL: [ClipboardAction; 3] = [
        ClipboardAction::Copy,
        ClipboardAction::Cut,
        ClipboardAction::Paste,
    ];

    /// DOM event name for this action.
    pub fn event_type(self) -> &'static str {
        match self {
            ClipboardAction::Copy => "copy",
            ClipboardAction::Cut => "cut",
            ClipboardAction::Paste => "paste",
        }
    }
}

/// A key press as seen by the document, modifiers included.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct KeyCombo {
    /// `KeyboardEvent.key`, e.g. `"w"`, `"Tab"`, `"F5"`.
    pub key: String,
    pub ctrl: bool,
    pub alt: bool,
    pub meta: bool,
    pub shift: bool,
}

impl KeyCombo {
    pub fn plain(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            ..Self::default()
        }
    }

    pub fn ctrl(key: impl Into<String>) -> Self {
        Self {
            ctrl: true,
            ..Self::plain(key)
        }
    }

    pub fn alt(key: impl Into<String>) -> Self {
        Self {
            alt: true,
            ..Self::plain(key)
        }
    }

    /// Label of the blocked shortcut this combo triggers, if any.
    ///
    /// Covers tab/window switching and reload: Alt+Tab, Ctrl+Tab, Ctrl+W,
    /// Ctrl+N, Ctrl+T, F5 and Ctrl+R. Command counts as Ctrl.
    pub fn blocked_shortcut(&self) -> Option<&'static str> {
        let ctrl = self.ctrl || self.meta;
        match self.key.to_ascii_lowercase().as_str() {
            "tab" if self.alt => Some("Alt+Tab"),
            "tab" if ctrl => Some("Ctrl+Tab"),
            "f5" => Some("F5"),
            "w" if ctrl => Some("Ctrl+W"),
            "n" if ctrl => Some("Ctrl+N"),
            "t" if ctrl => Some("Ctrl+T"),
            "r" if ctrl => Some("Ctrl+R"),
            _ => None,
        }
    }
}

/// Signals from the surrounding document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AmbientEvent {
    VisibilityChanged { hidden: bool },
    Clipboard(ClipboardAction),
    KeyDown(KeyCombo),
    ContextMenu,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Warning {
    LeftPage,
    Clipboard(ClipboardAction),
    Shortcut(&'static str),
    ContextMenu,
}

impl fmt::Display for Warning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Warning::LeftPage => write!(
                f,
                "Please stay on this page until your application is submitted."
            ),
            Warning::Clipboard(action) => {
                let verb = match action {
                    ClipboardAction::Copy => "Copying",
                    ClipboardAction::Cut => "Cutting",
                    ClipboardAction::Paste => "Pasting",
                };
                write!(f, "{verb} is disabled during the application.")
            }
            Warning::Shortcut(label) => write!(f, "{label} is disabled during the application."),
            Warning::ContextMenu => write!(f, "Right-click is disabled during the application."),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TitleChange {
    Warning,
    Normal,
}

/// What the host must do in response to one event.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Reaction {
    /// Cancel the event's default action.
    pub suppress: bool,
    pub warning: Option<Warning>,
    pub title: Option<TitleChange>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentTitles {
    /// Shown while the document is hidden.
    pub warning: String,
    /// Shown once the application went through.
    pub submitted: String,
}

impl Default for DocumentTitles {
    fn default() -> Self {
        Self {
            warning: "⚠ Return to your application".to_string(),
            submitted: "Application submitted".to_string(),
        }
    }
}

/// Rules shared between a live session and the observers it registered.
///
/// Built fresh on every activation. `live` is cleared on deactivation so an
/// event already queued by the host is answered with an empty reaction.
#[derive(Debug)]
pub struct IntegrityPolicy {
    normal_title: String,
    warning_title: String,
    live: Cell<bool>,
}

impl IntegrityPolicy {
    pub fn new(normal_title: impl Into<String>, titles: &DocumentTitles) -> Self {
        Self {
            normal_title: normal_title.into(),
            warning_title: titles.warning.clone(),
            live: Cell::new(true),
        }
    }

    pub fn is_live(&self) -> bool {
        self.live.get()
    }

    pub fn normal_title(&self) -> &str {
        &self.normal_title
    }

    pub fn warning_title(&self) -> &str {
        &self.warning_title
    }

    pub fn react(&self, event: &AmbientEvent) -> Reaction {
        if !self.is_live() {
            return Reaction::default();
        }
        match event {
            AmbientEvent::VisibilityChanged { hidden: true } => Reaction {
                suppress: false,
                warning: Some(Warning::LeftPage),
                title: Some(TitleChange::Warning),
            },
            AmbientEvent::VisibilityChanged { hidden: false } => Reaction {
                title: Some(TitleChange::Normal),
                ..Reaction::default()
            },
            AmbientEvent::Clipboard(action) => Reaction {
                suppress: true,
                warning: Some(Warning::Clipboard(*action)),
                title: None,
            },
            AmbientEvent::KeyDown(combo) => match combo.blocked_shortcut() {
                Some(label) => Reaction {
                    suppress: true,
                    warning: Some(Warning::Shortcut(label)),
                    title: None,
                },
                None => Reaction::default(),
            },
            AmbientEvent::ContextMenu => Reaction {
                suppress: true,
                warning: Some(Warning::ContextMenu),
                title: None,
            },
        }
    }

    /// Reacts to `event` and applies the title change and warning through
    /// `host`. Cancelling the event stays with the caller, which owns it.
    pub fn dispatch<H: DocumentHost + ?Sized>(&self, host: &H, event: &AmbientEvent) -> Reaction {
        let reaction = self.react(event);
        match reaction.title {
            Some(TitleChange::Warning) => host.set_title(&self.warning_title),
            Some(TitleChange::Normal) => host.set_title(&self.normal_title),
            None => {}
        }
        if let Some(warning) = &reaction.warning {
            log::warn!("blocked during application: {:?}", event);
            host.alert(&warning.to_string());
        }
        reaction
    }
}

/// The browser document as seen by the workflow.
pub trait DocumentHost {
    /// Guard for the registered observers. Dropping it must remove every
    /// listener it stands for.
    type Observers;

    /// Registers the visibility, clipboard, keyboard and context-menu
    /// observers, each forwarding to [`IntegrityPolicy::dispatch`].
    ///
    /// Returns `None` when the document is already observed by another
    /// session; at most one set of observers exists per document.
    fn observe(&self, policy: Rc<IntegrityPolicy>) -> Option<Self::Observers>;

    fn title(&self) -> String;

    fn set_title(&self, title: &str);

    /// Blocking notification.
    fn alert(&self, message: &str);
}

struct ActiveSession<O> {
    policy: Rc<IntegrityPolicy>,
    observers: O,
}

pub struct IntegritySession<H: DocumentHost> {
    host: H,
    titles: DocumentTitles,
    active: Option<ActiveSession<H::Observers>>,
}

impl<H: DocumentHost> IntegritySession<H> {
    pub fn new(host: H, titles: DocumentTitles) -> Self {
        Self {
            host,
            titles,
            active: None,
        }
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn titles(&self) -> &DocumentTitles {
        &self.titles
    }

    pub fn is_active(&self) -> bool {
        self.active.is_some()
    }

    /// Inactive → Active. Returns `false` when already active or when the
    /// document refused a second set of observers.
    pub fn activate(&mut self) -> bool {
        if self.active.is_some() {
            return false;
        }
        let policy = Rc::new(IntegrityPolicy::new(self.host.title(), &self.titles));
        match self.host.observe(Rc::clone(&policy)) {
            Some(observers) => {
                log::info!("integrity session active");
                self.active = Some(ActiveSession { policy, observers });
                true
            }
            None => {
                log::warn!("document already has integrity observers, session stays inactive");
                false
            }
        }
    }

    /// Active → Inactive: observers are removed and the title captured at
    /// activation is restored. Returns `false` when there was nothing to do.
    pub fn deactivate(&mut self) -> bool {
        let Some(ActiveSession { policy, observers }) = self.active.take() else {
            return false;
        };
        policy.live.set(false);
        drop(observers);
        self.host.set_title(policy.normal_title());
        log::info!("integrity session inactive");
        true
    }
}

impl<H: DocumentHost> Drop for IntegritySession<H> {
    fn drop(&mut self) {
        self.deactivate();
    }
}
