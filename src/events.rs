//! Pointer events and handler subscriptions.
//!
//! Handlers are called strictly in subscription order, one event at a time.
//! [`Dispatcher::subscribe`] returns a [`Subscription`] that unregisters the
//! handler when dropped, so a widget's callbacks never outlive the widget.

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use crate::surface::{PanelId, Point, Surface};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Button {
    Primary,
    Secondary,
    Middle,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerKind {
    Press(Button),
    Move,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerEvent {
    /// Panel under the pointer, if any. `position` is in its data coordinates.
    pub panel: Option<PanelId>,
    pub position: Point,
    pub kind: PointerKind,
}

impl PointerEvent {
    pub fn press(panel: PanelId, position: Point, button: Button) -> Self {
        Self {
            panel: Some(panel),
            position,
            kind: PointerKind::Press(button),
        }
    }

    pub fn motion(panel: Option<PanelId>, position: Point) -> Self {
        Self {
            panel,
            position,
            kind: PointerKind::Move,
        }
    }

    pub fn event_kind(&self) -> EventKind {
        match self.kind {
            PointerKind::Press(_) => EventKind::Press,
            PointerKind::Move => EventKind::Move,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventKind {
    Press,
    Move,
}

type Handler = Box<dyn FnMut(&PointerEvent, &mut dyn Surface)>;

struct Entry {
    token: u64,
    kind: EventKind,
    handler: Rc<RefCell<Handler>>,
}

#[derive(Default)]
struct Registry {
    next_token: u64,
    entries: Vec<Entry>,
}

impl Registry {
    fn is_live(&self, token: u64) -> bool {
        self.entries.iter().any(|e| e.token == token)
    }
}

/// Routes pointer events to subscribed handlers. Cloning yields another
/// handle to the same registry.
#[derive(Clone, Default)]
pub struct Dispatcher {
    registry: Rc<RefCell<Registry>>,
}

impl Dispatcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe<F>(&self, kind: EventKind, handler: F) -> Subscription
    where
        F: FnMut(&PointerEvent, &mut dyn Surface) + 'static,
    {
        let handler: Handler = Box::new(handler);
        let mut registry = self.registry.borrow_mut();
        let token = registry.next_token;
        registry.next_token += 1;
        registry.entries.push(Entry {
            token,
            kind,
            handler: Rc::new(RefCell::new(handler)),
        });
        Subscription {
            token,
            registry: Rc::downgrade(&self.registry),
        }
    }

    /// Deliver `event` to every matching handler. Returns how many ran.
    pub fn dispatch(&self, event: &PointerEvent, surface: &mut dyn Surface) -> usize {
        let kind = event.event_kind();
        let targets: Vec<(u64, Rc<RefCell<Handler>>)> = self
            .registry
            .borrow()
            .entries
            .iter()
            .filter(|e| e.kind == kind)
            .map(|e| (e.token, Rc::clone(&e.handler)))
            .collect();

        let mut delivered = 0;
        for (token, handler) in targets {
            // an earlier handler may have released this one
            if !self.registry.borrow().is_live(token) {
                continue;
            }
            let Ok(mut handler) = handler.try_borrow_mut() else {
                tracing::warn!("skipping re-entrant dispatch to handler {token}");
                continue;
            };
            (&mut *handler)(event, surface);
            delivered += 1;
        }
        delivered
    }

    /// Number of live subscriptions.
    pub fn len(&self) -> usize {
        self.registry.borrow().entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl std::fmt::Debug for Dispatcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Dispatcher")
            .field("handlers", &self.len())
            .finish()
    }
}

/// Keeps a handler registered. Dropping it unregisters the handler.
#[must_use = "dropping a Subscription unregisters its handler"]
pub struct Subscription {
    token: u64,
    registry: Weak<RefCell<Registry>>,
}

impl Subscription {
    pub fn release(self) {}
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(registry) = self.registry.upgrade() {
            registry
                .borrow_mut()
                .entries
                .retain(|e| e.token != self.token);
        }
    }
}

impl std::fmt::Debug for Subscription {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Subscription")
            .field("token", &self.token)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tui::scene::Scene;

    fn press() -> PointerEvent {
        PointerEvent::press(PanelId(0), Point::default(), Button::Primary)
    }

    #[test]
    fn handlers_run_in_subscription_order() {
        let dispatcher = Dispatcher::new();
        let log = Rc::new(RefCell::new(Vec::new()));

        let subs: Vec<Subscription> = (0..3)
            .map(|i| {
                let log = Rc::clone(&log);
                dispatcher.subscribe(EventKind::Press, move |_, _| log.borrow_mut().push(i))
            })
            .collect();

        let delivered = dispatcher.dispatch(&press(), &mut Scene::new());
        assert_eq!(delivered, 3);
        assert_eq!(*log.borrow(), [0, 1, 2]);
        drop(subs);
    }

    #[test]
    fn kinds_are_filtered() {
        let dispatcher = Dispatcher::new();
        let _press = dispatcher.subscribe(EventKind::Press, |_, _| {});
        let _motion = dispatcher.subscribe(EventKind::Move, |_, _| {});

        let moved = PointerEvent::motion(None, Point::default());
        assert_eq!(dispatcher.dispatch(&moved, &mut Scene::new()), 1);
    }

    #[test]
    fn dropping_subscription_unregisters() {
        let dispatcher = Dispatcher::new();
        let sub = dispatcher.subscribe(EventKind::Press, |_, _| {});
        assert_eq!(dispatcher.len(), 1);
        sub.release();
        assert!(dispatcher.is_empty());
        assert_eq!(dispatcher.dispatch(&press(), &mut Scene::new()), 0);
    }

    #[test]
    fn handler_released_mid_dispatch_is_skipped() {
        let dispatcher = Dispatcher::new();
        let victim: Rc<RefCell<Option<Subscription>>> = Rc::new(RefCell::new(None));

        let slot = Rc::clone(&victim);
        let _first = dispatcher.subscribe(EventKind::Press, move |_, _| {
            slot.borrow_mut().take();
        });
        let ran = Rc::new(RefCell::new(false));
        let flag = Rc::clone(&ran);
        *victim.borrow_mut() = Some(dispatcher.subscribe(EventKind::Press, move |_, _| {
            *flag.borrow_mut() = true;
        }));

        assert_eq!(dispatcher.dispatch(&press(), &mut Scene::new()), 1);
        assert!(!*ran.borrow());
        assert_eq!(dispatcher.len(), 1);
    }

    #[test]
    fn debug_reports_live_handler_count() {
        let dispatcher = Dispatcher::new();
        let _sub = dispatcher.subscribe(EventKind::Press, |_, _| {});
        assert_eq!(format!("{dispatcher:?}"), "Dispatcher { handlers: 1 }");
    }

    #[test]
    fn subscription_outliving_dispatcher_is_harmless() {
        let dispatcher = Dispatcher::new();
        let sub = dispatcher.subscribe(EventKind::Move, |_, _| {});
        drop(dispatcher);
        drop(sub);
    }
}
