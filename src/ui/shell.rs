//! Composition root for the interaction core.
//!
//! Components never call each other. Each returns effect values and the
//! shell routes them: a queue acquisition becomes a sheet, a user-dismissed
//! acquisition sheet cancels the queued intent, a committed swipe-back settles
//! into a pop, and a ready intent reaches the installed [`IntentHandler`].
//!
//! Time is whatever the host says it is. Every entry point first fires the
//! timers due strictly before its timestamp, so an event stamped exactly on a
//! deadline is handled before that deadline fires.

use std::sync::Arc;

use serde::Serialize;
use tracing::{debug, info, warn};

use crate::config::Config;
use crate::content::{Screen, Sheet};
use crate::data::{ItemId, Snapshot};
use crate::ui::deferred::{DeferredIntent, IntentHandler, IntentQueue, QueueEffect};
use crate::ui::events::HostEvent;
use crate::ui::gesture::{
    Direction, GestureAction, GestureClassifier, GestureKind, GestureState, PointerEvent,
    PointerSample, TargetKind,
};
use crate::ui::navigation::{NavEffect, Navigator, SectionKey, SwipeRelease};
use crate::ui::sheet::{DismissReason, DragOrigin, ModalOverlayController, SheetEffect};
use crate::ui::timer::Millis;

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(tag = "effect", rename_all = "snake_case")]
pub enum ShellEffect {
    Gesture(GestureAction),
    Nav(NavEffect),
    Sheet(SheetEffect<Sheet>),
    Queue(QueueEffect),
    /// The deep-linked item is not in the snapshot yet; the host should look
    /// it up and report back with a snapshot or a failure.
    LookupItem { item: ItemId },
}

/// Which drag the current pointer session drives.
#[derive(Debug, Default)]
struct PointerRouting {
    swipe_back: bool,
    /// Scroll or multitouch seen; swipe-back stays off until the session ends.
    swipe_blocked: bool,
}

pub struct Shell {
    classifier: GestureClassifier,
    navigator: Navigator<Screen>,
    sheet: ModalOverlayController<Sheet>,
    queue: IntentQueue,
    snapshot: Arc<Snapshot>,
    handler: Option<Box<dyn IntentHandler + Send>>,
    pending_link: Option<ItemId>,
    routing: PointerRouting,
    sheet_scroll_top: f64,
    now: Millis,
}

impl Shell {
    pub fn new(config: &Config) -> Self {
        Self {
            classifier: GestureClassifier::new(config.gesture.clone()),
            navigator: Navigator::new(config),
            sheet: ModalOverlayController::new(config.sheet.clone()),
            queue: IntentQueue::new(),
            snapshot: Arc::new(Snapshot::default()),
            handler: None,
            pending_link: None,
            routing: PointerRouting::default(),
            sheet_scroll_top: 0.0,
            now: 0,
        }
    }

    /// Install the content layer's intent handler. Replaces any earlier one.
    pub fn set_handler(&mut self, handler: impl IntentHandler + Send + 'static) {
        self.handler = Some(Box::new(handler));
    }

    pub fn navigator(&self) -> &Navigator<Screen> {
        &self.navigator
    }

    pub fn sheet(&self) -> &ModalOverlayController<Sheet> {
        &self.sheet
    }

    pub fn queue(&self) -> &IntentQueue {
        &self.queue
    }

    pub fn gesture(&self) -> GestureState {
        self.classifier.state()
    }

    pub fn snapshot(&self) -> &Snapshot {
        &self.snapshot
    }

    pub fn now(&self) -> Millis {
        self.now
    }

    pub fn next_deadline(&self) -> Option<Millis> {
        [
            self.classifier.next_deadline(),
            self.navigator.next_deadline(),
            self.sheet.next_deadline(),
        ]
        .into_iter()
        .flatten()
        .min()
    }

    pub fn handle(&mut self, event: HostEvent, now: Millis) -> Vec<ShellEffect> {
        match event {
            HostEvent::Pointer { pointer } => self.pointer(pointer),
            HostEvent::Snapshot { snapshot } => self.apply_snapshot(Arc::new(snapshot), now),
            HostEvent::RecordIntent { intent } => self.record_intent(intent, now),
            HostEvent::Push { screen } => self.push(screen, now),
            HostEvent::Pop => self.pop(now),
            HostEvent::SelectSection { section } => self.select_section(section, now),
            HostEvent::ShowSheet { sheet } => self.show_sheet(sheet, now),
            HostEvent::DismissSheet => self.dismiss_sheet(now),
            HostEvent::SheetScroll { scroll_top } => {
                self.set_sheet_scroll_top(scroll_top);
                Vec::new()
            }
            HostEvent::DeepLink { item } => self.open_deep_link(item, now),
            HostEvent::DeepLinkFailed => self.deep_link_failed(now),
        }
    }

    /// Fire every timer due at or before `now`, in deadline order.
    pub fn advance(&mut self, now: Millis) -> Vec<ShellEffect> {
        let mut effects = Vec::new();
        while let Some(deadline) = self.next_deadline().filter(|deadline| *deadline <= now) {
            self.now = self.now.max(deadline);
            self.fire_timers(deadline, &mut effects);
        }
        self.now = self.now.max(now);
        effects
    }

    pub fn pointer(&mut self, event: PointerEvent) -> Vec<ShellEffect> {
        let at = event.timestamp();
        let mut effects = self.catch_up(at);
        let update = self.classifier.handle(&event);

        let mut drag_consumed = false;
        match &event {
            PointerEvent::Down(sample) => {
                if update.state.kind == GestureKind::Multitouch {
                    self.abandon_drags();
                } else {
                    self.begin_sheet_drag(sample);
                }
            }
            PointerEvent::Move(sample) => self.track_drags(sample, update.state),
            PointerEvent::Up(sample) => {
                if update.finished {
                    drag_consumed = self.release_drags(sample, at, &mut effects);
                }
            }
            PointerEvent::Cancel(_) => {
                if update.finished {
                    self.abandon_drags();
                }
            }
        }

        if let Some(action) = update.action {
            if drag_consumed && matches!(action, GestureAction::Swipe { .. }) {
                debug!(?action, "swipe consumed by drag");
            } else {
                effects.push(ShellEffect::Gesture(action));
            }
        }
        if update.finished {
            self.routing = PointerRouting::default();
        }
        effects
    }

    pub fn push(&mut self, screen: Screen, now: Millis) -> Vec<ShellEffect> {
        let mut effects = self.catch_up(now);
        self.routing.swipe_back = false;
        effects.push(ShellEffect::Nav(self.navigator.push(screen, now)));
        effects
    }

    pub fn pop(&mut self, now: Millis) -> Vec<ShellEffect> {
        let mut effects = self.catch_up(now);
        self.routing.swipe_back = false;
        effects.extend(self.navigator.pop().into_iter().map(ShellEffect::Nav));
        effects
    }

    pub fn select_section(&mut self, section: SectionKey, now: Millis) -> Vec<ShellEffect> {
        let mut effects = self.catch_up(now);
        self.routing.swipe_back = false;
        effects.extend(
            self.navigator
                .select_section(section)
                .into_iter()
                .map(ShellEffect::Nav),
        );
        effects
    }

    /// Take in fresh shared data: reconcile every frame, re-check the queued
    /// intent's preconditions and resolve a pending deep link.
    pub fn apply_snapshot(&mut self, snapshot: Arc<Snapshot>, now: Millis) -> Vec<ShellEffect> {
        let mut effects = self.catch_up(now);
        self.snapshot = snapshot;
        self.navigator.refresh(Arc::clone(&self.snapshot));
        let queued = self
            .queue
            .preconditions_changed(self.snapshot.preconditions());
        self.route_queue(queued, now, &mut effects);
        effects.extend(self.resolve_deep_link(now));
        effects
    }

    /// The only write entry point of the intent queue.
    pub fn record_intent(&mut self, intent: DeferredIntent, now: Millis) -> Vec<ShellEffect> {
        let mut effects = self.catch_up(now);
        let queued = self.queue.record(intent, self.snapshot.preconditions());
        self.route_queue(queued, now, &mut effects);
        effects
    }

    pub fn show_sheet(&mut self, sheet: Sheet, now: Millis) -> Vec<ShellEffect> {
        let effects = self.catch_up(now);
        self.sheet.show(sheet, now);
        effects
    }

    /// User closed the sheet without dragging it.
    pub fn dismiss_sheet(&mut self, now: Millis) -> Vec<ShellEffect> {
        let mut effects = self.catch_up(now);
        if let Some(hiding) = self.sheet.hide(DismissReason::User, now) {
            self.route_sheet(hiding, now, &mut effects);
        }
        effects
    }

    pub fn set_sheet_scroll_top(&mut self, scroll_top: f64) {
        self.sheet_scroll_top = scroll_top;
    }

    /// Open the item named by the deep-link parameter, now if the snapshot
    /// has it, otherwise after the host's lookup lands in a snapshot.
    pub fn open_deep_link(&mut self, item: ItemId, now: Millis) -> Vec<ShellEffect> {
        let mut effects = self.catch_up(now);
        self.navigator.hold_deep_link(item.to_string());
        self.pending_link = Some(item.clone());
        match self.resolve_deep_link(now) {
            Some(pushed) => effects.push(pushed),
            None => {
                debug!(%item, "deep link waiting for lookup");
                effects.push(ShellEffect::LookupItem { item });
            }
        }
        effects
    }

    /// Lookup failed: strip the parameter right away.
    pub fn deep_link_failed(&mut self, now: Millis) -> Vec<ShellEffect> {
        let mut effects = self.catch_up(now);
        if let Some(item) = self.pending_link.take() {
            warn!(%item, "deep link lookup failed");
            effects.extend(self.navigator.clear_deep_link().map(ShellEffect::Nav));
        }
        effects
    }

    /// Drop every timer, drag and pending intent. Stacks and the installed
    /// handler survive.
    pub fn teardown(&mut self) {
        self.classifier.reset();
        self.navigator.teardown();
        self.sheet.teardown();
        self.queue.clear();
        self.pending_link = None;
        self.routing = PointerRouting::default();
        debug!("shell torn down");
    }

    fn catch_up(&mut self, now: Millis) -> Vec<ShellEffect> {
        let effects = self.advance(now.saturating_sub(1));
        self.now = self.now.max(now);
        effects
    }

    fn fire_timers(&mut self, at: Millis, out: &mut Vec<ShellEffect>) {
        out.extend(
            self.classifier
                .on_timers(at)
                .into_iter()
                .map(ShellEffect::Gesture),
        );
        out.extend(self.navigator.on_timers(at).into_iter().map(ShellEffect::Nav));
        for effect in self.sheet.on_timers(at) {
            self.route_sheet(effect, at, out);
        }
    }

    fn begin_sheet_drag(&mut self, sample: &PointerSample) {
        if self.classifier.is_native() || !self.sheet.state().visible {
            return;
        }
        // Presses on the page behind the sheet never drag it.
        let origin = match sample.target.kind {
            TargetKind::SheetHandle => DragOrigin::Handle,
            TargetKind::SheetBody => DragOrigin::Body {
                scroll_top: self.sheet_scroll_top,
            },
            _ => return,
        };
        self.sheet.begin_drag(origin, sample.y);
    }

    fn track_drags(&mut self, sample: &PointerSample, state: GestureState) {
        if state.kind == GestureKind::Multitouch {
            self.abandon_drags();
            return;
        }
        if self.sheet.dragging() {
            self.sheet.drag_to(sample.y);
            return;
        }
        if self.routing.swipe_blocked || self.classifier.is_native() {
            return;
        }
        if state.kind == GestureKind::Scroll {
            self.abandon_drags();
            return;
        }
        if self.routing.swipe_back {
            self.navigator.drag_to(sample.x, sample.timestamp);
            return;
        }

        // A rightward horizontal swipe on a poppable stack becomes swipe-back,
        // measured from where the finger first went down.
        let wants_back = state.kind == GestureKind::Swipe
            && state.direction == Direction::Right
            && self.sheet.content().is_none();
        let Some((origin_x, origin_at)) = self
            .classifier
            .origin()
            .filter(|_| wants_back)
            .map(|origin| (origin.x, origin.timestamp))
        else {
            return;
        };
        if self.navigator.begin_drag(origin_x, origin_at) {
            self.routing.swipe_back = true;
            self.navigator.drag_to(sample.x, sample.timestamp);
        }
    }

    /// Returns whether a drag consumed the session.
    fn release_drags(
        &mut self,
        sample: &PointerSample,
        at: Millis,
        out: &mut Vec<ShellEffect>,
    ) -> bool {
        let mut consumed = false;
        if self.sheet.dragging() {
            consumed = true;
            if let Some(hiding) = self.sheet.release_drag(sample.y, at) {
                self.route_sheet(hiding, at, out);
            }
        }
        if self.routing.swipe_back {
            consumed |= self.navigator.release_drag(sample.x, at) != SwipeRelease::Ignored;
        }
        consumed
    }

    fn abandon_drags(&mut self) {
        self.sheet.cancel_drag();
        if self.routing.swipe_back {
            self.navigator.abandon_drag();
        }
        self.routing.swipe_back = false;
        self.routing.swipe_blocked = true;
    }

    fn route_sheet(&mut self, effect: SheetEffect<Sheet>, at: Millis, out: &mut Vec<ShellEffect>) {
        let cancelled = match &effect {
            SheetEffect::Hiding {
                content,
                reason: DismissReason::User,
            } => content.precondition(),
            _ => None,
        };
        out.push(ShellEffect::Sheet(effect));

        if let Some(step) = cancelled.filter(|step| self.queue.awaiting() == Some(*step)) {
            let queued = self.queue.cancel(step);
            self.route_queue(queued, at, out);
        }
    }

    fn route_queue(&mut self, effects: Vec<QueueEffect>, at: Millis, out: &mut Vec<ShellEffect>) {
        for effect in effects {
            let hiding = match &effect {
                QueueEffect::Acquire { precondition } => {
                    self.sheet.show(Sheet::acquiring(*precondition), at);
                    None
                }
                // Close the acquisition sheet unless the next step replaces it.
                QueueEffect::Satisfied { precondition } => {
                    let showing = self.sheet.content() == Some(&Sheet::acquiring(*precondition));
                    if showing && self.queue.awaiting().is_none() {
                        self.sheet.hide(DismissReason::Programmatic, at)
                    } else {
                        None
                    }
                }
                QueueEffect::Dispatch { intent } => {
                    self.dispatch(intent);
                    None
                }
                QueueEffect::Discarded { .. } => None,
            };
            out.push(ShellEffect::Queue(effect));
            if let Some(hiding) = hiding {
                self.route_sheet(hiding, at, out);
            }
        }
    }

    fn dispatch(&mut self, intent: &DeferredIntent) {
        match self.handler.as_mut() {
            Some(handler) => {
                debug!(kind = ?intent.kind(), "running intent handler");
                intent.dispatch(&mut **handler);
            }
            None => warn!(kind = ?intent.kind(), "no intent handler installed, intent dropped"),
        }
    }

    fn resolve_deep_link(&mut self, now: Millis) -> Option<ShellEffect> {
        let item = self.pending_link.as_ref()?;
        let screen = Screen::item_detail(&self.snapshot, item)?;
        info!(%item, "deep link resolved");
        self.pending_link = None;
        Some(ShellEffect::Nav(self.navigator.push_deep_link(screen, now)))
    }
}
