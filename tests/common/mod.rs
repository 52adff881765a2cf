//! Shared test utilities: pointer builders, a recording intent handler and
//! temp config files.

#![allow(dead_code, unused_imports)]

use parking_lot::Mutex;
use std::path::PathBuf;
use std::sync::Arc;
use swipestack::config::Config;
use swipestack::data::{Item, ItemId, Location, OrderId, Session, Snapshot, UserId};
use swipestack::ui::deferred::{DeferredIntent, IntentHandler};
use swipestack::ui::gesture::{
    GestureAction, GestureClassifier, PointerEvent, PointerSample, TargetKind, TargetRef,
};
use swipestack::ui::timer::Millis;
use tempfile::TempDir;

pub const SURFACE: &str = "surface";

pub fn sample(pointer: u32, x: f64, y: f64, at: Millis) -> PointerSample {
    PointerSample::new(pointer, x, y, at, TargetRef::plain(SURFACE))
}

pub fn down(pointer: u32, x: f64, y: f64, at: Millis) -> PointerEvent {
    PointerEvent::Down(sample(pointer, x, y, at))
}

pub fn move_to(pointer: u32, x: f64, y: f64, at: Millis) -> PointerEvent {
    PointerEvent::Move(sample(pointer, x, y, at))
}

pub fn up(pointer: u32, x: f64, y: f64, at: Millis) -> PointerEvent {
    PointerEvent::Up(sample(pointer, x, y, at))
}

pub fn cancel(pointer: u32, x: f64, y: f64, at: Millis) -> PointerEvent {
    PointerEvent::Cancel(sample(pointer, x, y, at))
}

/// Same event, landing on a target of another kind.
pub fn on(event: PointerEvent, id: &str, kind: TargetKind) -> PointerEvent {
    let retarget = |mut sample: PointerSample| {
        sample.target = TargetRef::new(id, kind);
        sample
    };
    match event {
        PointerEvent::Down(s) => PointerEvent::Down(retarget(s)),
        PointerEvent::Move(s) => PointerEvent::Move(retarget(s)),
        PointerEvent::Up(s) => PointerEvent::Up(retarget(s)),
        PointerEvent::Cancel(s) => PointerEvent::Cancel(retarget(s)),
    }
}

/// Feed `events` in order, firing classifier timers that fall due strictly
/// before each event. Returns every action fired, timers included.
pub fn classify(classifier: &mut GestureClassifier, events: &[PointerEvent]) -> Vec<GestureAction> {
    let mut actions = Vec::new();
    for event in events {
        actions.extend(classifier.on_timers(event.timestamp().saturating_sub(1)));
        actions.extend(classifier.handle(event).action);
    }
    actions
}

/// Handler that records every dispatched intent.
#[derive(Clone, Default)]
pub struct Recorder {
    calls: Arc<Mutex<Vec<DeferredIntent>>>,
}

impl Recorder {
    pub fn calls(&self) -> Vec<DeferredIntent> {
        self.calls.lock().clone()
    }

    fn push(&self, intent: DeferredIntent) {
        self.calls.lock().push(intent);
    }
}

impl IntentHandler for Recorder {
    fn buy(&mut self, item: &ItemId) {
        self.push(DeferredIntent::Buy { item: item.clone() });
    }

    fn start_chat(&mut self, seller: &UserId, item: Option<&ItemId>) {
        self.push(DeferredIntent::StartChat {
            seller: seller.clone(),
            item: item.cloned(),
        });
    }

    fn create_listing(&mut self) {
        self.push(DeferredIntent::CreateListing);
    }

    fn toggle_favorite(&mut self, item: &ItemId) {
        self.push(DeferredIntent::ToggleFavorite { item: item.clone() });
    }

    fn report(&mut self, item: &ItemId) {
        self.push(DeferredIntent::Report { item: item.clone() });
    }

    fn open_dispute(&mut self, order: &OrderId) {
        self.push(DeferredIntent::OpenDispute {
            order: order.clone(),
        });
    }

    fn confirm_receipt(&mut self, order: &OrderId) {
        self.push(DeferredIntent::ConfirmReceipt {
            order: order.clone(),
        });
    }
}

pub fn item(id: &str, price: u64) -> Item {
    Item {
        id: ItemId::new(id),
        title: format!("Item {}", id),
        price,
        seller: UserId::new("seller-1"),
    }
}

pub fn session() -> Session {
    Session {
        account: UserId::new("buyer-1"),
    }
}

pub fn minsk() -> Location {
    Location {
        city: "Minsk".to_string(),
    }
}

/// Snapshot with a connected session and a location.
pub fn ready_snapshot() -> Snapshot {
    Snapshot {
        session: Some(session()),
        location: Some(minsk()),
        ..Snapshot::default()
    }
}

/// Write `content` to a config.toml inside a fresh temp dir.
pub fn temp_config(content: &str) -> (TempDir, PathBuf) {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let config_path = temp_dir.path().join("config.toml");
    std::fs::write(&config_path, content).expect("Failed to write config");
    (temp_dir, config_path)
}
