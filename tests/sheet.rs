mod common;

use common::*;
use std::sync::Arc;
use swipestack::config::{Config, SheetConfig};
use swipestack::content::Sheet;
use swipestack::data::ItemId;
use swipestack::ui::deferred::{DeferredIntent, IntentKind, QueueEffect};
use swipestack::ui::gesture::{PointerEvent, TargetKind};
use swipestack::ui::sheet::{DismissReason, DragOrigin, ModalOverlayController, SheetEffect};
use swipestack::ui::shell::{Shell, ShellEffect};

fn controller() -> ModalOverlayController<Sheet> {
    ModalOverlayController::new(SheetConfig::default())
}

fn filters() -> Sheet {
    Sheet::Custom {
        name: "filters".to_string(),
    }
}

fn revealed() -> ModalOverlayController<Sheet> {
    let mut sheet = controller();
    sheet.show(filters(), 0);
    sheet.on_timers(32);
    sheet
}

/// Test that show defers the visible flip by the reveal delay.
#[test]
fn test_show_defers_visibility() {
    let mut sheet = controller();
    sheet.show(filters(), 0);
    assert_eq!(sheet.content(), Some(&filters()));
    assert!(!sheet.state().visible);
    assert!(sheet.on_timers(31).is_empty());
    assert_eq!(
        sheet.on_timers(32),
        vec![SheetEffect::Shown { content: filters() }]
    );
    assert!(sheet.state().visible);
}

/// Test that hide runs the exit animation and clears content afterwards.
#[test]
fn test_hide_clears_after_exit() {
    let mut sheet = revealed();
    let hiding = sheet.hide(DismissReason::Programmatic, 100);
    assert_eq!(
        hiding,
        Some(SheetEffect::Hiding {
            content: filters(),
            reason: DismissReason::Programmatic
        })
    );
    assert!(sheet.state().closing);
    assert!(!sheet.is_open());
    assert!(sheet.on_timers(399).is_empty());
    assert_eq!(
        sheet.on_timers(400),
        vec![SheetEffect::Cleared {
            reason: DismissReason::Programmatic
        }]
    );
    assert!(sheet.content().is_none());
    assert!(!sheet.state().closing);
}

/// Test that hide while closing or while empty is a no-op.
#[test]
fn test_hide_is_flag_guarded() {
    let mut sheet = controller();
    assert_eq!(sheet.hide(DismissReason::User, 0), None);

    let mut sheet = revealed();
    assert!(sheet.hide(DismissReason::User, 100).is_some());
    assert_eq!(sheet.hide(DismissReason::User, 150), None);
    assert_eq!(sheet.next_deadline(), Some(400));
}

/// Test that showing again replaces content and supersedes the old reveal.
#[test]
fn test_show_replaces_content() {
    let mut sheet = controller();
    sheet.show(Sheet::ConnectSession, 0);
    sheet.show(Sheet::LocationSetup, 10);
    assert!(sheet.on_timers(32).is_empty());
    assert_eq!(
        sheet.on_timers(42),
        vec![SheetEffect::Shown {
            content: Sheet::LocationSetup
        }]
    );
}

/// Test that showing during the exit animation cancels the pending clear.
#[test]
fn test_show_during_exit_wins() {
    let mut sheet = revealed();
    sheet.hide(DismissReason::User, 100);
    sheet.show(Sheet::LocationSetup, 150);
    let effects = sheet.on_timers(1_000);
    assert_eq!(
        effects,
        vec![SheetEffect::Shown {
            content: Sheet::LocationSetup
        }]
    );
    assert_eq!(sheet.content(), Some(&Sheet::LocationSetup));
}

/// Test that dragging the handle past the dismiss distance dismisses, with
/// the backdrop fading along the way.
#[test]
fn test_handle_drag_dismisses() {
    let mut sheet = revealed();
    assert!(sheet.begin_drag(DragOrigin::Handle, 100.0));
    sheet.drag_to(160.0);
    assert!((sheet.backdrop_opacity() - 0.25).abs() < 1e-9);

    let released = sheet.release_drag(260.0, 500);
    assert_eq!(
        released,
        Some(SheetEffect::Hiding {
            content: filters(),
            reason: DismissReason::User
        })
    );
    assert_eq!(sheet.backdrop_opacity(), 0.0);
}

/// Test that a short drag springs back and restores the backdrop.
#[test]
fn test_short_drag_springs_back() {
    let mut sheet = revealed();
    sheet.begin_drag(DragOrigin::Handle, 100.0);
    assert_eq!(sheet.release_drag(150.0, 500), None);
    assert!(sheet.is_open());
    assert!(!sheet.dragging());
    assert_eq!(sheet.backdrop_opacity(), 0.5);
}

/// Test that the body can only drag the sheet when scrolled to the top.
#[test]
fn test_body_drag_needs_scroll_top() {
    let mut sheet = revealed();
    assert!(!sheet.begin_drag(DragOrigin::Body { scroll_top: 40.0 }, 100.0));
    assert!(sheet.begin_drag(DragOrigin::Body { scroll_top: 0.0 }, 100.0));
}

/// Test that a sheet still waiting for its reveal can't be dragged.
#[test]
fn test_no_drag_before_reveal() {
    let mut sheet = controller();
    sheet.show(filters(), 0);
    assert!(!sheet.begin_drag(DragOrigin::Handle, 100.0));
}

/// Test that the user dismissing an acquisition sheet discards the intent.
#[test]
fn test_dismissing_acquisition_sheet_discards_intent() {
    let recorder = Recorder::default();
    let mut shell = Shell::new(&Config::default());
    shell.set_handler(recorder.clone());

    shell.record_intent(
        DeferredIntent::Buy {
            item: ItemId::new("x"),
        },
        0,
    );
    shell.advance(32);
    assert_eq!(shell.sheet().content(), Some(&Sheet::ConnectSession));

    let effects = shell.dismiss_sheet(100);
    assert!(effects.contains(&ShellEffect::Queue(QueueEffect::Discarded {
        kind: IntentKind::Buy
    })));
    assert!(shell.queue().state().is_empty());

    shell.apply_snapshot(Arc::new(ready_snapshot()), 200);
    assert!(recorder.calls().is_empty());
}

/// Test that pointer drags on the handle dismiss the sheet through the shell
/// without leaking a swipe to the content.
#[test]
fn test_pointer_drag_on_handle_dismisses() {
    let mut shell = Shell::new(&Config::default());
    shell.show_sheet(filters(), 0);
    shell.advance(32);

    let mut effects = Vec::new();
    for event in [
        down(1, 50.0, 100.0, 100),
        move_to(1, 50.0, 200.0, 150),
        up(1, 50.0, 260.0, 200),
    ] {
        effects.extend(shell.pointer(on(event, "grabber", TargetKind::SheetHandle)));
    }

    assert!(effects.contains(&ShellEffect::Sheet(SheetEffect::Hiding {
        content: filters(),
        reason: DismissReason::User
    })));
    assert!(effects
        .iter()
        .all(|effect| !matches!(effect, ShellEffect::Gesture(_))));
}

fn drag_down(target: &str, kind: TargetKind, at: u64) -> Vec<PointerEvent> {
    [
        down(1, 50.0, 100.0, at),
        move_to(1, 50.0, 200.0, at + 50),
        up(1, 50.0, 260.0, at + 100),
    ]
    .into_iter()
    .map(|event| on(event, target, kind))
    .collect()
}

/// Test that a drag on the page behind an open sheet never dismisses it,
/// while the same drag inside the sheet body does.
#[test]
fn test_only_drags_inside_sheet_dismiss() {
    let mut shell = Shell::new(&Config::default());
    shell.show_sheet(filters(), 0);
    shell.advance(32);

    let mut behind = Vec::new();
    for event in drag_down(SURFACE, TargetKind::Plain, 100) {
        behind.extend(shell.pointer(event));
    }
    assert!(!behind
        .iter()
        .any(|effect| matches!(effect, ShellEffect::Sheet(_))));
    assert!(shell.sheet().is_open());

    let mut inside = Vec::new();
    for event in drag_down("filters-list", TargetKind::SheetBody, 500) {
        inside.extend(shell.pointer(event));
    }
    assert!(inside.contains(&ShellEffect::Sheet(SheetEffect::Hiding {
        content: filters(),
        reason: DismissReason::User
    })));
}

/// Test that a body drag is ignored while the sheet content is scrolled.
#[test]
fn test_scrolled_body_drag_keeps_sheet() {
    let mut shell = Shell::new(&Config::default());
    shell.show_sheet(filters(), 0);
    shell.advance(32);
    shell.set_sheet_scroll_top(120.0);

    let mut effects = Vec::new();
    for event in drag_down("filters-list", TargetKind::SheetBody, 100) {
        effects.extend(shell.pointer(event));
    }
    assert!(!effects
        .iter()
        .any(|effect| matches!(effect, ShellEffect::Sheet(_))));
    assert!(shell.sheet().is_open());
}
