mod common;

use common::*;
use std::sync::Arc;
use swipestack::config::Config;
use swipestack::content::Screen;
use swipestack::data::{ItemId, Snapshot, UserId};
use swipestack::ui::navigation::{
    FrameActivity, FrameId, FrameStatus, NavEffect, Navigator, SectionKey,
};

fn navigator() -> Navigator<Screen> {
    Navigator::new(&Config::default())
}

fn route(name: &str) -> Screen {
    Screen::Custom {
        route: name.to_string(),
    }
}

fn detail(id: &str, price: u64) -> Screen {
    Screen::ItemDetail {
        item: item(id, price),
        favorite: false,
    }
}

fn home() -> SectionKey {
    SectionKey::new("home")
}

fn wallet() -> SectionKey {
    SectionKey::new("wallet")
}

/// Test that push followed by pop restores the prior length and top frame.
#[test]
fn test_push_pop_restores_previous_top() {
    let mut nav = navigator();
    nav.push(route("feed"), 0);
    let before_len = nav.state().depth();
    let before_top = nav.state().top().map(|frame| frame.id);

    let pushed = nav.push(route("details"), 10);
    assert!(matches!(pushed, NavEffect::Pushed { .. }));
    assert_eq!(nav.state().depth(), before_len + 1);

    let popped = nav.pop();
    assert!(matches!(popped.as_slice(), [NavEffect::Popped { .. }]));
    assert_eq!(nav.state().depth(), before_len);
    assert_eq!(nav.state().top().map(|frame| frame.id), before_top);
}

/// Test that pop on an empty stack is a silent no-op.
#[test]
fn test_pop_on_empty_is_noop() {
    let mut nav = navigator();
    assert!(nav.pop().is_empty());
    assert_eq!(nav.state().depth(), 0);
}

/// Test that frame ids are monotonic and never reused, even across sections.
#[test]
fn test_frame_ids_are_never_reused() {
    let mut nav = navigator();
    nav.push(route("a"), 0);
    let first = nav.state().top().map(|frame| frame.id);
    nav.pop();
    nav.push(route("b"), 0);
    let second = nav.state().top().map(|frame| frame.id);
    nav.select_section(wallet());
    nav.push(route("c"), 0);
    let third = nav.state().top().map(|frame| frame.id);

    assert_eq!(first, Some(FrameId(1)));
    assert_eq!(second, Some(FrameId(2)));
    assert_eq!(third, Some(FrameId(3)));
}

/// Test that switching sections keeps each stack, and re-selecting the active
/// section collapses it to root.
#[test]
fn test_sections_keep_their_stacks() {
    let mut nav = navigator();
    nav.push(route("feed"), 0);
    nav.push(route("details"), 0);

    let changed = nav.select_section(wallet());
    assert_eq!(
        changed,
        vec![NavEffect::SectionChanged {
            from: home(),
            to: wallet()
        }]
    );
    assert_eq!(nav.state().depth(), 0);
    nav.push(route("balance"), 0);

    nav.select_section(home());
    assert_eq!(nav.state().depth(), 2);
    assert_eq!(nav.state().stack(&wallet()).len(), 1);

    let collapsed = nav.select_section(home());
    assert_eq!(
        collapsed,
        vec![NavEffect::Collapsed {
            section: home(),
            removed: 2
        }]
    );
    assert_eq!(nav.state().depth(), 0);
    assert!(nav.select_section(home()).is_empty());
}

/// Test that an unknown section is ignored.
#[test]
fn test_unknown_section_is_ignored() {
    let mut nav = navigator();
    assert!(nav.select_section(SectionKey::new("admin")).is_empty());
    assert_eq!(nav.state().active_section(), &home());
}

/// Test that refresh re-resolves frames in every section against the snapshot.
#[test]
fn test_refresh_reconciles_all_sections() {
    let mut nav = navigator();
    nav.push(detail("lamp", 1_500), 0);
    nav.select_section(wallet());
    nav.push(detail("chair", 9_000), 0);

    let snapshot = Snapshot::default().with_items([item("lamp", 1_200), item("chair", 9_000)]);
    nav.refresh(Arc::new(snapshot));

    let lamp = &nav.state().stack(&home())[0];
    assert_eq!(lamp.id, FrameId(1));
    assert_eq!(lamp.status, FrameStatus::Live);
    assert!(matches!(&lamp.content, Screen::ItemDetail { item, .. } if item.price == 1_200));
}

/// Test that a deleted item leaves its frame in place, marked missing, until
/// the item comes back.
#[test]
fn test_deleted_item_keeps_frame_in_place() {
    let mut nav = navigator();
    nav.push(route("feed"), 0);
    nav.push(detail("lamp", 1_500), 0);

    nav.refresh(Arc::new(Snapshot::default()));
    assert_eq!(nav.state().depth(), 2);
    let top = nav.state().top().map(|frame| (frame.id, frame.status));
    assert_eq!(top, Some((FrameId(2), FrameStatus::Missing)));

    nav.refresh(Arc::new(Snapshot::default().with_items([item("lamp", 1_500)])));
    assert_eq!(
        nav.state().top().map(|frame| frame.status),
        Some(FrameStatus::Live)
    );
}

/// Test that only the top two frames are active; deeper frames are inert.
#[test]
fn test_only_top_two_frames_animate() {
    let mut nav = navigator();
    for name in ["a", "b", "c", "d"] {
        nav.push(route(name), 0);
    }
    let activity: Vec<FrameActivity> = nav
        .state()
        .activity(&home())
        .into_iter()
        .map(|(_, activity)| activity)
        .collect();
    assert_eq!(
        activity,
        vec![
            FrameActivity::Inert,
            FrameActivity::Inert,
            FrameActivity::Underlay,
            FrameActivity::Active
        ]
    );
}

/// Test that the entry tick marks the pushed frame as entered.
#[test]
fn test_entry_tick_follows_push() {
    let mut nav = navigator();
    nav.push(route("a"), 100);
    assert_eq!(nav.next_deadline(), Some(116));
    assert_eq!(nav.state().top().map(|frame| frame.entered), Some(false));

    let effects = nav.on_timers(116);
    assert_eq!(effects, vec![NavEffect::Entered { frame: FrameId(1) }]);
    assert_eq!(nav.state().top().map(|frame| frame.entered), Some(true));
}

/// Test that popping before the entry tick drops the tick with the frame.
#[test]
fn test_pop_cancels_pending_entry_tick() {
    let mut nav = navigator();
    nav.push(route("a"), 0);
    nav.pop();
    assert_eq!(nav.next_deadline(), None);
    assert!(nav.on_timers(1_000).is_empty());
}

/// Test that popping the deep-linked screen strips the parameter, but popping
/// screens above it does not.
#[test]
fn test_popping_deep_linked_frame_clears_deep_link() {
    let mut nav = navigator();
    nav.hold_deep_link("lamp");
    nav.push_deep_link(detail("lamp", 1_500), 0);
    nav.push(
        Screen::Chat {
            seller: UserId::new("seller-1"),
            item: Some(ItemId::new("lamp")),
        },
        0,
    );
    assert!(nav.state().active_stack()[0].from_deep_link);

    let first = nav.pop();
    assert_eq!(first.len(), 1);
    assert_eq!(nav.deep_link(), Some("lamp"));

    let last = nav.pop();
    assert_eq!(
        last.last(),
        Some(&NavEffect::DeepLinkCleared {
            param: "item".to_string()
        })
    );
    assert_eq!(nav.deep_link(), None);
}

/// Test that emptying another section leaves the deep link alone while its
/// screen is still stacked in the section it opened in.
#[test]
fn test_deep_link_survives_pops_in_other_sections() {
    let mut nav = navigator();
    nav.hold_deep_link("lamp");
    nav.push_deep_link(detail("lamp", 1_500), 0);

    nav.select_section(wallet());
    nav.push(route("balance"), 10);
    let popped = nav.pop();
    assert_eq!(popped.len(), 1);
    assert!(matches!(popped[0], NavEffect::Popped { .. }));
    assert_eq!(nav.deep_link(), Some("lamp"));
    assert_eq!(nav.state().stack(&home()).len(), 1);

    nav.select_section(home());
    let back = nav.pop();
    assert_eq!(
        back.last(),
        Some(&NavEffect::DeepLinkCleared {
            param: "item".to_string()
        })
    );
}

/// Test that a link still waiting for its lookup is not stripped by popping
/// an unrelated screen.
#[test]
fn test_pending_deep_link_survives_unrelated_pop() {
    let mut nav = navigator();
    nav.push(route("feed"), 0);
    nav.hold_deep_link("lamp");
    assert_eq!(nav.pop().len(), 1);
    assert_eq!(nav.deep_link(), Some("lamp"));
}

/// Test that collapsing the section holding the deep-linked screen strips the
/// parameter along with it.
#[test]
fn test_collapse_clears_deep_link() {
    let mut nav = navigator();
    nav.hold_deep_link("lamp");
    nav.push_deep_link(detail("lamp", 1_500), 0);
    nav.push(route("chat"), 0);

    let effects = nav.select_section(home());
    assert_eq!(
        effects,
        vec![
            NavEffect::Collapsed {
                section: home(),
                removed: 2
            },
            NavEffect::DeepLinkCleared {
                param: "item".to_string()
            },
        ]
    );
    assert_eq!(nav.deep_link(), None);
}

/// Test that swipe-back cannot start on an empty stack.
#[test]
fn test_swipe_back_disabled_at_root() {
    let mut nav = navigator();
    assert!(!nav.begin_drag(0.0, 0));
    nav.push(route("a"), 0);
    assert!(nav.begin_drag(0.0, 0));
}
