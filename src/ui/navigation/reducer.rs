use std::marker::PhantomData;

use crate::ui::mvi::Reducer;

use super::frame::{Frame, FrameId, ScreenContent};
use super::intent::NavIntent;
use super::state::NavState;

/// Reducer for the per-section stacks.
///
/// User navigation and background refresh both land here, and each returns
/// a whole new state, so a refresh can never interleave with a push or pop.
pub struct NavReducer<C>(PhantomData<fn() -> C>);

impl<C: ScreenContent> Reducer for NavReducer<C> {
    type State = NavState<C>;
    type Intent = NavIntent<C>;

    fn reduce(mut state: Self::State, intent: Self::Intent) -> Self::State {
        match intent {
            NavIntent::Push {
                content,
                from_deep_link,
            } => {
                state.last_id += 1;
                let frame = Frame::new(FrameId(state.last_id), content, from_deep_link);
                state
                    .sections
                    .entry(state.active.clone())
                    .or_default()
                    .push(frame);
                state
            }

            NavIntent::Pop => {
                if let Some(stack) = state.sections.get_mut(&state.active) {
                    stack.pop();
                }
                state
            }

            NavIntent::SelectSection(key) => {
                if !state.sections.contains_key(&key) {
                    return state;
                }
                if key == state.active {
                    // Go to root
                    if let Some(stack) = state.sections.get_mut(&key) {
                        stack.clear();
                    }
                } else {
                    state.active = key;
                }
                state
            }

            NavIntent::Refresh(snapshot) => NavState {
                sections: state
                    .sections
                    .into_iter()
                    .map(|(key, frames)| {
                        let frames = frames
                            .into_iter()
                            .map(|frame| frame.reconciled(&snapshot))
                            .collect();
                        (key, frames)
                    })
                    .collect(),
                ..state
            },

            NavIntent::MarkEntered(id) => {
                if let Some(frame) = state
                    .sections
                    .values_mut()
                    .flatten()
                    .find(|frame| frame.id == id)
                {
                    frame.entered = true;
                }
                state
            }
        }
    }
}
