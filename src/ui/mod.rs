//! Headless interaction core: gestures, navigation, deferred intents and the
//! transient sheet, composed by [`shell::Shell`].

pub mod deferred;
pub mod events;
pub mod gesture;
pub mod mvi;
pub mod navigation;
pub mod runtime;
pub mod sheet;
pub mod shell;
pub mod timer;
