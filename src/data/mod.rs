//! Externally-owned shared data the core renders against.
//!
//! The core never fetches or persists any of this. Hosts hand in a new
//! [`Snapshot`] whenever their caches change; the navigation stack reconciles
//! against it and the intent queue reads its preconditions from it.

mod store;

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::ui::deferred::Preconditions;

pub use store::SnapshotStore;

macro_rules! string_id {
    ($name:ident) => {
        #[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(pub String);

        impl $name {
            pub fn new(id: impl Into<String>) -> Self {
                Self(id.into())
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }
    };
}

string_id!(ItemId);
string_id!(UserId);
string_id!(OrderId);

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Item {
    pub id: ItemId,
    pub title: String,
    /// Price in minor units of the listing currency.
    pub price: u64,
    pub seller: UserId,
}

/// Connected wallet session.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub account: UserId,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Location {
    pub city: String,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    #[serde(default)]
    pub session: Option<Session>,
    #[serde(default)]
    pub location: Option<Location>,
    #[serde(default)]
    pub items: BTreeMap<ItemId, Item>,
    #[serde(default)]
    pub favorites: BTreeSet<ItemId>,
    #[serde(default)]
    pub open_disputes: BTreeSet<OrderId>,
}

impl Snapshot {
    pub fn preconditions(&self) -> Preconditions {
        Preconditions {
            session: self.session.is_some(),
            location: self.location.is_some(),
        }
    }

    pub fn item(&self, id: &ItemId) -> Option<&Item> {
        self.items.get(id)
    }

    pub fn with_items(mut self, items: impl IntoIterator<Item = Item>) -> Self {
        self.items
            .extend(items.into_iter().map(|item| (item.id.clone(), item)));
        self
    }
}
