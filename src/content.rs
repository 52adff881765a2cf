//! Screen and sheet descriptors for the marketplace client.
//!
//! Descriptors carry just enough to render the screen from the current
//! [`Snapshot`]. They re-resolve against every new snapshot instead of
//! freezing whatever they were pushed with.

use serde::{Deserialize, Serialize};

use crate::data::{Item, ItemId, OrderId, Snapshot, UserId};
use crate::ui::deferred::Precondition;
use crate::ui::navigation::{Reconciled, ScreenContent};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "screen", rename_all = "snake_case")]
pub enum Screen {
    ItemDetail {
        item: Item,
        #[serde(default)]
        favorite: bool,
    },
    Checkout {
        item: Item,
    },
    Chat {
        seller: UserId,
        #[serde(default)]
        item: Option<ItemId>,
    },
    SellerProfile {
        seller: UserId,
    },
    Dispute {
        order: OrderId,
        #[serde(default)]
        open: bool,
    },
    /// Anything the core has no data references for.
    Custom {
        route: String,
    },
}

impl Screen {
    /// Detail screen for `id`, if the snapshot knows the item.
    pub fn item_detail(snapshot: &Snapshot, id: &ItemId) -> Option<Self> {
        snapshot.item(id).map(|item| Self::ItemDetail {
            item: item.clone(),
            favorite: snapshot.favorites.contains(id),
        })
    }

    fn updated_if_changed(&self, fresh: Self) -> Reconciled<Self> {
        if fresh == *self {
            Reconciled::Unchanged
        } else {
            Reconciled::Updated(fresh)
        }
    }
}

impl ScreenContent for Screen {
    type Snapshot = Snapshot;

    fn reconcile(&self, snapshot: &Snapshot) -> Reconciled<Self> {
        match self {
            Self::ItemDetail { item, .. } => match Self::item_detail(snapshot, &item.id) {
                Some(fresh) => self.updated_if_changed(fresh),
                None => Reconciled::Missing,
            },
            Self::Checkout { item } => match snapshot.item(&item.id) {
                Some(fresh) => self.updated_if_changed(Self::Checkout {
                    item: fresh.clone(),
                }),
                None => Reconciled::Missing,
            },
            Self::Chat {
                item: Some(item), ..
            } if snapshot.item(item).is_none() => Reconciled::Missing,
            Self::Dispute { order, .. } => self.updated_if_changed(Self::Dispute {
                order: order.clone(),
                open: snapshot.open_disputes.contains(order),
            }),
            Self::Chat { .. } | Self::SellerProfile { .. } | Self::Custom { .. } => {
                Reconciled::Unchanged
            }
        }
    }
}

/// What the single sheet slot can hold.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "sheet", rename_all = "snake_case")]
pub enum Sheet {
    ConnectSession,
    LocationSetup,
    Custom { name: String },
}

impl Sheet {
    pub fn acquiring(precondition: Precondition) -> Self {
        match precondition {
            Precondition::Session => Self::ConnectSession,
            Precondition::Location => Self::LocationSetup,
        }
    }

    /// The precondition this sheet acquires, if it is an acquisition step.
    pub fn precondition(&self) -> Option<Precondition> {
        match self {
            Self::ConnectSession => Some(Precondition::Session),
            Self::LocationSetup => Some(Precondition::Location),
            Self::Custom { .. } => None,
        }
    }
}
