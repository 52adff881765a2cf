use serde::{Deserialize, Serialize};

use crate::data::{ItemId, OrderId, UserId};

/// A privileged action the user started before its preconditions held.
/// Each variant carries just enough to resume the action later.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "intent", rename_all = "snake_case")]
pub enum DeferredIntent {
    Buy { item: ItemId },
    StartChat { seller: UserId, item: Option<ItemId> },
    CreateListing,
    ToggleFavorite { item: ItemId },
    Report { item: ItemId },
    OpenDispute { order: OrderId },
    ConfirmReceipt { order: OrderId },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IntentKind {
    Buy,
    StartChat,
    CreateListing,
    ToggleFavorite,
    Report,
    OpenDispute,
    ConfirmReceipt,
}

/// Content-layer handlers, one per intent variant.
pub trait IntentHandler {
    fn buy(&mut self, item: &ItemId);
    fn start_chat(&mut self, seller: &UserId, item: Option<&ItemId>);
    fn create_listing(&mut self);
    fn toggle_favorite(&mut self, item: &ItemId);
    fn report(&mut self, item: &ItemId);
    fn open_dispute(&mut self, order: &OrderId);
    fn confirm_receipt(&mut self, order: &OrderId);
}

impl DeferredIntent {
    pub fn kind(&self) -> IntentKind {
        match self {
            Self::Buy { .. } => IntentKind::Buy,
            Self::StartChat { .. } => IntentKind::StartChat,
            Self::CreateListing => IntentKind::CreateListing,
            Self::ToggleFavorite { .. } => IntentKind::ToggleFavorite,
            Self::Report { .. } => IntentKind::Report,
            Self::OpenDispute { .. } => IntentKind::OpenDispute,
            Self::ConfirmReceipt { .. } => IntentKind::ConfirmReceipt,
        }
    }

    pub fn dispatch(&self, handler: &mut dyn IntentHandler) {
        match self {
            Self::Buy { item } => handler.buy(item),
            Self::StartChat { seller, item } => handler.start_chat(seller, item.as_ref()),
            Self::CreateListing => handler.create_listing(),
            Self::ToggleFavorite { item } => handler.toggle_favorite(item),
            Self::Report { item } => handler.report(item),
            Self::OpenDispute { order } => handler.open_dispute(order),
            Self::ConfirmReceipt { order } => handler.confirm_receipt(order),
        }
    }
}
