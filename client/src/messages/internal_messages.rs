use crate::store::SubscriptionHandle;
use crate::ui::view_state::TrackerView;
use actix::prelude::*;
use common::errors::StoreError;
use common::types::dtos::OrderDTO;

// Tracker

/// Switches the tracker to another order id. An empty id stops tracking.
#[derive(Message, Debug, Clone)]
#[rtype(result = "()")]
pub struct TrackOrder {
    pub order_id: String,
}

/// Returns the view the tracker currently renders.
#[derive(Message, Debug, Clone)]
#[rtype(result = "TrackerView")]
pub struct GetView;

/// The "Back to Menu" action.
#[derive(Message, Debug, Clone)]
#[rtype(result = "()")]
pub struct GoBack;

/// Outcome of a fetch issued while `epoch` was current.
#[derive(Message, Debug, Clone)]
#[rtype(result = "()")]
pub struct FetchCompleted {
    pub epoch: u64,
    pub result: Result<Option<OrderDTO>, StoreError>,
}

/// A snapshot delivered by a push subscription.
#[derive(Message, Debug, Clone)]
#[rtype(result = "()")]
pub struct OrderPushed {
    pub order: OrderDTO,
}

// UI

#[derive(Message, Debug, Clone)]
#[rtype(result = "()")]
pub struct ShowView {
    pub view: TrackerView,
}

// Store connection

#[derive(Message, Debug, Clone)]
#[rtype(result = "Result<Option<OrderDTO>, StoreError>")]
pub struct RequestOrder {
    pub order_id: String,
}

#[derive(Message, Clone)]
#[rtype(result = "Result<SubscriptionHandle, StoreError>")]
pub struct OpenSubscription {
    pub order_id: String,
    pub on_change: Recipient<OrderPushed>,
}

#[derive(Message, Debug, Clone)]
#[rtype(result = "()")]
pub struct CloseSubscription {
    pub handle: SubscriptionHandle,
}
