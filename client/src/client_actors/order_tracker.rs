use crate::messages::internal_messages::{
    FetchCompleted, GetView, GoBack, OrderPushed, ShowView, TrackOrder,
};
use crate::navigator::Navigator;
use crate::notifier::{FETCH_FAILED_MESSAGE, Notifier, READY_MESSAGE};
use crate::store::{OrderStore, SubscriptionHandle};
use crate::ui::view_state::{OrderCard, TrackerView};
use actix::prelude::*;
use colored::Color;
use common::constants::POLL_INTERVAL;
use common::logger::Logger;
use common::types::dtos::OrderDTO;
use std::sync::Arc;
use std::time::Duration;

/// Keeps the view of one order fresh.
///
/// Two producers feed the same "current order" slot: a fetch re-issued every
/// `poll_interval`, and a push subscription scoped to the order id. Both only
/// ever reach the slot through this actor's mailbox, so the latest snapshot to
/// arrive is the one rendered. Stopping the actor (or switching ids with
/// [`TrackOrder`]) cancels the timer and releases the subscription; results
/// issued before that point are discarded by comparing `epoch`.
pub struct OrderTracker {
    order_id: String,
    store: Arc<dyn OrderStore>,
    notifier: Arc<dyn Notifier>,
    navigator: Arc<dyn Navigator>,
    view_sink: Option<Recipient<ShowView>>,
    poll_interval: Duration,
    view: TrackerView,
    /// Bumped on every teardown.
    epoch: u64,
    poll_timer: Option<SpawnHandle>,
    subscription: Option<SubscriptionHandle>,
    logger: Logger,
}

impl OrderTracker {
    pub fn new(
        order_id: impl Into<String>,
        store: Arc<dyn OrderStore>,
        notifier: Arc<dyn Notifier>,
        navigator: Arc<dyn Navigator>,
    ) -> Self {
        Self {
            order_id: order_id.into(),
            store,
            notifier,
            navigator,
            view_sink: None,
            poll_interval: POLL_INTERVAL,
            view: TrackerView::Idle,
            epoch: 0,
            poll_timer: None,
            subscription: None,
            logger: Logger::new("Tracker", Color::Cyan),
        }
    }

    pub fn with_poll_interval(mut self, poll_interval: Duration) -> Self {
        self.poll_interval = poll_interval;
        self
    }

    /// Every view change is sent to `sink`.
    pub fn with_view_sink(mut self, sink: Recipient<ShowView>) -> Self {
        self.view_sink = Some(sink);
        self
    }

    fn is_tracking(&self) -> bool {
        !self.order_id.is_empty()
    }

    /// Initial fetch, poll timer and push subscription for `order_id`.
    fn begin(&mut self, ctx: &mut Context<Self>) {
        if !self.is_tracking() {
            self.logger.info("No order id given, nothing to track");
            self.set_view(TrackerView::Idle);
            return;
        }
        self.logger.info(format!(
            "Tracking order {} (poll every {:?})",
            self.order_id, self.poll_interval
        ));
        self.set_view(TrackerView::Loading);

        self.issue_fetch(ctx);
        self.poll_timer = Some(ctx.run_interval(self.poll_interval, |act, ctx| {
            act.issue_fetch(ctx);
        }));
        self.establish_subscription(ctx);
    }

    fn teardown(&mut self, ctx: &mut Context<Self>) {
        self.epoch += 1;
        if let Some(timer) = self.poll_timer.take() {
            ctx.cancel_future(timer);
        }
        if let Some(handle) = self.subscription.take() {
            self.release(handle);
        }
    }

    fn issue_fetch(&mut self, ctx: &mut Context<Self>) {
        let store = self.store.clone();
        let order_id = self.order_id.clone();
        let epoch = self.epoch;
        self.logger.debug(format!("Fetching order {}", order_id));
        ctx.spawn(
            async move { store.fetch_order(&order_id).await }
                .into_actor(self)
                .map(move |result, _act, ctx| {
                    ctx.notify(FetchCompleted { epoch, result });
                }),
        );
    }

    fn establish_subscription(&mut self, ctx: &mut Context<Self>) {
        let store = self.store.clone();
        let order_id = self.order_id.clone();
        let on_change = ctx.address().recipient();
        let epoch = self.epoch;
        ctx.spawn(
            async move { store.subscribe(&order_id, on_change).await }
                .into_actor(self)
                .map(move |result, act, _ctx| match result {
                    Ok(handle) if epoch == act.epoch => {
                        act.logger
                            .debug(format!("Subscribed to order {}", handle.order_id));
                        act.subscription = Some(handle);
                    }
                    Ok(stale) => act.release(stale),
                    Err(e) => act.logger.warn(format!(
                        "Push updates unavailable ({}), falling back to polling only",
                        e
                    )),
                }),
        );
    }

    fn release(&self, handle: SubscriptionHandle) {
        let store = self.store.clone();
        self.logger
            .debug(format!("Releasing subscription to order {}", handle.order_id));
        actix::spawn(async move { store.unsubscribe(handle).await });
    }

    /// Replaces the current snapshot. Arrival order wins; a regression is
    /// only logged.
    fn apply_snapshot(&mut self, order: OrderDTO) {
        if let Some(card) = self.view.card() {
            if order.status.step() < card.order.status.step() {
                self.logger.warn(format!(
                    "Order {} went back from {} to {}",
                    order.id, card.order.status, order.status
                ));
            }
        }
        self.set_view(TrackerView::Showing(OrderCard::new(order)));
    }

    fn show_not_found(&mut self) {
        self.logger
            .warn(format!("Order {} not found", self.order_id));
        self.set_view(TrackerView::NotFound {
            order_id: self.order_id.clone(),
        });
    }

    fn set_view(&mut self, view: TrackerView) {
        self.view = view;
        if let Some(sink) = &self.view_sink {
            sink.do_send(ShowView {
                view: self.view.clone(),
            });
        }
    }
}

impl Actor for OrderTracker {
    type Context = Context<Self>;

    fn started(&mut self, ctx: &mut Self::Context) {
        self.begin(ctx);
    }

    fn stopping(&mut self, ctx: &mut Self::Context) -> Running {
        self.teardown(ctx);
        self.logger.info("Tracker stopped");
        Running::Stop
    }
}

impl Handler<TrackOrder> for OrderTracker {
    type Result = ();

    fn handle(&mut self, msg: TrackOrder, ctx: &mut Self::Context) -> Self::Result {
        self.teardown(ctx);
        self.order_id = msg.order_id.trim().to_string();
        self.begin(ctx);
    }
}

impl Handler<FetchCompleted> for OrderTracker {
    type Result = ();

    fn handle(&mut self, msg: FetchCompleted, _ctx: &mut Self::Context) -> Self::Result {
        if msg.epoch != self.epoch || !self.is_tracking() {
            self.logger.debug("Discarding fetch result from a previous order");
            return;
        }
        match msg.result {
            Ok(Some(order)) if order.id == self.order_id => self.apply_snapshot(order),
            Ok(Some(order)) => self.logger.warn(format!(
                "Store answered with order {} while tracking {}",
                order.id, self.order_id
            )),
            Ok(None) => self.show_not_found(),
            Err(e) if !e.is_transient() => self.show_not_found(),
            Err(e) => {
                self.logger.warn(format!("Fetch failed: {}", e));
                self.notifier.error(FETCH_FAILED_MESSAGE);
            }
        }
    }
}

impl Handler<OrderPushed> for OrderTracker {
    type Result = ();

    fn handle(&mut self, msg: OrderPushed, _ctx: &mut Self::Context) -> Self::Result {
        if !self.is_tracking() || msg.order.id != self.order_id {
            return;
        }
        let ready = msg.order.status.is_ready();
        self.apply_snapshot(msg.order);
        if ready {
            self.notifier.success(READY_MESSAGE);
        }
    }
}

impl Handler<GetView> for OrderTracker {
    type Result = MessageResult<GetView>;

    fn handle(&mut self, _msg: GetView, _ctx: &mut Self::Context) -> Self::Result {
        MessageResult(self.view.clone())
    }
}

impl Handler<GoBack> for OrderTracker {
    type Result = ();

    fn handle(&mut self, _msg: GoBack, ctx: &mut Self::Context) -> Self::Result {
        self.navigator.go_to_menu();
        ctx.stop();
    }
}
