use crate::messages::internal_messages::AdvanceOneOrder;
use crate::server_actors::storage::Storage;
use actix::prelude::*;
use colored::Color;
use common::logger::Logger;
use std::time::Duration;

/// Moves orders along their status sequence on a fixed cadence, so that
/// connected trackers have something to watch.
pub struct Kitchen {
    pub storage: Addr<Storage>,
    pub advance_every: Duration,
    pub logger: Logger,
}

impl Kitchen {
    pub fn new(storage: Addr<Storage>, advance_every: Duration) -> Self {
        Self {
            storage,
            advance_every,
            logger: Logger::new("Kitchen", Color::Yellow),
        }
    }

    fn advance(&mut self, ctx: &mut Context<Self>) {
        let advance = self.storage.send(AdvanceOneOrder);
        ctx.spawn(advance.into_actor(self).map(|result, act, _ctx| match result {
            Ok(Some(order)) => act.logger.info(format!(
                "Order {} (#{}) is now {}",
                order.id, order.token_number, order.status
            )),
            Ok(None) => act.logger.debug("Every order is delivered"),
            Err(e) => act.logger.error(format!("Storage unreachable: {}", e)),
        }));
    }
}

impl Actor for Kitchen {
    type Context = Context<Self>;

    fn started(&mut self, ctx: &mut Self::Context) {
        self.logger.info(format!(
            "Advancing one order every {:?}",
            self.advance_every
        ));
        ctx.run_interval(self.advance_every, |act, ctx| act.advance(ctx));
    }
}
