//! Data bridge: connects [`Controller`] watch channels to TUI actions.
//!
//! Runs as a background task. Sends the current snapshots first so screens
//! have something to draw, then forwards every change as an [`Action`]
//! until cancelled.

use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use tracing::debug;

use inventario_core::Controller;

use crate::action::Action;

pub async fn spawn_data_bridge(
    controller: Controller,
    action_tx: mpsc::UnboundedSender<Action>,
    cancel: CancellationToken,
) {
    let store = controller.store();
    let mut products = store.subscribe_products();
    let mut movements = store.subscribe_movements();
    let mut statistics = store.subscribe_statistics();
    let mut ui = controller.subscribe_ui();
    let mut banners = controller.subscribe_banners();
    let mut connection = controller.subscribe_connection();

    // Initial snapshots
    let _ = action_tx.send(Action::ProductsUpdated(
        products.borrow_and_update().data.clone(),
    ));
    let _ = action_tx.send(Action::MovementsUpdated(
        movements.borrow_and_update().data.clone(),
    ));
    let _ = action_tx.send(Action::StatisticsUpdated(
        statistics.borrow_and_update().data.clone(),
    ));
    let _ = action_tx.send(Action::UiUpdated(ui.borrow_and_update().clone()));
    let _ = action_tx.send(Action::BannersUpdated(banners.borrow_and_update().clone()));
    let _ = action_tx.send(Action::ConnectionChanged(*connection.borrow_and_update()));

    loop {
        tokio::select! {
            biased;

            () = cancel.cancelled() => break,

            Ok(()) = products.changed() => {
                let snap = products.borrow_and_update().clone();
                debug!(generation = snap.generation, "dispatching ProductsUpdated");
                let _ = action_tx.send(Action::ProductsUpdated(snap.data));
            }
            Ok(()) = movements.changed() => {
                let snap = movements.borrow_and_update().clone();
                debug!(generation = snap.generation, "dispatching MovementsUpdated");
                let _ = action_tx.send(Action::MovementsUpdated(snap.data));
            }
            Ok(()) = statistics.changed() => {
                let snap = statistics.borrow_and_update().clone();
                let _ = action_tx.send(Action::StatisticsUpdated(snap.data));
            }
            Ok(()) = ui.changed() => {
                let state = ui.borrow_and_update().clone();
                let _ = action_tx.send(Action::UiUpdated(state));
            }
            Ok(()) = banners.changed() => {
                let current = banners.borrow_and_update().clone();
                let _ = action_tx.send(Action::BannersUpdated(current));
            }
            Ok(()) = connection.changed() => {
                let state = *connection.borrow_and_update();
                let _ = action_tx.send(Action::ConnectionChanged(state));
            }
            else => break,
        }
    }

    debug!("data bridge shut down");
}
