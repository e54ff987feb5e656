//! Runs key-triggered [`Action`]s on the controller.

use tokio::task::JoinHandle;
use tracing::debug;

use crate::controller::{OrderSessionController, PanelSink};
use crate::transport::Transport;

use super::event::Action;

/// Spawns `action` as an independent task.
///
/// Tasks are neither cancelled nor coordinated: when two of them replace the
/// order table, the one that finishes last wins.
pub fn dispatch<T, S>(controller: &OrderSessionController<T, S>, action: Action) -> JoinHandle<()>
where
    T: Transport,
    S: PanelSink,
{
    debug!(?action, "dispatching");
    let controller = controller.clone();
    tokio::spawn(async move {
        match action {
            Action::Connect { gmail, senha } => controller.connect(&gmail, senha.expose()).await,
            Action::Disconnect => controller.disconnect().await,
            Action::Analyze { symbol } => controller.analyze(&symbol).await,
            Action::CreateOrder {
                symbol,
                side,
                amount,
            } => controller.create_order(&symbol, side, &amount).await,
            Action::RefreshOrders => controller.refresh_orders().await,
            Action::CheckHealth => controller.check_health().await,
            Action::MonitorOrder(id) => controller.monitor_order(&id).await,
            Action::CancelOrder(id) => controller.cancel_order(&id).await,
            Action::InspectOrder(id) => controller.inspect_order(&id).await,
        }
    })
}
