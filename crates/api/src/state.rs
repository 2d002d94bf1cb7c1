use std::sync::Arc;

use tokio::sync::watch;

use citylens_client::poll::TrafficSnapshot;
use citylens_client::users::UserApiClient;

use crate::config::GatewayConfig;

/// Shared application state passed to all route handlers.
///
/// Cheap to clone: configuration is behind an `Arc`, the upstream
/// client shares one connection pool, and the traffic receiver is a
/// `watch` handle onto the poller's latest snapshot.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<GatewayConfig>,
    pub users: UserApiClient,
    pub traffic: watch::Receiver<TrafficSnapshot>,
}

impl AppState {
    pub fn new(
        config: Arc<GatewayConfig>,
        users: UserApiClient,
        traffic: watch::Receiver<TrafficSnapshot>,
    ) -> Self {
        Self {
            config,
            users,
            traffic,
        }
    }
}
