//! Side effects the controller triggers on the embedding surface.

use std::sync::{Arc, Mutex};

use tracing::info;

use crate::api::PropertyRecord;

/// Surface the wizard is rendered on. Every step change scrolls it back to
/// the top.
pub trait Viewport: Send {
    fn scroll_to_top(&mut self);
}

#[derive(Debug, Default, Clone, Copy)]
pub struct NoopViewport;

impl Viewport for NoopViewport {
    fn scroll_to_top(&mut self) {}
}

/// Invoked once after a successful submission.
pub trait Completion: Send {
    fn complete(&mut self, record: &PropertyRecord);
}

impl<F> Completion for F
where
    F: FnMut(&PropertyRecord) + Send,
{
    fn complete(&mut self, record: &PropertyRecord) {
        self(record)
    }
}

pub const DASHBOARD_ROUTE: &str = "/dashboard/properties";

/// Default completion: navigates to the owner's dashboard.
#[derive(Debug, Clone, Default)]
pub struct DashboardRedirect {
    route: Arc<Mutex<Option<String>>>,
}

impl DashboardRedirect {
    pub fn new() -> Self {
        Self::default()
    }

    /// Route requested by the last completion, if any.
    pub fn requested_route(&self) -> Option<String> {
        self.route.lock().ok().and_then(|route| route.clone())
    }
}

impl Completion for DashboardRedirect {
    fn complete(&mut self, record: &PropertyRecord) {
        info!(property_id = %record.id, route = DASHBOARD_ROUTE, "redirecting to dashboard");
        if let Ok(mut route) = self.route.lock() {
            *route = Some(DASHBOARD_ROUTE.to_string());
        }
    }
}
