//! Amenity catalogue prefetched when the flow mounts.
//!
//! The request runs in the background so the unit builder never waits on
//! it. A failed fetch leaves the catalogue empty and the flow usable.

use std::sync::Arc;

use tokio::sync::watch;
use tracing::{debug, warn};

use crate::api::PropertyApi;
use crate::domain::Amenity;

#[derive(Debug, Clone, PartialEq)]
pub enum AmenityState {
    Loading,
    Ready(Vec<Amenity>),
    Unavailable,
}

/// Read side of the amenity catalogue, shared with the unit builder.
#[derive(Debug, Clone)]
pub struct AmenityDirectory {
    rx: watch::Receiver<AmenityState>,
}

impl AmenityDirectory {
    /// Starts the catalogue fetch on the current tokio runtime.
    pub fn prefetch(api: Arc<dyn PropertyApi>) -> Self {
        let (tx, rx) = watch::channel(AmenityState::Loading);
        tokio::spawn(async move {
            let state = match api.list_amenities().await {
                Ok(amenities) => {
                    debug!(count = amenities.len(), "amenity catalogue loaded");
                    AmenityState::Ready(amenities)
                }
                Err(err) => {
                    warn!(error = %err, "failed to load amenity catalogue");
                    AmenityState::Unavailable
                }
            };
            // The flow may already be gone; nothing to deliver to then.
            let _ = tx.send(state);
        });
        Self { rx }
    }

    /// Already-resolved catalogue.
    pub fn ready(amenities: Vec<Amenity>) -> Self {
        let (_tx, rx) = watch::channel(AmenityState::Ready(amenities));
        Self { rx }
    }

    pub fn empty() -> Self {
        Self::ready(Vec::new())
    }

    pub fn state(&self) -> AmenityState {
        self.rx.borrow().clone()
    }

    pub fn is_loaded(&self) -> bool {
        !matches!(*self.rx.borrow(), AmenityState::Loading)
    }

    /// Options available right now; empty while loading or after a failure.
    pub fn options(&self) -> Vec<Amenity> {
        match &*self.rx.borrow() {
            AmenityState::Ready(amenities) => amenities.clone(),
            _ => Vec::new(),
        }
    }

    /// Waits for the fetch to settle and returns the options.
    pub async fn wait(&mut self) -> Vec<Amenity> {
        match self
            .rx
            .wait_for(|state| !matches!(state, AmenityState::Loading))
            .await
        {
            Ok(state) => match &*state {
                AmenityState::Ready(amenities) => amenities.clone(),
                _ => Vec::new(),
            },
            Err(_) => Vec::new(),
        }
    }
}

impl Default for AmenityDirectory {
    fn default() -> Self {
        Self::empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    #[test]
    fn ready_directory_exposes_options() {
        let amenity = Amenity {
            id: Uuid::nil(),
            name: "Wifi".into(),
            category: None,
        };
        let directory = AmenityDirectory::ready(vec![amenity.clone()]);
        assert!(directory.is_loaded());
        assert_eq!(directory.options(), vec![amenity]);
    }

    #[tokio::test]
    async fn wait_on_resolved_directory_returns_immediately() {
        let mut directory = AmenityDirectory::empty();
        assert!(directory.wait().await.is_empty());
    }
}
