// Prefetch Triggers
// "Visibility and intent are edge-triggered signals, nothing more"

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use tracing::warn;

use crate::prefetch::Prefetcher;

/// Expanded observation margin for viewport triggers, in pixels.
///
/// Wiring code hands this to whatever visibility observer the embedding UI
/// uses, so modules start loading shortly before the element scrolls in.
pub const VIEWPORT_MARGIN_PX: u32 = 100;

/// One-shot trigger fed by element-visibility signals.
///
/// The first visibility crossing dispatches the prefetch and detaches the
/// trigger; later signals are no-ops. Loader failures are swallowed here so
/// prefetching can never break or delay navigation.
pub struct ViewportTrigger {
    prefetcher: Arc<Prefetcher>,
    path: String,
    fired: AtomicBool,
}

impl ViewportTrigger {
    pub fn new(prefetcher: Arc<Prefetcher>, path: impl Into<String>) -> Self {
        Self {
            prefetcher,
            path: path.into(),
            fired: AtomicBool::new(false),
        }
    }

    /// Report that the observed element crossed into the expanded viewport.
    /// Returns whether this signal was the one that fired the prefetch.
    pub async fn on_visible(&self) -> bool {
        if self.fired.swap(true, Ordering::SeqCst) {
            return false;
        }
        if let Err(err) = self.prefetcher.prefetch(&self.path).await {
            warn!(path = %self.path, error = %err, "viewport prefetch failed");
        }
        true
    }

    /// Whether the trigger has already fired and detached.
    pub fn is_detached(&self) -> bool {
        self.fired.load(Ordering::SeqCst)
    }
}

/// Persistent trigger fed by user-intent signals (hover, focus, touch).
///
/// Every occurrence dispatches a prefetch; the registry dedupe makes repeats
/// free, so this subscription never detaches itself.
pub struct IntentTrigger {
    prefetcher: Arc<Prefetcher>,
    path: String,
}

impl IntentTrigger {
    pub fn new(prefetcher: Arc<Prefetcher>, path: impl Into<String>) -> Self {
        Self {
            prefetcher,
            path: path.into(),
        }
    }

    pub async fn on_pointer_enter(&self) {
        self.fire().await;
    }

    pub async fn on_focus(&self) {
        self.fire().await;
    }

    pub async fn on_touch_start(&self) {
        self.fire().await;
    }

    async fn fire(&self) {
        if let Err(err) = self.prefetcher.prefetch(&self.path).await {
            warn!(path = %self.path, error = %err, "intent prefetch failed");
        }
    }
}
