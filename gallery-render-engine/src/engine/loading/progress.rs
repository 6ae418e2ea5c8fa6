use bevy::prelude::*;

use crate::engine::error::GalleryError;
use crate::rpc::web_rpc::WebRpcInterface;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ItemStatus {
    Pending,
    Loaded,
    Failed,
}

/// Aggregates start/loaded/failed reports across every in-flight asset.
#[derive(Resource, Default, Debug)]
pub struct LoadingProgress {
    pub manifest_resolved: bool,
    items: Vec<(String, ItemStatus)>,
    last_ratio: f32,
    completion_reported: bool,
}

impl LoadingProgress {
    /// Register an asset whose load has begun. Re-registering is ignored.
    pub fn item_started(&mut self, url: &str) {
        if self.status(url).is_none() {
            self.items.push((url.to_string(), ItemStatus::Pending));
        }
    }

    /// Mark an item loaded and return the progress ratio to report.
    /// The reported ratio never decreases, even when new items start later.
    pub fn item_loaded(&mut self, url: &str) -> Option<f32> {
        if !self.settle(url, ItemStatus::Loaded) {
            return None;
        }
        self.last_ratio = self.ratio().max(self.last_ratio);
        Some(self.last_ratio)
    }

    /// Mark an item failed. Failed items still count toward completion.
    pub fn item_failed(&mut self, url: &str) -> bool {
        self.settle(url, ItemStatus::Failed)
    }

    fn settle(&mut self, url: &str, status: ItemStatus) -> bool {
        match self.items.iter_mut().find(|(u, _)| u == url) {
            Some((_, current)) if *current == ItemStatus::Pending => {
                *current = status;
                true
            }
            _ => false,
        }
    }

    pub fn status(&self, url: &str) -> Option<ItemStatus> {
        self.items.iter().find(|(u, _)| u == url).map(|(_, s)| *s)
    }

    pub fn total(&self) -> usize {
        self.items.len()
    }

    pub fn loaded(&self) -> usize {
        self.count(ItemStatus::Loaded)
    }

    pub fn failed(&self) -> usize {
        self.count(ItemStatus::Failed)
    }

    fn count(&self, status: ItemStatus) -> usize {
        self.items.iter().filter(|(_, s)| *s == status).count()
    }

    pub fn ratio(&self) -> f32 {
        if self.items.is_empty() {
            return 0.0;
        }
        self.loaded() as f32 / self.total() as f32
    }

    /// Every registered item has settled. Nothing registered is not complete.
    pub fn is_complete(&self) -> bool {
        !self.items.is_empty() && self.items.iter().all(|(_, s)| *s != ItemStatus::Pending)
    }

    /// Returns true the first time completion is observed.
    pub fn take_completion(&mut self) -> bool {
        if self.completion_reported || !self.is_complete() {
            return false;
        }
        self.completion_reported = true;
        true
    }
}

/// Record a loaded item and forward the new ratio to the page.
pub fn report_loaded(progress: &mut LoadingProgress, rpc_interface: &mut WebRpcInterface, url: &str) {
    if let Some(ratio) = progress.item_loaded(url) {
        debug!("Loaded {} ({:.0}%)", url, ratio * 100.0);
        rpc_interface.send_notification(
            "loading_progress",
            serde_json::json!({ "ratio": ratio, "url": url }),
        );
    }
}

/// Record a failed item. It still counts toward completion.
pub fn report_failed(
    progress: &mut LoadingProgress,
    rpc_interface: &mut WebRpcInterface,
    err: &GalleryError,
) {
    let GalleryError::AssetLoad { path, .. } = err else {
        return;
    };
    if progress.item_failed(path) {
        rpc_interface.send_notification("loading_error", serde_json::json!({ "url": path }));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ratio_counts_loaded_items_only() {
        let mut progress = LoadingProgress::default();
        progress.item_started("a.jpg");
        progress.item_started("b.jpg");
        progress.item_started("c.jpg");
        progress.item_started("d.jpg");

        assert_eq!(progress.item_loaded("a.jpg"), Some(0.25));
        assert!(progress.item_failed("b.jpg"));
        assert_eq!(progress.item_loaded("c.jpg"), Some(0.5));
        assert!(!progress.is_complete());
        assert_eq!(progress.item_loaded("d.jpg"), Some(0.75));
        assert!(progress.is_complete());
        assert_eq!(progress.failed(), 1);
    }

    #[test]
    fn reported_ratio_is_monotonic_when_items_join_late() {
        let mut progress = LoadingProgress::default();
        progress.item_started("a.jpg");
        assert_eq!(progress.item_loaded("a.jpg"), Some(1.0));

        progress.item_started("model.glb");
        progress.item_started("b.jpg");
        assert_eq!(progress.item_loaded("b.jpg"), Some(1.0));
        assert!((progress.ratio() - 2.0 / 3.0).abs() < 1e-6);
    }

    #[test]
    fn items_settle_only_once() {
        let mut progress = LoadingProgress::default();
        progress.item_started("a.jpg");
        progress.item_started("a.jpg");
        assert_eq!(progress.total(), 1);

        assert!(progress.item_loaded("a.jpg").is_some());
        assert!(progress.item_loaded("a.jpg").is_none());
        assert!(!progress.item_failed("a.jpg"));
        assert!(!progress.item_failed("unknown.jpg"));
        assert_eq!(progress.status("a.jpg"), Some(ItemStatus::Loaded));
    }

    #[test]
    fn completion_is_taken_once() {
        let mut progress = LoadingProgress::default();
        assert!(!progress.take_completion());

        progress.item_started("a.jpg");
        assert!(!progress.take_completion());
        progress.item_failed("a.jpg");
        assert!(progress.take_completion());
        assert!(!progress.take_completion());
    }
}
