//! Keeps the GPU photo slots in step with the controller's image layers

use std::collections::HashSet;

use tourcrate_core::{ImageLayer, ImageLayers};
use tourcrate_gpu::{LayerSlot, SceneRenderer};
use tourcrate_io::{ImageCatalog, Photo};
use tracing::{debug, warn};

/// Texture storage for the two cross-fade layers
pub trait PhotoSlots {
    fn bound_label(&self, slot: LayerSlot) -> Option<&str>;
    fn upload(&mut self, slot: LayerSlot, photo: Option<&Photo>);
    /// Reuse the texture held by `from` for `to`; false if `from` is empty
    fn share(&mut self, from: LayerSlot, to: LayerSlot) -> bool;
}

impl PhotoSlots for SceneRenderer {
    fn bound_label(&self, slot: LayerSlot) -> Option<&str> {
        self.bound_photo(slot)
    }

    fn upload(&mut self, slot: LayerSlot, photo: Option<&Photo>) {
        self.set_photo(slot, photo);
    }

    fn share(&mut self, from: LayerSlot, to: LayerSlot) -> bool {
        self.share_photo(from, to)
    }
}

/// Decodes photographs on demand.
///
/// A label that fails to decode is logged once and never retried; its layer
/// keeps the label but draws nothing.
#[derive(Debug)]
pub struct PhotoLoader {
    catalog: ImageCatalog,
    max_dimension: u32,
    failed: HashSet<String>,
}

impl PhotoLoader {
    pub fn new(catalog: ImageCatalog, max_dimension: u32) -> Self {
        Self {
            catalog,
            max_dimension,
            failed: HashSet::new(),
        }
    }

    pub fn has_failed(&self, label: &str) -> bool {
        self.failed.contains(label)
    }

    /// Bring both slots in line with `layers`
    pub fn sync<S: PhotoSlots + ?Sized>(&mut self, slots: &mut S, layers: &ImageLayers) {
        self.sync_slot(slots, LayerSlot::Primary, &layers.primary);
        self.sync_slot(slots, LayerSlot::Secondary, &layers.secondary);
    }

    fn sync_slot<S: PhotoSlots + ?Sized>(&mut self, slots: &mut S, slot: LayerSlot, layer: &ImageLayer) {
        let wanted = layer.label.as_deref();
        if slots.bound_label(slot) == wanted {
            return;
        }

        let Some(label) = wanted else {
            slots.upload(slot, None);
            return;
        };

        if slots.bound_label(slot.other()) == Some(label) && slots.share(slot.other(), slot) {
            debug!("Reusing texture for {} in {:?} layer", label, slot);
            return;
        }

        let photo = self.decode(label);
        slots.upload(slot, photo.as_ref());
    }

    fn decode(&mut self, label: &str) -> Option<Photo> {
        if self.failed.contains(label) {
            return None;
        }
        match self.catalog.load_fitted(label, self.max_dimension) {
            Ok(photo) => {
                debug!("Decoded {} ({}x{})", label, photo.width, photo.height);
                Some(photo)
            }
            Err(e) => {
                warn!(
                    "Could not load image {}: {}",
                    self.catalog.path_for(label).display(),
                    e
                );
                self.failed.insert(label.to_string());
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct FakeSlots {
        bound: [Option<String>; 2],
        uploads: Vec<(LayerSlot, Option<String>)>,
        shares: usize,
    }

    fn idx(slot: LayerSlot) -> usize {
        match slot {
            LayerSlot::Primary => 0,
            LayerSlot::Secondary => 1,
        }
    }

    impl PhotoSlots for FakeSlots {
        fn bound_label(&self, slot: LayerSlot) -> Option<&str> {
            self.bound[idx(slot)].as_deref()
        }

        fn upload(&mut self, slot: LayerSlot, photo: Option<&Photo>) {
            let label = photo.map(|p| p.label.clone());
            self.bound[idx(slot)] = label.clone();
            self.uploads.push((slot, label));
        }

        fn share(&mut self, from: LayerSlot, to: LayerSlot) -> bool {
            let label = self.bound[idx(from)].clone();
            if label.is_none() {
                return false;
            }
            self.bound[idx(to)] = label;
            self.shares += 1;
            true
        }
    }

    fn write_png(dir: &std::path::Path, name: &str) {
        image::RgbaImage::new(2, 2).save(dir.join(name)).unwrap();
    }

    #[test]
    fn test_settled_tour_uploads_once() {
        let dir = tempfile::tempdir().unwrap();
        write_png(dir.path(), "a.png");
        let mut loader = PhotoLoader::new(ImageCatalog::new(dir.path()), 4096);
        let mut slots = FakeSlots::default();

        let mut layers = ImageLayers::default();
        layers.settle("a.png");

        loader.sync(&mut slots, &layers);
        loader.sync(&mut slots, &layers);

        assert_eq!(slots.uploads, vec![(LayerSlot::Primary, Some("a.png".to_string()))]);
    }

    #[test]
    fn test_completed_transition_reuses_secondary() {
        let dir = tempfile::tempdir().unwrap();
        write_png(dir.path(), "a.png");
        write_png(dir.path(), "b.png");
        let mut loader = PhotoLoader::new(ImageCatalog::new(dir.path()), 4096);
        let mut slots = FakeSlots::default();

        let mut layers = ImageLayers::default();
        layers.settle("a.png");
        loader.sync(&mut slots, &layers);

        layers.stage("b.png");
        loader.sync(&mut slots, &layers);
        assert_eq!(slots.bound_label(LayerSlot::Secondary), Some("b.png"));

        layers.settle("b.png");
        loader.sync(&mut slots, &layers);

        assert_eq!(slots.bound_label(LayerSlot::Primary), Some("b.png"));
        assert_eq!(slots.shares, 1);
        assert_eq!(slots.uploads.len(), 2);
    }

    #[test]
    fn test_failed_label_is_not_retried() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("broken.jpg"), b"not a jpeg").unwrap();
        let mut loader = PhotoLoader::new(ImageCatalog::new(dir.path()), 4096);
        let mut slots = FakeSlots::default();

        let mut layers = ImageLayers::default();
        layers.settle("broken.jpg");

        loader.sync(&mut slots, &layers);
        assert!(loader.has_failed("broken.jpg"));
        assert_eq!(slots.bound_label(LayerSlot::Primary), None);
        assert_eq!(layers.primary.label.as_deref(), Some("broken.jpg"));

        // Subsequent frames skip decoding entirely
        loader.sync(&mut slots, &layers);
        assert!(slots.uploads.iter().all(|(_, label)| label.is_none()));
    }

    #[test]
    fn test_missing_photo_clears_previous_texture() {
        let dir = tempfile::tempdir().unwrap();
        write_png(dir.path(), "a.png");
        let mut loader = PhotoLoader::new(ImageCatalog::new(dir.path()), 4096);
        let mut slots = FakeSlots::default();

        let mut layers = ImageLayers::default();
        layers.settle("a.png");
        loader.sync(&mut slots, &layers);

        layers.stage("missing.png");
        layers.settle("missing.png");
        loader.sync(&mut slots, &layers);

        assert_eq!(slots.bound_label(LayerSlot::Primary), None);
        assert!(loader.has_failed("missing.png"));
    }
}
