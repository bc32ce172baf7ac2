//! Photograph layers shown over the point cloud

/// A single image layer: which photograph it shows and how opaque it is
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ImageLayer {
    pub label: Option<String>,
    pub opacity: f32,
}

impl ImageLayer {
    pub fn new(label: Option<String>, opacity: f32) -> Self {
        Self { label, opacity }
    }
}

/// The two overlapping layers used for cross-fading.
///
/// While settled, the primary layer shows the current photograph at full
/// opacity and the secondary layer is transparent.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ImageLayers {
    pub primary: ImageLayer,
    pub secondary: ImageLayer,
}

impl ImageLayers {
    /// Show `label` at full opacity on the primary layer, hide the secondary one
    pub fn settle(&mut self, label: &str) {
        self.primary = ImageLayer::new(Some(label.to_string()), 1.0);
        self.secondary.opacity = 0.0;
    }

    /// Load the incoming photograph into the secondary layer, still transparent
    pub fn stage(&mut self, label: &str) {
        self.secondary = ImageLayer::new(Some(label.to_string()), 0.0);
    }

    /// Complementary opacities for a transition at `progress`
    pub fn cross_fade(&mut self, progress: f32) {
        let progress = progress.clamp(0.0, 1.0);
        self.primary.opacity = 1.0 - progress;
        self.secondary.opacity = progress;
    }

    pub fn total_opacity(&self) -> f32 {
        self.primary.opacity + self.secondary.opacity
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_stage_then_settle() {
        let mut layers = ImageLayers::default();
        layers.settle("a.jpg");
        layers.stage("b.jpg");

        assert_eq!(layers.primary.label.as_deref(), Some("a.jpg"));
        assert_eq!(layers.secondary.label.as_deref(), Some("b.jpg"));
        assert_eq!(layers.secondary.opacity, 0.0);

        layers.cross_fade(0.25);
        assert_relative_eq!(layers.primary.opacity, 0.75);
        assert_relative_eq!(layers.secondary.opacity, 0.25);

        layers.settle("b.jpg");
        assert_eq!(layers.primary.label.as_deref(), Some("b.jpg"));
        assert_eq!(layers.primary.opacity, 1.0);
        assert_eq!(layers.secondary.opacity, 0.0);
    }
}
