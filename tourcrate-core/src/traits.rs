//! Core traits for tourcrate

use crate::{point::*, point_cloud::*};

/// Trait for drawable/renderable objects
pub trait Drawable {
    /// Get the axis-aligned bounding box of the object
    fn bounding_box(&self) -> (Point3f, Point3f);

    /// Get the center of the bounding box
    fn center(&self) -> Point3f {
        let (min, max) = self.bounding_box();
        Point3f::new(
            (min.x + max.x) / 2.0,
            (min.y + max.y) / 2.0,
            (min.z + max.z) / 2.0,
        )
    }
}

impl<T: Positioned> Drawable for PointCloud<T> {
    fn bounding_box(&self) -> (Point3f, Point3f) {
        let mut iter = self.points.iter().map(Positioned::position);
        let Some(first) = iter.next() else {
            return (Point3f::origin(), Point3f::origin());
        };

        let mut min = first;
        let mut max = first;

        for p in iter {
            min.x = min.x.min(p.x);
            min.y = min.y.min(p.y);
            min.z = min.z.min(p.z);

            max.x = max.x.max(p.x);
            max.y = max.y.max(p.y);
            max.z = max.z.max(p.z);
        }

        (min, max)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_center_of_colored_cloud() {
        let cloud = PointCloud::from_points(vec![
            ColoredPoint3f::new(Point3f::new(-1.0, 0.0, 2.0), [255, 0, 0]),
            ColoredPoint3f::new(Point3f::new(3.0, 4.0, -2.0), [0, 255, 0]),
            ColoredPoint3f::new(Point3f::new(0.0, 1.0, 0.0), [0, 0, 255]),
        ]);

        let (min, max) = cloud.bounding_box();
        assert_eq!(min, Point3f::new(-1.0, 0.0, -2.0));
        assert_eq!(max, Point3f::new(3.0, 4.0, 2.0));

        let center = cloud.center();
        assert_relative_eq!(center, Point3f::new(1.0, 2.0, 0.0));
    }

    #[test]
    fn test_empty_cloud_centers_on_origin() {
        let cloud = PointCloud3f::new();
        assert_eq!(cloud.center(), Point3f::origin());
    }
}
