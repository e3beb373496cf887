use serde::{Deserialize, Serialize};

use crate::detect::BoxCoords;

/// Threshold under which a reported box is taken as already normalized.
/// Slightly above 1.0 so a full-width box the detector rounds to just over
/// 1.0 is not misread as a pixel-unit box.
const NORMALIZED_MAX: f32 = 1.01;

/// How the source image is currently mapped onto the output surface
/// (letterboxing, centering, scaling to fit). Supplied by whatever surface
/// shows the image; ephemeral, rebuilt on every layout change.
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub struct DisplayTransform {
    pub scale_x: f32,
    pub scale_y: f32,
    pub translate_x: f32,
    pub translate_y: f32,
    pub padding_left: f32,
    pub padding_top: f32,
    /// Intrinsic size of the source image in pixels.
    pub source_width: f32,
    pub source_height: f32,
}

impl DisplayTransform {
    /// Fit-and-center mapping of a source image inside a view, preserving
    /// aspect ratio. The axis with slack gets centered via translation.
    ///
    /// Non-positive sizes produce a transform with zero scale, which
    /// projects every box to nothing.
    pub fn letterbox(
        source_width: f32,
        source_height: f32,
        view_width: f32,
        view_height: f32,
    ) -> Self {
        let mut scale = 0.0;
        if source_width > 0.0 && source_height > 0.0 && view_width > 0.0 && view_height > 0.0 {
            scale = (view_width / source_width).min(view_height / source_height);
        }
        Self {
            scale_x: scale,
            scale_y: scale,
            translate_x: (view_width - source_width * scale).max(0.0) / 2.0,
            translate_y: (view_height - source_height * scale).max(0.0) / 2.0,
            padding_left: 0.0,
            padding_top: 0.0,
            source_width,
            source_height,
        }
    }
}

/// Rectangle to draw on the output surface.
///
/// When present, `left < right` and `top < bottom`.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct ProjectedBox {
    pub left: f32,
    pub top: f32,
    pub right: f32,
    pub bottom: f32,
}

impl ProjectedBox {
    pub fn width(&self) -> f32 {
        self.right - self.left
    }

    pub fn height(&self) -> f32 {
        self.bottom - self.top
    }
}

/// Map a detector-space box into output-surface coordinates.
///
/// Accepts both conventions detectors use: boxes normalized to the unit
/// square and boxes in source-pixel units. Degenerate input (zero-area box,
/// inverted corners, NaN coordinates, a surface with no laid-out extent)
/// projects to `None`; a bad detection draws nothing this frame instead of
/// failing the render path.
pub fn project(bounds: BoxCoords, transform: &DisplayTransform) -> Option<ProjectedBox> {
    let BoxCoords {
        mut left,
        mut top,
        mut right,
        mut bottom,
    } = bounds;

    // Pixel-unit boxes are normalized against the source size first.
    if !(right <= NORMALIZED_MAX && bottom <= NORMALIZED_MAX) {
        if transform.source_width <= 0.0 || transform.source_height <= 0.0 {
            return None;
        }
        left /= transform.source_width;
        right /= transform.source_width;
        top /= transform.source_height;
        bottom /= transform.source_height;
    }

    let left = left.clamp(0.0, 1.0);
    let top = top.clamp(0.0, 1.0);
    let right = right.clamp(0.0, 1.0);
    let bottom = bottom.clamp(0.0, 1.0);

    // Inverted comparison so NaN falls through to "nothing to draw".
    if !(right > left && bottom > top) {
        return None;
    }

    let rendered_width = transform.source_width * transform.scale_x;
    let rendered_height = transform.source_height * transform.scale_y;
    if !(rendered_width > 0.0 && rendered_height > 0.0) {
        return None;
    }

    let origin_x = transform.padding_left + transform.translate_x;
    let origin_y = transform.padding_top + transform.translate_y;
    Some(ProjectedBox {
        left: origin_x + left * rendered_width,
        top: origin_y + top * rendered_height,
        right: origin_x + right * rendered_width,
        bottom: origin_y + bottom * rendered_height,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn plain_transform(source_width: f32, source_height: f32) -> DisplayTransform {
        DisplayTransform {
            scale_x: 1.0,
            scale_y: 1.0,
            translate_x: 0.0,
            translate_y: 0.0,
            padding_left: 0.0,
            padding_top: 0.0,
            source_width,
            source_height,
        }
    }

    #[test]
    fn scaled_translated_projection_matches_expected_pixels() {
        let transform = DisplayTransform {
            scale_x: 2.0,
            scale_y: 2.0,
            translate_x: 10.0,
            translate_y: 5.0,
            padding_left: 0.0,
            padding_top: 0.0,
            source_width: 100.0,
            source_height: 100.0,
        };

        let projected = project(BoxCoords::new(0.1, 0.2, 0.5, 0.6), &transform)
            .expect("box should project");

        assert_eq!(projected.left, 30.0);
        assert_eq!(projected.top, 45.0);
        assert_eq!(projected.right, 110.0);
        assert_eq!(projected.bottom, 125.0);
    }

    #[test]
    fn pixel_box_projects_like_its_normalized_twin() {
        let transform = DisplayTransform {
            scale_x: 1.5,
            scale_y: 0.75,
            translate_x: 4.0,
            translate_y: 8.0,
            padding_left: 2.0,
            padding_top: 1.0,
            source_width: 640.0,
            source_height: 480.0,
        };

        let from_pixels =
            project(BoxCoords::new(64.0, 96.0, 320.0, 240.0), &transform).expect("pixel box");
        let from_normalized =
            project(BoxCoords::new(0.1, 0.2, 0.5, 0.5), &transform).expect("normalized box");

        assert!((from_pixels.left - from_normalized.left).abs() < 1e-3);
        assert!((from_pixels.top - from_normalized.top).abs() < 1e-3);
        assert!((from_pixels.right - from_normalized.right).abs() < 1e-3);
        assert!((from_pixels.bottom - from_normalized.bottom).abs() < 1e-3);
    }

    #[test]
    fn slightly_over_unit_box_still_counts_as_normalized() {
        // A full-frame box reported as 1.005 after rounding must not get
        // divided by the source size a second time.
        let transform = plain_transform(200.0, 100.0);
        let projected =
            project(BoxCoords::new(0.0, 0.0, 1.005, 1.005), &transform).expect("full frame");

        assert_eq!(projected.left, 0.0);
        assert_eq!(projected.top, 0.0);
        assert_eq!(projected.right, 200.0);
        assert_eq!(projected.bottom, 100.0);
    }

    #[test]
    fn degenerate_boxes_project_to_nothing() {
        let transform = plain_transform(100.0, 100.0);

        // Zero width.
        assert_eq!(project(BoxCoords::new(0.4, 0.2, 0.4, 0.6), &transform), None);
        // Inverted horizontally.
        assert_eq!(project(BoxCoords::new(0.7, 0.2, 0.3, 0.6), &transform), None);
        // Inverted vertically.
        assert_eq!(project(BoxCoords::new(0.1, 0.9, 0.5, 0.2), &transform), None);
        // Entirely outside the unit square collapses under clamping.
        assert_eq!(
            project(BoxCoords::new(-0.5, -0.5, -0.1, -0.1), &transform),
            None
        );
        // NaN anywhere draws nothing.
        assert_eq!(
            project(BoxCoords::new(f32::NAN, 0.1, 0.5, 0.5), &transform),
            None
        );
    }

    #[test]
    fn unlaid_out_surface_projects_to_nothing() {
        let mut transform = plain_transform(100.0, 100.0);
        transform.scale_x = 0.0;
        assert_eq!(project(BoxCoords::new(0.1, 0.1, 0.5, 0.5), &transform), None);

        let mut transform = plain_transform(100.0, 100.0);
        transform.scale_y = -1.0;
        assert_eq!(project(BoxCoords::new(0.1, 0.1, 0.5, 0.5), &transform), None);

        // Pixel-unit box against an empty source cannot even be normalized.
        let transform = plain_transform(0.0, 0.0);
        assert_eq!(
            project(BoxCoords::new(10.0, 10.0, 50.0, 50.0), &transform),
            None
        );
    }

    #[test]
    fn projection_preserves_box_ordering() {
        let transform = DisplayTransform {
            scale_x: 3.0,
            scale_y: 2.0,
            translate_x: -20.0,
            translate_y: 12.0,
            padding_left: 6.0,
            padding_top: 3.0,
            source_width: 320.0,
            source_height: 240.0,
        };

        let projected =
            project(BoxCoords::new(0.25, 0.4, 0.8, 0.9), &transform).expect("box should project");
        assert!(projected.left < projected.right);
        assert!(projected.top < projected.bottom);
        assert!(projected.width() > 0.0);
        assert!(projected.height() > 0.0);
    }

    #[test]
    fn letterbox_centers_on_the_slack_axis() {
        // 640x480 into a 1080x1920 portrait view: width-limited, so the
        // image scales by 1080/640 and centers vertically.
        let transform = DisplayTransform::letterbox(640.0, 480.0, 1080.0, 1920.0);
        assert!((transform.scale_x - 1.6875).abs() < 1e-6);
        assert_eq!(transform.scale_x, transform.scale_y);
        assert_eq!(transform.translate_x, 0.0);
        assert!((transform.translate_y - (1920.0 - 480.0 * 1.6875) / 2.0).abs() < 1e-3);

        let projected = project(BoxCoords::new(0.0, 0.0, 1.0, 1.0), &transform)
            .expect("full frame should project");
        assert_eq!(projected.left, 0.0);
        assert!((projected.right - 1080.0).abs() < 1e-3);
    }

    #[test]
    fn letterbox_with_empty_view_projects_nothing() {
        let transform = DisplayTransform::letterbox(640.0, 480.0, 0.0, 1920.0);
        assert_eq!(project(BoxCoords::new(0.1, 0.1, 0.9, 0.9), &transform), None);
    }
}
