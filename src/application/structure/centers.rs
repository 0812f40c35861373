use crate::domain::structure::{Center, Segment};

/// Stage 5: slides a 3-segment window over the segment list.
///
/// Every window whose first and third members overlap yields a center, so
/// consecutive centers may share segments; the classifier consumes them by
/// segment position, not identity.
pub fn detect_centers(segments: &[Segment]) -> Vec<Center> {
    let mut centers = Vec::new();

    for (i, window) in segments.windows(3).enumerate() {
        if let Some(center) = Center::from_window(&window[0], &window[1], &window[2], i) {
            centers.push(center);
        }
    }

    centers
}
