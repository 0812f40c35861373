use crate::domain::structure::{Segment, Stroke};

/// Stage 4: groups consecutive same-direction strokes into segments.
///
/// A greedy walk accumulates the current run; a direction change flushes it.
/// Runs of three or more strokes become one segment, shorter runs are
/// dropped, and the stroke that broke the direction seeds the next run. The
/// final run flushes under the same rule at end of input.
pub fn build_segments(strokes: &[Stroke]) -> Vec<Segment> {
    let mut segments = Vec::new();
    let mut run: Vec<Stroke> = Vec::new();

    for stroke in strokes {
        if let Some(last) = run.last()
            && last.direction != stroke.direction
        {
            let finished = std::mem::take(&mut run);
            if let Some(segment) = Segment::from_run(finished) {
                segments.push(segment);
            }
        }
        run.push(stroke.clone());
    }

    if let Some(segment) = Segment::from_run(run) {
        segments.push(segment);
    }

    segments
}
