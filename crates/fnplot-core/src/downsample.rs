// File: crates/fnplot-core/src/downsample.rs
// Summary: Render-time decimation (LTTB) that never bridges a domain break.

use crate::curve::{runs, SamplePoint};

/// Largest-Triangle-Three-Buckets downsampling.
/// Returns up to `threshold` points preserving overall shape; first and last are kept.
pub fn lttb(points: &[SamplePoint], threshold: usize) -> Vec<SamplePoint> {
    let n = points.len();
    if threshold == 0 || n == 0 { return Vec::new(); }
    if threshold >= n || n <= 2 { return points.to_vec(); }
    if threshold == 1 { return vec![points[0]]; }
    if threshold == 2 { return vec![points[0], points[n - 1]]; }

    let bucket_size = (n - 2) as f64 / (threshold - 2) as f64;
    let mut sampled = Vec::with_capacity(threshold);
    sampled.push(points[0]);

    let mut a = 0usize; // index of the point picked from the previous bucket

    for i in 0..(threshold - 2) {
        let start = (1.0 + (i as f64) * bucket_size).floor() as usize;
        let end = ((1.0 + ((i + 1) as f64) * bucket_size).floor() as usize).min(n - 1);

        // average of the next bucket (or the last point for the final bucket)
        let next_start = end;
        let next_end = ((1.0 + ((i + 2) as f64) * bucket_size).floor() as usize).min(n);
        let (avg_x, avg_y) = if next_start < next_end {
            let span = &points[next_start..next_end];
            let len = span.len() as f64;
            (
                span.iter().map(|p| p.x).sum::<f64>() / len,
                span.iter().map(|p| p.y).sum::<f64>() / len,
            )
        } else {
            (points[n - 1].x, points[n - 1].y)
        };

        let pa = points[a];
        let mut best = start;
        let mut best_area = -1.0f64;
        for (j, p) in points.iter().enumerate().take(end.max(start + 1)).skip(start) {
            let area = ((pa.x - avg_x) * (p.y - pa.y) - (pa.x - p.x) * (avg_y - pa.y)).abs();
            if area > best_area {
                best_area = area;
                best = j;
            }
        }
        sampled.push(points[best]);
        a = best;
    }

    sampled.push(points[n - 1]);
    sampled
}

/// Decimate each continuous run to at most `max_per_run` points.
/// The first point of every run keeps its `after_gap` flag.
pub fn decimate_runs(points: &[SamplePoint], max_per_run: usize) -> Vec<SamplePoint> {
    let mut out = Vec::with_capacity(points.len().min(max_per_run.saturating_mul(4)));
    for run in runs(points) {
        if run.len() <= max_per_run {
            out.extend_from_slice(run);
        } else {
            out.extend(lttb(run, max_per_run.max(2)));
        }
    }
    out
}
