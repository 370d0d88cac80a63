//! Bounded rolling time-series buffers.
//!
//! Each buffer keeps points sorted by ascending timestamp, drops points
//! falling out of the retention window, and caps the point count keeping
//! the most recent.

use bidwit_core::{SeriesPoint, TimestampMs};
use std::collections::VecDeque;

/// A bounded, time-windowed series of `(timestamp, value)` points.
#[derive(Debug, Clone)]
pub struct SeriesBuffer {
    points: VecDeque<SeriesPoint>,
    retention_window_ms: i64,
    max_points: usize,
}

impl SeriesBuffer {
    /// Create a buffer with the given retention window and point cap.
    pub fn new(retention_window_ms: i64, max_points: usize) -> Self {
        Self {
            points: VecDeque::with_capacity(max_points.min(1024)),
            retention_window_ms,
            max_points,
        }
    }

    /// Append a point, keeping the buffer sorted, windowed, and capped.
    pub fn push(&mut self, ts_ms: TimestampMs, value: f64) {
        let point = SeriesPoint { ts_ms, value };

        let idx = self.points.partition_point(|p| p.ts_ms <= ts_ms);
        if idx == self.points.len() {
            self.points.push_back(point);
        } else {
            self.points.insert(idx, point);
        }

        self.prune();
    }

    // The window is anchored to the newest point, not a wall clock, so
    // replayed historical data windows the same as live data.
    fn prune(&mut self) {
        if let Some(newest) = self.points.back().map(|p| p.ts_ms) {
            let cutoff = newest - self.retention_window_ms;
            while self.points.front().is_some_and(|p| p.ts_ms < cutoff) {
                self.points.pop_front();
            }
        }
        while self.points.len() > self.max_points {
            self.points.pop_front();
        }
    }

    /// Iterate points in ascending timestamp order.
    pub fn iter(&self) -> impl Iterator<Item = &SeriesPoint> {
        self.points.iter()
    }

    /// Copy the points out in ascending timestamp order.
    pub fn to_vec(&self) -> Vec<SeriesPoint> {
        self.points.iter().copied().collect()
    }

    /// The most recent point.
    pub fn latest(&self) -> Option<SeriesPoint> {
        self.points.back().copied()
    }

    /// Number of retained points.
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Whether the buffer holds no points.
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Drop all points.
    pub fn clear(&mut self) {
        self.points.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_points_stay_sorted_under_out_of_order_pushes() {
        let mut buffer = SeriesBuffer::new(60_000, 10);
        buffer.push(3_000, 3.0);
        buffer.push(1_000, 1.0);
        buffer.push(2_000, 2.0);

        let ts: Vec<i64> = buffer.iter().map(|p| p.ts_ms).collect();
        assert_eq!(ts, vec![1_000, 2_000, 3_000]);
    }

    #[test]
    fn test_retention_window_drops_old_points() {
        let mut buffer = SeriesBuffer::new(10_000, 100);
        buffer.push(0, 1.0);
        buffer.push(5_000, 2.0);
        buffer.push(20_000, 3.0);

        // Points older than 20_000 - 10_000 are gone.
        let ts: Vec<i64> = buffer.iter().map(|p| p.ts_ms).collect();
        assert_eq!(ts, vec![20_000]);
    }

    #[test]
    fn test_point_at_window_edge_is_kept() {
        let mut buffer = SeriesBuffer::new(10_000, 100);
        buffer.push(10_000, 1.0);
        buffer.push(20_000, 2.0);
        assert_eq!(buffer.len(), 2);
    }

    #[test]
    fn test_cap_keeps_most_recent() {
        let mut buffer = SeriesBuffer::new(1_000_000, 3);
        for i in 0..5 {
            buffer.push(i * 1_000, i as f64);
        }
        let ts: Vec<i64> = buffer.iter().map(|p| p.ts_ms).collect();
        assert_eq!(ts, vec![2_000, 3_000, 4_000]);
        assert_eq!(buffer.latest().unwrap().value, 4.0);
    }

    #[test]
    fn test_clear() {
        let mut buffer = SeriesBuffer::new(60_000, 10);
        buffer.push(1_000, 1.0);
        buffer.clear();
        assert!(buffer.is_empty());
        assert!(buffer.latest().is_none());
    }
}
