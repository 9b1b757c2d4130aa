//! Point sequence ordering and segment pairing

use glam::DVec3;

use crate::error::{GeometryError, GeometryResult};
use crate::point::distance;

/// Order points into a greedy nearest-neighbor tour starting at `points[0]`
///
/// Each step appends the closest point not yet visited. Ties go to the
/// candidate that comes first in the input. Every input entry, duplicates
/// included, appears exactly once in the output. The tour is not
/// guaranteed to be the shortest.
pub fn sort_by_nearest_neighbor(points: &[DVec3]) -> GeometryResult<Vec<DVec3>> {
    let Some(&start) = points.first() else {
        return Err(GeometryError::EmptyInput("sort_by_nearest_neighbor"));
    };

    let mut visited = vec![false; points.len()];
    visited[0] = true;
    let mut sorted = Vec::with_capacity(points.len());
    sorted.push(start);

    let mut current = start;
    while sorted.len() < points.len() {
        let mut nearest: Option<(usize, f64)> = None;
        for (index, &point) in points.iter().enumerate() {
            if visited[index] {
                continue;
            }
            let d = distance(current, point);
            if nearest.is_none_or(|(_, best)| d < best) {
                nearest = Some((index, d));
            }
        }

        // Unvisited points remain while sorted is shorter than points
        let Some((index, _)) = nearest else { break };
        visited[index] = true;
        current = points[index];
        sorted.push(current);
    }

    Ok(sorted)
}

/// Pair consecutive points into segments, skipping zero-length pairs
pub fn build_segments(points: &[DVec3]) -> impl Iterator<Item = (DVec3, DVec3)> + '_ {
    points
        .windows(2)
        .filter(|pair| pair[0] != pair[1])
        .map(|pair| (pair[0], pair[1]))
}
