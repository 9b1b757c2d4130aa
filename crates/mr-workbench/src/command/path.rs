//! Polygon and B-spline commands
//!
//! Both take every picked point plus the vertex of any single-point object
//! selected whole. Sorting follows a greedy nearest-neighbor tour from the
//! first point.

use glam::DVec3;
use tracing::info;

use mr_geometry::{build_segments, sort_by_nearest_neighbor};

use super::{CommandContext, CommandError, CommandOutcome, CommandResult, PathMode};
use crate::document::{ObjectId, Shape, ViewProperty, with_transaction};
use crate::selection::Selection;

/// Points needed for a polygon or B-spline
const MIN_PATH_POINTS: usize = 3;

pub(super) fn is_active(selection: &Selection) -> bool {
    selection.points_with_vertices().len() >= MIN_PATH_POINTS
}

fn path_points(selection: &Selection, mode: PathMode) -> CommandResult<Vec<DVec3>> {
    let points = selection.points_with_vertices();
    if points.len() < MIN_PATH_POINTS {
        return Err(CommandError::InvalidSelection(format!(
            "at least {MIN_PATH_POINTS} points are needed, got {}",
            points.len()
        )));
    }
    if mode.is_sorted() {
        Ok(sort_by_nearest_neighbor(&points)?)
    } else {
        Ok(points)
    }
}

/// Create a polygon through the selected points
///
/// The edges are first added as individual lines, then replaced by a single
/// polygon in a second transaction. Undoing that second step gives the
/// individual lines back.
pub(super) fn create_polygon(
    selection: &Selection,
    mode: PathMode,
    ctx: &mut CommandContext,
) -> CommandResult<CommandOutcome> {
    let mut points = path_points(selection, mode)?;
    if mode.is_closed() {
        points.push(points[0]);
    }

    let segments: Vec<(DVec3, DVec3)> = build_segments(&points).collect();
    if segments.is_empty() {
        return Err(CommandError::InvalidSelection(
            "all selected points coincide".into(),
        ));
    }
    let vertices: Vec<DVec3> = std::iter::once(segments[0].0)
        .chain(segments.iter().map(|&(_, end)| end))
        .collect();

    let line_width = ctx.settings.line_width;
    let lines = with_transaction(ctx.document, "Create polygon", |doc| {
        let mut lines = Vec::with_capacity(segments.len());
        for &(start, end) in &segments {
            let line = doc.add_shape("MR_Line", Shape::line(start, end))?;
            doc.set_view_property(line, ViewProperty::LineWidth(line_width))?;
            lines.push(line);
        }
        Ok::<_, CommandError>(lines)
    })?;

    let polygon = with_transaction(ctx.document, "Lines to compound", |doc| {
        let polygon = doc.add_shape("MR_Polygon", Shape::Polygon { points: vertices })?;
        doc.set_view_property(polygon, ViewProperty::LineWidth(line_width))?;
        for &line in &lines {
            doc.remove_object(line)?;
        }
        Ok::<_, CommandError>(polygon)
    })?;

    info!(
        "Created polygon with {} edges ({:?})",
        segments.len(),
        mode
    );
    Ok(CommandOutcome {
        created: vec![polygon],
        hidden: Vec::new(),
    })
}

/// Create a B-spline interpolating the selected points
pub(super) fn create_bspline(
    selection: &Selection,
    mode: PathMode,
    ctx: &mut CommandContext,
) -> CommandResult<CommandOutcome> {
    let points = path_points(selection, mode)?;
    let count = points.len();
    let shape = Shape::BSpline {
        points,
        periodic: mode.is_closed(),
    };

    let line_width = ctx.settings.line_width;
    let bspline: ObjectId = with_transaction(ctx.document, "Create BSpline", |doc| {
        let id = doc.add_shape("MR_BSpline", shape)?;
        doc.set_view_property(id, ViewProperty::LineWidth(line_width))?;
        Ok::<_, CommandError>(id)
    })?;

    info!("Created B-spline through {} points ({:?})", count, mode);
    Ok(CommandOutcome {
        created: vec![bspline],
        hidden: Vec::new(),
    })
}
