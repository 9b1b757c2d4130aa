//! Line command

use tracing::info;

use mr_geometry::{distance, midpoint};

use super::{CommandContext, CommandError, CommandOutcome, CommandResult, LineMode};
use crate::document::{Shape, ViewProperty, with_transaction};
use crate::selection::Selection;

pub(super) fn is_active(selection: &Selection) -> bool {
    selection
        .picked_points(2)
        .is_some_and(|points| points.len() == 2)
}

/// Create a line between two picked points and/or its midpoint
pub(super) fn create_line(
    selection: &Selection,
    mode: LineMode,
    ctx: &mut CommandContext,
) -> CommandResult<CommandOutcome> {
    let Some([start, end]) = selection
        .picked_points(2)
        .and_then(|points| <[_; 2]>::try_from(points).ok())
    else {
        return Err(CommandError::InvalidSelection(
            "exactly 2 points must be picked".into(),
        ));
    };
    if start == end {
        return Err(CommandError::InvalidSelection(
            "picked points are coincident".into(),
        ));
    }

    let length = distance(start, end);
    let mid = midpoint(start, end);
    let line_width = ctx.settings.line_width;
    let point_size = ctx.settings.point_size;

    let created = with_transaction(ctx.document, "Create line", |doc| {
        let mut created = Vec::new();
        let mut mid_label = "MR_Ref_Mid".to_string();

        if mode.creates_line() {
            let line = doc.add_shape("MR_Line", Shape::line(start, end))?;
            doc.set_view_property(line, ViewProperty::LineWidth(line_width))?;
            doc.clear_selection();
            doc.add_to_selection(line)?;
            mid_label = format!("{}_Mid", doc.object_name(line)?);
            created.push(line);
        }

        if mode.creates_midpoint() {
            let point = doc.add_shape(&mid_label, Shape::Point(mid))?;
            doc.set_view_property(point, ViewProperty::PointSize(point_size))?;
            created.push(point);
        }
        Ok::<_, CommandError>(created)
    })?;

    info!("Line length: {:.6}, midpoint: {}", length, mid);
    Ok(CommandOutcome {
        created,
        hidden: Vec::new(),
    })
}
