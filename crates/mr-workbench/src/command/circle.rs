//! Circle and arc commands

use tracing::{error, info};

use mr_geometry::circle_through;

use super::{CenterMode, CommandContext, CommandError, CommandOutcome, CommandResult};
use crate::document::{Shape, ViewProperty, with_transaction};
use crate::selection::Selection;

/// Which curve to build through the three points
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum Circular {
    Circle,
    Arc,
}

impl Circular {
    fn label(self) -> &'static str {
        match self {
            Circular::Circle => "MR_Circle",
            Circular::Arc => "MR_Arc",
        }
    }

    fn transaction(self) -> &'static str {
        match self {
            Circular::Circle => "Create circle",
            Circular::Arc => "Create arc",
        }
    }
}

/// Points needed for a circle or arc
const MIN_CIRCLE_POINTS: usize = 3;

pub(super) fn is_active(selection: &Selection) -> bool {
    selection.points_with_vertices().len() >= MIN_CIRCLE_POINTS
}

/// Create a circle or arc through the first three points, and/or its center
///
/// Colinear points fail before any transaction opens.
pub(super) fn create_circular(
    selection: &Selection,
    curve: Circular,
    mode: CenterMode,
    ctx: &mut CommandContext,
) -> CommandResult<CommandOutcome> {
    let points = selection.points_with_vertices();
    let &[a, b, c, ..] = points.as_slice() else {
        return Err(CommandError::InvalidSelection(format!(
            "at least {MIN_CIRCLE_POINTS} points are needed, got {}",
            points.len()
        )));
    };

    let circle = circle_through(a, b, c).inspect_err(|_| {
        error!("Cannot make arc/circle from 3 colinear points");
    })?;
    let shape = match curve {
        Circular::Circle => Shape::Circle(circle),
        Circular::Arc => Shape::Arc {
            start: a,
            through: b,
            end: c,
            circle,
        },
    };

    let line_width = ctx.settings.line_width;
    let point_size = ctx.settings.point_size;
    let created = with_transaction(ctx.document, curve.transaction(), |doc| {
        let mut created = Vec::new();
        let mut center_label = "MR_Ref_Ctr".to_string();

        if mode.creates_curve() {
            let id = doc.add_shape(curve.label(), shape)?;
            doc.set_view_property(id, ViewProperty::LineWidth(line_width))?;
            let name = doc.object_name(id)?;
            info!(
                "{}: radius = {}, center at {}",
                name, circle.radius, circle.center
            );
            doc.clear_selection();
            doc.add_to_selection(id)?;
            center_label = format!("{name}_Ctr");
            created.push(id);
        }

        if mode.creates_center() {
            let id = doc.add_shape(&center_label, Shape::Point(circle.center))?;
            doc.set_view_property(id, ViewProperty::PointSize(point_size))?;
            created.push(id);
        }
        Ok::<_, CommandError>(created)
    })?;

    Ok(CommandOutcome {
        created,
        hidden: Vec::new(),
    })
}
