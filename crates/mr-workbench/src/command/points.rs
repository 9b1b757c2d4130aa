//! Points object commands

use tracing::info;

use mr_geometry::coplanar_points;

use super::{CommandContext, CommandError, CommandOutcome, CommandResult};
use crate::document::{
    DocumentContext, DocumentResult, ObjectId, ObjectKind, Shape, ViewProperty, with_transaction,
};
use crate::selection::Selection;

pub(super) fn points_object_active(selection: &Selection) -> bool {
    selection
        .first()
        .is_some_and(|item| item.kind == ObjectKind::Mesh)
}

pub(super) fn coplanar_active(selection: &Selection) -> bool {
    selection
        .picked_points(3)
        .is_some_and(|points| points.len() == 3)
}

/// Turn the vertices of the first selected mesh into a points compound
pub(super) fn create_points_object(
    selection: &Selection,
    ctx: &mut CommandContext,
) -> CommandResult<CommandOutcome> {
    let mesh = selection
        .first()
        .ok_or_else(|| CommandError::InvalidSelection("no mesh selected".into()))?
        .object;
    let points = ctx.document.mesh_points(mesh)?;
    let point_size = ctx.settings.point_size;

    let created = with_transaction(ctx.document, "Create points object", |doc| {
        let id = doc.add_shape("MR_Points", Shape::points(points))?;
        doc.set_view_property(id, ViewProperty::PointSize(point_size))?;
        Ok::<_, CommandError>(id)
    })?;

    info!("Created points object from mesh {}", mesh);
    Ok(CommandOutcome {
        created: vec![created],
        hidden: Vec::new(),
    })
}

/// Keep the vertices coplanar with three picked points, one object per point
pub(super) fn create_coplanar_points(
    selection: &Selection,
    ctx: &mut CommandContext,
) -> CommandResult<CommandOutcome> {
    let trio: [_; 3] = selection
        .picked_points(3)
        .and_then(|points| points.try_into().ok())
        .ok_or_else(|| CommandError::InvalidSelection("exactly 3 points must be picked".into()))?;
    let source = selection
        .first()
        .ok_or_else(|| CommandError::InvalidSelection("nothing selected".into()))?
        .object;

    let candidates = ctx.document.shape_vertices(source)?;
    let mut points = coplanar_points(&trio, candidates, ctx.settings.coplanar_tolerance);
    points.extend(trio);
    info!(
        "Found {} points coplanar with the picked points",
        points.len() - trio.len()
    );

    let point_size = ctx.settings.point_size;
    let compound = with_transaction(ctx.document, "Create coplanar", |doc| {
        let id = doc.add_shape("MR_Points_Coplanar", Shape::points(points))?;
        doc.set_view_property(id, ViewProperty::PointSize(point_size))?;
        doc.set_view_property(source, ViewProperty::Visibility(false))?;
        Ok::<_, CommandError>(id)
    })?;

    let children = with_transaction(ctx.document, "Explode coplanar points", |doc| {
        explode_points(doc, compound, point_size)
    })?;

    Ok(CommandOutcome {
        created: std::iter::once(compound).chain(children).collect(),
        hidden: vec![source, compound],
    })
}

fn explode_points(
    doc: &mut dyn DocumentContext,
    compound: ObjectId,
    point_size: f64,
) -> DocumentResult<Vec<ObjectId>> {
    let children = doc.explode_compound(compound)?;
    doc.set_view_property(compound, ViewProperty::Visibility(false))?;
    for &child in &children {
        doc.set_view_property(child, ViewProperty::PointSize(point_size))?;
    }
    Ok(children)
}

#[cfg(test)]
mod tests {
    use glam::DVec3;

    use super::*;
    use crate::document::MemoryDocument;
    use crate::selection::SelectionItem;
    use crate::settings::RemodelSettings;

    fn cube_corners() -> Vec<DVec3> {
        let mut corners = Vec::new();
        for x in [0.0, 1.0] {
            for y in [0.0, 1.0] {
                for z in [0.0, 1.0] {
                    corners.push(DVec3::new(x, y, z));
                }
            }
        }
        corners
    }

    #[test]
    fn test_points_object_from_mesh() {
        let mut doc = MemoryDocument::new();
        let mesh = doc.add_mesh("Mesh", cube_corners());
        let selection =
            Selection::from_items([SelectionItem::new(mesh, "Mesh", ObjectKind::Mesh)]);
        assert!(points_object_active(&selection));

        let mut settings = RemodelSettings::default();
        let outcome = {
            let mut ctx = CommandContext::new(&mut doc, &mut settings);
            create_points_object(&selection, &mut ctx).unwrap()
        };

        let points = doc.get(outcome.created[0]).unwrap();
        assert_eq!(points.name, "MR_Points");
        assert_eq!(points.kind, ObjectKind::Points);
        assert_eq!(points.shape.vertices().len(), 8);
        assert_eq!(points.point_size, Some(4.0));
        assert_eq!(doc.committed_transactions(), ["Create points object"]);
    }

    #[test]
    fn test_points_object_needs_mesh_first() {
        let selection = Selection::from_items([SelectionItem::new(
            ObjectId::new(),
            "Line",
            ObjectKind::Other,
        )]);
        assert!(!points_object_active(&selection));
        assert!(!points_object_active(&Selection::new()));
    }

    #[test]
    fn test_coplanar_points() {
        let mut doc = MemoryDocument::new();
        let source = doc.add_object("Points", ObjectKind::Points, Shape::points(cube_corners()));
        let trio = [DVec3::ZERO, DVec3::X, DVec3::Y];
        let selection = Selection::from_items([
            SelectionItem::new(source, "Points", ObjectKind::Points).with_picked_points(trio),
        ]);
        assert!(coplanar_active(&selection));

        let mut settings = RemodelSettings::default();
        let outcome = {
            let mut ctx = CommandContext::new(&mut doc, &mut settings);
            create_coplanar_points(&selection, &mut ctx).unwrap()
        };

        // z = 0 face (4 corners) plus the picked trio, one object each
        let compound = doc.get(outcome.created[0]).unwrap();
        assert_eq!(compound.name, "MR_Points_Coplanar");
        assert_eq!(compound.shape.vertices().len(), 7);
        assert!(!compound.visible);
        assert_eq!(outcome.created.len(), 1 + 7);
        for &child in &outcome.created[1..] {
            let child = doc.get(child).unwrap();
            assert_eq!(child.point_size, Some(4.0));
            assert!(child.visible);
            assert_eq!(child.shape.vertices()[0].z, 0.0);
        }

        assert!(!doc.get(source).unwrap().visible);
        assert_eq!(
            doc.committed_transactions(),
            ["Create coplanar", "Explode coplanar points"]
        );
    }

    #[test]
    fn test_coplanar_needs_three_points() {
        let item = |n: usize| {
            SelectionItem::new(ObjectId::new(), "Points", ObjectKind::Points)
                .with_picked_points((0..n).map(|i| DVec3::splat(i as f64)))
        };
        assert!(!coplanar_active(&Selection::from_items([item(2)])));
        assert!(coplanar_active(&Selection::from_items([item(3)])));
        assert!(!coplanar_active(&Selection::from_items([item(4)])));
        assert!(coplanar_active(&Selection::from_items([item(1), item(2)])));
    }
}
