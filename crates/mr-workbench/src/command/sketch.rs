//! Sketch and wire commands
//!
//! Thin wrappers over host operations. Merging and validating run the
//! host's own sketch tools, which manage their own undo step.

use tracing::info;

use super::{CommandContext, CommandError, CommandOutcome, CommandResult};
use crate::document::{
    DocumentContext, DocumentResult, ObjectId, ObjectKind, ViewProperty, with_transaction,
};
use crate::selection::Selection;

pub(super) fn objects_active(selection: &Selection) -> bool {
    !selection.is_empty()
}

pub(super) fn merge_active(selection: &Selection) -> bool {
    selection.objects_of_kind(ObjectKind::Sketch).len() >= 2
}

pub(super) fn validate_active(selection: &Selection) -> bool {
    selection.objects_of_kind(ObjectKind::Sketch).len() == 1
}

fn hide_all(doc: &mut dyn DocumentContext, objects: &[ObjectId]) -> DocumentResult<()> {
    for &id in objects {
        doc.set_view_property(id, ViewProperty::Visibility(false))?;
    }
    Ok(())
}

/// Build a sketch from the selected objects and hide them
pub(super) fn create_sketch(
    selection: &Selection,
    ctx: &mut CommandContext,
) -> CommandResult<CommandOutcome> {
    let objects = selection.objects();
    let sketch = with_transaction(ctx.document, "Create sketch", |doc| {
        let sketch = doc.make_sketch(&objects, true)?;
        doc.recompute();
        hide_all(doc, &objects)?;
        Ok::<_, CommandError>(sketch)
    })?;

    info!("Created sketch from {} objects", objects.len());
    Ok(CommandOutcome {
        created: vec![sketch],
        hidden: objects,
    })
}

/// Join the selected objects into wires and hide them
pub(super) fn create_wire(
    selection: &Selection,
    ctx: &mut CommandContext,
) -> CommandResult<CommandOutcome> {
    let objects = selection.objects();
    let wires = with_transaction(ctx.document, "Create wire", |doc| {
        let wires = doc.upgrade_to_wire(&objects)?;
        doc.recompute();
        hide_all(doc, &objects)?;
        Ok::<_, CommandError>(wires)
    })?;

    info!("Upgraded {} objects to {} wire(s)", objects.len(), wires.len());
    Ok(CommandOutcome {
        created: wires,
        hidden: objects,
    })
}

/// Merge the selected sketches and hide the originals
pub(super) fn merge_sketches(
    selection: &Selection,
    ctx: &mut CommandContext,
) -> CommandResult<CommandOutcome> {
    let sketches = selection.objects_of_kind(ObjectKind::Sketch);
    let merged = ctx.document.merge_sketches(&sketches)?;
    ctx.document.recompute();
    hide_all(ctx.document, &sketches)?;

    info!("Merged {} sketches", sketches.len());
    Ok(CommandOutcome {
        created: vec![merged],
        hidden: sketches,
    })
}

/// Run the host's validation on the selected sketch
pub(super) fn validate_sketch(
    selection: &Selection,
    ctx: &mut CommandContext,
) -> CommandResult<CommandOutcome> {
    let sketches = selection.objects_of_kind(ObjectKind::Sketch);
    let [sketch] = sketches.as_slice() else {
        return Err(CommandError::InvalidSelection(format!(
            "exactly 1 sketch must be selected, got {}",
            sketches.len()
        )));
    };
    ctx.document.validate_sketch(*sketch)?;
    Ok(CommandOutcome::default())
}
