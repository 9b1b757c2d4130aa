//! Remodeling commands
//!
//! Each command checks the selection, computes its geometry with
//! `mr-geometry`, and only then opens a transaction on the document. Commands
//! are dispatched from a [`RemodelCommand`] the same way for every host.

mod circle;
mod line;
mod modes;
mod path;
mod points;
mod sketch;

use thiserror::Error;
use tracing::{debug, info};

use mr_geometry::GeometryError;

use crate::document::{DocumentContext, DocumentError, ObjectId};
use crate::selection::Selection;
use crate::settings::{RemodelSettings, SettingsChange, SettingsError};

pub use modes::{CenterMode, LineMode, Modifiers, PathMode};

/// Command-related errors
#[derive(Debug, Clone, Error)]
pub enum CommandError {
    #[error("Command {} is not active for the current selection", .0.name())]
    Inactive(CommandId),

    #[error("Invalid selection: {0}")]
    InvalidSelection(String),

    #[error("Geometry error: {0}")]
    Geometry(#[from] GeometryError),

    #[error("Document error: {0}")]
    Document(#[from] DocumentError),

    #[error("Settings error: {0}")]
    Settings(#[from] SettingsError),
}

/// Result type for command operations
pub type CommandResult<T> = Result<T, CommandError>;

/// What a command changed in the document
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CommandOutcome {
    /// Objects created and still present when the command finished
    pub created: Vec<ObjectId>,
    /// Objects the command hid
    pub hidden: Vec<ObjectId>,
}

/// Everything a command handler needs from its host
pub struct CommandContext<'a> {
    pub document: &'a mut dyn DocumentContext,
    pub settings: &'a mut RemodelSettings,
}

impl<'a> CommandContext<'a> {
    pub fn new(document: &'a mut dyn DocumentContext, settings: &'a mut RemodelSettings) -> Self {
        Self { document, settings }
    }
}

/// Display resources of a command
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CommandResources {
    /// Icon file name
    pub icon: &'static str,
    /// Menu entry text (`&` marks the accelerator)
    pub menu_text: &'static str,
    /// Tooltip text
    pub tooltip: &'static str,
}

/// Identifier of each workbench command
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CommandId {
    CreatePointsObject,
    CreateCoplanarPointsObject,
    CreateLine,
    CreatePolygon,
    CreateBSpline,
    CreateCircle,
    CreateArc,
    CreateWire,
    CreateSketch,
    MergeSketches,
    ValidateSketch,
    Settings,
}

impl CommandId {
    /// All commands in registration order
    pub const ALL: [CommandId; 12] = [
        CommandId::CreatePointsObject,
        CommandId::CreateCoplanarPointsObject,
        CommandId::CreateLine,
        CommandId::CreatePolygon,
        CommandId::CreateBSpline,
        CommandId::CreateCircle,
        CommandId::CreateArc,
        CommandId::CreateWire,
        CommandId::CreateSketch,
        CommandId::MergeSketches,
        CommandId::ValidateSketch,
        CommandId::Settings,
    ];

    /// Name the command is registered under
    pub fn name(self) -> &'static str {
        match self {
            CommandId::CreatePointsObject => "MeshRemodelCreatePointsObject",
            CommandId::CreateCoplanarPointsObject => "MeshRemodelCreateCoplanarPointsObject",
            CommandId::CreateLine => "MeshRemodelCreateLine",
            CommandId::CreatePolygon => "MeshRemodelCreatePolygon",
            CommandId::CreateBSpline => "MeshRemodelCreateBSpline",
            CommandId::CreateCircle => "MeshRemodelCreateCircle",
            CommandId::CreateArc => "MeshRemodelCreateArc",
            CommandId::CreateWire => "MeshRemodelCreateWire",
            CommandId::CreateSketch => "MeshRemodelCreateSketch",
            CommandId::MergeSketches => "MeshRemodelMergeSketches",
            CommandId::ValidateSketch => "MeshRemodelValidateSketch",
            CommandId::Settings => "MeshRemodelSettings",
        }
    }

    /// Icon, menu text and tooltip
    pub fn resources(self) -> CommandResources {
        let (icon, menu_text, tooltip) = match self {
            CommandId::CreatePointsObject => (
                "CreatePointsObject.png",
                "Create points &object",
                "Create a compound of points from the vertices of the selected mesh",
            ),
            CommandId::CreateCoplanarPointsObject => (
                "CreateCoplanar.png",
                "Create copla&nar points object",
                "Keep only the points coplanar with 3 picked points, \
                 exploded into individual points",
            ),
            CommandId::CreateLine => (
                "CreateLine.png",
                "Create &line",
                "Create a line between 2 picked points, optionally with its midpoint",
            ),
            CommandId::CreatePolygon => (
                "CreatePolygon.png",
                "Create &polygon",
                "Create a polygon through 3 or more points, open or closed, \
                 in pick order or nearest-neighbor order",
            ),
            CommandId::CreateBSpline => (
                "CreateBSpline.png",
                "Create &BSpline",
                "Create a B-spline through 3 or more points, open or closed, \
                 in pick order or nearest-neighbor order",
            ),
            CommandId::CreateCircle => (
                "CreateCircle.png",
                "Create &circle",
                "Create a circle through the first 3 points, optionally with its center",
            ),
            CommandId::CreateArc => (
                "CreateArc.png",
                "Create &arc",
                "Create an arc through the first 3 points, optionally with its center",
            ),
            CommandId::CreateWire => (
                "CreateWire.png",
                "Create &wire",
                "Join the selected connected objects into a wire",
            ),
            CommandId::CreateSketch => (
                "CreateSketch.png",
                "Create s&ketch",
                "Create a sketch from the selected objects",
            ),
            CommandId::MergeSketches => (
                "MergeSketches.png",
                "&Merge sketches",
                "Merge the selected sketches into one",
            ),
            CommandId::ValidateSketch => (
                "ValidateSketch.png",
                "&Validate sketch",
                "Validate the selected sketch",
            ),
            CommandId::Settings => (
                "Settings.png",
                "&Settings",
                "Workbench settings: toolbar, point size, line width",
            ),
        };
        CommandResources {
            icon,
            menu_text,
            tooltip,
        }
    }

    /// Whether the command can run on the selection
    pub fn is_active(self, selection: &Selection) -> bool {
        let active = match self {
            CommandId::CreatePointsObject => points::points_object_active(selection),
            CommandId::CreateCoplanarPointsObject => points::coplanar_active(selection),
            CommandId::CreateLine => line::is_active(selection),
            CommandId::CreatePolygon | CommandId::CreateBSpline => path::is_active(selection),
            CommandId::CreateCircle | CommandId::CreateArc => circle::is_active(selection),
            CommandId::CreateWire | CommandId::CreateSketch => sketch::objects_active(selection),
            CommandId::MergeSketches => sketch::merge_active(selection),
            CommandId::ValidateSketch => sketch::validate_active(selection),
            CommandId::Settings => true,
        };
        debug!("{} active: {}", self.name(), active);
        active
    }
}

/// A command invocation with its mode
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RemodelCommand {
    CreatePointsObject,
    CreateCoplanarPointsObject,
    CreateLine(LineMode),
    CreatePolygon(PathMode),
    CreateBSpline(PathMode),
    CreateCircle(CenterMode),
    CreateArc(CenterMode),
    CreateWire,
    CreateSketch,
    MergeSketches,
    ValidateSketch,
    Settings(SettingsChange),
}

impl RemodelCommand {
    /// Build an invocation from the modifier keys held
    ///
    /// Returns `None` for the settings command, which needs an explicit change.
    pub fn from_modifiers(id: CommandId, modifiers: Modifiers) -> Option<Self> {
        let command = match id {
            CommandId::CreatePointsObject => RemodelCommand::CreatePointsObject,
            CommandId::CreateCoplanarPointsObject => RemodelCommand::CreateCoplanarPointsObject,
            CommandId::CreateLine => RemodelCommand::CreateLine(modifiers.into()),
            CommandId::CreatePolygon => {
                RemodelCommand::CreatePolygon(PathMode::for_polygon(modifiers))
            }
            CommandId::CreateBSpline => {
                RemodelCommand::CreateBSpline(PathMode::for_bspline(modifiers))
            }
            CommandId::CreateCircle => RemodelCommand::CreateCircle(modifiers.into()),
            CommandId::CreateArc => RemodelCommand::CreateArc(modifiers.into()),
            CommandId::CreateWire => RemodelCommand::CreateWire,
            CommandId::CreateSketch => RemodelCommand::CreateSketch,
            CommandId::MergeSketches => RemodelCommand::MergeSketches,
            CommandId::ValidateSketch => RemodelCommand::ValidateSketch,
            CommandId::Settings => return None,
        };
        Some(command)
    }

    /// The command being invoked
    pub fn id(&self) -> CommandId {
        match self {
            RemodelCommand::CreatePointsObject => CommandId::CreatePointsObject,
            RemodelCommand::CreateCoplanarPointsObject => CommandId::CreateCoplanarPointsObject,
            RemodelCommand::CreateLine(_) => CommandId::CreateLine,
            RemodelCommand::CreatePolygon(_) => CommandId::CreatePolygon,
            RemodelCommand::CreateBSpline(_) => CommandId::CreateBSpline,
            RemodelCommand::CreateCircle(_) => CommandId::CreateCircle,
            RemodelCommand::CreateArc(_) => CommandId::CreateArc,
            RemodelCommand::CreateWire => CommandId::CreateWire,
            RemodelCommand::CreateSketch => CommandId::CreateSketch,
            RemodelCommand::MergeSketches => CommandId::MergeSketches,
            RemodelCommand::ValidateSketch => CommandId::ValidateSketch,
            RemodelCommand::Settings(_) => CommandId::Settings,
        }
    }
}

/// Run a command against the selection
///
/// Fails with [`CommandError::Inactive`] when the selection does not suit
/// the command.
pub fn dispatch(
    command: RemodelCommand,
    selection: &Selection,
    ctx: &mut CommandContext,
) -> CommandResult<CommandOutcome> {
    let id = command.id();
    if !id.is_active(selection) {
        return Err(CommandError::Inactive(id));
    }

    match command {
        RemodelCommand::CreatePointsObject => points::create_points_object(selection, ctx),
        RemodelCommand::CreateCoplanarPointsObject => {
            points::create_coplanar_points(selection, ctx)
        }
        RemodelCommand::CreateLine(mode) => line::create_line(selection, mode, ctx),
        RemodelCommand::CreatePolygon(mode) => path::create_polygon(selection, mode, ctx),
        RemodelCommand::CreateBSpline(mode) => path::create_bspline(selection, mode, ctx),
        RemodelCommand::CreateCircle(mode) => {
            circle::create_circular(selection, circle::Circular::Circle, mode, ctx)
        }
        RemodelCommand::CreateArc(mode) => {
            circle::create_circular(selection, circle::Circular::Arc, mode, ctx)
        }
        RemodelCommand::CreateWire => sketch::create_wire(selection, ctx),
        RemodelCommand::CreateSketch => sketch::create_sketch(selection, ctx),
        RemodelCommand::MergeSketches => sketch::merge_sketches(selection, ctx),
        RemodelCommand::ValidateSketch => sketch::validate_sketch(selection, ctx),
        RemodelCommand::Settings(change) => {
            ctx.settings.apply(change)?;
            info!("Applied settings change: {:?}", change);
            Ok(CommandOutcome::default())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::{MemoryDocument, ObjectKind};
    use crate::selection::SelectionItem;

    #[test]
    fn test_all_commands_have_resources() {
        for id in CommandId::ALL {
            let resources = id.resources();
            assert!(resources.icon.ends_with(".png"));
            assert!(resources.menu_text.contains('&'));
            assert!(!resources.tooltip.is_empty());
            assert!(id.name().starts_with("MeshRemodel"));
        }
    }

    #[test]
    fn test_from_modifiers_round_trips_id() {
        for id in CommandId::ALL {
            match RemodelCommand::from_modifiers(id, Modifiers::NONE) {
                Some(command) => assert_eq!(command.id(), id),
                None => assert_eq!(id, CommandId::Settings),
            }
        }
    }

    #[test]
    fn test_from_modifiers_picks_modes() {
        assert_eq!(
            RemodelCommand::from_modifiers(CommandId::CreateLine, Modifiers::CTRL),
            Some(RemodelCommand::CreateLine(LineMode::LineAndMidpoint))
        );
        assert_eq!(
            RemodelCommand::from_modifiers(CommandId::CreateBSpline, Modifiers::SHIFT),
            Some(RemodelCommand::CreateBSpline(PathMode::SortedOpen))
        );
        assert_eq!(
            RemodelCommand::from_modifiers(CommandId::CreateArc, Modifiers::CTRL_SHIFT),
            Some(RemodelCommand::CreateArc(CenterMode::CenterOnly))
        );
    }

    #[test]
    fn test_settings_always_active() {
        assert!(CommandId::Settings.is_active(&Selection::new()));
    }

    #[test]
    fn test_dispatch_inactive() {
        let mut doc = MemoryDocument::new();
        let mut settings = RemodelSettings::default();
        let mut ctx = CommandContext::new(&mut doc, &mut settings);

        let result = dispatch(
            RemodelCommand::CreateLine(LineMode::Line),
            &Selection::new(),
            &mut ctx,
        );
        assert!(matches!(
            result,
            Err(CommandError::Inactive(CommandId::CreateLine))
        ));
    }

    #[test]
    fn test_dispatch_settings() {
        let mut doc = MemoryDocument::new();
        let mut settings = RemodelSettings::default();
        {
            let mut ctx = CommandContext::new(&mut doc, &mut settings);
            dispatch(
                RemodelCommand::Settings(SettingsChange::LineWidth(3.0)),
                &Selection::new(),
                &mut ctx,
            )
            .unwrap();

            let err = dispatch(
                RemodelCommand::Settings(SettingsChange::LineWidth(100.0)),
                &Selection::new(),
                &mut ctx,
            )
            .unwrap_err();
            assert!(matches!(err, CommandError::Settings(_)));
        }
        assert_eq!(settings.line_width, 3.0);
        assert!(doc.objects().is_empty());
    }

    #[test]
    fn test_dispatch_from_modifiers() {
        use glam::DVec3;

        let mut doc = MemoryDocument::new();
        let mesh = doc.add_mesh("Mesh", [DVec3::ZERO, DVec3::X, DVec3::Y]);
        let selection = Selection::from_items([SelectionItem::new(mesh, "Mesh", ObjectKind::Mesh)
            .with_picked_points([DVec3::ZERO, DVec3::X])]);

        let mut settings = RemodelSettings::default();
        settings.apply(SettingsChange::PointSize(7.0)).unwrap();

        let command = RemodelCommand::from_modifiers(CommandId::CreateLine, Modifiers::CTRL).unwrap();
        let outcome = {
            let mut ctx = CommandContext::new(&mut doc, &mut settings);
            dispatch(command, &selection, &mut ctx).unwrap()
        };

        assert_eq!(outcome.created.len(), 2);
        let mid = doc.find_by_name("MR_Line_Mid").unwrap();
        assert_eq!(mid.point_size, Some(7.0));
    }

    #[test]
    fn test_inactive_error_names_command() {
        let err = CommandError::Inactive(CommandId::MergeSketches);
        assert!(err.to_string().contains("MeshRemodelMergeSketches"));

        let sketch = Selection::from_items([SelectionItem::new(
            ObjectId::new(),
            "Sketch",
            ObjectKind::Sketch,
        )]);
        assert!(!CommandId::MergeSketches.is_active(&sketch));
    }
}
