//! Selection model
//!
//! The host translates its current selection into a [`Selection`] before
//! asking whether a command is active or running it.

use glam::DVec3;
use serde::{Deserialize, Serialize};

use crate::document::{ObjectId, ObjectKind};

/// One selected object and what was picked on it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SelectionItem {
    /// The selected object
    pub object: ObjectId,
    /// Name of the object
    pub name: String,
    /// Kind of the object
    pub kind: ObjectKind,
    /// Points picked on the object, in pick order
    pub picked_points: Vec<DVec3>,
    /// The object's only vertex, when it is a single-point object
    pub lone_vertex: Option<DVec3>,
}

impl SelectionItem {
    /// Create a selection item with no picked points
    pub fn new(object: ObjectId, name: impl Into<String>, kind: ObjectKind) -> Self {
        Self {
            object,
            name: name.into(),
            kind,
            picked_points: Vec::new(),
            lone_vertex: None,
        }
    }

    /// Set the picked points
    pub fn with_picked_points(mut self, points: impl IntoIterator<Item = DVec3>) -> Self {
        self.picked_points = points.into_iter().collect();
        self
    }

    /// Mark the item as a single-point object at `vertex`
    pub fn with_lone_vertex(mut self, vertex: DVec3) -> Self {
        self.lone_vertex = Some(vertex);
        self
    }
}

/// The ordered set of selected items
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Selection {
    items: Vec<SelectionItem>,
}

impl Selection {
    /// Create an empty selection
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a selection from items
    pub fn from_items(items: impl IntoIterator<Item = SelectionItem>) -> Self {
        Self {
            items: items.into_iter().collect(),
        }
    }

    /// Append an item
    pub fn push(&mut self, item: SelectionItem) {
        self.items.push(item);
    }

    /// Check if nothing is selected
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// All items in selection order
    pub fn items(&self) -> &[SelectionItem] {
        &self.items
    }

    /// The first selected item
    pub fn first(&self) -> Option<&SelectionItem> {
        self.items.first()
    }

    /// Picked points across all items, or `None` if there are more than `limit`
    ///
    /// Stops scanning as soon as the limit is exceeded.
    pub fn picked_points(&self, limit: usize) -> Option<Vec<DVec3>> {
        let mut points = Vec::new();
        for point in self.items.iter().flat_map(|item| &item.picked_points) {
            if points.len() == limit {
                return None;
            }
            points.push(*point);
        }
        Some(points)
    }

    /// Picked points, plus the vertex of single-point objects picked whole
    pub fn points_with_vertices(&self) -> Vec<DVec3> {
        let mut points = Vec::new();
        for item in &self.items {
            points.extend_from_slice(&item.picked_points);
            if item.picked_points.is_empty() {
                points.extend(item.lone_vertex);
            }
        }
        points
    }

    /// IDs of all selected objects
    pub fn objects(&self) -> Vec<ObjectId> {
        self.items.iter().map(|item| item.object).collect()
    }

    /// IDs of selected objects of one kind
    pub fn objects_of_kind(&self, kind: ObjectKind) -> Vec<ObjectId> {
        self.items
            .iter()
            .filter(|item| item.kind == kind)
            .map(|item| item.object)
            .collect()
    }
}
