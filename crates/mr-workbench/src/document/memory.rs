//! In-memory document
//!
//! A headless [`DocumentContext`] that stores objects in insertion order.
//! Aborting a transaction restores the object list as it was when the
//! transaction opened. Host operations (explode, sketch, wire, merge) are
//! modelled structurally: they create new objects grouping the inputs'
//! shapes rather than running a real geometry kernel.

use glam::DVec3;

use super::traits::{
    DocumentContext, DocumentError, DocumentResult, ObjectId, ObjectKind, Shape, ViewProperty,
};

/// An object stored in a [`MemoryDocument`]
#[derive(Debug, Clone, PartialEq)]
pub struct DocumentObject {
    /// Unique identifier
    pub id: ObjectId,
    /// Unique name
    pub name: String,
    /// Object kind
    pub kind: ObjectKind,
    /// Geometry
    pub shape: Shape,
    /// Point size, if one was set
    pub point_size: Option<f64>,
    /// Line width, if one was set
    pub line_width: Option<f64>,
    /// Whether the object is shown
    pub visible: bool,
}

#[derive(Debug, Clone)]
struct OpenTransaction {
    name: String,
    snapshot: Vec<DocumentObject>,
}

/// A document kept entirely in memory
#[derive(Debug, Clone, Default)]
pub struct MemoryDocument {
    objects: Vec<DocumentObject>,
    selection: Vec<ObjectId>,
    open: Option<OpenTransaction>,
    committed: Vec<String>,
    validated: Vec<ObjectId>,
    recomputes: usize,
}

impl MemoryDocument {
    /// Create an empty document
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an object of an explicit kind
    pub fn add_object(&mut self, label: &str, kind: ObjectKind, shape: Shape) -> ObjectId {
        let id = ObjectId::new();
        let name = self.unique_name(label);
        self.objects.push(DocumentObject {
            id,
            name,
            kind,
            shape,
            point_size: None,
            line_width: None,
            visible: true,
        });
        id
    }

    /// Add a mesh object with the given vertices
    pub fn add_mesh(&mut self, label: &str, points: impl IntoIterator<Item = DVec3>) -> ObjectId {
        self.add_object(label, ObjectKind::Mesh, Shape::points(points))
    }

    /// All objects in insertion order
    pub fn objects(&self) -> &[DocumentObject] {
        &self.objects
    }

    /// Get an object by ID
    pub fn get(&self, id: ObjectId) -> Option<&DocumentObject> {
        self.objects.iter().find(|o| o.id == id)
    }

    /// Get an object by its unique name
    pub fn find_by_name(&self, name: &str) -> Option<&DocumentObject> {
        self.objects.iter().find(|o| o.name == name)
    }

    /// Objects whose name starts with `label`
    pub fn objects_labeled<'a>(
        &'a self,
        label: &'a str,
    ) -> impl Iterator<Item = &'a DocumentObject> + 'a {
        self.objects.iter().filter(move |o| o.name.starts_with(label))
    }

    /// Names of committed transactions, oldest first
    pub fn committed_transactions(&self) -> &[String] {
        &self.committed
    }

    /// Whether a transaction is currently open
    pub fn is_transaction_open(&self) -> bool {
        self.open.is_some()
    }

    /// Current host selection
    pub fn selection(&self) -> &[ObjectId] {
        &self.selection
    }

    /// Sketches that went through validation
    pub fn validated_sketches(&self) -> &[ObjectId] {
        &self.validated
    }

    /// Number of recomputes requested
    pub fn recompute_count(&self) -> usize {
        self.recomputes
    }

    fn unique_name(&self, label: &str) -> String {
        let taken = |name: &str| self.objects.iter().any(|o| o.name == name);
        if !taken(label) {
            return label.to_string();
        }
        (1..)
            .map(|n| format!("{label}{n:03}"))
            .find(|name| !taken(name))
            .unwrap_or_else(|| label.to_string())
    }

    fn object(&self, id: ObjectId) -> DocumentResult<&DocumentObject> {
        self.get(id).ok_or(DocumentError::ObjectNotFound(id))
    }

    fn object_mut(&mut self, id: ObjectId) -> DocumentResult<&mut DocumentObject> {
        self.objects
            .iter_mut()
            .find(|o| o.id == id)
            .ok_or(DocumentError::ObjectNotFound(id))
    }

    fn shapes_of(&self, ids: &[ObjectId]) -> DocumentResult<Vec<Shape>> {
        ids.iter()
            .map(|&id| self.object(id).map(|o| o.shape.clone()))
            .collect()
    }
}

fn kind_of(shape: &Shape) -> ObjectKind {
    if shape.is_points() {
        ObjectKind::Points
    } else {
        ObjectKind::Other
    }
}

impl DocumentContext for MemoryDocument {
    fn open_transaction(&mut self, name: &str) -> DocumentResult<()> {
        if let Some(open) = &self.open {
            return Err(DocumentError::TransactionOpen(open.name.clone()));
        }
        self.open = Some(OpenTransaction {
            name: name.to_string(),
            snapshot: self.objects.clone(),
        });
        Ok(())
    }

    fn commit_transaction(&mut self) -> DocumentResult<()> {
        let open = self.open.take().ok_or(DocumentError::NoTransaction)?;
        self.committed.push(open.name);
        Ok(())
    }

    fn abort_transaction(&mut self) -> DocumentResult<()> {
        let open = self.open.take().ok_or(DocumentError::NoTransaction)?;
        self.objects = open.snapshot;
        let objects = &self.objects;
        self.selection
            .retain(|id| objects.iter().any(|o| o.id == *id));
        Ok(())
    }

    fn recompute(&mut self) {
        self.recomputes += 1;
    }

    fn add_shape(&mut self, label: &str, shape: Shape) -> DocumentResult<ObjectId> {
        let kind = kind_of(&shape);
        Ok(self.add_object(label, kind, shape))
    }

    fn remove_object(&mut self, id: ObjectId) -> DocumentResult<()> {
        let index = self
            .objects
            .iter()
            .position(|o| o.id == id)
            .ok_or(DocumentError::ObjectNotFound(id))?;
        self.objects.remove(index);
        self.selection.retain(|s| *s != id);
        Ok(())
    }

    fn object_name(&self, id: ObjectId) -> DocumentResult<String> {
        self.object(id).map(|o| o.name.clone())
    }

    fn set_view_property(&mut self, id: ObjectId, property: ViewProperty) -> DocumentResult<()> {
        let object = self.object_mut(id)?;
        match property {
            ViewProperty::PointSize(size) => object.point_size = Some(size),
            ViewProperty::LineWidth(width) => object.line_width = Some(width),
            ViewProperty::Visibility(visible) => object.visible = visible,
        }
        Ok(())
    }

    fn clear_selection(&mut self) {
        self.selection.clear();
    }

    fn add_to_selection(&mut self, id: ObjectId) -> DocumentResult<()> {
        self.object(id)?;
        if !self.selection.contains(&id) {
            self.selection.push(id);
        }
        Ok(())
    }

    fn mesh_points(&self, id: ObjectId) -> DocumentResult<Vec<DVec3>> {
        let object = self.object(id)?;
        if object.kind != ObjectKind::Mesh {
            return Err(DocumentError::HostOperation(format!(
                "{} is not a mesh",
                object.name
            )));
        }
        Ok(object.shape.vertices())
    }

    fn shape_vertices(&self, id: ObjectId) -> DocumentResult<Vec<DVec3>> {
        self.object(id).map(|o| o.shape.vertices())
    }

    fn explode_compound(&mut self, id: ObjectId) -> DocumentResult<Vec<ObjectId>> {
        let object = self.object(id)?;
        let Shape::Compound(children) = &object.shape else {
            return Err(DocumentError::HostOperation(format!(
                "{} is not a compound",
                object.name
            )));
        };
        let label = format!("{}_child", object.name);
        let children = children.clone();

        Ok(children
            .into_iter()
            .map(|child| {
                let kind = kind_of(&child);
                self.add_object(&label, kind, child)
            })
            .collect())
    }

    fn make_sketch(
        &mut self,
        objects: &[ObjectId],
        autoconstraints: bool,
    ) -> DocumentResult<ObjectId> {
        if objects.is_empty() {
            return Err(DocumentError::HostOperation(
                "sketch needs at least one object".into(),
            ));
        }
        let shapes = self.shapes_of(objects)?;
        tracing::debug!(
            "Building sketch from {} objects (autoconstraints: {})",
            shapes.len(),
            autoconstraints
        );
        Ok(self.add_object("Sketch", ObjectKind::Sketch, Shape::Compound(shapes)))
    }

    fn upgrade_to_wire(&mut self, objects: &[ObjectId]) -> DocumentResult<Vec<ObjectId>> {
        if objects.is_empty() {
            return Err(DocumentError::HostOperation(
                "wire needs at least one object".into(),
            ));
        }
        let shapes = self.shapes_of(objects)?;
        Ok(vec![self.add_object(
            "Wire",
            ObjectKind::Wire,
            Shape::Compound(shapes),
        )])
    }

    fn merge_sketches(&mut self, sketches: &[ObjectId]) -> DocumentResult<ObjectId> {
        if sketches.len() < 2 {
            return Err(DocumentError::HostOperation(
                "merge needs at least two sketches".into(),
            ));
        }
        for &id in sketches {
            let object = self.object(id)?;
            if object.kind != ObjectKind::Sketch {
                return Err(DocumentError::HostOperation(format!(
                    "{} is not a sketch",
                    object.name
                )));
            }
        }
        let shapes = self.shapes_of(sketches)?;
        Ok(self.add_object("Sketch", ObjectKind::Sketch, Shape::Compound(shapes)))
    }

    fn validate_sketch(&mut self, sketch: ObjectId) -> DocumentResult<()> {
        let object = self.object(sketch)?;
        if object.kind != ObjectKind::Sketch {
            return Err(DocumentError::HostOperation(format!(
                "{} is not a sketch",
                object.name
            )));
        }
        self.validated.push(sketch);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unique_names() {
        let mut doc = MemoryDocument::new();
        let a = doc.add_shape("MR_Line", Shape::line(DVec3::ZERO, DVec3::X)).unwrap();
        let b = doc.add_shape("MR_Line", Shape::line(DVec3::ZERO, DVec3::Y)).unwrap();
        let c = doc.add_shape("MR_Line", Shape::line(DVec3::ZERO, DVec3::Z)).unwrap();

        assert_eq!(doc.object_name(a).unwrap(), "MR_Line");
        assert_eq!(doc.object_name(b).unwrap(), "MR_Line001");
        assert_eq!(doc.object_name(c).unwrap(), "MR_Line002");
        assert_eq!(doc.objects_labeled("MR_Line").count(), 3);
    }

    #[test]
    fn test_kind_from_shape() {
        let mut doc = MemoryDocument::new();
        let points = doc.add_shape("P", Shape::points([DVec3::ZERO])).unwrap();
        let line = doc.add_shape("L", Shape::line(DVec3::ZERO, DVec3::X)).unwrap();
        assert_eq!(doc.get(points).unwrap().kind, ObjectKind::Points);
        assert_eq!(doc.get(line).unwrap().kind, ObjectKind::Other);
    }

    #[test]
    fn test_transaction_commit() {
        let mut doc = MemoryDocument::new();
        doc.open_transaction("Create line").unwrap();
        assert!(doc.is_transaction_open());
        doc.add_shape("MR_Line", Shape::line(DVec3::ZERO, DVec3::X))
            .unwrap();
        doc.commit_transaction().unwrap();

        assert!(!doc.is_transaction_open());
        assert_eq!(doc.committed_transactions(), ["Create line".to_string()]);
        assert_eq!(doc.objects().len(), 1);
    }

    #[test]
    fn test_nested_transaction_rejected() {
        let mut doc = MemoryDocument::new();
        doc.open_transaction("first").unwrap();
        assert!(matches!(
            doc.open_transaction("second"),
            Err(DocumentError::TransactionOpen(name)) if name == "first"
        ));
    }

    #[test]
    fn test_commit_without_transaction() {
        let mut doc = MemoryDocument::new();
        assert!(matches!(
            doc.commit_transaction(),
            Err(DocumentError::NoTransaction)
        ));
        assert!(matches!(
            doc.abort_transaction(),
            Err(DocumentError::NoTransaction)
        ));
    }

    #[test]
    fn test_abort_restores_objects() {
        let mut doc = MemoryDocument::new();
        let kept = doc.add_shape("Keep", Shape::Point(DVec3::ONE)).unwrap();

        doc.open_transaction("scratch").unwrap();
        let added = doc.add_shape("Temp", Shape::Point(DVec3::ZERO)).unwrap();
        doc.add_to_selection(added).unwrap();
        doc.set_view_property(kept, ViewProperty::Visibility(false))
            .unwrap();
        doc.remove_object(kept).unwrap();
        doc.abort_transaction().unwrap();

        assert!(doc.get(added).is_none());
        assert!(doc.selection().is_empty());
        let restored = doc.get(kept).unwrap();
        assert!(restored.visible);
        assert!(doc.committed_transactions().is_empty());
    }

    #[test]
    fn test_view_properties() {
        let mut doc = MemoryDocument::new();
        let id = doc.add_shape("P", Shape::Point(DVec3::ZERO)).unwrap();
        doc.set_view_property(id, ViewProperty::PointSize(6.0))
            .unwrap();
        doc.set_view_property(id, ViewProperty::LineWidth(2.5))
            .unwrap();

        let object = doc.get(id).unwrap();
        assert_eq!(object.point_size, Some(6.0));
        assert_eq!(object.line_width, Some(2.5));

        let missing = ObjectId::new();
        assert!(matches!(
            doc.set_view_property(missing, ViewProperty::Visibility(false)),
            Err(DocumentError::ObjectNotFound(id)) if id == missing
        ));
    }

    #[test]
    fn test_mesh_points_requires_mesh() {
        let mut doc = MemoryDocument::new();
        let mesh = doc.add_mesh("Mesh", [DVec3::ZERO, DVec3::X]);
        let points = doc.add_shape("P", Shape::points([DVec3::Y])).unwrap();

        assert_eq!(doc.mesh_points(mesh).unwrap(), vec![DVec3::ZERO, DVec3::X]);
        assert!(doc.mesh_points(points).is_err());
        assert_eq!(doc.shape_vertices(points).unwrap(), vec![DVec3::Y]);
    }

    #[test]
    fn test_explode_compound() {
        let mut doc = MemoryDocument::new();
        let compound = doc
            .add_shape("MR_Points", Shape::points([DVec3::ZERO, DVec3::X, DVec3::Y]))
            .unwrap();

        let children = doc.explode_compound(compound).unwrap();
        assert_eq!(children.len(), 3);
        for child in &children {
            let object = doc.get(*child).unwrap();
            assert_eq!(object.kind, ObjectKind::Points);
            assert!(object.name.starts_with("MR_Points_child"));
        }

        let line = doc
            .add_shape("L", Shape::line(DVec3::ZERO, DVec3::X))
            .unwrap();
        assert!(doc.explode_compound(line).is_err());
    }

    #[test]
    fn test_sketch_operations() {
        let mut doc = MemoryDocument::new();
        let line = doc
            .add_shape("L", Shape::line(DVec3::ZERO, DVec3::X))
            .unwrap();

        let first = doc.make_sketch(&[line], true).unwrap();
        let second = doc.make_sketch(&[line], true).unwrap();
        assert_eq!(doc.object_name(first).unwrap(), "Sketch");
        assert_eq!(doc.object_name(second).unwrap(), "Sketch001");

        let merged = doc.merge_sketches(&[first, second]).unwrap();
        assert_eq!(doc.get(merged).unwrap().kind, ObjectKind::Sketch);
        assert!(doc.merge_sketches(&[first]).is_err());
        assert!(doc.merge_sketches(&[first, line]).is_err());

        doc.validate_sketch(merged).unwrap();
        assert_eq!(doc.validated_sketches(), [merged]);
        assert!(doc.validate_sketch(line).is_err());
    }

    #[test]
    fn test_upgrade_to_wire() {
        let mut doc = MemoryDocument::new();
        let a = doc
            .add_shape("L", Shape::line(DVec3::ZERO, DVec3::X))
            .unwrap();
        let b = doc
            .add_shape("L", Shape::line(DVec3::X, DVec3::Y))
            .unwrap();

        let wires = doc.upgrade_to_wire(&[a, b]).unwrap();
        assert_eq!(wires.len(), 1);
        let wire = doc.get(wires[0]).unwrap();
        assert_eq!(wire.kind, ObjectKind::Wire);
        assert_eq!(wire.shape.vertices(), vec![DVec3::ZERO, DVec3::X, DVec3::X, DVec3::Y]);

        assert!(doc.upgrade_to_wire(&[]).is_err());
    }
}
