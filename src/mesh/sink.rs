//! Receivers of rebuilt chunk meshes

use std::sync::{Arc, Mutex};

use super::data::MeshData;

/// Owner of a chunk's renderable/collidable surface.
///
/// `replace` must drop all prior content before taking the new mesh, and keep
/// normals, colors and triangle winding exactly as given.
pub trait MeshSink: Send {
    fn replace(&mut self, mesh: &MeshData);
}

/// In-memory sink that keeps the last mesh it received
#[derive(Debug, Default)]
pub struct MeshBuffer {
    mesh: MeshData,
    replacements: u64,
}

impl MeshBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Last mesh handed over
    pub fn mesh(&self) -> &MeshData {
        &self.mesh
    }

    /// How many times the content has been replaced
    pub fn replacements(&self) -> u64 {
        self.replacements
    }
}

impl MeshSink for MeshBuffer {
    fn replace(&mut self, mesh: &MeshData) {
        self.mesh.clear();
        self.mesh.vertices.extend_from_slice(&mesh.vertices);
        self.mesh.normals.extend_from_slice(&mesh.normals);
        self.mesh.colors.extend_from_slice(&mesh.colors);
        self.mesh.triangles.extend_from_slice(&mesh.triangles);
        self.replacements += 1;
    }
}

/// A buffer that stays inspectable after it is handed to a chunk
pub type SharedMeshBuffer = Arc<Mutex<MeshBuffer>>;

impl<S: MeshSink + ?Sized> MeshSink for Arc<Mutex<S>> {
    fn replace(&mut self, mesh: &MeshData) {
        // Poisoning only means another holder panicked; the next replace overwrites everything.
        let mut sink = self.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        sink.replace(mesh);
    }
}
