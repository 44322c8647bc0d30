//! Model-view matrix stack used to isolate each instance's transform.

use glam::{Mat4, Vec3};

/// Matrix stack misuse.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum MatrixStackError {
    /// `pop` was called with no saved matrix.
    #[error("matrix stack underflow: pop with no matching push")]
    Underflow,
}

/// A current model-view matrix plus a LIFO of saved snapshots.
///
/// Transforms post-multiply, so the last one applied acts on the vertex first.
#[derive(Debug, Clone)]
pub struct MatrixStack {
    current: Mat4,
    saved: Vec<Mat4>,
}

impl MatrixStack {
    pub fn new() -> Self {
        Self {
            current: Mat4::IDENTITY,
            saved: Vec::new(),
        }
    }

    /// Replace the current matrix.
    pub fn load(&mut self, matrix: Mat4) {
        self.current = matrix;
    }

    pub fn current(&self) -> Mat4 {
        self.current
    }

    /// Save a copy of the current matrix.
    pub fn push(&mut self) {
        self.saved.push(self.current);
    }

    /// Restore the most recently saved matrix.
    pub fn pop(&mut self) -> Result<(), MatrixStackError> {
        self.current = self.saved.pop().ok_or(MatrixStackError::Underflow)?;
        Ok(())
    }

    pub fn translate(&mut self, offset: Vec3) {
        self.current *= Mat4::from_translation(offset);
    }

    pub fn scale(&mut self, factors: Vec3) {
        self.current *= Mat4::from_scale(factors);
    }

    /// Number of saved matrices; zero when push/pop are balanced.
    pub fn depth(&self) -> usize {
        self.saved.len()
    }
}

impl Default for MatrixStack {
    fn default() -> Self {
        Self::new()
    }
}
