//! Semantic actions produced by the key table.

/// Everything a key press can do to the scene.
#[derive(Debug, Clone, Copy, Hash, Eq, PartialEq)]
pub enum Action {
    /// Move the eye +y.
    MoveUp,
    /// Move the eye −y.
    MoveDown,
    /// Move the eye −x.
    MoveLeft,
    /// Move the eye +x.
    MoveRight,
    /// Move the eye −z.
    MoveForward,
    /// Move the eye +z.
    MoveBackward,
    /// Rotate the view direction counter-clockwise about the up vector.
    RotateLeft,
    /// Rotate the view direction clockwise about the up vector.
    RotateRight,
    /// Digit keys grow bodies from now on.
    ScaleModeIncrease,
    /// Digit keys shrink bodies from now on.
    ScaleModeDecrease,
    /// Scale the body at this index in the current scale mode.
    ScaleBody(usize),
    /// Shrink the view bound.
    ZoomIn,
    /// Grow the view bound.
    ZoomOut,
    /// Raise the step multiplier.
    Faster,
    /// Lower the step multiplier (never below 1).
    Slower,
    TogglePause,
    /// Rewind playback to the first row.
    Reset,
    Quit,
}
