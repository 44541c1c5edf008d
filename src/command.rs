//! Discrete input commands, each mapped to one controller operation.

/// An input event delivered by the host application.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Command {
    IncreaseStiffness,
    DecreaseStiffness,
    IncreaseDamping,
    DecreaseDamping,
    TogglePause,
    ToggleRenderMode,
    ToggleDrag,
    TogglePin,
    /// Re-lay the grid in the current orientation.
    ResetLayout,
    /// Switch orientation and re-lay the grid.
    ToggleOrientation,
}
