//! Base trait for view state.

/// Marker trait for UI state objects.
///
/// States are cloned into the next state by reducers, compared to detect
/// changes, and start from `Default`.
pub trait UiState: Clone + PartialEq + Default + Send + 'static {}
