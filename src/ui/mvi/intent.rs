//! Base trait for intents.

/// Marker trait for intent objects.
///
/// Intents represent:
/// - User actions (typing settled, card activated, dialog closed)
/// - Query cache updates for the key a view is showing
///
/// Intents are processed by reducers to produce new states.
pub trait Intent: Send + 'static {}
