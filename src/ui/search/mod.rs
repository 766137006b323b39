mod intent;
mod reducer;
mod state;
mod view;

pub use intent::SearchIntent;
pub use reducer::SearchReducer;
pub use state::{SearchPhase, SearchState, GRID_COLUMNS, PLACEHOLDER_CARDS};
pub use view::render_search_body;
