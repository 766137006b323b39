mod dialog;
mod intent;
mod reducer;
mod state;

pub use dialog::render_details_dialog;
pub use intent::DetailsIntent;
pub use reducer::DetailsReducer;
pub use state::{DetailsDialogState, DetailsPhase};
