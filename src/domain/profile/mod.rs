//! Member profile card with view/edit modes.

mod editor;

pub use editor::{EditMode, ProfileDetails, ProfileEditor};
