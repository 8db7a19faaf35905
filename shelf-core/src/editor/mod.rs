//! Book editing: tag input state, the save transaction and edit sessions

mod save;
mod session;
mod tags;

pub use save::SaveCoordinator;
pub use session::EditSession;
pub use tags::TagEditor;
