pub mod edit_log;
pub mod selection;
pub mod session;
pub mod store;
pub mod types;
pub mod view;

pub use edit_log::EditLog;
pub use selection::Selection;
pub use session::Session;
pub use store::ByteStore;
pub use types::{Addressing, CellAttr, DisplayMode, Window};
pub use view::{ViewSnapshot, ViewState};
