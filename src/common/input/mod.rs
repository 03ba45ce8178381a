pub use cursor_tracker::CursorTracker;
pub use input::Input;
pub use virtual_cursor::VirtualCursor;

mod cursor_tracker;
mod input;
mod virtual_cursor;
