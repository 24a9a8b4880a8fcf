pub mod keyboard;
pub mod pointer;
pub mod widgets;

pub use keyboard::wire_global_keydown;
pub use pointer::wire_pointer_handlers;
pub use widgets::wire_widgets;
