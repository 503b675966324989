mod list;
mod table;
mod text_input;
mod text_view;

pub use list::{List, ListEvent, ListRow};
pub use table::{Table, TableEvent, TableRow};
pub use text_input::{TextInput, TextInputEvent};
pub use text_view::{TextView, TextViewEvent};
