mod app;
pub mod date_picker;
pub mod recurrence_editor;
pub mod rule_editor;
pub mod theme;
mod widgets;

pub use app::RecurrenceDemoApp;
pub use recurrence_editor::{ChangeSink, RecurrenceEditor, RecurrenceProps, RecurrenceState};
