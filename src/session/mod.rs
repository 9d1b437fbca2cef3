pub mod controller;
pub mod dialog;
pub mod preferences;
pub mod toast;

pub use controller::Controller;
pub use dialog::{DialogState, NoteForm, SessionDraft};
pub use toast::{Toast, ToastKind, ToastQueue};
