//! Create / edit dialog for a TIN record
//!
//! The form values live in the dashboard state; this module is pure UI.

mod view;

pub use view::TinFormDialog;
