pub mod dialogs;
pub mod modal;
pub mod nav;
pub mod record_table;
pub mod toast;
