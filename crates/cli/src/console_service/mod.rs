//! Interactive console helpers: the transaction confirmation prompt and
//! password input.

pub mod console_helper;

pub use console_helper::{read_password, trim_newline, ConsoleConfirmation};
