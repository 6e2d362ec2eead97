pub mod check;
mod command_result;
pub mod helper;
pub mod init;
pub mod locales;
pub mod scan;

pub use command_result::*;
