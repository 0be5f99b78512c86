pub mod check;
mod command_result;
pub mod extract;
pub mod helper;
pub mod init;
pub mod keys;
pub mod usage;

pub use command_result::*;
