pub mod apply_job;
mod command_result;
pub mod context;
pub mod init;
pub mod make_job;

pub use command_result::*;
