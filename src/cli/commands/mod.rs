mod filter;
mod init;

pub use filter::{cmd_filter, filter_document};
pub use init::cmd_init;
