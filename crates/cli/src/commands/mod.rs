pub mod create_page;
pub mod generate;
pub mod init;
pub mod preview;
pub mod validate;
