pub mod build;
pub mod concat;
pub mod html;
pub mod init;
