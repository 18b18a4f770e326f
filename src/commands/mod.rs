pub mod badge;
pub mod init;
pub mod services;
