pub mod mail;
pub mod receipt;
