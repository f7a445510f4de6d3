pub mod mail_transport;
