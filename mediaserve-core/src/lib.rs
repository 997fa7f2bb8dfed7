pub mod cli;
pub mod conf;
pub mod http;
pub mod logging;
pub mod policy;
pub mod server;
pub mod static_files;
pub mod tls;
