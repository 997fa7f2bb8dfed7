mod bind;
mod config;
mod headers;
mod limits;
mod logging;
mod origin;
mod server;
mod tls;

pub use bind::*;
pub use config::*;
pub use headers::*;
pub use limits::*;
pub use logging::*;
pub use origin::*;
pub use server::*;
pub use tls::*;
