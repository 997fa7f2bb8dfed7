mod bind;
mod headers;
mod limits;
mod server;
mod tls;

pub use bind::*;
pub use headers::*;
pub use limits::*;
pub use server::*;
pub use tls::*;
