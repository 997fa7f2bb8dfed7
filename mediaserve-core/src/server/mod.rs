mod acceptor;
mod error;
mod setup;
mod signals;

#[cfg(test)]
mod tests;

pub use acceptor::ConnectionAcceptor;
pub use error::ServerError;
pub use setup::{BoundServer, Server, run};
pub use signals::shutdown_signal;
