mod content_type;
mod error;
mod handler;
mod normalize;
mod resolve;
mod serve;

#[cfg(test)]
mod tests;

pub use content_type::content_type_for;
pub use error::{ResolveError, ServeError};
pub use handler::StaticSite;
pub use normalize::{NormalizedPath, normalize_request_path};
pub use resolve::{PathResolver, ResolvedTarget};
pub use serve::{
    CHUNK_SIZE, ConditionalHeaders, DirectoryEntry, read_directory_entries, render_listing,
    serve_file, stream_file,
};
