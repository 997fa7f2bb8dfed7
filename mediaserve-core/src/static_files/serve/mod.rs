mod directory_listing;
mod etag;
mod file;
mod stream;

pub use directory_listing::{DirectoryEntry, read_directory_entries, render_listing};
pub use file::{ConditionalHeaders, serve_file};
pub use stream::{CHUNK_SIZE, stream_file};
