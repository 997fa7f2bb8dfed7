use crate::static_files::ServeError;
use bytes::BytesMut;
use std::io;
use tokio::fs;
use tokio::io::{AsyncReadExt, AsyncWrite, AsyncWriteExt};

/// Body bytes are read from disk and written out in chunks of at most this size.
pub const CHUNK_SIZE: usize = 64 * 1024;

/// Copy exactly `len` bytes of `file` to `out`.
///
/// A read failure or a file that shrank mid-transfer aborts with an error; the
/// caller must then drop the connection since the promised length cannot be met.
pub async fn stream_file<W>(mut file: fs::File, len: u64, out: &mut W) -> Result<u64, ServeError>
where
    W: AsyncWrite + Unpin + ?Sized,
{
    // Allocate once per response.
    let mut buf = BytesMut::with_capacity(CHUNK_SIZE);
    let mut written: u64 = 0;

    while written < len {
        let to_read = std::cmp::min(CHUNK_SIZE as u64, len - written) as usize;
        buf.resize(to_read, 0);

        let n = file
            .read(&mut buf[..])
            .await
            .map_err(|source| ServeError::StreamRead { written, source })?;

        if n == 0 {
            return Err(ServeError::StreamRead {
                written,
                source: io::Error::new(io::ErrorKind::UnexpectedEof, "file shrank during transfer"),
            });
        }

        out.write_all(&buf[..n])
            .await
            .map_err(|source| ServeError::StreamWrite { written, source })?;

        written += n as u64;
    }

    Ok(written)
}
