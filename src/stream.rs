use std::fmt;

use tokio::io::{AsyncRead, AsyncReadExt, BufReader};

const KILOBYTE: usize = 1024;
const BUFFER_CAPACITY: usize = 64 * KILOBYTE;

type Source = BufReader<Box<dyn AsyncRead + Send + Unpin>>;

/// Sequential byte source consumed one byte at a time.
///
/// The stream owns its underlying resource (an HTTP body, an open file)
/// and releases it the first time a read finds nothing more, when
/// [`ByteStream::release`] is called, or when the stream is dropped.
/// Read faults are not distinguished from the natural end of the source.
pub struct ByteStream {
    reader: Option<Source>,
}

impl ByteStream {
    pub fn new<R>(source: R) -> Self
    where
        R: AsyncRead + Send + Unpin + 'static,
    {
        let source: Box<dyn AsyncRead + Send + Unpin> = Box::new(source);
        Self {
            reader: Some(BufReader::with_capacity(BUFFER_CAPACITY, source)),
        }
    }

    /// Read exactly one byte.
    ///
    /// Returns `None` once the source is exhausted or faulted, and keeps
    /// returning `None` on every call after that.
    pub async fn next_byte(&mut self) -> Option<u8> {
        let reader = self.reader.as_mut()?;
        match reader.read_u8().await {
            Ok(byte) => Some(byte),
            Err(err) => {
                if err.kind() != std::io::ErrorKind::UnexpectedEof {
                    log::debug!("read fault treated as end of stream: {}", err);
                }
                self.release();
                None
            }
        }
    }

    /// Drop the underlying source. Safe to call any number of times.
    pub fn release(&mut self) {
        self.reader.take();
    }

    pub fn is_exhausted(&self) -> bool {
        self.reader.is_none()
    }
}

impl fmt::Debug for ByteStream {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ByteStream")
            .field("exhausted", &self.is_exhausted())
            .finish()
    }
}
