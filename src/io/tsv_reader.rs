use std::path::Path;
use std::pin::Pin;
use std::task::{Context, Poll};

use csv_async::AsyncReaderBuilder;
use futures::io::AsyncRead;
use futures::{Stream, StreamExt};
use tokio::fs::File;
use tokio_util::compat::TokioAsyncReadCompatExt;

use super::error::IoError;

/// One raw row of the catalog file: position-indexed string fields plus the
/// physical line number it was read from (header = line 1)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawLine {
    pub number: u64,
    pub fields: Vec<String>,
}

impl RawLine {
    pub fn new(number: u64, fields: Vec<String>) -> Self {
        Self { number, fields }
    }

    /// Field at a fixed column offset, if present
    pub fn field(&self, index: usize) -> Option<&str> {
        self.fields.get(index).map(String::as_str)
    }
}

/// Async stream of raw catalog lines from tab-separated input
///
/// The header row is read and discarded. Rows whose field count disagrees
/// with the header yield an `Err` item rather than ending the stream, so the
/// consumer can skip them and keep reading.
pub struct TsvLineStream {
    inner: Pin<Box<dyn Stream<Item = Result<RawLine, IoError>> + Send>>,
}

impl TsvLineStream {
    /// Create a new line stream from an async reader
    pub fn new<R>(reader: R) -> Self
    where
        R: AsyncRead + Unpin + Send + 'static,
    {
        let csv_reader = AsyncReaderBuilder::new()
            .delimiter(b'\t')
            .has_headers(true)
            .create_reader(reader);

        let stream = csv_reader
            .into_records()
            .enumerate()
            .map(|(index, result)| {
                // Header occupies line 1; the first record is line 2.
                let number = index as u64 + 2;
                result
                    .map(|record| {
                        RawLine::new(number, record.iter().map(str::to_owned).collect())
                    })
                    .map_err(IoError::from)
            });

        Self {
            inner: Box::pin(stream),
        }
    }

    /// Create a new line stream from a file path
    ///
    /// Opens the file asynchronously; tokio-futures reader compatibility is
    /// handled internally.
    pub async fn from_file(path: impl AsRef<Path>) -> Result<Self, IoError> {
        let file = File::open(path.as_ref()).await?;
        Ok(Self::new(file.compat()))
    }
}

impl Stream for TsvLineStream {
    type Item = Result<RawLine, IoError>;

    fn poll_next(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        self.inner.as_mut().poll_next(cx)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::io::Cursor;

    fn stream_from(data: &str) -> TsvLineStream {
        TsvLineStream::new(Cursor::new(data.to_string().into_bytes()))
    }

    #[tokio::test]
    async fn reads_rows_and_discards_header() {
        let data = "id\tbarcode\tname\n1\t100\tMilk\n2\t200\tBread\n";
        let mut stream = stream_from(data);

        let first = stream.next().await.unwrap().unwrap();
        assert_eq!(first.number, 2);
        assert_eq!(first.fields, vec!["1", "100", "Milk"]);

        let second = stream.next().await.unwrap().unwrap();
        assert_eq!(second.number, 3);
        assert_eq!(second.field(2), Some("Bread"));

        assert!(stream.next().await.is_none());
    }

    #[tokio::test]
    async fn splits_on_tab_not_comma() {
        let data = "id\tname\n1\ta,b,c\n";
        let mut stream = stream_from(data);

        let line = stream.next().await.unwrap().unwrap();
        assert_eq!(line.fields, vec!["1", "a,b,c"]);
    }

    #[tokio::test]
    async fn ragged_row_yields_error_item_and_stream_continues() {
        let data = "id\tbarcode\tname\n1\t100\tMilk\n2\t200\n3\t300\tEggs\n";
        let mut stream = stream_from(data);

        assert!(stream.next().await.unwrap().is_ok());
        assert!(matches!(stream.next().await.unwrap(), Err(IoError::Csv(_))));

        let after = stream.next().await.unwrap().unwrap();
        assert_eq!(after.field(2), Some("Eggs"));
    }

    #[tokio::test]
    async fn header_only_input_is_empty() {
        let mut stream = stream_from("id\tbarcode\tname\n");
        assert!(stream.next().await.is_none());
    }

    #[tokio::test]
    async fn missing_field_access_returns_none() {
        let line = RawLine::new(2, vec!["1".to_string()]);
        assert_eq!(line.field(0), Some("1"));
        assert_eq!(line.field(6), None);
    }
}
