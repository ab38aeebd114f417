//! Streaming `multipart/form-data` encoder for segment file uploads.
//!
//! The body is produced by a background task writing into an in-process
//! pipe while the HTTP client reads the other end, so the file is never
//! buffered in memory as a whole. The pipe capacity bounds how far the
//! producer can run ahead of the network.

use std::io;

use tokio::io::{AsyncRead, AsyncWrite, AsyncWriteExt, DuplexStream};
use tokio::sync::oneshot;
use uuid::Uuid;

/// Bytes the producer may write ahead of the consumer.
const PIPE_CAPACITY: usize = 64 * 1024;

/// Name of the form field carrying the file.
const FILE_FIELD: &str = "file";

/// Outcome of the producer task: bytes copied from the source.
pub(crate) type UploadOutcome = oneshot::Receiver<io::Result<u64>>;

/// A single-file multipart body.
#[derive(Debug, Clone)]
pub(crate) struct MultipartUpload {
    boundary: String,
    file_name: String,
}

impl MultipartUpload {
    pub(crate) fn new(file_name: &str) -> Self {
        Self {
            boundary: format!("audience-{}", Uuid::new_v4().simple()),
            file_name: escape_quotes(file_name),
        }
    }

    /// Value for the request's `Content-Type` header.
    pub(crate) fn content_type(&self) -> String {
        format!("multipart/form-data; boundary={}", self.boundary)
    }

    fn head(&self) -> String {
        format!(
            "--{}\r\nContent-Disposition: form-data; name=\"{}\"; filename=\"{}\"\r\nContent-Type: application/octet-stream\r\n\r\n",
            self.boundary, FILE_FIELD, self.file_name
        )
    }

    fn tail(&self) -> String {
        format!("\r\n--{}--\r\n", self.boundary)
    }

    /// Encode the whole body into `sink`.
    pub(crate) async fn write_to<R, W>(&self, source: &mut R, sink: &mut W) -> io::Result<u64>
    where
        R: AsyncRead + Unpin + ?Sized,
        W: AsyncWrite + Unpin + ?Sized,
    {
        sink.write_all(self.head().as_bytes()).await?;
        let copied = tokio::io::copy(source, sink).await?;
        sink.write_all(self.tail().as_bytes()).await?;
        sink.flush().await?;
        Ok(copied)
    }

    /// Start the producer task and return the read end of the pipe.
    ///
    /// The outcome channel resolves once the producer has finished. If the
    /// read end is dropped early the producer stops with a broken-pipe
    /// error.
    pub(crate) fn spawn<R>(self, source: R) -> (DuplexStream, UploadOutcome)
    where
        R: AsyncRead + Unpin + Send + 'static,
    {
        let (mut writer, reader) = tokio::io::duplex(PIPE_CAPACITY);
        let (tx, rx) = oneshot::channel();

        tokio::spawn(async move {
            let mut source = source;
            let result = match self.write_to(&mut source, &mut writer).await {
                Ok(copied) => writer.shutdown().await.map(|_| copied),
                Err(err) => Err(err),
            };
            match &result {
                Ok(copied) => tracing::debug!(bytes = copied, "segment upload body written"),
                Err(err) => tracing::debug!(error = %err, "segment upload body aborted"),
            }
            let _ = tx.send(result);
        });

        (reader, rx)
    }
}

fn escape_quotes(value: &str) -> String {
    value
        .replace('\\', "\\\\")
        .replace('"', "\\\"")
        .replace(['\r', '\n'], "")
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::io::AsyncReadExt;

    #[tokio::test]
    async fn test_body_layout() {
        let upload = MultipartUpload::new("macs.csv");
        let boundary = upload.boundary.clone();
        let mut source: &[u8] = b"mac\n00:11:22:33:44:55\n";
        let mut body = Vec::new();

        let copied = upload.write_to(&mut source, &mut body).await.unwrap();
        assert_eq!(copied, 22);

        let body = String::from_utf8(body).unwrap();
        assert!(body.starts_with(&format!("--{boundary}\r\n")));
        assert!(body.contains("name=\"file\"; filename=\"macs.csv\""));
        assert!(body.contains("\r\n\r\nmac\n00:11:22:33:44:55\n\r\n"));
        assert!(body.ends_with(&format!("\r\n--{boundary}--\r\n")));
    }

    #[tokio::test]
    async fn test_pipe_preserves_content() {
        let data: Vec<u8> = (0..200_000u32).map(|i| (i % 251) as u8).collect();
        let upload = MultipartUpload::new("binary");
        let head_len = upload.head().len();
        let tail_len = upload.tail().len();

        let (mut reader, outcome) = upload.spawn(std::io::Cursor::new(data.clone()));
        let mut body = Vec::new();
        reader.read_to_end(&mut body).await.unwrap();

        assert_eq!(outcome.await.unwrap().unwrap(), data.len() as u64);
        assert_eq!(&body[head_len..body.len() - tail_len], data.as_slice());
    }

    #[tokio::test]
    async fn test_empty_source() {
        let upload = MultipartUpload::new("empty");
        let (mut reader, outcome) = upload.spawn(tokio::io::empty());
        let mut body = Vec::new();
        reader.read_to_end(&mut body).await.unwrap();
        assert_eq!(outcome.await.unwrap().unwrap(), 0);
    }

    #[tokio::test]
    async fn test_dropped_reader_stops_producer() {
        let data = vec![b'x'; PIPE_CAPACITY * 4];
        let upload = MultipartUpload::new("big");
        let (reader, outcome) = upload.spawn(std::io::Cursor::new(data));
        drop(reader);
        assert!(outcome.await.unwrap().is_err());
    }

    #[test]
    fn test_file_name_escaping() {
        assert_eq!(escape_quotes(r#"a"b\c"#), r#"a\"b\\c"#);
        assert_eq!(escape_quotes("line\r\nbreak"), "linebreak");
    }
}
