use super::metadata::MediaType;
use crate::Result;
use std::fmt;
use std::io::Read;

/// The request entity, read lazily from the connector.
pub struct InputRepresentation {
    media_type: Option<MediaType>,
    size: Option<u64>,
    stream: Option<Box<dyn Read + Send>>,
}

impl InputRepresentation {
    pub fn new(stream: Box<dyn Read + Send>, media_type: Option<MediaType>) -> Self {
        Self {
            media_type,
            size: None,
            stream: Some(stream),
        }
    }

    /// A representation with no content.
    pub fn empty() -> Self {
        Self {
            media_type: None,
            size: Some(0),
            stream: None,
        }
    }

    pub fn with_size(mut self, size: Option<u64>) -> Self {
        self.size = size;
        self
    }

    /// From the `Content-Type` header.
    pub fn media_type(&self) -> Option<&MediaType> {
        self.media_type.as_ref()
    }

    /// From the `Content-Length` header.
    pub fn size(&self) -> Option<u64> {
        self.size
    }

    /// Whether the stream has not been consumed by [`text`](Self::text)
    /// or [`bytes`](Self::bytes).
    pub fn is_available(&self) -> bool {
        self.stream.is_some()
    }

    /// Read the whole entity. Read failures surface here.
    pub fn bytes(&mut self) -> Result<Vec<u8>> {
        let mut buf = Vec::with_capacity(self.size.unwrap_or(0).min(64 * 1024) as usize);
        if let Some(mut stream) = self.stream.take() {
            stream.read_to_end(&mut buf)?;
        }
        Ok(buf)
    }

    /// Read the whole entity as UTF-8 text.
    pub fn text(&mut self) -> Result<String> {
        let mut text = String::new();
        if let Some(mut stream) = self.stream.take() {
            stream.read_to_string(&mut text)?;
        }
        Ok(text)
    }
}

impl Read for InputRepresentation {
    fn read(&mut self, buf: &mut [u8]) -> std::io::Result<usize> {
        match self.stream.as_mut() {
            Some(stream) => stream.read(buf),
            None => Ok(0),
        }
    }
}

impl fmt::Debug for InputRepresentation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("InputRepresentation")
            .field("media_type", &self.media_type)
            .field("size", &self.size)
            .field("available", &self.is_available())
            .finish()
    }
}
