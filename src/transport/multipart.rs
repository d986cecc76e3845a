//! `multipart/form-data` request body.

/// Builder for a `multipart/form-data` body.
#[derive(Debug, Clone)]
pub struct MultipartForm {
    boundary: String,
    body: Vec<u8>,
}

impl MultipartForm {
    /// Start a form with a random boundary.
    pub fn new() -> Self {
        Self::with_boundary(format!("----flipalbum{:016x}", rand::random::<u64>()))
    }

    /// Start a form with a fixed boundary.
    pub fn with_boundary(boundary: impl Into<String>) -> Self {
        Self {
            boundary: boundary.into(),
            body: Vec::new(),
        }
    }

    /// Value of the request's `Content-Type` header.
    pub fn content_type(&self) -> String {
        format!("multipart/form-data; boundary={}", self.boundary)
    }

    /// Add a text field.
    pub fn text(mut self, name: &str, value: &str) -> Self {
        self.open_part();
        self.push(&format!(
            "Content-Disposition: form-data; name=\"{}\"\r\n\r\n",
            escape(name)
        ));
        self.push(value);
        self.push("\r\n");
        self
    }

    /// Add a file field.
    pub fn file(mut self, name: &str, filename: &str, mime: &str, bytes: &[u8]) -> Self {
        self.open_part();
        self.push(&format!(
            "Content-Disposition: form-data; name=\"{}\"; filename=\"{}\"\r\nContent-Type: {}\r\n\r\n",
            escape(name),
            escape(filename),
            mime
        ));
        self.body.extend_from_slice(bytes);
        self.push("\r\n");
        self
    }

    /// Close the form, returning the content type and body.
    pub fn finish(mut self) -> (String, Vec<u8>) {
        let closing = format!("--{}--\r\n", self.boundary);
        self.push(&closing);
        (self.content_type(), self.body)
    }

    fn open_part(&mut self) {
        let opening = format!("--{}\r\n", self.boundary);
        self.push(&opening);
    }

    fn push(&mut self, text: &str) {
        self.body.extend_from_slice(text.as_bytes());
    }
}

impl Default for MultipartForm {
    fn default() -> Self {
        Self::new()
    }
}

fn escape(value: &str) -> String {
    value
        .replace('"', "%22")
        .replace('\r', "%0D")
        .replace('\n', "%0A")
}
