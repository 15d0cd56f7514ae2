use tracing::warn;

use crate::status_code_registry::{self, ReasonPhrase};

#[derive(Debug, Default)]
pub struct ResponseWriter {
    status_code: Option<u16>,
    reason_phrase: Option<String>,
    headers: Vec<(String, String)>,
    body: Vec<u8>,
    ended: bool,
}

impl ResponseWriter {
    pub fn new_empty() -> Self {
        Self::default()
    }

    pub fn get_status_code(&self) -> Option<u16> {
        self.status_code
    }

    pub fn set_status_code(&mut self, status_code: u16) {
        self.status_code = Some(status_code);
        self.reason_phrase =
            status_code_registry::get_reason_phrase(status_code).map(|r| r.to_string());
    }

    pub fn set_reason_phrase(&mut self, reason_phrase: ReasonPhrase) {
        self.status_code = Some(status_code_registry::get_status_code(reason_phrase));
        self.reason_phrase = Some(reason_phrase.to_string());
    }

    pub fn add_header(&mut self, k: impl Into<String>, v: impl Into<String>) {
        let (k, v) = (k.into(), v.into());
        if let Some(entry) = self
            .headers
            .iter_mut()
            .find(|entry| entry.0.eq_ignore_ascii_case(&k))
        {
            entry.1 = v;
        } else {
            self.headers.push((k, v));
        }
    }

    pub fn get_header(&self, k: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|entry| entry.0.eq_ignore_ascii_case(k))
            .map(|(_, v)| v.as_str())
    }

    pub fn get_body(&self) -> &[u8] {
        &self.body
    }

    pub fn set_body(&mut self, body: Vec<u8>, content_type: &str) {
        if self.ended {
            warn!("body written after response end");
            return;
        }
        self.body = body;
        self.add_header("Content-Type", content_type);
    }

    pub fn set_body_str(&mut self, body: &str) {
        self.set_body(body.bytes().collect(), "text/plain");
    }

    /// Finishes the response. Later body writes are dropped.
    pub fn end(&mut self) {
        self.ended = true;
    }

    pub fn is_ended(&self) -> bool {
        self.ended
    }

    pub fn write(self) -> Vec<u8> {
        let (status_code, reason_phrase) = match self.status_code {
            Some(status_code) => (status_code, self.reason_phrase),
            None => (200, Some(ReasonPhrase::OK.to_string())),
        };

        let mut head = format!("HTTP/1.1 {}", status_code);
        if let Some(reason_phrase) = &reason_phrase {
            head = format!("{} {}", head, reason_phrase);
        }
        head.push_str("\r\n");

        for (k, v) in self
            .headers
            .iter()
            .filter(|(k, _)| !k.eq_ignore_ascii_case("content-length"))
        {
            head.push_str(&format!("{}: {}\r\n", k, v));
        }
        head.push_str(&format!("Content-Length: {}\r\n\r\n", self.body.len()));

        let mut resp = head.into_bytes();
        resp.extend(self.body);
        resp
    }
}
