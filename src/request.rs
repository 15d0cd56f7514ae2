use std::{
    collections::HashMap,
    io::{BufRead, BufReader, ErrorKind, Read, Take},
};

use thiserror::Error;
use tracing::debug;

use crate::router::Params;

#[derive(Debug, Default)]
pub struct Request {
    method: String,
    target: String,
    version: String,
    params: Params,
    headers: HashMap<String, String>,
    body: Option<Vec<u8>>,
}

impl Request {
    pub fn new(method: impl Into<String>, target: impl Into<String>) -> Self {
        Self {
            method: method.into(),
            target: target.into(),
            version: "HTTP/1.1".to_owned(),
            ..Default::default()
        }
    }

    pub fn get_http_method(&self) -> &str {
        &self.method
    }

    pub fn get_request_target(&self) -> &str {
        &self.target
    }

    pub fn get_http_version(&self) -> &str {
        &self.version
    }

    /// The path component of the request target, without query or fragment.
    ///
    /// Absolute-form targets (`http://host/a?b`) lose their scheme and
    /// authority first. Nothing is decoded or normalised.
    pub fn get_path(&self) -> &str {
        let mut path = self.target.as_str();
        if !path.starts_with('/') {
            if let Some((_, rest)) = path.split_once("://") {
                path = rest.find('/').map_or("/", |idx| &rest[idx..]);
            }
        }
        match path.find(['?', '#']) {
            Some(idx) => &path[..idx],
            None => path,
        }
    }

    pub fn get_param(&self, name: &str) -> Option<&str> {
        self.params.get(name).map(|v| v.as_str())
    }

    pub fn get_params(&self) -> &Params {
        &self.params
    }

    /// Adds matched path parameters, replacing any existing entry with the same name.
    pub fn merge_params(&mut self, params: Params) {
        self.params.extend(params);
    }

    pub fn get_header(&self, key: &str) -> Option<&str> {
        self.headers.get(&key.to_lowercase()).map(|v| v.as_str())
    }

    pub fn get_body(&self) -> Option<&[u8]> {
        self.body.as_deref()
    }
}

#[derive(Error, Debug)]
#[error("end of file")]
pub struct EndOfFile;

#[derive(Error, Debug)]
#[error("invalid request")]
pub struct InvalidRequest;

const MAX_BODY: usize = 8 * 1024 * 1024;

pub struct RequestReader<R> {
    buf_reader: Take<BufReader<R>>,
}

impl<R: Read> RequestReader<R> {
    pub fn new(r: R) -> Self {
        Self {
            buf_reader: BufReader::new(r).take(u64::MAX),
        }
    }

    pub fn read(&mut self) -> anyhow::Result<Request> {
        let mut request_line = String::new();
        self.buf_reader.set_limit(1024);
        let n = self.buf_reader.read_line(&mut request_line)?;
        if n == 0 {
            Err(EndOfFile)?
        }
        let request_line = request_line.strip_suffix("\r\n").ok_or(InvalidRequest)?;

        let mut parts = request_line.split(' ');
        let (Some(method), Some(target), Some(version), None) =
            (parts.next(), parts.next(), parts.next(), parts.next())
        else {
            return Err(InvalidRequest.into());
        };
        debug!(request_line);

        let mut headers = HashMap::new();
        self.buf_reader.set_limit(8 * 1024);
        loop {
            let mut line = String::new();
            self.buf_reader.read_line(&mut line)?;
            let line = line.strip_suffix("\r\n").ok_or(InvalidRequest)?;

            if line.is_empty() {
                break;
            }
            let (k, v) = line.split_once(':').ok_or(InvalidRequest)?;
            headers.insert(k.to_lowercase(), v.trim().to_owned());
        }

        let mut body = None;
        if let Some(content_length) = headers.get("content-length") {
            let content_length: usize = content_length.parse().map_err(|_| InvalidRequest)?;
            if content_length > MAX_BODY {
                Err(InvalidRequest)?
            }
            self.buf_reader.set_limit(content_length as u64);
            let mut buf = vec![0; content_length];
            if let Err(err) = self.buf_reader.read_exact(&mut buf) {
                if err.kind() == ErrorKind::UnexpectedEof {
                    Err(InvalidRequest)?
                } else {
                    Err(err)?
                }
            }
            body = Some(buf);
        }

        Ok(Request {
            method: method.to_owned(),
            target: target.to_owned(),
            version: version.to_owned(),
            params: Params::new(),
            headers,
            body,
        })
    }
}
