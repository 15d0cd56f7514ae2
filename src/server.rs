use std::{
    io::{self, Write},
    net::{SocketAddr, TcpListener, TcpStream, ToSocketAddrs},
    thread,
    time::Duration,
};

use tracing::{error, info, span, Level, Span};

use crate::{
    request::{EndOfFile, Request, RequestReader},
    response_writer::ResponseWriter,
    status_code_registry::ReasonPhrase,
};

pub trait Handler {
    fn handle(&self, w: &mut ResponseWriter, r: &mut Request);
}

impl<T> Handler for T
where
    T: Fn(&mut ResponseWriter, &mut Request),
{
    fn handle(&self, w: &mut ResponseWriter, r: &mut Request) {
        self(w, r)
    }
}

#[derive(Debug)]
pub struct Server {
    listener: TcpListener,
    read_timeout: Option<Duration>,
}

impl Server {
    pub fn new(addr: impl ToSocketAddrs) -> anyhow::Result<Self> {
        Ok(Self {
            listener: TcpListener::bind(addr)?,
            read_timeout: Some(Duration::from_secs(10)),
        })
    }

    /// `None` waits on idle connections forever.
    pub fn with_read_timeout(mut self, read_timeout: Option<Duration>) -> Self {
        self.read_timeout = read_timeout;
        self
    }

    pub fn local_addr(&self) -> io::Result<SocketAddr> {
        self.listener.local_addr()
    }

    pub fn run(&self, handler: impl Handler + Sync) {
        thread::scope(|s| {
            for stream in self.listener.incoming() {
                let stream = match stream {
                    Ok(stream) => stream,
                    Err(err) => {
                        error!(?err);
                        continue;
                    }
                };

                let handler = &handler;
                s.spawn(move || {
                    let span = create_conn_span(&stream);
                    let _guard = span.enter();
                    info!("new conn");

                    if let Err(err) = handle_connection(stream, self.read_timeout, handler) {
                        error!(?err);
                    }

                    info!("conn end");
                });
            }
        });
    }
}

#[derive(Debug)]
enum ConnCtrl {
    KeepAlive,
    Close,
}

fn handle_connection(
    stream: TcpStream,
    read_timeout: Option<Duration>,
    handler: &impl Handler,
) -> anyhow::Result<()> {
    let (reader, writer) = (&stream, &stream);
    reader.set_read_timeout(read_timeout)?;
    let mut request_reader = RequestReader::new(reader);

    loop {
        match handle_request(&mut request_reader, writer, handler)? {
            ConnCtrl::KeepAlive => continue,
            ConnCtrl::Close => return Ok(()),
        }
    }
}

fn handle_request(
    request_reader: &mut RequestReader<&TcpStream>,
    mut writer: &TcpStream,
    handler: &impl Handler,
) -> anyhow::Result<ConnCtrl> {
    let mut r = match request_reader.read() {
        Ok(r) => r,
        Err(err) => {
            if err.downcast_ref::<EndOfFile>().is_some() {
                return Ok(ConnCtrl::Close);
            }

            error!(?err);
            let mut w = ResponseWriter::new_empty();
            w.set_reason_phrase(ReasonPhrase::BadRequest);
            w.end();
            writer.write_all(&w.write())?;
            return Ok(ConnCtrl::Close);
        }
    };

    let span = create_req_span(&r);
    let _guard = span.enter();

    let conn_ctrl = match r.get_header("connection") {
        Some(value) if value.eq_ignore_ascii_case("close") => ConnCtrl::Close,
        _ => ConnCtrl::KeepAlive,
    };

    let mut w = ResponseWriter::new_empty();
    handler.handle(&mut w, &mut r);
    info!(status = w.get_status_code().unwrap_or(200), "done");
    writer.write_all(&w.write())?;
    Ok(conn_ctrl)
}

fn create_conn_span(stream: &TcpStream) -> Span {
    let peer_addr = match stream.peer_addr() {
        Ok(addr) => addr.to_string(),
        Err(err) => {
            error!(?err);
            "unknown".to_owned()
        }
    };

    span!(Level::INFO, "conn", peer_addr = peer_addr.as_str())
}

fn create_req_span(r: &Request) -> Span {
    span!(
        Level::INFO,
        "req",
        method = r.get_http_method(),
        target = r.get_request_target()
    )
}

#[cfg(test)]
pub fn noop_handler() -> impl Handler + Send + Sync {
    |_: &mut ResponseWriter, _: &mut Request| {}
}
