//! Remote CSV source (plain HTTP GET, no auth, no pagination).

use std::time::Duration;

use reqwest::blocking::Client;
use tracing::{debug, info};

use crate::data::TableSource;
use crate::domain::Table;
use crate::error::AppError;
use crate::io::ingest::{read_table, Projection};

pub struct RemoteSource {
    client: Client,
    url: String,
}

impl RemoteSource {
    pub fn new(url: impl Into<String>, timeout: Duration) -> Result<Self, AppError> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| AppError::config(format!("Failed to build HTTP client: {e}")))?;
        Ok(Self {
            client,
            url: url.into(),
        })
    }
}

impl TableSource for RemoteSource {
    fn describe(&self) -> String {
        format!("remote dataset {}", self.url)
    }

    fn fetch(&self) -> Result<Table, AppError> {
        info!(url = %self.url, "fetching remote dataset");

        let resp = self
            .client
            .get(&self.url)
            .send()
            .map_err(|e| AppError::io(format!("Request to {} failed: {e}", self.url)))?;

        if !resp.status().is_success() {
            return Err(AppError::io(format!(
                "Request to {} failed with status {}.",
                self.url,
                resp.status()
            )));
        }

        let body = resp
            .bytes()
            .map_err(|e| AppError::io(format!("Failed to read response body: {e}")))?;
        debug!(bytes = body.len(), "remote body received");

        // Only the four projected columns are read from the (much wider) remote file.
        read_table(body.as_ref(), Projection::Required)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{Read, Write};
    use std::net::{TcpListener, TcpStream};
    use std::thread;

    use crate::data::{load_with_fallback, DataOrigin, LocalFileSource};

    fn read_request(stream: &mut TcpStream) {
        let mut buf = Vec::new();
        let mut chunk = [0u8; 1024];
        while !buf.windows(4).any(|w| w == b"\r\n\r\n") {
            match stream.read(&mut chunk) {
                Ok(0) | Err(_) => return,
                Ok(n) => buf.extend_from_slice(&chunk[..n]),
            }
        }
    }

    /// Serve one connection with `response` (or hold it open when `None`).
    fn serve_once(response: Option<String>) -> String {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        thread::spawn(move || {
            let Ok((mut stream, _)) = listener.accept() else {
                return;
            };
            read_request(&mut stream);
            match response {
                Some(response) => {
                    let _ = stream.write_all(response.as_bytes());
                }
                None => thread::sleep(Duration::from_secs(5)),
            }
        });
        format!("http://{addr}/owid-covid-data.csv")
    }

    fn http_response(status: &str, body: &str) -> String {
        format!(
            "HTTP/1.1 {status}\r\nContent-Type: text/csv\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
            body.len()
        )
    }

    #[test]
    fn silent_server_times_out_and_falls_back() {
        let url = serve_once(None);
        let remote = RemoteSource::new(url, Duration::from_secs(1)).unwrap();
        assert!(remote.fetch().is_err());

        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "date,location,new_cases,new_deaths").unwrap();
        writeln!(file, "2021-01-01,Kenya,3,0").unwrap();
        let local = LocalFileSource::new(file.path());

        let url = serve_once(None);
        let remote = RemoteSource::new(url, Duration::from_secs(1)).unwrap();
        let loaded = load_with_fallback(&remote, &local).unwrap();
        assert_eq!(loaded.origin, DataOrigin::LocalFallback);
        assert_eq!(loaded.table.len(), 1);
    }

    #[test]
    fn server_error_status_is_rejected() {
        let url = serve_once(Some(http_response("500 Internal Server Error", "")));
        let remote = RemoteSource::new(url, Duration::from_secs(5)).unwrap();
        assert!(remote.fetch().is_err());
    }

    #[test]
    fn body_without_required_column_is_rejected() {
        let body = "date,location,new_cases\n2021-01-01,Kenya,3\n";
        let url = serve_once(Some(http_response("200 OK", body)));
        let remote = RemoteSource::new(url, Duration::from_secs(5)).unwrap();
        assert!(remote.fetch().is_err());
    }
}
