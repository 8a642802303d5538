use std::io::{BufRead, BufReader, Write};
use std::net::TcpListener;
use std::sync::{Arc, Mutex};
use std::thread;

use chrono::NaiveDate;
use econ_dash::app::pipeline::run_catalog;
use econ_dash::data::catalog::EXCHANGE_RATES;
use econ_dash::data::{FredClient, FredConfig, ObservationSource};
use econ_dash::domain::{DateRange, MissingDataPolicy};

type Handler = dyn Fn(&str) -> (u16, String) + Send + Sync;

/// Minimal HTTP/1.1 stub: one response per connection, request targets recorded.
struct StubServer {
    base_url: String,
    requests: Arc<Mutex<Vec<String>>>,
}

impl StubServer {
    fn start(prefix: &str, handler: Box<Handler>) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").expect("bind stub port");
        let port = listener.local_addr().unwrap().port();
        let requests = Arc::new(Mutex::new(Vec::new()));
        let log = Arc::clone(&requests);
        let handler: Arc<Handler> = Arc::from(handler);

        thread::spawn(move || {
            for stream in listener.incoming() {
                let Ok(mut stream) = stream else { break };
                let handler = Arc::clone(&handler);
                let log = Arc::clone(&log);
                thread::spawn(move || {
                    let mut reader = BufReader::new(stream.try_clone().unwrap());
                    let mut request_line = String::new();
                    if reader.read_line(&mut request_line).is_err() {
                        return;
                    }
                    loop {
                        let mut header = String::new();
                        match reader.read_line(&mut header) {
                            Ok(0) => break,
                            Ok(_) if header == "\r\n" => break,
                            Ok(_) => continue,
                            Err(_) => return,
                        }
                    }
                    let target = request_line.split_whitespace().nth(1).unwrap_or("").to_string();
                    log.lock().unwrap().push(target.clone());

                    let (status, body) = handler(&target);
                    let response = format!(
                        "HTTP/1.1 {status} Stub\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
                        body.len()
                    );
                    let _ = stream.write_all(response.as_bytes());
                    let _ = stream.flush();
                });
            }
        });

        Self {
            base_url: format!("http://127.0.0.1:{port}{prefix}"),
            requests,
        }
    }

    fn client(&self, api_key: Option<&str>) -> FredClient {
        FredClient::new(FredConfig {
            base_url: self.base_url.clone(),
            api_key: api_key.map(str::to_string),
        })
        .expect("build client")
    }

    fn requests(&self) -> Vec<String> {
        self.requests.lock().unwrap().clone()
    }
}

fn d(y: i32, m: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, day).unwrap()
}

fn observations(rows: &[(&str, &str)]) -> String {
    let items: Vec<String> = rows
        .iter()
        .map(|(date, value)| format!(r#"{{"realtime_start":"2024-03-12","date":"{date}","value":"{value}"}}"#))
        .collect();
    format!(r#"{{"count":{},"observations":[{}]}}"#, rows.len(), items.join(","))
}

#[test]
fn fetches_raw_observations_including_missing_markers() {
    let body = observations(&[("2024-01-01", "."), ("2024-01-02", "1.3300")]);
    let server = StubServer::start("/fred", Box::new(move |_: &str| (200, body.clone())));
    let client = server.client(Some("secret"));

    let range = DateRange::new(d(2023, 12, 1), d(2024, 1, 2)).unwrap();
    let rows = client.fetch_series("DEXCAUS", range).unwrap();

    assert_eq!(rows.len(), 2);
    assert!(rows[0].is_missing());
    assert_eq!(rows[1].value, "1.3300");

    let requests = server.requests();
    assert_eq!(requests.len(), 1);
    let target = &requests[0];
    assert!(target.starts_with("/fred/series/observations?"));
    assert!(target.contains("series_id=DEXCAUS"));
    assert!(target.contains("file_type=json"));
    assert!(target.contains("observation_start=2023-12-01"));
    assert!(target.contains("observation_end=2024-01-02"));
    assert!(target.contains("api_key=secret"));
}

#[test]
fn proxy_base_path_is_used_and_key_is_omitted() {
    let server = StubServer::start("/api/fred", Box::new(|_: &str| (200, observations(&[]))));
    let client = server.client(None);

    let rows = client
        .fetch_between("DEXUSEU", d(2024, 1, 1), d(2024, 1, 31))
        .unwrap();
    assert!(rows.is_empty());

    let requests = server.requests();
    assert!(requests[0].starts_with("/api/fred/series/observations?"));
    assert!(!requests[0].contains("api_key"));
}

#[test]
fn error_status_surfaces_status_and_message() {
    let server = StubServer::start(
        "/api/fred",
        Box::new(|_: &str| (500, r#"{"error":"Failed to fetch data from FRED API"}"#.to_string())),
    );
    let client = server.client(None);

    let err = client
        .fetch_between("DEXCAUS", d(2024, 1, 1), d(2024, 1, 31))
        .unwrap_err();
    let text = err.to_string();
    assert!(text.contains("DEXCAUS"), "{text}");
    assert!(text.contains("500"), "{text}");
    assert!(text.contains("Failed to fetch data from FRED API"), "{text}");
}

#[test]
fn inverted_range_fails_before_any_request() {
    let server = StubServer::start("/fred", Box::new(|_: &str| (200, observations(&[]))));
    let client = server.client(Some("k"));

    assert!(client.fetch_between("DEXCAUS", d(2024, 2, 1), d(2024, 1, 1)).is_err());
    assert!(server.requests().is_empty());
}

#[test]
fn catalog_over_http_isolates_failing_series() {
    let server = StubServer::start(
        "/fred",
        Box::new(|target: &str| {
            if target.contains("series_id=DEXUSEU") {
                return (400, r#"{"error_code":400,"error_message":"Bad Request."}"#.to_string());
            }
            if target.contains("observation_end=2023-") {
                (200, observations(&[("2023-01-03", "1.3500")]))
            } else {
                (200, observations(&[("2024-01-02", "1.3300"), ("2024-01-03", ".")]))
            }
        }),
    );
    let client = server.client(Some("k"));

    let outcomes = run_catalog(
        &client,
        &EXCHANGE_RATES,
        d(2024, 1, 3),
        MissingDataPolicy::Strict,
        d(2024, 1, 3),
    );

    assert_eq!(outcomes.len(), 2);
    assert_eq!(outcomes[0].config.series_id, "DEXCAUS");
    let cad = outcomes[0].result.as_ref().unwrap();
    assert_eq!(cad.current, 1.33);
    assert_eq!(cad.prior_year, 1.35);
    assert_eq!(cad.data_as_of, "01/02/2024");

    assert_eq!(outcomes[1].config.series_id, "DEXUSEU");
    let err = outcomes[1].result.as_ref().unwrap_err();
    assert!(err.to_string().contains("Bad Request."));

    // Two windows per series.
    assert_eq!(server.requests().len(), 4);
}
