use std::{
    io::{Read, Write},
    net::TcpListener,
    sync::{
        atomic::{AtomicUsize, Ordering},
        Arc,
    },
    thread::{self, JoinHandle},
};

use chanthread::{Client, Config, Error};

const THREAD: &str = r#"{"posts":[
    {"no":51971506,"resto":0,"sticky":1,"closed":1,"now":"12/25/15(Fri)10:00","time":1451055600,
     "name":"Anonymous","sub":"/sqt/","com":"Ask here","filename":"sqt","ext":".png",
     "tim":1451055600123,"md5":"abc=","fsize":1024,"w":100,"h":100,"tn_w":50,"tn_h":50,
     "replies":1,"images":0,"semantic_url":"sqt"},
    {"no":51971507,"resto":51971506,"now":"12/25/15(Fri)10:01","time":1451055660,
     "name":"Anonymous","com":"how do I rust"}
]}"#;

/// Serves canned API responses and counts the requests it receives.
struct ApiStub {
    base_url: String,
    hits: Arc<AtomicUsize>,
    server: Arc<tiny_http::Server>,
    handle: Option<JoinHandle<()>>,
}

impl ApiStub {
    fn start() -> Self {
        let server = Arc::new(tiny_http::Server::http("127.0.0.1:0").expect("start tiny_http"));
        let base_url = format!("http://{}", server.server_addr());
        let hits = Arc::new(AtomicUsize::new(0));

        let handle = {
            let server = Arc::clone(&server);
            let hits = Arc::clone(&hits);
            thread::spawn(move || {
                for request in server.incoming_requests() {
                    hits.fetch_add(1, Ordering::SeqCst);
                    let (status, body) = match request.url() {
                        "/g/thread/51971506.json" => (200, THREAD),
                        "/g/thread/1.json" => (200, "<html>not json</html>"),
                        "/g/thread/2.json" => (200, r#"{"posts":[{"no":2,"sticky":"yes"}]}"#),
                        _ => (404, ""),
                    };
                    let response = tiny_http::Response::from_string(body).with_status_code(status);
                    let _ = request.respond(response);
                }
            })
        };

        ApiStub {
            base_url,
            hits,
            server,
            handle: Some(handle),
        }
    }

    fn client(&self) -> Client {
        Client::with_config(Config {
            api_base: self.base_url.clone(),
        })
    }

    fn hits(&self) -> usize {
        self.hits.load(Ordering::SeqCst)
    }
}

impl Drop for ApiStub {
    fn drop(&mut self) {
        self.server.unblock();
        if let Some(handle) = self.handle.take() {
            let _ = handle.join();
        }
    }
}

#[tokio::test]
async fn fetches_thread_by_id() -> anyhow::Result<()> {
    let stub = ApiStub::start();
    let thread = stub.client().thread("g", "51971506").await?;

    assert_eq!(thread.board(), "g");
    assert_eq!(thread.len(), 2);

    let op = thread.op().expect("thread has an opener");
    assert!(op.is_op());
    assert!(op.sticky());
    assert!(op.closed());
    assert!(!op.archived());
    assert_eq!(op.sub(), Some("/sqt/"));
    assert_eq!(op.full_orig_file_name(), "sqt.png");
    assert_eq!(op.full_new_file_name(), "1451055600123.png");
    assert!(op.has_file());

    let reply = &thread[1];
    assert_eq!(reply.resto(), 51971506);
    assert!(!reply.has_file());
    assert_eq!(stub.hits(), 1);
    Ok(())
}

#[tokio::test]
async fn fetches_thread_by_url() -> anyhow::Result<()> {
    let stub = ApiStub::start();
    let client = stub.client();

    let thread = client
        .thread_from_url("https://boards.4chan.org/g/thread/51971506#p51971506")
        .await?;
    assert_eq!(thread.board(), "g");
    assert_eq!(thread.op().map(|op| op.no()), Some(51971506));

    let again = client
        .thread_from_url("https://boards.4channel.org/g/thread/51971506/sqt")
        .await?;
    assert_eq!(again, thread);
    assert_eq!(stub.hits(), 2);
    Ok(())
}

#[tokio::test]
async fn foreign_url_issues_no_request() {
    let stub = ApiStub::start();
    let err = stub
        .client()
        .thread_from_url("https://www.google.com")
        .await
        .unwrap_err();

    assert!(matches!(err, Error::UrlMatch(ref e) if e.url() == "https://www.google.com"));
    assert_eq!(stub.hits(), 0);
}

#[tokio::test]
async fn malformed_body_is_a_decode_failure() {
    let stub = ApiStub::start();
    let client = stub.client();

    let err = client.thread("g", "1").await.unwrap_err();
    assert!(matches!(err, Error::Decode(_)), "{err}");

    let err = client.thread("g", "2").await.unwrap_err();
    assert!(matches!(err, Error::Decode(_)), "{err}");
}

#[tokio::test]
async fn missing_thread_is_an_unexpected_status() {
    let stub = ApiStub::start();
    let err = stub.client().thread("g", "404").await.unwrap_err();
    match err {
        Error::UnexpectedStatus(code) => assert_eq!(code.as_u16(), 404),
        other => panic!("unexpected error: {other}"),
    }
}

#[tokio::test]
async fn refused_connection_is_a_transport_failure() {
    let port = {
        let listener = TcpListener::bind("127.0.0.1:0").expect("bind");
        listener.local_addr().expect("local addr").port()
    };
    let client = Client::with_config(Config {
        api_base: format!("http://127.0.0.1:{port}"),
    });

    let err = client.thread("g", "1").await.unwrap_err();
    assert!(matches!(err, Error::Transport(_)), "{err}");
}

#[tokio::test]
async fn truncated_body_is_a_read_failure() {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind");
    let addr = listener.local_addr().expect("local addr");
    let handle = thread::spawn(move || {
        if let Ok((mut stream, _)) = listener.accept() {
            let mut buf = [0u8; 1024];
            let _ = stream.read(&mut buf);
            let _ = stream.write_all(
                b"HTTP/1.1 200 OK\r\nContent-Type: application/json\r\nContent-Length: 100\r\n\r\n{\"posts\"",
            );
            let _ = stream.flush();
        }
    });

    let client = Client::with_config(Config {
        api_base: format!("http://{addr}"),
    });
    let err = client.thread("g", "1").await.unwrap_err();
    assert!(matches!(err, Error::Read(_)), "{err}");
    let _ = handle.join();
}
