use std::net::SocketAddr;
use std::sync::{Arc, Mutex};

use axum::{
    extract::{Path, State},
    http::{header::CONTENT_TYPE, StatusCode, Uri},
    response::{IntoResponse, Response},
    routing::get,
    Router,
};
use tokio::net::TcpListener;

pub const FAKE_OBJECT_BODY: &[u8] = b"fake-object-bytes";

pub const NO_SUCH_KEY_BODY: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<Error><Code>NoSuchKey</Code><Message>The specified key does not exist.</Message><Key>missing.jpg</Key><RequestId>1</RequestId></Error>"#;

pub const NO_SUCH_BUCKET_BODY: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<Error><Code>NoSuchBucket</Code><Message>The specified bucket does not exist</Message><RequestId>2</RequestId></Error>"#;

pub const ACCESS_DENIED_BODY: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<Error><Code>AccessDenied</Code><Message>Request has expired</Message><RequestId>3</RequestId></Error>"#;

/// Minimal S3 lookalike serving a fixed set of keys
///
/// * `photos/cat.jpg` and `photos/albums/summer/cat.jpg` - 200 with [`FAKE_OBJECT_BODY`]
/// * `photos/forbidden.jpg` - 403 `AccessDenied`
/// * any other key in `photos` - 404 `NoSuchKey`
/// * any other bucket - 404 `NoSuchBucket`
pub struct FakeStorage {
    pub endpoint: String,
    requests: Arc<Mutex<Vec<Uri>>>,
}

impl FakeStorage {
    pub async fn start() -> Self {
        let requests = Arc::new(Mutex::new(Vec::new()));

        let router = Router::new()
            .route("/{bucket}/{*key}", get(serve_object))
            .with_state(requests.clone());

        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });

        Self {
            endpoint: format!("http://{addr}"),
            requests,
        }
    }

    /// URIs received so far, oldest first
    pub fn requests(&self) -> Vec<Uri> {
        self.requests.lock().unwrap().clone()
    }
}

/// An address nothing listens on
pub async fn unreachable_endpoint() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr: SocketAddr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{addr}")
}

fn xml_error(status: StatusCode, body: &'static str) -> Response {
    (status, [(CONTENT_TYPE, "application/xml")], body).into_response()
}

async fn serve_object(
    State(requests): State<Arc<Mutex<Vec<Uri>>>>,
    Path((bucket, key)): Path<(String, String)>,
    uri: Uri,
) -> Response {
    requests.lock().unwrap().push(uri);

    if bucket != "photos" {
        return xml_error(StatusCode::NOT_FOUND, NO_SUCH_BUCKET_BODY);
    }

    match key.as_str() {
        "cat.jpg" | "albums/summer/cat.jpg" => {
            (StatusCode::OK, [(CONTENT_TYPE, "image/jpeg")], FAKE_OBJECT_BODY).into_response()
        }
        "forbidden.jpg" => xml_error(StatusCode::FORBIDDEN, ACCESS_DENIED_BODY),
        _ => xml_error(StatusCode::NOT_FOUND, NO_SUCH_KEY_BODY),
    }
}
