use futures::future;
use futures::FutureExt;
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use urlio_core::{
    handler_fn, BinaryFile, Error, FileType, ReadBinaryFile, Request, ServiceBus, Stat, Url,
    UrlParams,
};
use urlio_http::{HttpConfig, HttpReadBinaryFile, HttpStat};

fn bus(config: &HttpConfig) -> ServiceBus {
    let mut builder = ServiceBus::builder();
    builder
        .register(handler_fn::<ReadBinaryFile, _>("fallback", |request, _, _| {
            let url = request.into_params().url;
            Ok(future::ready(Ok(BinaryFile {
                url,
                content: "from fallback".into(),
                base_filename: None,
            }))
            .boxed())
        }))
        .register(HttpReadBinaryFile::new(config).unwrap())
        .register(HttpStat::new(config).unwrap());
    builder.build()
}

fn params(server: &MockServer, route: &str) -> UrlParams {
    UrlParams::new(Url::parse(&format!("{}{}", server.uri(), route)).unwrap())
}

#[tokio::test]
async fn get_returns_body_bytes() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/words.txt"))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(b"one\ntwo\n".to_vec()))
        .mount(&server)
        .await;

    let file = bus(&HttpConfig::default())
        .dispatch(Request::<ReadBinaryFile>::new(params(&server, "/words.txt")))
        .unwrap()
        .await
        .unwrap();

    assert_eq!(&file.content[..], b"one\ntwo\n");
    assert_eq!(file.url.path(), "/words.txt");
}

#[tokio::test]
async fn gzip_body_is_not_inflated() {
    let server = MockServer::start().await;
    let packed = vec![0x1f, 0x8b, 0x08, 0x00, 0xde, 0xad];
    Mock::given(method("GET"))
        .and(path("/dict.gz"))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("content-encoding", "gzip")
                .set_body_bytes(packed.clone()),
        )
        .mount(&server)
        .await;

    let file = bus(&HttpConfig::default())
        .dispatch(Request::<ReadBinaryFile>::new(params(&server, "/dict.gz")))
        .unwrap()
        .await
        .unwrap();

    assert_eq!(file.content.to_vec(), packed);
}

#[tokio::test]
async fn missing_resource_is_not_found() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/missing"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let err = bus(&HttpConfig::default())
        .dispatch(Request::<ReadBinaryFile>::new(params(&server, "/missing")))
        .unwrap()
        .await
        .unwrap_err();

    assert!(matches!(err, Error::HttpStatus { status: 404, .. }));
    assert!(err.is_not_found());
}

#[tokio::test]
async fn server_error_is_reported_with_status() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let err = bus(&HttpConfig::default())
        .dispatch(Request::<ReadBinaryFile>::new(params(&server, "/busy")))
        .unwrap()
        .await
        .unwrap_err();

    assert!(matches!(err, Error::HttpStatus { status: 503, .. }));
    assert!(!err.is_not_found());
}

#[tokio::test]
async fn other_schemes_are_forwarded() {
    let url = Url::parse("file:///tmp/local.txt").unwrap();
    let file = bus(&HttpConfig::default())
        .dispatch(Request::<ReadBinaryFile>::new(UrlParams::new(url.clone())))
        .unwrap()
        .await
        .unwrap();

    assert_eq!(file.url, url);
    assert_eq!(&file.content[..], b"from fallback");
}

#[tokio::test]
async fn default_headers_are_sent() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/private"))
        .and(header("x-api-key", "secret"))
        .respond_with(ResponseTemplate::new(200).set_body_string("granted"))
        .mount(&server)
        .await;

    let config = HttpConfig::default().with_default_header("x-api-key", "secret");
    let file = bus(&config)
        .dispatch(Request::<ReadBinaryFile>::new(params(&server, "/private")))
        .unwrap()
        .await
        .unwrap();

    assert_eq!(&file.content[..], b"granted");
}

#[tokio::test]
async fn head_maps_headers_to_stats() {
    let server = MockServer::start().await;
    Mock::given(method("HEAD"))
        .and(path("/words.txt"))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("etag", "\"v1\"")
                .insert_header("last-modified", "Wed, 21 Oct 2015 07:28:00 GMT"),
        )
        .mount(&server)
        .await;

    let stats = bus(&HttpConfig::default())
        .dispatch(Request::<Stat>::new(params(&server, "/words.txt")))
        .unwrap()
        .await
        .unwrap();

    assert_eq!(stats.etag.as_deref(), Some("\"v1\""));
    assert_eq!(stats.file_type, FileType::File);
    assert_eq!(
        stats.mtime.map(|m| m.to_rfc2822()),
        Some("Wed, 21 Oct 2015 07:28:00 +0000".to_string())
    );
}

#[tokio::test]
async fn head_failure_is_reported() {
    let server = MockServer::start().await;
    Mock::given(method("HEAD"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let err = bus(&HttpConfig::default())
        .dispatch(Request::<Stat>::new(params(&server, "/gone")))
        .unwrap()
        .await
        .unwrap_err();

    assert!(err.is_not_found());
}
