//! Text reads, composed on top of binary reads.
//!
//! A text read never touches a backend itself. It dispatches the binary read
//! of the same track through the bus, so whichever handler serves the bytes
//! (filesystem, HTTP, `data:` URL) also serves the text. Gzip content is
//! detected by its magic bytes and inflated here, not by the byte handlers.

use futures::FutureExt;

use urlio_codec::buffer_to_text;
use urlio_core::{
    BinaryFile, Deferred, Error, Handler, Next, ReadBinaryFile, ReadBinaryFileSync, ReadTextFile,
    ReadTextFileSync, Request, Response, ServiceBus, TextEncoding, TextFile, TextParams, Url,
    UrlParams,
};

fn to_text_file(url: Url, file: BinaryFile, encoding: TextEncoding) -> Result<TextFile, Error> {
    let text = buffer_to_text(&file.content, encoding)?;
    Ok(TextFile {
        url,
        base_filename: file.base_filename,
        encoding,
        content: text.content,
        gz: text.gz,
    })
}

async fn decode_when_read(
    url: Url,
    binary: Deferred<BinaryFile>,
    encoding: TextEncoding,
) -> Result<TextFile, Error> {
    let file = binary.await?;
    to_text_file(url, file, encoding)
}

pub struct ReadTextViaBinary;

impl Handler<ReadTextFile> for ReadTextViaBinary {
    fn description(&self) -> &str {
        "text: decode binary read"
    }

    fn handle(
        &self,
        request: Request<ReadTextFile>,
        _next: Next<'_, ReadTextFile>,
        bus: &ServiceBus,
    ) -> Response<ReadTextFile> {
        let TextParams { url, encoding } = request.into_params();
        let binary =
            bus.dispatch(Request::<ReadBinaryFile>::new(UrlParams::new(url.clone())))?;
        Ok(decode_when_read(url, binary, encoding).boxed())
    }
}

pub struct ReadTextViaBinarySync;

impl Handler<ReadTextFileSync> for ReadTextViaBinarySync {
    fn description(&self) -> &str {
        "text: decode binary read (sync)"
    }

    fn handle(
        &self,
        request: Request<ReadTextFileSync>,
        _next: Next<'_, ReadTextFileSync>,
        bus: &ServiceBus,
    ) -> Response<ReadTextFileSync> {
        let TextParams { url, encoding } = request.into_params();
        let file = bus.dispatch(Request::<ReadBinaryFileSync>::new(UrlParams::new(url)))?;
        to_text_file(file.url.clone(), file, encoding)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fs::{FsReadBinaryFile, FsReadBinaryFileSync};
    use tempfile::tempdir;
    use urlio_codec::gzip;

    fn bus() -> ServiceBus {
        let mut builder = ServiceBus::builder();
        builder
            .register(FsReadBinaryFile)
            .register(FsReadBinaryFileSync)
            .register(ReadTextViaBinary)
            .register(ReadTextViaBinarySync);
        builder.build()
    }

    fn text_request<K>(path: &std::path::Path, encoding: TextEncoding) -> Request<K>
    where
        K: urlio_core::RequestKind<Params = TextParams>,
    {
        Request::new(TextParams::new(Url::from_file_path(path).unwrap(), encoding))
    }

    #[test]
    fn plain_file_is_decoded() {
        let dir = tempdir().unwrap();
        let file = dir.path().join("words.txt");
        std::fs::write(&file, "hello world").unwrap();

        let text = bus()
            .dispatch(text_request::<ReadTextFileSync>(&file, TextEncoding::Utf8))
            .unwrap();
        assert_eq!(text.content, "hello world");
        assert_eq!(text.encoding, TextEncoding::Utf8);
        assert!(!text.gz);
        assert_eq!(text.url, Url::from_file_path(&file).unwrap());
    }

    #[test]
    fn gzip_content_is_sniffed_not_named() {
        let dir = tempdir().unwrap();
        let file = dir.path().join("no-suffix.txt");
        std::fs::write(&file, gzip(b"packed").unwrap()).unwrap();

        let text = bus()
            .dispatch(text_request::<ReadTextFileSync>(&file, TextEncoding::Utf8))
            .unwrap();
        assert_eq!(text.content, "packed");
        assert!(text.gz);
    }

    #[test]
    fn requested_encoding_is_applied_after_inflate() {
        let dir = tempdir().unwrap();
        let file = dir.path().join("latin.gz");
        std::fs::write(&file, gzip(&[0x63, 0x61, 0x66, 0xe9]).unwrap()).unwrap();

        let text = bus()
            .dispatch(text_request::<ReadTextFileSync>(&file, TextEncoding::Latin1))
            .unwrap();
        assert_eq!(text.content, "café");
        assert_eq!(text.encoding, TextEncoding::Latin1);
    }

    #[test]
    fn binary_failure_is_returned_as_is() {
        let dir = tempdir().unwrap();
        let err = bus()
            .dispatch(text_request::<ReadTextFileSync>(
                &dir.path().join("missing.txt"),
                TextEncoding::Utf8,
            ))
            .unwrap_err();
        assert!(err.is_not_found());
    }

    #[tokio::test]
    async fn async_track_matches_sync_track() {
        let dir = tempdir().unwrap();
        let file = dir.path().join("both.txt");
        std::fs::write(&file, gzip("ünïcode".as_bytes()).unwrap()).unwrap();
        let bus = bus();

        let deferred = bus
            .dispatch(text_request::<ReadTextFile>(&file, TextEncoding::Utf8))
            .unwrap()
            .await
            .unwrap();
        let immediate = bus
            .dispatch(text_request::<ReadTextFileSync>(&file, TextEncoding::Utf8))
            .unwrap();
        assert_eq!(deferred, immediate);
        assert!(deferred.gz);
    }

    #[test]
    fn sync_text_keeps_the_url_the_binary_read_resolved() {
        let resolved = Url::parse("file:///srv/resolved.txt").unwrap();
        let answer = resolved.clone();
        let mut builder = ServiceBus::builder();
        builder
            .register(urlio_core::handler_fn::<ReadBinaryFileSync, _>(
                "alias",
                move |_, _, _| {
                    Ok(BinaryFile {
                        url: answer.clone(),
                        content: "aliased".into(),
                        base_filename: None,
                    })
                },
            ))
            .register(ReadTextViaBinarySync);
        let bus = builder.build();

        let text = bus
            .dispatch(Request::<ReadTextFileSync>::new(TextParams::new(
                Url::parse("file:///srv/alias.txt").unwrap(),
                TextEncoding::Utf8,
            )))
            .unwrap();
        assert_eq!(text.content, "aliased");
        assert_eq!(text.url, resolved);
    }

    #[test]
    fn text_read_without_binary_handlers_is_unhandled() {
        let mut builder = ServiceBus::builder();
        builder.register(ReadTextViaBinarySync);
        let bus = builder.build();

        let url = Url::parse("file:///tmp/whatever.txt").unwrap();
        match bus.dispatch(Request::<ReadTextFileSync>::new(TextParams::new(
            url,
            TextEncoding::Utf8,
        ))) {
            Err(Error::UnhandledRequest { kind, .. }) => assert_eq!(kind, "ReadBinaryFileSync"),
            other => panic!("unexpected response: {other:?}"),
        }
    }
}
