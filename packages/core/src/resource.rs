//! Resource identifiers.
//!
//! Every request is addressed by a [`Url`]. Handlers look at the scheme to
//! decide whether they apply, and at the path to derive metadata such as
//! gzip compression.

use std::path::PathBuf;

pub use url::Url;

use crate::Error;

pub const SCHEME_FILE: &str = "file";
pub const SCHEME_HTTP: &str = "http";
pub const SCHEME_HTTPS: &str = "https";
pub const SCHEME_DATA: &str = "data";

/// Turn a URL string or a filesystem path into a [`Url`].
///
/// Anything that starts with a scheme of at least two characters is parsed
/// as a URL. Everything else (including Windows drive paths like `C:\x`) is
/// treated as a path and made absolute against the current directory.
pub fn to_url(location: &str) -> Result<Url, Error> {
    if has_url_scheme(location) {
        return Url::parse(location).map_err(|e| Error::InvalidUrl {
            url: location.to_string(),
            message: e.to_string(),
        });
    }

    let path = PathBuf::from(location);
    let absolute = if path.is_absolute() {
        path
    } else {
        std::env::current_dir()
            .map_err(|e| Error::io(location, e))?
            .join(path)
    };

    Url::from_file_path(&absolute).map_err(|()| Error::InvalidUrl {
        url: location.to_string(),
        message: "cannot be expressed as a file: URL".to_string(),
    })
}

fn has_url_scheme(location: &str) -> bool {
    let Some((scheme, _)) = location.split_once(':') else {
        return false;
    };
    let mut chars = scheme.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() => {}
        _ => return false,
    }
    scheme.len() >= 2
        && chars.all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.'))
}

/// True when the URL path names a gzip file. Query and fragment are ignored.
pub fn is_gz_file(url: &Url) -> bool {
    url.path().ends_with(".gz")
}

pub fn is_http_url(url: &Url) -> bool {
    matches!(url.scheme(), SCHEME_HTTP | SCHEME_HTTPS)
}

pub fn is_data_url(url: &Url) -> bool {
    url.scheme() == SCHEME_DATA
}

/// Resolve a `file:` URL to a local path.
pub fn url_to_file_path(url: &Url) -> Result<PathBuf, Error> {
    if url.scheme() != SCHEME_FILE {
        return Err(Error::InvalidUrl {
            url: url.to_string(),
            message: format!("expected a file: URL, got {}:", url.scheme()),
        });
    }
    url.to_file_path().map_err(|()| Error::InvalidUrl {
        url: url.to_string(),
        message: "not a local file path".to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn urls_pass_through() {
        let url = to_url("https://example.test/a/b.json?x=1").unwrap();
        assert_eq!(url.scheme(), "https");
        assert_eq!(url.path(), "/a/b.json");

        let url = to_url("data:text/plain,hello").unwrap();
        assert!(is_data_url(&url));
    }

    #[cfg(unix)]
    #[test]
    fn paths_become_file_urls() {
        let url = to_url("/tmp/some file.txt").unwrap();
        assert_eq!(url.as_str(), "file:///tmp/some%20file.txt");
        assert_eq!(
            url_to_file_path(&url).unwrap(),
            PathBuf::from("/tmp/some file.txt")
        );
    }

    #[test]
    fn relative_paths_are_made_absolute() {
        let url = to_url("relative/settings.json").unwrap();
        assert_eq!(url.scheme(), SCHEME_FILE);
        assert!(url.path().ends_with("/relative/settings.json"));
    }

    #[test]
    fn single_letter_scheme_is_a_path() {
        assert!(!has_url_scheme("C:\\Users\\me"));
        assert!(!has_url_scheme("no-colon-here"));
        assert!(!has_url_scheme("1abc:thing"));
        assert!(has_url_scheme("vscode-vfs:/x"));
    }

    #[test]
    fn gz_detection_uses_the_path_only() {
        assert!(is_gz_file(&Url::parse("file:///tmp/x.gz").unwrap()));
        assert!(is_gz_file(&Url::parse("http://h/x.gz?download=1").unwrap()));
        assert!(is_gz_file(&Url::parse("http://h/x.gz#frag").unwrap()));
        assert!(!is_gz_file(&Url::parse("file:///tmp/x.gzip").unwrap()));
        assert!(!is_gz_file(&Url::parse("http://h/x?name=a.gz").unwrap()));
    }

    #[test]
    fn http_detection() {
        assert!(is_http_url(&Url::parse("http://h/").unwrap()));
        assert!(is_http_url(&Url::parse("https://h/").unwrap()));
        assert!(!is_http_url(&Url::parse("file:///h").unwrap()));
    }

    #[test]
    fn non_file_urls_have_no_local_path() {
        let url = Url::parse("https://example.test/x").unwrap();
        assert!(matches!(
            url_to_file_path(&url),
            Err(Error::InvalidUrl { .. })
        ));
    }
}
