use std::path::{Path, PathBuf};

use base64::Engine as _;

use crate::errors::AssetError;

type IoResult<T> = std::result::Result<T, AssetError>;

/// Local file reader.
#[derive(Debug, Clone)]
pub struct FileAssetReader {
    path: PathBuf,
}

impl FileAssetReader {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    #[inline]
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    pub async fn read_bytes(&self) -> IoResult<Vec<u8>> {
        #[cfg(not(target_arch = "wasm32"))]
        {
            tokio::fs::read(&self.path).await.map_err(|e| {
                if e.kind() == std::io::ErrorKind::NotFound {
                    AssetError::NotFound(self.path.display().to_string())
                } else {
                    AssetError::Network(format!("{}: {e}", self.path.display()))
                }
            })
        }
        #[cfg(target_arch = "wasm32")]
        {
            Err(AssetError::FeatureNotEnabled(format!(
                "file access is unavailable in the browser: {}",
                self.path.display()
            )))
        }
    }
}

/// HTTP reader.
#[cfg(feature = "http")]
#[derive(Debug, Clone)]
pub struct HttpAssetReader {
    url: url::Url,
}

#[cfg(feature = "http")]
impl HttpAssetReader {
    pub fn new(url_str: &str) -> IoResult<Self> {
        Ok(Self {
            url: url::Url::parse(url_str)?,
        })
    }

    #[inline]
    #[must_use]
    pub fn url(&self) -> &url::Url {
        &self.url
    }

    pub async fn read_bytes(&self) -> IoResult<Vec<u8>> {
        let request = ehttp::Request::get(self.url.as_str());
        let response = ehttp::fetch_async(request)
            .await
            .map_err(|e| AssetError::Network(format!("{}: {e}", self.url)))?;
        if !response.ok {
            return Err(AssetError::HttpStatus {
                status: response.status,
                url: self.url.to_string(),
            });
        }
        Ok(response.bytes)
    }
}

/// Inline `data:` payload (what a pasted, copied-from-browser image usually is).
#[derive(Debug, Clone)]
pub struct DataUriReader {
    media_type: String,
    payload: String,
}

impl DataUriReader {
    pub fn new(uri: &str) -> IoResult<Self> {
        let rest = uri
            .strip_prefix("data:")
            .ok_or_else(|| AssetError::DataUri("missing `data:` prefix".to_string()))?;
        let (meta, payload) = rest
            .split_once(',')
            .ok_or_else(|| AssetError::DataUri("missing `,` separator".to_string()))?;
        let media_type = meta
            .strip_suffix(";base64")
            .ok_or_else(|| AssetError::DataUri("only base64 payloads are supported".to_string()))?;
        Ok(Self {
            media_type: media_type.to_string(),
            payload: payload.to_string(),
        })
    }

    #[must_use]
    pub fn media_type(&self) -> &str {
        &self.media_type
    }

    pub fn read_bytes(&self) -> IoResult<Vec<u8>> {
        Ok(base64::engine::general_purpose::STANDARD.decode(self.payload.trim())?)
    }
}

/// Reader selected from the shape of a locator.
#[derive(Debug, Clone)]
pub enum AssetReaderVariant {
    File(FileAssetReader),
    #[cfg(feature = "http")]
    Http(HttpAssetReader),
    DataUri(DataUriReader),
}

impl AssetReaderVariant {
    /// Picks a reader for a path, `file://`, `http(s)://` or `data:` locator.
    pub fn from_locator(locator: &str) -> IoResult<Self> {
        let locator = locator.trim();
        if locator.is_empty() {
            return Err(AssetError::InvalidLocator("empty locator".to_string()));
        }

        if locator.starts_with("http://") || locator.starts_with("https://") {
            #[cfg(feature = "http")]
            {
                return Ok(Self::Http(HttpAssetReader::new(locator)?));
            }
            #[cfg(not(feature = "http"))]
            {
                return Err(AssetError::FeatureNotEnabled(
                    "HTTP feature is not enabled. Enable it with `features = [\"http\"]`"
                        .to_string(),
                ));
            }
        }

        if locator.starts_with("data:") {
            return Ok(Self::DataUri(DataUriReader::new(locator)?));
        }

        if let Some(path) = locator.strip_prefix("file://") {
            return Ok(Self::File(FileAssetReader::new(path)));
        }

        if let Some((scheme, _)) = locator.split_once("://") {
            return Err(AssetError::InvalidLocator(format!(
                "unsupported scheme `{scheme}`"
            )));
        }

        Ok(Self::File(FileAssetReader::new(locator)))
    }

    pub async fn read_bytes(&self) -> IoResult<Vec<u8>> {
        match self {
            Self::File(r) => r.read_bytes().await,
            #[cfg(feature = "http")]
            Self::Http(r) => r.read_bytes().await,
            Self::DataUri(r) => r.read_bytes(),
        }
    }

    /// Short label for logs and texture names.
    #[must_use]
    pub fn source_filename(locator: &str) -> &str {
        let locator = locator.trim();
        if locator.starts_with("data:") {
            return "inline-data";
        }
        let without_query = locator.split(['?', '#']).next().unwrap_or(locator);
        without_query
            .rsplit(['/', '\\'])
            .find(|s| !s.is_empty())
            .unwrap_or(locator)
    }
}
