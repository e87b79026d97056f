/// Placeholder photo API client
///
/// A new tile needs an image reference. It is resolved by asking the photo
/// API for a random photo record; the record is parsed into a typed struct,
/// so a response of the wrong shape fails the fetch instead of producing a
/// tile without an image. The image bytes behind the reference are then
/// downloaded on a best-effort basis for display.

use std::time::Duration;

use image::imageops::FilterType;
use log::{debug, warn};
use rand::Rng;
use serde::Deserialize;

use crate::error::FetchError;

/// Public placeholder API used when no endpoint is configured
pub const DEFAULT_ENDPOINT: &str = "https://jsonplaceholder.typicode.com";

/// Photo ids are drawn from [0, PHOTO_ID_RANGE)
pub const PHOTO_ID_RANGE: u32 = 5000;

/// Decoded previews are scaled down to fit this square
const PREVIEW_SIZE: u32 = 512;

/// The part of a photo record we rely on
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct PhotoRecord {
    pub url: String,
}

/// Decoded RGBA pixels ready for an iced image handle
#[derive(Debug, Clone)]
pub struct Pixels {
    pub width: u32,
    pub height: u32,
    pub rgba: Vec<u8>,
}

/// Result of a successful add-tile fetch
#[derive(Debug, Clone)]
pub struct Photo {
    /// Resolved image reference
    pub url: String,
    /// None when the image itself could not be downloaded or decoded
    pub pixels: Option<Pixels>,
}

#[derive(Debug, Clone)]
pub struct PhotoClient {
    http: reqwest::Client,
    endpoint: String,
    id_range: u32,
}

impl PhotoClient {
    pub fn new(endpoint: &str, id_range: u32, timeout: Duration) -> Result<Self, FetchError> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| FetchError::Client(e.to_string()))?;

        Ok(Self {
            http,
            endpoint: endpoint.trim_end_matches('/').to_string(),
            id_range: id_range.max(1),
        })
    }

    /// Pick a photo id uniformly from the configured range
    pub fn random_id(&self) -> u32 {
        rand::rng().random_range(0..self.id_range)
    }

    pub fn record_url(&self, id: u32) -> String {
        format!("{}/photos/{}", self.endpoint, id)
    }

    /// Resolve a random photo and try to download its image.
    ///
    /// Fails only if the record itself cannot be fetched or parsed.
    pub async fn load(self) -> Result<Photo, FetchError> {
        let id = self.random_id();
        let record = self.fetch_record(id).await?;

        let pixels = match self.fetch_pixels(&record.url).await {
            Ok(pixels) => Some(pixels),
            Err(e) => {
                warn!("Image for photo {} unavailable, using placeholder: {}", id, e);
                None
            }
        };

        Ok(Photo {
            url: record.url,
            pixels,
        })
    }

    pub async fn fetch_record(&self, id: u32) -> Result<PhotoRecord, FetchError> {
        let url = self.record_url(id);
        debug!("Fetching photo record {}", url);

        let body = self.get_bytes(&url).await?;
        parse_record(&url, &body)
    }

    pub async fn fetch_pixels(&self, url: &str) -> Result<Pixels, FetchError> {
        let bytes = self.get_bytes(url).await?;
        let url = url.to_string();

        // Spawn blocking because decoding and resizing are CPU-bound
        tokio::task::spawn_blocking(move || decode_preview(&url, &bytes))
            .await
            .map_err(|e| FetchError::Join(e.to_string()))?
    }

    async fn get_bytes(&self, url: &str) -> Result<Vec<u8>, FetchError> {
        let request_error = |e: reqwest::Error| FetchError::Request {
            url: url.to_string(),
            reason: e.to_string(),
        };

        let response = self.http.get(url).send().await.map_err(request_error)?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        let bytes = response.bytes().await.map_err(request_error)?;
        Ok(bytes.to_vec())
    }
}

/// Parse a photo record, rejecting anything without a usable `url`
pub fn parse_record(source: &str, body: &[u8]) -> Result<PhotoRecord, FetchError> {
    let record: PhotoRecord = serde_json::from_slice(body).map_err(|e| FetchError::Decode {
        url: source.to_string(),
        reason: e.to_string(),
    })?;

    if record.url.trim().is_empty() {
        return Err(FetchError::Decode {
            url: source.to_string(),
            reason: "empty url".to_string(),
        });
    }

    Ok(record)
}

/// Decode image bytes and scale them down to preview size
pub fn decode_preview(source: &str, bytes: &[u8]) -> Result<Pixels, FetchError> {
    let img = image::load_from_memory(bytes).map_err(|e| FetchError::Image {
        url: source.to_string(),
        reason: e.to_string(),
    })?;

    let img = if img.width() > PREVIEW_SIZE || img.height() > PREVIEW_SIZE {
        img.resize(PREVIEW_SIZE, PREVIEW_SIZE, FilterType::Triangle)
    } else {
        img
    };

    let rgba = img.to_rgba8();
    Ok(Pixels {
        width: rgba.width(),
        height: rgba.height(),
        rgba: rgba.into_raw(),
    })
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use image::{ImageFormat, Rgba, RgbaImage};

    use super::*;

    fn png(width: u32, height: u32) -> Vec<u8> {
        let img = RgbaImage::from_pixel(width, height, Rgba([200, 40, 40, 255]));
        let mut out = Cursor::new(Vec::new());
        img.write_to(&mut out, ImageFormat::Png).unwrap();
        out.into_inner()
    }

    #[test]
    fn test_parse_record_ignores_extra_fields() {
        let body = br#"{"albumId": 3, "id": 120, "title": "x", "url": "https://via.placeholder.com/600/92c952", "thumbnailUrl": "t"}"#;
        let record = parse_record("test", body).unwrap();
        assert_eq!(record.url, "https://via.placeholder.com/600/92c952");
    }

    #[test]
    fn test_parse_record_rejects_missing_url() {
        let err = parse_record("test", br#"{"id": 1}"#).unwrap_err();
        assert!(matches!(err, FetchError::Decode { .. }));
    }

    #[test]
    fn test_parse_record_rejects_empty_url() {
        let err = parse_record("test", br#"{"url": "  "}"#).unwrap_err();
        assert!(matches!(err, FetchError::Decode { .. }));
    }

    #[test]
    fn test_parse_record_rejects_non_json() {
        assert!(parse_record("test", b"<html>").is_err());
    }

    #[test]
    fn test_decode_preview_keeps_small_images() {
        let pixels = decode_preview("test", &png(40, 30)).unwrap();
        assert_eq!((pixels.width, pixels.height), (40, 30));
        assert_eq!(pixels.rgba.len(), 40 * 30 * 4);
    }

    #[test]
    fn test_decode_preview_scales_large_images() {
        let pixels = decode_preview("test", &png(1024, 256)).unwrap();
        assert_eq!((pixels.width, pixels.height), (512, 128));
    }

    #[test]
    fn test_decode_preview_rejects_garbage() {
        let err = decode_preview("test", b"not an image").unwrap_err();
        assert!(matches!(err, FetchError::Image { .. }));
    }

    #[test]
    fn test_random_ids_stay_in_range() {
        let client = PhotoClient::new(DEFAULT_ENDPOINT, 10, Duration::from_secs(1)).unwrap();
        for _ in 0..200 {
            assert!(client.random_id() < 10);
        }
        assert_eq!(client.record_url(7), "https://jsonplaceholder.typicode.com/photos/7");
    }

    #[test]
    fn test_endpoint_trailing_slash_is_trimmed() {
        let client = PhotoClient::new("http://localhost:3000/", PHOTO_ID_RANGE, Duration::from_secs(1)).unwrap();
        assert_eq!(client.record_url(0), "http://localhost:3000/photos/0");
    }
}
