//! Offline filter command handler

use anyhow::Context;
use std::path::Path;
use tokio::io::AsyncReadExt;

use crate::api::validation;
use crate::config::Config;
use crate::constants::DECODE_ERROR_MESSAGE;
use crate::services::TransformService;

pub async fn cmd_filter(config: &Config, file: Option<&Path>) -> anyhow::Result<()> {
    let body = match file {
        Some(path) => tokio::fs::read(path)
            .await
            .with_context(|| format!("Failed to read {}", path.display()))?,
        None => {
            let mut buf = Vec::new();
            tokio::io::stdin()
                .read_to_end(&mut buf)
                .await
                .context("Failed to read stdin")?;
            buf
        }
    };

    let service = TransformService::new(config.transform.missing_image);
    println!("{}", filter_document(&body, &service)?);
    Ok(())
}

/// Runs a raw request body through validation and the pipeline, returning
/// the pretty-printed response array.
pub fn filter_document(body: &[u8], service: &TransformService) -> anyhow::Result<String> {
    let payload = validation::decode_payload(body)
        .map_err(|e| anyhow::anyhow!("{DECODE_ERROR_MESSAGE} ({e})"))?;

    let outcome = service.filter_and_map(payload)?;
    if outcome.skipped > 0 {
        eprintln!("Skipped {} entries without image", outcome.skipped);
    }

    Ok(serde_json::to_string_pretty(&outcome.entries)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::MissingImagePolicy;

    #[test]
    fn test_filter_document() {
        let body = br#"{"payload":[
            {"drm":true,"episodeCount":3,"image":{"showImage":"a.jpg"},"slug":"s1","title":"T1"},
            {"drm":false,"episodeCount":5,"image":{"showImage":"b.jpg"},"slug":"s2","title":"T2"}
        ]}"#;

        let output = filter_document(body, &TransformService::default()).unwrap();
        let value: serde_json::Value = serde_json::from_str(&output).unwrap();

        assert_eq!(
            value,
            serde_json::json!([{ "image": "a.jpg", "slug": "s1", "title": "T1" }])
        );
    }

    #[test]
    fn test_filter_document_reports_decode_failure() {
        let err = filter_document(b"{}", &TransformService::default()).unwrap_err();
        assert!(err.to_string().starts_with(DECODE_ERROR_MESSAGE));
    }

    #[test]
    fn test_filter_document_honours_reject_policy() {
        let body = br#"{"payload":[{"drm":true,"episodeCount":1,"slug":"bare"}]}"#;
        let service = TransformService::new(MissingImagePolicy::Reject);

        let err = filter_document(body, &service).unwrap_err();
        assert!(err.to_string().contains("entry 0"));
    }
}
