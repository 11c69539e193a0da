//! Integration tests for types

#[cfg(test)]
mod tests {
    use papermc_types::*;
    use std::cmp::Ordering;
    use std::str::FromStr;

    #[test]
    fn test_build_from_service_payload() {
        let json = r#"{
            "id": 120,
            "time": "2025-03-01T12:00:00Z",
            "channel": "RECOMMENDED",
            "downloads": {
                "server:default": {
                    "name": "velocity-3.4.0-120.jar",
                    "url": "https://fill-data.papermc.io/velocity-3.4.0-120.jar",
                    "size": 2048,
                    "checksums": {"sha256": "AB12"}
                }
            }
        }"#;

        let build: Build = serde_json::from_str(json).unwrap();
        assert_eq!(build.id, 120);
        assert_eq!(build.channel, Channel::Recommended);
        assert!(build.commits.is_empty());
        assert_eq!(
            build.default_download_url(),
            Some("https://fill-data.papermc.io/velocity-3.4.0-120.jar")
        );
        let artifact = build.downloads.get(DEFAULT_ARTIFACT_KEY).unwrap();
        assert_eq!(artifact.expected_sha256(), Some("AB12"));
    }

    #[test]
    fn test_channel_spellings() {
        assert_eq!(Channel::from_str("Stable").unwrap(), Channel::Stable);
        assert_eq!(Channel::Beta.as_api_str(), "BETA");
        assert_eq!(Channel::Alpha.to_string(), "alpha");
        assert!(Channel::from_str("nightly").is_err());
        assert_eq!(
            serde_json::to_string(&Channel::Recommended).unwrap(),
            r#""RECOMMENDED""#
        );
    }

    #[test]
    fn test_version_ordering_across_minor_lines() {
        assert_eq!(compare_versions("1.7.10", "1.21.11"), Ordering::Less);
        assert_eq!(compare_versions("1.21.11-rc3", "1.21.11"), Ordering::Less);
        assert_eq!(compare_versions("1.21.4-pre2", "1.21.4-rc1"), Ordering::Less);
        assert_eq!(compare_versions("1.21.10", "1.21.9"), Ordering::Greater);
    }

    #[test]
    fn test_prerelease_detection() {
        assert!(is_prerelease("1.21.11-rc3"));
        assert!(is_prerelease("1.21.4-PRE1"));
        assert!(is_prerelease("3.4.0-SNAPSHOT"));
        assert!(!is_prerelease("1.21.11"));
        assert!(ReleaseVersion::parse("1.21.11-rc3").is_prerelease());
    }

    #[test]
    fn test_query_options_keep_newest() {
        let options = QueryOptions::new(Some(2), Some(Channel::Stable));
        assert_eq!(options.apply_limit(vec![1, 2, 3, 4]), [3, 4]);
        assert_eq!(QueryOptions::default().apply_limit(vec![1, 2]), [1, 2]);
    }

    #[test]
    fn test_download_result_verification_flag() {
        let result = DownloadResult {
            path: "paper.jar".into(),
            size: 11,
            expected_sha256: None,
            actual_sha256: "b94d".into(),
            valid: true,
        };
        assert!(!result.was_verified());
    }
}
