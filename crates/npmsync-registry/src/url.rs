//! URL construction helpers for the upstream registry.
//!
//! Pure functions, so every wire path is built in one place.

use crate::config::NpmRegistryConfig;
use url::Url;

/// Percent-encode a package name for use as a single path segment.
///
/// Scoped names keep their scope inside the segment
/// (`@scope/pkg` becomes `%40scope%2Fpkg`).
pub fn encode_package_name(name: &str) -> String {
    urlencoding::encode(name).into_owned()
}

/// `GET {registry}/{name}`
pub fn build_manifest_url(config: &NpmRegistryConfig, name: &str) -> String {
    format!("{}/{}", config.registry(), encode_package_name(name))
}

/// `PUT {registry}/{name}/sync?sync_upstream=true&nodeps=true`
pub fn build_sync_create_url(config: &NpmRegistryConfig, name: &str) -> String {
    format!(
        "{}/{}/sync?sync_upstream=true&nodeps=true",
        config.registry(),
        encode_package_name(name)
    )
}

/// `GET {registry}/{name}/sync/log/{task_id}?offset={offset}`
///
/// `task_id` is an opaque upstream token, encoded as one path segment.
pub fn build_sync_log_url(
    config: &NpmRegistryConfig,
    name: &str,
    task_id: &str,
    offset: u64,
) -> String {
    format!(
        "{}/{}/sync/log/{}?offset={offset}",
        config.registry(),
        encode_package_name(name),
        urlencoding::encode(task_id)
    )
}

/// Append the scalar members of a JSON object as query pairs.
///
/// Strings are used verbatim, other scalars in their JSON form. `null`
/// members are skipped; nested values are sent as compact JSON.
pub fn append_query_params(url: &mut Url, params: &serde_json::Value) {
    let Some(object) = params.as_object() else {
        return;
    };
    if object.is_empty() {
        return;
    }

    let mut pairs = url.query_pairs_mut();
    for (key, value) in object {
        match value {
            serde_json::Value::Null => {}
            serde_json::Value::String(s) => {
                pairs.append_pair(key, s);
            }
            other => {
                pairs.append_pair(key, &other.to_string());
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn config() -> NpmRegistryConfig {
        NpmRegistryConfig::new().with_source_registry("https://registry.example/")
    }

    #[test]
    fn test_encode_plain_name() {
        assert_eq!(encode_package_name("left-pad"), "left-pad");
    }

    #[test]
    fn test_encode_scoped_name() {
        assert_eq!(encode_package_name("@babel/core"), "%40babel%2Fcore");
    }

    #[test]
    fn test_build_manifest_url() {
        assert_eq!(
            build_manifest_url(&config(), "@types/node"),
            "https://registry.example/%40types%2Fnode"
        );
    }

    #[test]
    fn test_build_sync_create_url() {
        assert_eq!(
            build_sync_create_url(&config(), "left-pad"),
            "https://registry.example/left-pad/sync?sync_upstream=true&nodeps=true"
        );
    }

    #[test]
    fn test_build_sync_log_url() {
        assert_eq!(
            build_sync_log_url(&config(), "left-pad", "job-123", 42),
            "https://registry.example/left-pad/sync/log/job-123?offset=42"
        );
    }

    #[test]
    fn test_sync_log_url_keeps_task_id_in_one_segment() {
        assert_eq!(
            build_sync_log_url(&config(), "@scope/pkg", "job/1?offset=9", 0),
            "https://registry.example/%40scope%2Fpkg/sync/log/job%2F1%3Foffset%3D9?offset=0"
        );
    }

    #[test]
    fn test_append_query_params() {
        let mut url = Url::parse("https://registry.example/-/v1/search").unwrap();
        append_query_params(
            &mut url,
            &json!({"text": "left pad", "size": 20, "skip": null, "exact": true}),
        );

        let pairs: Vec<(String, String)> = url.query_pairs().into_owned().collect();
        assert!(pairs.contains(&("text".to_string(), "left pad".to_string())));
        assert!(pairs.contains(&("size".to_string(), "20".to_string())));
        assert!(pairs.contains(&("exact".to_string(), "true".to_string())));
        assert!(!pairs.iter().any(|(k, _)| k == "skip"));
    }

    #[test]
    fn test_append_query_params_keeps_existing_query() {
        let mut url = Url::parse("https://registry.example/pkg?write=true").unwrap();
        append_query_params(&mut url, &json!({"offset": 3}));
        assert_eq!(url.query(), Some("write=true&offset=3"));
    }

    #[test]
    fn test_append_query_params_ignores_non_objects() {
        let mut url = Url::parse("https://registry.example/pkg").unwrap();
        append_query_params(&mut url, &json!([1, 2, 3]));
        append_query_params(&mut url, &json!({}));
        assert_eq!(url.query(), None);
    }
}
