//! Environment variable overlay.
//!
//! The overlay is opt-in: it only runs when the configuration set has a
//! non-empty prefix. A variable `<PREFIX><REST>` maps to the registry name
//! `lowercase(REST)` with every `_` replaced by `-`. The prefix match is
//! exact and case-sensitive.

use crate::constants::{KEY_SEPARATOR, KEY_SEPARATOR_ALIAS};
use crate::document::FlatEntry;
use crate::env::Env;

/// Registry name for `key`, or `None` if it does not carry `prefix`.
pub fn normalize_env_key(prefix: &str, key: &str) -> Option<String> {
    if prefix.is_empty() {
        return None;
    }
    let rest = key.strip_prefix(prefix)?;
    Some(
        rest.to_lowercase()
            .replace(KEY_SEPARATOR_ALIAS, &KEY_SEPARATOR.to_string()),
    )
}

/// Variables of `env` that carry `prefix`, renamed to registry names.
///
/// Order follows the environment source and is not otherwise defined.
pub fn environment_entries(prefix: &str, env: &Env) -> Vec<FlatEntry> {
    if prefix.is_empty() {
        return Vec::new();
    }
    env.vars()
        .into_iter()
        .filter_map(|(key, value)| {
            normalize_env_key(prefix, &key).map(|key| FlatEntry { key, value })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_prefix_lowercases_and_dashes() {
        assert_eq!(
            normalize_env_key("SUBMIT_", "SUBMIT_REDIS_HOST").as_deref(),
            Some("redis-host")
        );
        assert_eq!(
            normalize_env_key("APP", "APPMy_Value").as_deref(),
            Some("my-value")
        );
    }

    #[test]
    fn prefix_match_is_case_sensitive() {
        assert_eq!(normalize_env_key("SUBMIT_", "submit_redis_host"), None);
        assert_eq!(normalize_env_key("SUBMIT_", "OTHER_REDIS_HOST"), None);
    }

    #[test]
    fn empty_prefix_disables_overlay() {
        assert_eq!(normalize_env_key("", "MY_STRING"), None);
        let env = Env::from_pairs([("MY_STRING", "x")]);
        assert!(environment_entries("", &env).is_empty());
    }

    #[test]
    fn bare_prefix_maps_to_empty_name() {
        assert_eq!(normalize_env_key("APP_", "APP_").as_deref(), Some(""));
    }

    #[test]
    fn entries_keep_only_prefixed_variables() {
        let env = Env::from_pairs([
            ("PREFIX_MY_STRING", "override"),
            ("HOME", "/root"),
            ("PREFIX_CITIES", "c, d"),
        ]);
        let entries = environment_entries("PREFIX_", &env);
        assert_eq!(
            entries,
            vec![
                FlatEntry {
                    key: "my-string".into(),
                    value: "override".into()
                },
                FlatEntry {
                    key: "cities".into(),
                    value: "c, d".into()
                },
            ]
        );
    }
}
