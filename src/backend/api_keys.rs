use crate::api::{ApiKey, ApiKeys, Source};

pub const OPENAI_API_KEY_VAR: &str = "OPENAI_API_KEY";

/// Collect API keys from the process environment
pub fn setup_api_keys() -> ApiKeys {
    api_keys_from(|name| std::env::var(name).ok())
}

/// Collect API keys using `lookup` to read environment variables
pub fn api_keys_from(lookup: impl Fn(&str) -> Option<String>) -> ApiKeys {
    ApiKeys {
        openai: lookup(OPENAI_API_KEY_VAR).map(|value| ApiKey {
            value,
            source: Source::Environment,
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_empty_api_keys() {
        let api_keys = api_keys_from(|_| None);
        assert!(api_keys.openai.is_none());
    }

    #[test]
    fn test_get_present_api_keys() {
        let api_keys = api_keys_from(|name| (name == OPENAI_API_KEY_VAR).then(|| "dummy".to_string()));
        assert_eq!(
            api_keys.openai,
            Some(ApiKey {
                value: "dummy".to_string(),
                source: Source::Environment,
            })
        );
    }
}
