use anyhow::{Context, Result};
use tracing::{debug, warn};

/// Connection settings for the managed store, passed explicitly to
/// [`SupabaseStore::new`](super::SupabaseStore::new) instead of being read
/// from globals at call sites.
#[derive(Debug, Clone)]
pub struct StoreConfig {
    /// Project base URL, e.g. `https://abcdefgh.supabase.co`.
    pub base_url: String,
    /// The project's anon key, sent as both `apikey` and bearer token.
    pub api_key: String,
}

impl StoreConfig {
    /// Builds a config, validating the URL up front so a typo fails at
    /// startup rather than on the first fetch.
    pub fn new(base_url: &str, api_key: &str) -> Result<Self> {
        let url: reqwest::Url = base_url
            .parse()
            .with_context(|| format!("invalid store URL '{base_url}'"))?;

        if api_key.is_empty() {
            anyhow::bail!("store API key is empty");
        }

        // Anon keys are JWTs; anything else usually means the wrong value
        // was pasted into the environment.
        if api_key.split('.').count() != 3 {
            warn!("store API key does not look like a JWT");
        }

        if let Some(project_ref) = url
            .host_str()
            .and_then(|h| h.strip_suffix(".supabase.co"))
        {
            debug!(project_ref, "Store project resolved");
        }

        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: api_key.to_string(),
        })
    }

    /// Loads the config from `SUPABASE_URL` and `SUPABASE_ANON_KEY`.
    pub fn from_env() -> Result<Self> {
        let base_url = std::env::var("SUPABASE_URL").context("SUPABASE_URL must be set")?;
        let api_key =
            std::env::var("SUPABASE_ANON_KEY").context("SUPABASE_ANON_KEY must be set")?;

        Self::new(&base_url, &api_key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_trims_trailing_slash() {
        let config = StoreConfig::new("https://abc.supabase.co/", "a.b.c").unwrap();
        assert_eq!(config.base_url, "https://abc.supabase.co");
    }

    #[test]
    fn test_new_rejects_invalid_url() {
        assert!(StoreConfig::new("not a url", "a.b.c").is_err());
    }

    #[test]
    fn test_new_rejects_empty_key() {
        assert!(StoreConfig::new("https://abc.supabase.co", "").is_err());
    }
}
