use anyhow::{Context, Result};
use async_trait::async_trait;

use crate::fetch::auth::ApiKey;
use crate::fetch::{BasicClient, fetch_json, post_json};
use crate::records::{FeedbackRecord, NewFeedback, Teacher};
use crate::store::{FeedbackStore, StoreConfig};

/// [`FeedbackStore`] backed by a Supabase project's PostgREST endpoint.
///
/// Row visibility and authentication policy live entirely in the project;
/// this client just presents the anon key on every request, once as the
/// `apikey` header and once as a bearer token, the way PostgREST expects.
pub struct SupabaseStore {
    base_url: String,
    client: ApiKey<ApiKey<BasicClient>>,
}

impl SupabaseStore {
    pub fn new(config: StoreConfig) -> Self {
        let client = ApiKey::bearer(
            ApiKey::header(BasicClient::new(), "apikey", config.api_key.clone()),
            config.api_key,
        );

        Self {
            base_url: config.base_url,
            client,
        }
    }

    fn table_url(&self, table: &str, query: &str) -> String {
        format!("{}/rest/v1/{table}?{query}", self.base_url)
    }

    /// Builds the email lookup URL with the address percent-encoded.
    /// Addresses can legally contain `+` and other query metacharacters,
    /// so the value must never be spliced into the query string raw.
    fn teacher_by_email_url(&self, email: &str) -> Result<reqwest::Url> {
        let mut url: reqwest::Url = format!("{}/rest/v1/teachers", self.base_url).parse()?;
        url.query_pairs_mut()
            .append_pair("select", "*")
            .append_pair("email", &format!("eq.{email}"));
        Ok(url)
    }
}

#[async_trait]
impl FeedbackStore for SupabaseStore {
    async fn list_teachers(&self) -> Result<Vec<Teacher>> {
        let url = self.table_url("teachers", "select=*&order=name.asc");
        fetch_json(&self.client, &url)
            .await
            .context("failed to load teachers")
    }

    async fn list_feedback(&self) -> Result<Vec<FeedbackRecord>> {
        let url = self.table_url("feedback", "select=*");
        fetch_json(&self.client, &url)
            .await
            .context("failed to load feedback")
    }

    async fn find_teacher_by_email(&self, email: &str) -> Result<Option<Teacher>> {
        let url = self.teacher_by_email_url(email)?;
        let mut matches: Vec<Teacher> = fetch_json(&self.client, url.as_str())
            .await
            .with_context(|| format!("failed to look up teacher '{email}'"))?;

        Ok(if matches.is_empty() {
            None
        } else {
            Some(matches.swap_remove(0))
        })
    }

    async fn insert_feedback(&self, submission: &NewFeedback) -> Result<()> {
        let url = format!("{}/rest/v1/feedback", self.base_url);
        // PostgREST inserts take an array of rows.
        let rows = [submission];

        post_json(
            &self.client,
            &url,
            &rows,
            &[("Prefer", "return=minimal")],
        )
        .await
        .context("failed to insert feedback")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store() -> SupabaseStore {
        SupabaseStore::new(StoreConfig::new("https://abc.supabase.co", "a.b.c").unwrap())
    }

    #[test]
    fn test_email_lookup_encodes_plus_addressing() {
        let url = store()
            .teacher_by_email_url("jane+phys@school.example")
            .unwrap();

        // A raw '+' would reach PostgREST as a space and miss the row.
        assert_eq!(
            url.query(),
            Some("select=*&email=eq.jane%2Bphys%40school.example")
        );
    }

    #[test]
    fn test_email_lookup_cannot_inject_query_parameters() {
        let url = store()
            .teacher_by_email_url("a&select=secret@x.example")
            .unwrap();

        let pairs: Vec<_> = url.query_pairs().collect();
        assert_eq!(pairs.len(), 2);
        assert_eq!(pairs[1].0, "email");
        assert_eq!(pairs[1].1, "eq.a&select=secret@x.example");
    }
}
