use std::sync::LazyLock;

pub static SITE_CONFIG: LazyLock<SiteConfig> = LazyLock::new(SiteConfig::from_env);

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MailingListConfig {
    pub url: String,
    pub anon_key: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SiteConfig {
    /// `None` hides the signup widget.
    pub mailing_list: Option<MailingListConfig>,
}

impl SiteConfig {
    pub fn from_env() -> Self {
        let config = Self::from_vars(|key| std::env::var(key).ok());
        if config.mailing_list.is_none() {
            tracing::info!("SUPABASE_URL or SUPABASE_ANON_KEY unset, mailing list disabled");
        }
        config
    }

    /// Builds the config from a variable lookup. Blank values count as unset.
    pub fn from_vars(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let var = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };
        let mailing_list = match (var("SUPABASE_URL"), var("SUPABASE_ANON_KEY")) {
            (Some(url), Some(anon_key)) => Some(MailingListConfig {
                url: url.trim_end_matches('/').to_string(),
                anon_key,
            }),
            _ => None,
        };
        Self { mailing_list }
    }
}
