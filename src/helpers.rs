/// Backend location.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum BaseUrl {
    #[default]
    Localhost,
    Custom(String),
}

impl BaseUrl {
    pub fn get_url(&self) -> String {
        match self {
            BaseUrl::Localhost => crate::consts::LOCAL_API_URL.to_string(),
            BaseUrl::Custom(url) => url.trim_end_matches('/').to_string(),
        }
    }
}

impl From<&str> for BaseUrl {
    fn from(s: &str) -> Self {
        let trimmed = s.trim().trim_end_matches('/');
        if trimmed.is_empty() || trimmed == crate::consts::LOCAL_API_URL {
            BaseUrl::Localhost
        } else {
            BaseUrl::Custom(trimmed.to_string())
        }
    }
}
