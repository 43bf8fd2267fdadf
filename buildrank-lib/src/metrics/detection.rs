use serde::{Deserialize, Serialize};

/// Markers used to classify parameters.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct Detection {
    /// A parameter whose name starts with one of these is a secret
    pub secure_name_prefixes: Vec<String>,

    /// A parameter whose value starts with one of these is a secret
    pub obfuscated_value_prefixes: Vec<String>,

    /// Case-insensitive substrings that mark a parameter value as an external integration
    pub integration_keywords: Vec<String>,

    /// Step parameter carrying the container image a step runs in
    pub docker_image_param: String,
}

impl Detection {
    #[must_use]
    pub fn is_secret(&self, name: &str, value: &str) -> bool {
        self.secure_name_prefixes.iter().any(|p| name.starts_with(p.as_str()))
            || self.obfuscated_value_prefixes.iter().any(|p| value.starts_with(p.as_str()))
    }

    /// Whether an already lower-cased value mentions any integration keyword.
    #[must_use]
    pub fn is_integration(&self, lowered_value: &str) -> bool {
        self.integration_keywords
            .iter()
            .any(|k| !k.is_empty() && lowered_value.contains(k.to_lowercase().as_str()))
    }
}

impl Default for Detection {
    fn default() -> Self {
        Self {
            secure_name_prefixes: vec!["secure:".into()],
            obfuscated_value_prefixes: vec!["zxx".into()],
            integration_keywords: ["datadog", "aws", "gcp", "azure", "vault"].into_iter().map(Into::into).collect(),
            docker_image_param: "plugin.docker.imageId".into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_secret_by_name_or_value() {
        let detection = Detection::default();
        assert!(detection.is_secret("secure:db.password", "anything"));
        assert!(detection.is_secret("token", "zxx1234abcd"));
        assert!(!detection.is_secret("env.secure", "plain"));
    }

    #[test]
    fn test_integration_keywords_are_case_insensitive() {
        let detection = Detection {
            integration_keywords: vec!["DataDog".into()],
            ..Detection::default()
        };
        assert!(detection.is_integration("https://api.datadoghq.com"));
        assert!(!detection.is_integration("https://example.com"));
    }
}
