//! Assemble the effective configuration from what the page provides.
//!
//! Sources, lowest precedence first: built-in defaults, an optional JSON
//! document (a `<script type="application/json">` block), then `data-*`
//! attributes on `<body>`.

use blog_frontend_core::{FrontendConfig, FrontendResult};

/// Id of the optional JSON configuration block.
pub const CONFIG_SCRIPT_ID: &str = "blog-frontend-config";

pub fn assemble<'a, I>(json: Option<&str>, attributes: I) -> FrontendResult<FrontendConfig>
where
    I: IntoIterator<Item = (&'a str, &'a str)>,
{
    let mut config = match json.map(str::trim).filter(|s| !s.is_empty()) {
        Some(doc) => FrontendConfig::from_json(doc)?,
        None => FrontendConfig::default(),
    };
    config.apply_attributes(
        attributes
            .into_iter()
            .filter(|(name, _)| name.starts_with("data-")),
    );
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_sources_gives_defaults() {
        let config = assemble(None, std::iter::empty()).unwrap();
        assert_eq!(config, FrontendConfig::default());
        let config = assemble(Some("  \n"), std::iter::empty()).unwrap();
        assert_eq!(config, FrontendConfig::default());
    }

    #[test]
    fn attributes_override_json() {
        let config = assemble(
            Some(r#"{"csrf_token": "from-json", "debug": false}"#),
            [("data-csrf-token", "from-attr"), ("data-debug", "")],
        )
        .unwrap();
        assert_eq!(config.csrf_token.as_deref(), Some("from-attr"));
        assert!(config.debug);
    }

    #[test]
    fn non_data_attributes_are_ignored() {
        let config = assemble(None, [("class", "x"), ("debug", "true")]).unwrap();
        assert!(!config.debug);
    }

    #[test]
    fn bad_json_is_reported() {
        let err = assemble(Some("{"), std::iter::empty()).unwrap_err();
        assert_eq!(err.error_type(), "CONFIG_ERROR");
    }
}
