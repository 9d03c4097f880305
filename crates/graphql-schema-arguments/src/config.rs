use crate::ConfigError;

/// Settings for building arguments, usually read from a `[schema]`-like TOML table.
#[derive(Debug, Default, serde::Deserialize, Clone, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct BuilderConfig {
    pub type_resolution: TypeResolutionConfig,
    pub directives: DirectivesConfig,
}

impl BuilderConfig {
    pub fn from_toml_str(input: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(input)?)
    }
}

#[derive(Debug, Default, serde::Deserialize, Clone, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct TypeResolutionConfig {
    /// How many list and non-null wrappers a single type reference may have. Unlimited when unset.
    pub max_wrapping_depth: Option<usize>,
}

#[derive(Debug, serde::Deserialize, Clone, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct DirectivesConfig {
    /// Skip directives without a registered middleware instead of failing.
    pub ignore_unknown: bool,
}

impl Default for DirectivesConfig {
    fn default() -> Self {
        Self { ignore_unknown: true }
    }
}

#[cfg(test)]
mod tests {
    use indoc::indoc;
    use insta::assert_debug_snapshot;

    use super::*;

    #[test]
    fn empty_config_uses_defaults() {
        let config = BuilderConfig::from_toml_str("").unwrap();

        assert_eq!(config, BuilderConfig::default());
        assert_eq!(config.type_resolution.max_wrapping_depth, None);
        assert!(config.directives.ignore_unknown);
    }

    #[test]
    fn partial_config() {
        let config = BuilderConfig::from_toml_str(indoc! {r#"
            [directives]
            ignore_unknown = false
        "#})
        .unwrap();

        assert_debug_snapshot!(config, @r###"
        BuilderConfig {
            type_resolution: TypeResolutionConfig {
                max_wrapping_depth: None,
            },
            directives: DirectivesConfig {
                ignore_unknown: false,
            },
        }
        "###);
    }

    #[test]
    fn wrapping_depth_limit() {
        let config = BuilderConfig::from_toml_str(indoc! {r#"
            [type_resolution]
            max_wrapping_depth = 8
        "#})
        .unwrap();

        assert_eq!(config.type_resolution.max_wrapping_depth, Some(8));
        assert!(config.directives.ignore_unknown);
    }

    #[test]
    fn unknown_fields_are_rejected() {
        let error = BuilderConfig::from_toml_str(indoc! {r#"
            [type_resolution]
            max_depth = 4
        "#})
        .unwrap_err();

        assert!(error.to_string().contains("unknown field `max_depth`"), "{error}");
    }
}
