//! The three kinds of design artifact and their conventions

use std::fmt;
use std::str::FromStr;

use dsync_blocks::Flavor;
use dsync_fs::FileNaming;
use serde::{Deserialize, Serialize};

use crate::Error;
use crate::merge::MergeOptions;

/// Extensions a component file may carry.
pub const SOURCE_EXTENSIONS: &[&str] = &["ts", "js"];

/// A kind of definition synchronized from the design service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ArtifactKind {
    Style,
    Theme,
    Config,
}

impl ArtifactKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Style => "style",
            Self::Theme => "theme",
            Self::Config => "config",
        }
    }

    /// Capitalized name used in user-facing messages.
    pub fn title(self) -> &'static str {
        match self {
            Self::Style => "Style",
            Self::Theme => "Theme",
            Self::Config => "Config",
        }
    }

    /// File name tag: `card.sf.ts`, `main.sft.ts`, `menu.sfc.ts`.
    pub fn tag(self) -> &'static str {
        match self {
            Self::Style => "sf",
            Self::Theme => "sft",
            Self::Config => "sfc",
        }
    }

    pub fn naming(self) -> FileNaming {
        FileNaming::new(self.tag(), SOURCE_EXTENSIONS)
    }

    /// Path segment of the service resource holding this kind.
    pub fn resource(self) -> &'static str {
        match self {
            Self::Style => "ast",
            Self::Theme => "theme",
            Self::Config => "config",
        }
    }

    /// Only config deletions travel as `null`; style and theme keep them.
    pub fn merge_options(self) -> MergeOptions {
        MergeOptions {
            delete_null_props: self == Self::Config,
        }
    }

    /// Template flavor for this kind in the given framework.
    pub fn flavor(self, framework: Framework) -> Flavor {
        match (self, framework) {
            (Self::Style, _) => Flavor::Style,
            (Self::Theme, _) => Flavor::Theme,
            (Self::Config, Framework::Javascript) => Flavor::Config,
            (Self::Config, Framework::Svelte) => Flavor::SvelteConfig,
        }
    }

    /// Factory function whose call embeds the definition.
    pub fn factory(self) -> &'static str {
        self.flavor(Framework::default()).factory()
    }
}

impl fmt::Display for ArtifactKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Frontend framework the generated config files target.
///
/// Config files name it the same way [`FromStr`] does, so `js` and
/// `Svelte` are accepted there too.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", try_from = "String")]
pub enum Framework {
    #[default]
    Javascript,
    Svelte,
}

impl FromStr for Framework {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "javascript" | "js" => Ok(Self::Javascript),
            "svelte" => Ok(Self::Svelte),
            _ => Err(Error::UnknownFramework {
                name: s.to_string(),
            }),
        }
    }
}

impl TryFrom<String> for Framework {
    type Error = Error;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(ArtifactKind::Style, "card.sf.ts", Some("card"))]
    #[case(ArtifactKind::Theme, "main.sft.js", Some("main"))]
    #[case(ArtifactKind::Config, "menu.sfc.ts", Some("menu"))]
    #[case(ArtifactKind::Style, "menu.sfc.ts", None)]
    #[case(ArtifactKind::Config, "menu.sfc.tsx", None)]
    fn test_naming(#[case] kind: ArtifactKind, #[case] file: &str, #[case] key: Option<&str>) {
        assert_eq!(kind.naming().key_for(file).as_deref(), key);
    }

    #[test]
    fn test_only_config_deletes_nulls() {
        assert!(ArtifactKind::Config.merge_options().delete_null_props);
        assert!(!ArtifactKind::Style.merge_options().delete_null_props);
        assert!(!ArtifactKind::Theme.merge_options().delete_null_props);
    }

    #[test]
    fn test_config_flavor_follows_framework() {
        assert_eq!(
            ArtifactKind::Config.flavor(Framework::Svelte),
            Flavor::SvelteConfig
        );
        assert_eq!(
            ArtifactKind::Style.flavor(Framework::Svelte),
            Flavor::Style
        );
        assert_eq!(ArtifactKind::Config.factory(), "createConfig");
    }

    #[test]
    fn test_framework_parse() {
        assert_eq!("Svelte".parse::<Framework>().unwrap(), Framework::Svelte);
        assert_eq!("js".parse::<Framework>().unwrap(), Framework::Javascript);
        assert!("react".parse::<Framework>().is_err());
    }
}
