//! Rendering component files around a merged definition.
//!
//! Every flavor embeds the definition as the second argument of the factory
//! call recognized by [`crate::anchor::Anchor`], pretty-printed with four
//! space indentation. Rendering and then extracting yields the original
//! definition exactly.

use serde::Serialize;
use serde_json::Value;
use serde_json::ser::{PrettyFormatter, Serializer};

use crate::anchor::Anchor;
use crate::{Error, Result};

/// Package the generated files import their factories from.
pub const DEFAULT_PACKAGE: &str = "@splitflow/designer";

/// Produces the full text of a component file for a merged definition.
pub trait Render: Send + Sync {
    fn render(&self, name: &str, definition: &Value) -> Result<String>;
}

/// Shape of the generated file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flavor {
    /// `createStyle` from `<package>/style`
    Style,
    /// `createTheme` from `<package>/theme`
    Theme,
    /// `createConfig` from `<package>`
    Config,
    /// `createConfig` wrapped for svelte components
    SvelteConfig,
}

impl Flavor {
    /// Factory function the definition is passed to.
    pub fn factory(self) -> &'static str {
        match self {
            Flavor::Style => "createStyle",
            Flavor::Theme => "createTheme",
            Flavor::Config | Flavor::SvelteConfig => "createConfig",
        }
    }
}

/// Built-in [`Render`] implementation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Template {
    flavor: Flavor,
    package: String,
}

impl Template {
    pub fn new(flavor: Flavor) -> Self {
        Self {
            flavor,
            package: DEFAULT_PACKAGE.to_string(),
        }
    }

    /// Import factories from `package` instead of [`DEFAULT_PACKAGE`].
    pub fn with_package(mut self, package: impl Into<String>) -> Self {
        self.package = package.into();
        self
    }

    pub fn flavor(&self) -> Flavor {
        self.flavor
    }

    pub fn package(&self) -> &str {
        &self.package
    }

    /// The anchor able to read back what this template writes.
    pub fn anchor(&self) -> Result<Anchor> {
        Anchor::new(self.flavor.factory())
    }
}

impl Render for Template {
    fn render(&self, name: &str, definition: &Value) -> Result<String> {
        let json = to_pretty_json(definition).map_err(|source| Error::Serialize {
            name: name.to_string(),
            source,
        })?;
        let name = quote_name(name);
        let pkg = &self.package;

        let text = match self.flavor {
            Flavor::Style => format!(
                "\nimport {{ createStyle }} from '{pkg}/style'\n\nexport const style = createStyle({name}, {json})\n"
            ),
            Flavor::Theme => format!(
                "\nimport {{ createTheme }} from '{pkg}/theme'\n\nexport const theme = createTheme({name}, {json})\n"
            ),
            Flavor::Config => format!(
                "\nimport {{ createConfig }} from '{pkg}'\n\nexport const config = createConfig({name}, {json})\n"
            ),
            Flavor::SvelteConfig => format!(
                "\nimport {{ createConfig as _createConfig }} from '{pkg}'\n\
                 import {{ createConfig as __createConfig }} from '{pkg}/svelte'\n\
                 \n\
                 export function createConfig() {{\n    return __createConfig(config)\n}}\n\
                 \n\
                 export const config = _createConfig({name}, {json})\n"
            ),
        };
        Ok(text)
    }
}

/// Serialize with four-space indentation.
pub fn to_pretty_json(value: &Value) -> serde_json::Result<String> {
    let mut buf = Vec::new();
    let mut ser = Serializer::with_formatter(&mut buf, PrettyFormatter::with_indent(b"    "));
    value.serialize(&mut ser)?;
    Ok(String::from_utf8_lossy(&buf).into_owned())
}

fn quote_name(name: &str) -> String {
    let escaped = name.replace('\\', "\\\\").replace('\'', "\\'");
    format!("'{escaped}'")
}
