//! Language detection and enumeration.

use std::path::Path;

use serde::{Deserialize, Serialize};

/// Supported programming languages.
///
/// The set is limited to languages whose surface syntax carries every
/// construct the cognitive metric dispatches on (switch sections, do-while,
/// ternaries, parameterized catch clauses, lambdas).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    CSharp,
    Java,
    TypeScript,
    JavaScript,
    Tsx,
    Jsx,
}

impl Language {
    /// Detect language from file path based on extension.
    pub fn detect(path: &Path) -> Option<Self> {
        let extension = path.extension()?.to_str()?;
        Self::from_extension(extension)
    }

    /// Get language from file extension.
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_lowercase().as_str() {
            "cs" => Some(Self::CSharp),
            "java" => Some(Self::Java),
            "ts" | "mts" | "cts" => Some(Self::TypeScript),
            "js" | "mjs" | "cjs" => Some(Self::JavaScript),
            "tsx" => Some(Self::Tsx),
            "jsx" => Some(Self::Jsx),
            _ => None,
        }
    }

    /// Get the display name for the language.
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::CSharp => "C#",
            Self::Java => "Java",
            Self::TypeScript => "TypeScript",
            Self::JavaScript => "JavaScript",
            Self::Tsx => "TSX",
            Self::Jsx => "JSX",
        }
    }
}

impl std::fmt::Display for Language {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}
