//! Framework tags and project auto-detection.
//!
//! A framework tag selects which additional pattern rules apply during
//! extraction and which snippet is preferred in suggestions. The set is closed:
//! unknown tags fail to parse (`FromStr`) so a typo in configuration is an
//! error, while the catalog contract maps unknown tags to `Generic`.

use std::{fmt, fs, path::Path, str::FromStr};

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Supported UI and templating ecosystems.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Framework {
    /// Base rules only.
    Generic,
    React,
    #[serde(rename = "nextjs")]
    NextJs,
    Vue,
    Angular,
    Svelte,
    Django,
    Flask,
    Rails,
}

impl Framework {
    /// All tags in catalog order.
    pub const ALL: [Framework; 9] = [
        Framework::Generic,
        Framework::React,
        Framework::NextJs,
        Framework::Vue,
        Framework::Angular,
        Framework::Svelte,
        Framework::Django,
        Framework::Flask,
        Framework::Rails,
    ];

    pub fn tag(self) -> &'static str {
        match self {
            Framework::Generic => "generic",
            Framework::React => "react",
            Framework::NextJs => "nextjs",
            Framework::Vue => "vue",
            Framework::Angular => "angular",
            Framework::Svelte => "svelte",
            Framework::Django => "django",
            Framework::Flask => "flask",
            Framework::Rails => "rails",
        }
    }

    /// Resolve a tag, treating anything unknown as `Generic`.
    pub fn from_tag_lossy(tag: &str) -> Self {
        tag.parse().unwrap_or(Framework::Generic)
    }

    /// Server-side templating ecosystems.
    pub fn is_server_side(self) -> bool {
        matches!(self, Framework::Django | Framework::Flask | Framework::Rails)
    }
}

impl fmt::Display for Framework {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown framework '{0}' (expected auto, {tags})", tags = supported_tags())]
pub struct UnknownFramework(pub String);

fn supported_tags() -> String {
    Framework::ALL
        .iter()
        .map(|f| f.tag())
        .collect::<Vec<_>>()
        .join(", ")
}

impl FromStr for Framework {
    type Err = UnknownFramework;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "generic" => Ok(Framework::Generic),
            "react" => Ok(Framework::React),
            "nextjs" | "next" | "next.js" => Ok(Framework::NextJs),
            "vue" | "nuxt" => Ok(Framework::Vue),
            "angular" => Ok(Framework::Angular),
            "svelte" | "sveltekit" => Ok(Framework::Svelte),
            "django" => Ok(Framework::Django),
            "flask" | "jinja" | "jinja2" => Ok(Framework::Flask),
            "rails" | "erb" => Ok(Framework::Rails),
            _ => Err(UnknownFramework(s.to_string())),
        }
    }
}

/// Framework selection as written in configuration: `auto` or a fixed tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum FrameworkSetting {
    #[default]
    Auto,
    Fixed(Framework),
}

impl FrameworkSetting {
    /// Resolve `auto` by inspecting project marker files under `root`.
    pub fn resolve(self, root: &Path) -> Framework {
        match self {
            FrameworkSetting::Auto => detect_framework(root),
            FrameworkSetting::Fixed(framework) => framework,
        }
    }
}

impl FromStr for FrameworkSetting {
    type Err = UnknownFramework;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.trim().eq_ignore_ascii_case("auto") {
            Ok(FrameworkSetting::Auto)
        } else {
            s.parse().map(FrameworkSetting::Fixed)
        }
    }
}

impl TryFrom<String> for FrameworkSetting {
    type Error = UnknownFramework;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<FrameworkSetting> for String {
    fn from(value: FrameworkSetting) -> Self {
        value.to_string()
    }
}

impl fmt::Display for FrameworkSetting {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FrameworkSetting::Auto => f.write_str("auto"),
            FrameworkSetting::Fixed(framework) => framework.fmt(f),
        }
    }
}

/// Guess the project's framework from marker files in `root`.
///
/// JavaScript projects are identified by `package.json` dependencies (Next.js
/// wins over React since every Next.js app depends on both). Python projects
/// by `manage.py` or requirement listings, Ruby projects by the `Gemfile`.
/// Falls back to `Generic`.
pub fn detect_framework(root: &Path) -> Framework {
    if let Some(framework) = detect_from_package_json(&root.join("package.json")) {
        return framework;
    }

    if root.join("manage.py").is_file() || file_mentions(root, &PYTHON_MANIFESTS, "django") {
        return Framework::Django;
    }

    if file_mentions(root, &PYTHON_MANIFESTS, "flask") || file_mentions(root, &["app.py"], "flask")
    {
        return Framework::Flask;
    }

    if file_mentions(root, &["Gemfile"], "rails") || root.join("config/routes.rb").is_file() {
        return Framework::Rails;
    }

    Framework::Generic
}

const PYTHON_MANIFESTS: [&str; 3] = ["requirements.txt", "pyproject.toml", "Pipfile"];

fn file_mentions(root: &Path, names: &[&str], needle: &str) -> bool {
    names.iter().any(|name| {
        fs::read_to_string(root.join(name))
            .map(|content| content.to_ascii_lowercase().contains(needle))
            .unwrap_or(false)
    })
}

fn detect_from_package_json(path: &Path) -> Option<Framework> {
    let content = fs::read_to_string(path).ok()?;
    let manifest: Value = serde_json::from_str(&content).ok()?;

    let has_dep = |name: &str| {
        ["dependencies", "devDependencies", "peerDependencies"]
            .iter()
            .any(|section| manifest.get(section).and_then(|deps| deps.get(name)).is_some())
    };

    // Order matters: meta-frameworks before the libraries they build on.
    let checks: [(&str, Framework); 7] = [
        ("next", Framework::NextJs),
        ("nuxt", Framework::Vue),
        ("@angular/core", Framework::Angular),
        ("@sveltejs/kit", Framework::Svelte),
        ("svelte", Framework::Svelte),
        ("vue", Framework::Vue),
        ("react", Framework::React),
    ];

    checks
        .iter()
        .find(|(dep, _)| has_dep(dep))
        .map(|(_, framework)| *framework)
        .or(Some(Framework::Generic))
}
