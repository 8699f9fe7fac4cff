//! Structural preference enums for generation requests.

use serde::{Deserialize, Serialize};

/// Target UI framework for generated components.
///
/// # Examples
///
/// ```
/// use atelier_core::Framework;
///
/// let framework: Framework = serde_json::from_str("\"react\"").unwrap();
/// assert_eq!(framework, Framework::React);
/// assert_eq!(framework.as_str(), "react");
/// ```
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    strum::EnumIter,
)]
#[serde(rename_all = "lowercase")]
pub enum Framework {
    /// React (JSX/TSX components)
    React,
    /// Vue single-file components
    Vue,
    /// Angular components
    Angular,
    /// Svelte components
    Svelte,
}

impl Framework {
    /// Canonical lowercase identifier, matching the wire format.
    pub fn as_str(&self) -> &'static str {
        match self {
            Framework::React => "react",
            Framework::Vue => "vue",
            Framework::Angular => "angular",
            Framework::Svelte => "svelte",
        }
    }

    /// Parse the stored representation back into a framework.
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "react" => Some(Framework::React),
            "vue" => Some(Framework::Vue),
            "angular" => Some(Framework::Angular),
            "svelte" => Some(Framework::Svelte),
            _ => None,
        }
    }
}

/// Component library preference for generated code.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    strum::EnumIter,
    Default,
)]
#[serde(rename_all = "lowercase")]
pub enum ComponentLibrary {
    /// No component library; plain markup and utility classes
    #[default]
    None,
    /// Tailwind CSS utility classes
    Tailwind,
    /// Material UI (React)
    Mui,
    /// Chakra UI (React)
    Chakra,
    /// shadcn/ui component collection
    Shadcn,
}

impl ComponentLibrary {
    /// Canonical lowercase identifier, matching the wire format.
    pub fn as_str(&self) -> &'static str {
        match self {
            ComponentLibrary::None => "none",
            ComponentLibrary::Tailwind => "tailwind",
            ComponentLibrary::Mui => "mui",
            ComponentLibrary::Chakra => "chakra",
            ComponentLibrary::Shadcn => "shadcn",
        }
    }
}

/// Visual style preference for generated components.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    strum::EnumIter,
    Default,
)]
#[serde(rename_all = "lowercase")]
pub enum VisualStyle {
    /// Contemporary look: generous spacing, soft shadows, rounded corners
    #[default]
    Modern,
    /// Sparse, typography-led, minimal chrome
    Minimal,
    /// Bold colors and motion
    Playful,
    /// Conservative, dense, enterprise-friendly
    Corporate,
}

impl VisualStyle {
    /// Canonical lowercase identifier, matching the wire format.
    pub fn as_str(&self) -> &'static str {
        match self {
            VisualStyle::Modern => "modern",
            VisualStyle::Minimal => "minimal",
            VisualStyle::Playful => "playful",
            VisualStyle::Corporate => "corporate",
        }
    }
}
