use serde::{Deserialize, Serialize};

use crate::error::{TypeError, TypeResult};
use crate::record::{Fields, Record};

pub const MIN_LEVEL: u8 = 0;
pub const MAX_LEVEL: u8 = 60;
/// Level assigned when a create request omits it.
pub const DEFAULT_LEVEL: u8 = 50;

/// A leftover-food record as served by the API.
pub type LeftoverFood = Record<Leftover>;

/// Round any JSON number to the nearest whole level in
/// `[MIN_LEVEL, MAX_LEVEL]`. `NaN` reads as empty.
pub fn clamp_level(level: f64) -> u8 {
    if level.is_nan() {
        return MIN_LEVEL;
    }
    level.round().clamp(MIN_LEVEL as f64, MAX_LEVEL as f64) as u8
}

/// Leftover food kept in the fridge, with a rough fill level.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Leftover {
    pub name: String,
    pub level: u8,
    pub description: String,
}

impl Leftover {
    pub fn tier(&self) -> LevelTier {
        LevelTier::of(self.level)
    }
}

/// Create payload. `name` is required; everything else has a default.
///
/// Levels are carried as `f64` so that any JSON number (`50`, `50.5`,
/// `1e3`, or an integer past `i64::MAX`) reaches [`clamp_level`] instead of
/// failing to parse.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct NewLeftover {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub level: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl NewLeftover {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            level: None,
            description: None,
        }
    }

    pub fn with_level(mut self, level: impl Into<f64>) -> Self {
        self.level = Some(level.into());
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

/// Create payload as it arrives over the wire, before validation.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct LeftoverInput {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub level: Option<f64>,
    #[serde(default)]
    pub description: Option<String>,
}

impl TryFrom<LeftoverInput> for NewLeftover {
    type Error = TypeError;

    fn try_from(input: LeftoverInput) -> TypeResult<Self> {
        let name = input
            .name
            .filter(|n| !n.is_empty())
            .ok_or(TypeError::MissingField { field: "name" })?;
        Ok(Self {
            name,
            level: input.level,
            description: input.description,
        })
    }
}

/// Partial update. An empty `name` is treated as absent.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct LeftoverPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub level: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl LeftoverPatch {
    pub fn level(level: impl Into<f64>) -> Self {
        Self {
            level: Some(level.into()),
            ..Self::default()
        }
    }
}

impl Fields for Leftover {
    const NAMESPACE: &'static str = "leftover";

    type Draft = NewLeftover;
    type Patch = LeftoverPatch;

    fn from_draft(draft: NewLeftover) -> Self {
        Self {
            name: draft.name,
            level: draft.level.map(clamp_level).unwrap_or(DEFAULT_LEVEL),
            description: draft.description.unwrap_or_default(),
        }
    }

    fn merge(&mut self, patch: &LeftoverPatch) {
        if let Some(name) = patch.name.as_ref().filter(|n| !n.is_empty()) {
            self.name = name.clone();
        }
        if let Some(level) = patch.level {
            self.level = clamp_level(level);
        }
        if let Some(description) = &patch.description {
            self.description = description.clone();
        }
    }
}

/// Coarse reading of a fill level.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LevelTier {
    Low,
    Little,
    Normal,
    Plenty,
}

impl LevelTier {
    pub fn of(level: u8) -> Self {
        match level {
            0..=20 => Self::Low,
            21..=40 => Self::Little,
            41..=60 => Self::Normal,
            _ => Self::Plenty,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Little => "a little",
            Self::Normal => "normal",
            Self::Plenty => "plenty",
        }
    }
}

/// Per-tier counts over a leftover list.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct LeftoverSummary {
    pub low: usize,
    pub little: usize,
    pub normal: usize,
    pub plenty: usize,
}

impl LeftoverSummary {
    pub fn of(foods: &[LeftoverFood]) -> Self {
        foods.iter().fold(Self::default(), |mut acc, food| {
            match food.fields.tier() {
                LevelTier::Low => acc.low += 1,
                LevelTier::Little => acc.little += 1,
                LevelTier::Normal => acc.normal += 1,
                LevelTier::Plenty => acc.plenty += 1,
            }
            acc
        })
    }

    pub fn total(&self) -> usize {
        self.low + self.little + self.normal + self.plenty
    }
}
