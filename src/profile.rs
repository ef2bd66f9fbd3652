use std::path::Path;

use anyhow::Context as _;
use chrono::{DateTime, FixedOffset, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

pub const NAME_MAX_CHARS: usize = 200;
pub const TITLE_MAX_CHARS: usize = 200;

#[derive(Debug, Default, Serialize, Deserialize)]
pub struct ProfileList {
    #[serde(default)]
    pub profiles: Vec<Profile>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Profile {
    pub name: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
}

impl Profile {
    fn created(&self) -> Option<DateTime<FixedOffset>> {
        DateTime::parse_from_rfc3339(self.created_at.as_deref()?).ok()
    }
}

/// Profile fields as submitted, before validation.
#[derive(Debug, Clone, Default)]
pub struct NewProfile {
    pub name: String,
    pub title: String,
    pub description: String,
    pub avatar: Option<String>,
}

impl NewProfile {
    /// Trims every field, checks required fields and lengths, and stamps the
    /// creation time. All field problems are reported together.
    pub fn validate(self, now: DateTime<Utc>) -> anyhow::Result<Profile> {
        let name = self.name.trim().to_string();
        let title = self.title.trim().to_string();
        let description = self.description.trim().to_string();
        let avatar = self
            .avatar
            .map(|a| a.trim().to_string())
            .filter(|a| !a.is_empty());

        let mut problems = Vec::new();
        check_field(&mut problems, "name", &name, Some(NAME_MAX_CHARS));
        check_field(&mut problems, "title", &title, Some(TITLE_MAX_CHARS));
        check_field(&mut problems, "description", &description, None);
        if !problems.is_empty() {
            anyhow::bail!("invalid profile: {}", problems.join("; "));
        }

        Ok(Profile {
            name,
            title,
            description,
            avatar,
            created_at: Some(now.to_rfc3339_opts(SecondsFormat::Micros, true)),
        })
    }
}

fn check_field(problems: &mut Vec<String>, field: &str, value: &str, max_chars: Option<usize>) {
    if value.is_empty() {
        problems.push(format!("{field} is required"));
        return;
    }
    if let Some(max) = max_chars {
        let len = value.chars().count();
        if len > max {
            problems.push(format!("{field} must be at most {max} characters (got {len})"));
        }
    }
}

impl ProfileList {
    pub fn read(path: &Path) -> anyhow::Result<Self> {
        let bytes = std::fs::read(path).with_context(|| format!("read {}", path.display()))?;
        serde_json::from_slice(&bytes).with_context(|| format!("parse {}", path.display()))
    }

    /// Like [`ProfileList::read`], but a missing file is an empty list.
    pub fn read_or_default(path: &Path) -> anyhow::Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        Self::read(path)
    }

    pub fn write(&self, path: &Path) -> anyhow::Result<()> {
        let json = serde_json::to_vec_pretty(self).context("encode profile list")?;
        crate::store::write_atomically(path, &json)
    }

    pub fn contains_name(&self, name: &str) -> bool {
        self.profiles.iter().any(|p| p.name == name)
    }

    pub fn remove_named(&mut self, name: &str) -> usize {
        let before = self.profiles.len();
        self.profiles.retain(|p| p.name != name);
        before - self.profiles.len()
    }

    /// Newest first. Undated profiles go last; ties keep input order.
    pub fn newest_first(&self) -> Vec<&Profile> {
        let mut ordered: Vec<&Profile> = self.profiles.iter().collect();
        ordered.sort_by(|a, b| match (a.created(), b.created()) {
            (Some(a), Some(b)) => b.cmp(&a),
            (Some(_), None) => std::cmp::Ordering::Less,
            (None, Some(_)) => std::cmp::Ordering::Greater,
            (None, None) => std::cmp::Ordering::Equal,
        });
        ordered
    }
}
