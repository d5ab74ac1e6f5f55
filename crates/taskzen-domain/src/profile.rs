use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use taskzen_core::{TaskzenError, TaskzenResult};

pub type ProfileId = Uuid;

/// A named board owner. The slug is the profile's stable storage key and
/// never changes after creation, even across renames.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Profile {
    pub id: ProfileId,
    pub name: String,
    pub slug: String,
    pub last_accessed: DateTime<Utc>,
}

impl Profile {
    fn new(name: String, slug: String) -> Self {
        Self {
            id: Uuid::new_v4(),
            name,
            slug,
            last_accessed: Utc::now(),
        }
    }
}

/// The set of known profiles and which one is active. Always holds at least
/// one profile once `ensure_default` has run.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProfileRegistry {
    #[serde(default)]
    profiles: Vec<Profile>,
    #[serde(default)]
    active: Option<ProfileId>,
}

impl ProfileRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Guarantee a usable registry: at least one profile, and an active id
    /// that points at one of them.
    pub fn ensure_default(&mut self) {
        if self.profiles.is_empty() {
            let profile = Profile::new("default".to_string(), "default".to_string());
            self.active = Some(profile.id);
            self.profiles.push(profile);
        } else if self
            .active
            .map_or(true, |id| !self.profiles.iter().any(|p| p.id == id))
        {
            self.active = Some(self.profiles[0].id);
        }
    }

    pub fn profiles(&self) -> &[Profile] {
        &self.profiles
    }

    pub fn get(&self, id: ProfileId) -> Option<&Profile> {
        self.profiles.iter().find(|p| p.id == id)
    }

    pub fn active(&self) -> Option<&Profile> {
        self.active.and_then(|id| self.get(id))
    }

    pub fn create(&mut self, name: &str) -> TaskzenResult<ProfileId> {
        let name = name.trim();
        if name.is_empty() {
            return Err(TaskzenError::Validation(
                "profile name must not be empty".to_string(),
            ));
        }
        let slug = self.unique_slug(name);
        let profile = Profile::new(name.to_string(), slug);
        let id = profile.id;
        self.profiles.push(profile);
        Ok(id)
    }

    pub fn switch(&mut self, id: ProfileId) -> TaskzenResult<&Profile> {
        let profile = self
            .profiles
            .iter_mut()
            .find(|p| p.id == id)
            .ok_or_else(|| TaskzenError::NotFound(format!("Profile {}", id)))?;
        profile.last_accessed = Utc::now();
        self.active = Some(id);
        Ok(profile)
    }

    /// Rename changes the display name only; the slug keeps pointing at the
    /// same storage slot.
    pub fn rename(&mut self, id: ProfileId, new_name: &str) -> TaskzenResult<()> {
        let new_name = new_name.trim();
        if new_name.is_empty() {
            return Err(TaskzenError::Validation(
                "profile name must not be empty".to_string(),
            ));
        }
        let profile = self
            .profiles
            .iter_mut()
            .find(|p| p.id == id)
            .ok_or_else(|| TaskzenError::NotFound(format!("Profile {}", id)))?;
        profile.name = new_name.to_string();
        Ok(())
    }

    /// Remove a profile and return it so the caller can drop its board file.
    /// The last profile cannot be deleted; deleting the active one activates
    /// the most recently accessed survivor.
    pub fn delete(&mut self, id: ProfileId) -> TaskzenResult<Profile> {
        let index = self
            .profiles
            .iter()
            .position(|p| p.id == id)
            .ok_or_else(|| TaskzenError::NotFound(format!("Profile {}", id)))?;
        if self.profiles.len() == 1 {
            return Err(TaskzenError::Validation(
                "cannot delete the last profile".to_string(),
            ));
        }

        let removed = self.profiles.remove(index);

        if self.active == Some(id) {
            self.active = self
                .profiles
                .iter()
                .max_by_key(|p| p.last_accessed)
                .map(|p| p.id);
        }
        Ok(removed)
    }

    fn unique_slug(&self, name: &str) -> String {
        let base = slugify(name);
        let base = if base.is_empty() {
            "profile".to_string()
        } else {
            base
        };
        if !self.slug_taken(&base) {
            return base;
        }
        let mut n = 2;
        loop {
            let candidate = format!("{}-{}", base, n);
            if !self.slug_taken(&candidate) {
                return candidate;
            }
            n += 1;
        }
    }

    fn slug_taken(&self, slug: &str) -> bool {
        self.profiles.iter().any(|p| p.slug == slug)
    }
}

fn slugify(s: &str) -> String {
    s.chars()
        .map(|c| {
            if c.is_alphanumeric() {
                c.to_ascii_lowercase()
            } else {
                '-'
            }
        })
        .collect::<String>()
        .split('-')
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join("-")
}
