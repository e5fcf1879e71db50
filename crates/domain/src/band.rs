// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Immutable snapshot of band membership, as consulted by access checks.

use crate::error::DomainError;
use crate::types::BandId;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::str::FromStr;

/// A member's role within a band.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BandRole {
    /// Leaders implicitly hold every permission.
    Leader,
    /// Members hold only their explicit permissions.
    Member,
}

impl BandRole {
    /// Converts this role to its string representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Leader => "leader",
            Self::Member => "member",
        }
    }
}

impl FromStr for BandRole {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "leader" => Ok(Self::Leader),
            "member" => Ok(Self::Member),
            _ => Err(DomainError::InvalidBandRole(s.to_string())),
        }
    }
}

/// A band-scoped permission.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Permission {
    /// Create setlists owned by the band.
    CreateSetlists,
    /// Edit set contents and fields of band setlists.
    EditSetlists,
    /// Delete band setlists.
    DeleteSetlists,
    /// Add or remove band members.
    ManageMembers,
}

impl Permission {
    /// Converts this permission to its string representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::CreateSetlists => "create_setlists",
            Self::EditSetlists => "edit_setlists",
            Self::DeleteSetlists => "delete_setlists",
            Self::ManageMembers => "manage_members",
        }
    }
}

impl FromStr for Permission {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "create_setlists" => Ok(Self::CreateSetlists),
            "edit_setlists" => Ok(Self::EditSetlists),
            "delete_setlists" => Ok(Self::DeleteSetlists),
            "manage_members" => Ok(Self::ManageMembers),
            _ => Err(DomainError::InvalidPermission(s.to_string())),
        }
    }
}

impl std::fmt::Display for Permission {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One member of a band.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BandMember {
    /// The member's actor id.
    pub actor_id: String,
    /// The member's role.
    pub role: BandRole,
    /// Explicitly granted permissions.
    pub permissions: BTreeSet<Permission>,
}

impl BandMember {
    /// Creates a new member.
    #[must_use]
    pub fn new(
        actor_id: &str,
        role: BandRole,
        permissions: impl IntoIterator<Item = Permission>,
    ) -> Self {
        Self {
            actor_id: actor_id.to_string(),
            role,
            permissions: permissions.into_iter().collect(),
        }
    }

    /// Whether this member holds `permission`. Leaders hold all.
    #[must_use]
    pub fn has_permission(&self, permission: Permission) -> bool {
        self.role == BandRole::Leader || self.permissions.contains(&permission)
    }
}

/// A band and its membership.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Band {
    /// Band identifier.
    pub id: BandId,
    /// Band name.
    pub name: String,
    /// Members, at most one per actor id.
    pub members: Vec<BandMember>,
}

impl Band {
    /// Creates a band with no members.
    #[must_use]
    pub fn new(id: BandId, name: &str) -> Self {
        Self {
            id,
            name: name.to_string(),
            members: Vec::new(),
        }
    }

    /// Looks up the membership of `actor_id`.
    #[must_use]
    pub fn member(&self, actor_id: &str) -> Option<&BandMember> {
        self.members
            .iter()
            .find(|member| member.actor_id == actor_id)
    }

    /// Adds a member, replacing any existing membership for the same actor.
    pub fn upsert_member(&mut self, member: BandMember) {
        if let Some(existing) = self
            .members
            .iter_mut()
            .find(|existing| existing.actor_id == member.actor_id)
        {
            *existing = member;
        } else {
            self.members.push(member);
        }
    }
}
