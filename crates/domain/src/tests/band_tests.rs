// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use std::str::FromStr;

use crate::{Band, BandId, BandMember, BandRole, DomainError, Permission};

#[test]
fn test_leader_holds_every_permission() {
    let leader: BandMember = BandMember::new("alice", BandRole::Leader, []);

    assert!(leader.has_permission(Permission::CreateSetlists));
    assert!(leader.has_permission(Permission::EditSetlists));
    assert!(leader.has_permission(Permission::DeleteSetlists));
    assert!(leader.has_permission(Permission::ManageMembers));
}

#[test]
fn test_member_holds_only_granted_permissions() {
    let member: BandMember = BandMember::new("bob", BandRole::Member, [Permission::EditSetlists]);

    assert!(member.has_permission(Permission::EditSetlists));
    assert!(!member.has_permission(Permission::CreateSetlists));
    assert!(!member.has_permission(Permission::ManageMembers));
}

#[test]
fn test_band_member_lookup_and_upsert() {
    let mut band: Band = Band::new(BandId::new("band-1"), "The Regulars");
    band.upsert_member(BandMember::new("bob", BandRole::Member, []));

    assert!(band.member("carol").is_none());
    assert!(
        !band
            .member("bob")
            .unwrap()
            .has_permission(Permission::EditSetlists)
    );

    band.upsert_member(BandMember::new(
        "bob",
        BandRole::Member,
        [Permission::EditSetlists],
    ));

    assert_eq!(band.members.len(), 1);
    assert!(
        band.member("bob")
            .unwrap()
            .has_permission(Permission::EditSetlists)
    );
}

#[test]
fn test_permission_strings() {
    for permission in [
        Permission::CreateSetlists,
        Permission::EditSetlists,
        Permission::DeleteSetlists,
        Permission::ManageMembers,
    ] {
        assert_eq!(Permission::from_str(permission.as_str()), Ok(permission));
    }
    assert_eq!(Permission::EditSetlists.to_string(), "edit_setlists");
    assert_eq!(
        Permission::from_str("admin"),
        Err(DomainError::InvalidPermission(String::from("admin")))
    );
}

#[test]
fn test_band_role_strings() {
    assert_eq!(BandRole::from_str("leader"), Ok(BandRole::Leader));
    assert_eq!(BandRole::from_str("member"), Ok(BandRole::Member));
    assert!(matches!(
        BandRole::from_str("roadie"),
        Err(DomainError::InvalidBandRole(_))
    ));
}
