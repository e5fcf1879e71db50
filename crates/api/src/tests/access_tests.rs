// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Access control evaluator tests.

use gigbook_domain::{AccessScope, BandMember, BandRole, Permission, Visibility};

use crate::{
    ApiError, AuthError, Intent, authorize, authorize_create, can_access, evaluate,
};

use super::helpers::{
    StaticBandDirectory, UnreachableBandDirectory, band_id, band_scope, band_with, member, owner,
    personal_scope, stranger,
};

const EDIT: Intent = Intent::Write(Permission::EditSetlists);

#[tokio::test]
async fn test_owner_has_full_access_without_band_lookup() {
    let directory: UnreachableBandDirectory = UnreachableBandDirectory;
    let scope: AccessScope = band_scope(Visibility::Private);

    assert!(can_access(&directory, &scope, "owner-1", Intent::Read).await);
    assert!(can_access(&directory, &scope, "owner-1", EDIT).await);
}

#[tokio::test]
async fn test_joining_band_grants_read_but_not_edit() {
    let scope: AccessScope = band_scope(Visibility::Private);

    let outside: StaticBandDirectory = StaticBandDirectory::default().with_band(band_with([]));
    assert!(!can_access(&outside, &scope, "dana", Intent::Read).await);
    assert!(!can_access(&outside, &scope, "dana", EDIT).await);

    let joined: StaticBandDirectory =
        StaticBandDirectory::default().with_band(band_with([member("dana", [])]));
    assert!(can_access(&joined, &scope, "dana", Intent::Read).await);
    assert!(!can_access(&joined, &scope, "dana", EDIT).await);
}

#[tokio::test]
async fn test_member_with_edit_permission_may_write() {
    let scope: AccessScope = band_scope(Visibility::Private);
    let directory: StaticBandDirectory = StaticBandDirectory::default()
        .with_band(band_with([member("erin", [Permission::EditSetlists])]));

    assert!(can_access(&directory, &scope, "erin", EDIT).await);
    assert!(
        !can_access(
            &directory,
            &scope,
            "erin",
            Intent::Write(Permission::DeleteSetlists)
        )
        .await
    );
}

#[tokio::test]
async fn test_leader_satisfies_every_permission() {
    let scope: AccessScope = band_scope(Visibility::Private);
    let directory: StaticBandDirectory = StaticBandDirectory::default().with_band(band_with([]));

    for permission in [
        Permission::CreateSetlists,
        Permission::EditSetlists,
        Permission::DeleteSetlists,
        Permission::ManageMembers,
    ] {
        assert!(can_access(&directory, &scope, "leader-1", Intent::Write(permission)).await);
    }
}

#[tokio::test]
async fn test_public_grants_read_only() {
    let directory: StaticBandDirectory = StaticBandDirectory::default();
    let scope: AccessScope = personal_scope(Visibility::Public);

    assert!(can_access(&directory, &scope, "stranger-9", Intent::Read).await);
    assert!(!can_access(&directory, &scope, "stranger-9", EDIT).await);
    assert_eq!(directory.lookups(), 0);
}

#[tokio::test]
async fn test_missing_band_counts_as_no_membership() {
    let directory: StaticBandDirectory = StaticBandDirectory::default();
    let scope: AccessScope = band_scope(Visibility::Private);

    assert!(!can_access(&directory, &scope, "dana", Intent::Read).await);
    assert!(can_access(&directory, &scope, "owner-1", EDIT).await);
}

#[tokio::test]
async fn test_unreachable_band_counts_as_no_membership() {
    let directory: UnreachableBandDirectory = UnreachableBandDirectory;

    assert!(
        !can_access(
            &directory,
            &band_scope(Visibility::Private),
            "leader-1",
            Intent::Read
        )
        .await
    );
    assert!(
        can_access(
            &directory,
            &band_scope(Visibility::Public),
            "leader-1",
            Intent::Read
        )
        .await
    );
}

#[test]
fn test_membership_without_band_is_ignored() {
    let scope: AccessScope = personal_scope(Visibility::Private);
    let leader: BandMember = BandMember::new("leader-1", BandRole::Leader, []);

    assert!(!evaluate(&scope, "leader-1", Some(&leader), Intent::Read));
    assert!(!evaluate(&scope, "leader-1", Some(&leader), EDIT));
}

#[test]
fn test_write_access_implies_read_access() {
    let members: Vec<Option<BandMember>> = vec![
        None,
        Some(BandMember::new("actor", BandRole::Member, [])),
        Some(BandMember::new(
            "actor",
            BandRole::Member,
            [Permission::EditSetlists],
        )),
        Some(BandMember::new("actor", BandRole::Leader, [])),
    ];
    let intents: [Intent; 4] = [
        Intent::Write(Permission::CreateSetlists),
        Intent::Write(Permission::EditSetlists),
        Intent::Write(Permission::DeleteSetlists),
        Intent::Write(Permission::ManageMembers),
    ];

    for owner_id in ["actor", "someone-else"] {
        for band in [None, Some(band_id())] {
            for visibility in [Visibility::Public, Visibility::Private] {
                let scope: AccessScope = AccessScope {
                    owner_id: owner_id.to_string(),
                    band_id: band.clone(),
                    visibility,
                };
                for member in &members {
                    for intent in intents {
                        if evaluate(&scope, "actor", member.as_ref(), intent) {
                            assert!(
                                evaluate(&scope, "actor", member.as_ref(), Intent::Read),
                                "write without read for {scope:?} {member:?} {intent:?}"
                            );
                        }
                    }
                }
            }
        }
    }
}

#[tokio::test]
async fn test_authorize_reports_denied_action() {
    let directory: StaticBandDirectory = StaticBandDirectory::default().with_band(band_with([]));

    let result = authorize(
        &directory,
        &band_scope(Visibility::Public),
        "setlist-1",
        &stranger(),
        EDIT,
        "AddSong",
    )
    .await;

    assert_eq!(
        result,
        Err(AuthError::AccessDenied {
            action: String::from("AddSong"),
            target: String::from("setlist 'setlist-1'"),
        })
    );
}

#[tokio::test]
async fn test_personal_creation_needs_no_band() {
    let directory: UnreachableBandDirectory = UnreachableBandDirectory;
    assert!(authorize_create(&directory, &owner(), None).await.is_ok());
}

#[tokio::test]
async fn test_band_creation_requires_create_permission() {
    let directory: StaticBandDirectory = StaticBandDirectory::default().with_band(band_with([
        member("dana", []),
        member("erin", [Permission::CreateSetlists]),
    ]));
    let band = band_id();

    let dana = crate::AuthenticatedActor::new(String::from("dana"));
    let erin = crate::AuthenticatedActor::new(String::from("erin"));
    let leader = crate::AuthenticatedActor::new(String::from("leader-1"));

    assert!(matches!(
        authorize_create(&directory, &dana, Some(&band)).await,
        Err(ApiError::AccessDenied { .. })
    ));
    assert!(authorize_create(&directory, &erin, Some(&band)).await.is_ok());
    assert!(authorize_create(&directory, &leader, Some(&band)).await.is_ok());
}

#[tokio::test]
async fn test_band_creation_for_unknown_band_is_invalid_reference() {
    let directory: StaticBandDirectory = StaticBandDirectory::default();

    let result = authorize_create(&directory, &owner(), Some(&band_id())).await;

    assert!(matches!(result, Err(ApiError::InvalidReference { .. })));
}

#[tokio::test]
async fn test_band_creation_with_unreachable_band_is_denied() {
    let directory: UnreachableBandDirectory = UnreachableBandDirectory;
    let leader = crate::AuthenticatedActor::new(String::from("leader-1"));

    let result = authorize_create(&directory, &leader, Some(&band_id())).await;

    assert!(matches!(result, Err(ApiError::AccessDenied { .. })));
}
