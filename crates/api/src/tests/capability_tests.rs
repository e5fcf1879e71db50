// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use gigbook_domain::{Permission, Visibility};

use crate::{SetlistCapabilities, compute_setlist_capabilities, resolve_setlist_capabilities};

use super::helpers::{StaticBandDirectory, band_scope, band_with, member, personal_scope};

#[test]
fn test_owner_capabilities() {
    let caps: SetlistCapabilities =
        compute_setlist_capabilities(&personal_scope(Visibility::Private), "owner-1", None);
    assert!(caps.can_read);
    assert!(caps.can_edit);
}

#[test]
fn test_public_viewer_capabilities() {
    let caps: SetlistCapabilities =
        compute_setlist_capabilities(&personal_scope(Visibility::Public), "viewer", None);
    assert!(caps.can_read);
    assert!(!caps.can_edit);
}

#[tokio::test]
async fn test_band_member_capabilities_follow_permissions() {
    let directory: StaticBandDirectory = StaticBandDirectory::default().with_band(band_with([
        member("dana", []),
        member("erin", [Permission::EditSetlists]),
    ]));
    let scope = band_scope(Visibility::Private);

    let dana: SetlistCapabilities = resolve_setlist_capabilities(&directory, &scope, "dana").await;
    let erin: SetlistCapabilities = resolve_setlist_capabilities(&directory, &scope, "erin").await;
    let owner: SetlistCapabilities =
        resolve_setlist_capabilities(&directory, &scope, "owner-1").await;

    assert_eq!(
        dana,
        SetlistCapabilities {
            can_read: true,
            can_edit: false
        }
    );
    assert!(erin.can_edit);
    assert!(owner.can_edit);
    assert_eq!(directory.lookups(), 2);
}
