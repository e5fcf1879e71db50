// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::DomainError;

#[test]
fn test_invalid_reference_classification() {
    assert!(
        DomainError::SetIndexOutOfRange {
            index: 3,
            set_count: 2
        }
        .is_invalid_reference()
    );
    assert!(
        DomainError::SongIndexOutOfRange {
            set_index: 0,
            index: 9,
            song_count: 2
        }
        .is_invalid_reference()
    );
    assert!(DomainError::UnknownSong(String::from("song-x")).is_invalid_reference());
    assert!(DomainError::UnknownBand(String::from("band-x")).is_invalid_reference());

    assert!(!DomainError::InvalidTitle(String::from("empty")).is_invalid_reference());
    assert!(
        !DomainError::VersionMismatch {
            version: 2,
            history_version: 3
        }
        .is_invalid_reference()
    );
}

#[test]
fn test_error_messages() {
    let error: DomainError = DomainError::SongIndexOutOfRange {
        set_index: 1,
        index: 4,
        song_count: 2,
    };
    assert_eq!(
        error.to_string(),
        "Song index 4 is out of range for set 1 (2 songs)"
    );
    assert_eq!(
        DomainError::UnknownSong(String::from("song-x")).to_string(),
        "Song 'song-x' does not exist"
    );
    assert_eq!(
        DomainError::InvalidVisibility(String::from("hidden")).to_string(),
        "Invalid visibility: 'hidden'. Must be 'public' or 'private'"
    );
}
