// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Band membership lookups backed by the local store.

use std::future::Future;
use std::sync::Arc;

use gigbook_api::{BandDirectory, LookupError};
use gigbook_domain::{Band, BandId};
use gigbook_persistence::Persistence;
use tokio::sync::Mutex;

/// [`BandDirectory`] over the shared persistence handle.
///
/// Each lookup takes the persistence lock only for the query itself.
#[derive(Clone)]
pub struct PersistenceBandDirectory {
    persistence: Arc<Mutex<Persistence>>,
}

impl PersistenceBandDirectory {
    /// Creates a directory over a shared persistence handle.
    pub const fn new(persistence: Arc<Mutex<Persistence>>) -> Self {
        Self { persistence }
    }
}

impl BandDirectory for PersistenceBandDirectory {
    fn find_band(
        &self,
        band_id: &BandId,
    ) -> impl Future<Output = Result<Option<Band>, LookupError>> + Send {
        let persistence: Arc<Mutex<Persistence>> = Arc::clone(&self.persistence);
        let band_id: BandId = band_id.clone();
        async move {
            let mut persistence = persistence.lock().await;
            persistence
                .get_band(&band_id)
                .map_err(|e| LookupError::new(e.to_string()))
        }
    }
}
