use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use crate::identity::UserId;

/// Table of per-user serialization locks.
///
/// Award and credit operations for one user must never interleave; holding the
/// user's entry for the duration of a load-compute-save cycle guarantees
/// at-most-one in-flight mutation per user.
#[derive(Default)]
pub(crate) struct UserLocks {
    entries: Mutex<HashMap<UserId, Arc<Mutex<()>>>>,
}

impl UserLocks {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn entry(&self, user_id: &UserId) -> Arc<Mutex<()>> {
        let mut table = self.entries.lock().expect("user lock table poisoned");
        table
            .entry(user_id.clone())
            .or_insert_with(|| Arc::new(Mutex::new(())))
            .clone()
    }
}
