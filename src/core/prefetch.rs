use crate::domain::model::StudentIdList;
use std::sync::Mutex;

/// Holds a student-id payload fetched ahead of the loader, e.g. by a warmup
/// request issued while the rest of the application boots.
///
/// Prefetched data is only known valid for the first load, so `take_user_ids`
/// yields it at most once; every later student-id load goes to the network.
#[derive(Debug, Default)]
pub struct PrefetchStore {
    user_ids: Mutex<Option<StudentIdList>>,
}

impl PrefetchStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_user_ids(list: StudentIdList) -> Self {
        Self {
            user_ids: Mutex::new(Some(list)),
        }
    }

    pub fn put_user_ids(&self, list: StudentIdList) {
        if let Ok(mut slot) = self.user_ids.lock() {
            *slot = Some(list);
        }
    }

    /// Consumes the prefetched payload, if one is present.
    pub fn take_user_ids(&self) -> Option<StudentIdList> {
        self.user_ids.lock().ok().and_then(|mut slot| slot.take())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn take_consumes_exactly_once() {
        let store = PrefetchStore::with_user_ids(StudentIdList {
            user_ids: vec![1, 2, 3],
        });
        assert_eq!(store.take_user_ids().map(|l| l.user_ids), Some(vec![1, 2, 3]));
        assert!(store.take_user_ids().is_none());
    }

    #[test]
    fn empty_store_yields_nothing() {
        assert!(PrefetchStore::new().take_user_ids().is_none());
    }

    #[test]
    fn put_replaces_pending_payload() {
        let store = PrefetchStore::new();
        store.put_user_ids(StudentIdList { user_ids: vec![1] });
        store.put_user_ids(StudentIdList { user_ids: vec![2] });
        assert_eq!(store.take_user_ids().map(|l| l.user_ids), Some(vec![2]));
    }
}
