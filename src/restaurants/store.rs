use std::sync::Arc;

use parking_lot::RwLock;

use super::collection::Restaurants;

/// Holds the live collection. Readers take a snapshot `Arc`; a reload swaps
/// in a freshly built collection and never touches the old one.
#[derive(Clone, Default)]
pub struct ScheduleStore {
    current: Arc<RwLock<Arc<Restaurants>>>,
}

impl ScheduleStore {
    pub fn new(restaurants: Restaurants) -> Self {
        Self {
            current: Arc::new(RwLock::new(Arc::new(restaurants))),
        }
    }

    pub fn snapshot(&self) -> Arc<Restaurants> {
        self.current.read().clone()
    }

    pub fn replace(&self, restaurants: Restaurants) {
        *self.current.write() = Arc::new(restaurants);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::restaurants::collection::build_all;

    #[test]
    fn old_snapshot_survives_replace() {
        let store = ScheduleStore::new(build_all(vec![("A".to_string(), "Mon 9 am - 5 pm".to_string())]));
        let before = store.snapshot();

        store.replace(build_all(vec![
            ("B".to_string(), "Tue 9 am - 5 pm".to_string()),
            ("C".to_string(), "Wed 9 am - 5 pm".to_string()),
        ]));

        assert_eq!(before.len(), 1);
        assert!(before.get("A").is_some());
        let after = store.snapshot();
        assert_eq!(after.len(), 2);
        assert!(after.get("A").is_none());
    }

    #[test]
    fn clones_share_the_collection() {
        let store = ScheduleStore::default();
        let other = store.clone();
        assert!(other.snapshot().is_empty());
        store.replace(build_all(vec![("A".to_string(), "Mon 9 am - 5 pm".to_string())]));
        assert_eq!(other.snapshot().len(), 1);
    }

    #[test]
    fn readers_see_whole_collections_during_replace() {
        let store = ScheduleStore::new(build_all(vec![("A".to_string(), "Mon 9 am - 5 pm".to_string())]));
        let readers: Vec<_> = (0..4)
            .map(|_| {
                let store = store.clone();
                std::thread::spawn(move || {
                    for _ in 0..200 {
                        let len = store.snapshot().len();
                        assert!(len == 1 || len == 2);
                    }
                })
            })
            .collect();
        for _ in 0..200 {
            store.replace(build_all(vec![
                ("B".to_string(), "Tue 9 am - 5 pm".to_string()),
                ("C".to_string(), "Wed 9 am - 5 pm".to_string()),
            ]));
        }
        for reader in readers {
            reader.join().unwrap();
        }
        assert_eq!(store.snapshot().len(), 2);
    }
}
