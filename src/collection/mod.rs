use alloc::collections::BTreeMap;

/// Host-assigned identifier of an outbound call
pub type RequestId = u32;

pub const PRUNE_INTERVAL: u64 = 100;
pub const RETAIN_WINDOW: RequestId = 100;

/// Maps request identifiers to the call that produced them, so that an exception
/// reported later can be traced back to its source.
///
/// Every `PRUNE_INTERVAL` insertions, entries older than the newest `RETAIN_WINDOW`
/// identifiers are dropped.
#[derive(Default)]
pub struct CallTable {
    calls: BTreeMap<RequestId, &'static str>,
    counter: u64,
}

impl CallTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, id: RequestId, call: &'static str) {
        self.calls.insert(id, call);
        self.counter += 1;
        if self.counter % PRUNE_INTERVAL == 0 && id > RETAIN_WINDOW {
            self.calls = self.calls.split_off(&(id - RETAIN_WINDOW + 1));
        }
    }

    pub fn get(&self, id: RequestId) -> Option<&'static str> {
        self.calls.get(&id).copied()
    }

    pub fn len(&self) -> usize {
        self.calls.len()
    }

    pub fn is_empty(&self) -> bool {
        self.calls.is_empty()
    }

    pub fn clear(&mut self) {
        self.calls.clear();
        self.counter = 0;
    }
}

mod test {
    #[test]
    fn test_lookup() {
        use super::CallTable;

        let mut table = CallTable::new();
        table.insert(7, "transmit(Freeze(Altitude, true))");
        assert_eq!(table.get(7), Some("transmit(Freeze(Altitude, true))"));
        assert_eq!(table.get(8), None);
    }

    #[test]
    fn test_prune() {
        use super::CallTable;

        let mut table = CallTable::new();
        for id in 1..100 {
            table.insert(id, "call");
        }
        assert_eq!(table.len(), 99);
        // Hundredth insertion but identifier not beyond the window yet
        table.insert(100, "call");
        assert_eq!(table.len(), 100);

        for id in 101..=250 {
            table.insert(id, "call");
        }
        // Pruned on the 200th insertion (id 200), then 50 more
        assert_eq!(table.get(100), None);
        assert_eq!(table.get(101), Some("call"));
        assert_eq!(table.len(), 150);
    }
}
