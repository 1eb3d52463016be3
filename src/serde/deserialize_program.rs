use serde::{Deserialize, Serialize};

/// Snapshot of the access-path-tracking group and offset active at the
/// point a hint reference was captured.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
pub struct ApTracking {
    pub group: usize,
    pub offset: usize,
}

impl ApTracking {
    pub fn new() -> ApTracking {
        ApTracking {
            group: 0,
            offset: 0,
        }
    }

    pub fn new_default_state(offset: usize) -> ApTracking {
        ApTracking { group: 0, offset }
    }
}

/// Which of FP or AP a [`crate::hint_processor::hint_processor_definition::OffsetValue`]
/// offset is taken relative to.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Register {
    AP,
    FP,
}
