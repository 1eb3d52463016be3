//! Dictionary manager (§4.3): tracks logical key/value dictionaries mirrored
//! onto VM segments, in either "simple" or "default-value" flavor.

use alloc::boxed::Box;
use alloc::vec::Vec;

use hashbrown::HashMap;

use crate::types::relocatable::{MaybeRelocatable, Relocatable};
use crate::vm::errors::hint_errors::HintError;
use crate::vm::vm_core::VirtualMachine;

/// A logical dictionary backing one segment: either every key must have been
/// explicitly written, or reads of unseen keys fall back to a default value.
#[derive(Debug, Clone)]
pub enum Dictionary {
    Simple(HashMap<MaybeRelocatable, MaybeRelocatable>),
    DefaultDict {
        dict: HashMap<MaybeRelocatable, MaybeRelocatable>,
        default: MaybeRelocatable,
    },
}

impl Dictionary {
    fn get(&mut self, key: &MaybeRelocatable) -> Result<MaybeRelocatable, HintError> {
        match self {
            Dictionary::Simple(map) => map
                .get(key)
                .cloned()
                .ok_or_else(|| HintError::NoValueForKey(Box::new(key.clone()))),
            Dictionary::DefaultDict { dict, default } => {
                Ok(dict.entry(key.clone()).or_insert_with(|| default.clone()).clone())
            }
        }
    }

    fn insert(&mut self, key: MaybeRelocatable, value: MaybeRelocatable) {
        match self {
            Dictionary::Simple(map) => {
                map.insert(key, value);
            }
            Dictionary::DefaultDict { dict, .. } => {
                dict.insert(key, value);
            }
        }
    }
}

/// Per-segment bookkeeping: the logical dictionary plus the next unused
/// address in that segment, which the Cairo code is assumed to track in
/// lockstep via `dict_ptr`.
#[derive(Debug, Clone)]
pub struct DictTracker {
    pub dictionary: Dictionary,
    pub current_ptr: Relocatable,
}

impl DictTracker {
    fn new_simple(base: Relocatable, initial: HashMap<MaybeRelocatable, MaybeRelocatable>) -> Self {
        DictTracker {
            dictionary: Dictionary::Simple(initial),
            current_ptr: base,
        }
    }

    fn new_default(
        base: Relocatable,
        default: MaybeRelocatable,
        initial: HashMap<MaybeRelocatable, MaybeRelocatable>,
    ) -> Self {
        DictTracker {
            dictionary: Dictionary::DefaultDict { dict: initial, default },
            current_ptr: base,
        }
    }

    pub fn get_value(&mut self, key: &MaybeRelocatable) -> Result<MaybeRelocatable, HintError> {
        self.dictionary.get(key)
    }

    pub fn insert_value(&mut self, key: MaybeRelocatable, value: MaybeRelocatable) {
        self.dictionary.insert(key, value)
    }
}

/// Owns exactly one [`DictTracker`] per segment that has a live dictionary.
#[derive(Debug, Default, Clone)]
pub struct DictManager {
    pub trackers: HashMap<isize, DictTracker>,
}

impl DictManager {
    pub fn new() -> Self {
        DictManager {
            trackers: HashMap::new(),
        }
    }

    /// Allocates a new segment, installs a simple tracker over it, and
    /// returns the segment's base address.
    pub fn new_dict(
        &mut self,
        vm: &mut VirtualMachine,
        initial_dict: HashMap<MaybeRelocatable, MaybeRelocatable>,
    ) -> Result<Relocatable, HintError> {
        let base = vm.add_memory_segment();
        if self.trackers.contains_key(&base.segment_index) {
            return Err(HintError::CantCreateDictionaryOnTakenSegment(base.segment_index));
        }
        self.trackers
            .insert(base.segment_index, DictTracker::new_simple(base, initial_dict));
        Ok(base)
    }

    /// As [`Self::new_dict`], with a default-value tracker.
    pub fn new_default_dict(
        &mut self,
        vm: &mut VirtualMachine,
        default_value: MaybeRelocatable,
        initial_dict: Option<HashMap<MaybeRelocatable, MaybeRelocatable>>,
    ) -> Result<Relocatable, HintError> {
        let base = vm.add_memory_segment();
        if self.trackers.contains_key(&base.segment_index) {
            return Err(HintError::CantCreateDictionaryOnTakenSegment(base.segment_index));
        }
        self.trackers.insert(
            base.segment_index,
            DictTracker::new_default(base, default_value, initial_dict.unwrap_or_default()),
        );
        Ok(base)
    }

    /// Validates `dict_ptr` against the tracker for its segment and returns
    /// a mutable handle to it.
    pub fn get_tracker(&mut self, dict_ptr: Relocatable) -> Result<&mut DictTracker, HintError> {
        let tracker = self
            .trackers
            .get_mut(&dict_ptr.segment_index)
            .ok_or(HintError::NoDictTracker(dict_ptr.segment_index))?;
        if tracker.current_ptr != dict_ptr {
            return Err(HintError::MismatchedDictPtr(
                Box::new(MaybeRelocatable::RelocatableValue(tracker.current_ptr)),
                Box::new(MaybeRelocatable::RelocatableValue(dict_ptr)),
            ));
        }
        Ok(tracker)
    }
}

/// `DictAccess.SIZE`: key, prev_value, new_value, one cell each.
pub const DICT_ACCESS_SIZE: usize = 3;

pub fn initial_dict_from_pairs(pairs: Vec<(MaybeRelocatable, MaybeRelocatable)>) -> HashMap<MaybeRelocatable, MaybeRelocatable> {
    pairs.into_iter().collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::felt::Felt252;

    #[test]
    fn new_dict_then_get_tracker() {
        let mut vm = VirtualMachine::new();
        let mut manager = DictManager::new();
        let base = manager.new_dict(&mut vm, HashMap::new()).unwrap();
        assert_eq!(base.segment_index, 0);
        let tracker = manager.get_tracker(base).unwrap();
        assert_eq!(tracker.current_ptr, base);
    }

    #[test]
    fn new_dict_on_taken_segment_fails() {
        let mut vm = VirtualMachine::new();
        let mut manager = DictManager::new();
        manager.trackers.insert(0, DictTracker::new_simple(Relocatable::new(0, 0), HashMap::new()));
        assert!(matches!(
            manager.new_dict(&mut vm, HashMap::new()),
            Err(HintError::CantCreateDictionaryOnTakenSegment(_))
        ));
    }

    #[test]
    fn simple_dict_missing_key_errors() {
        let mut vm = VirtualMachine::new();
        let mut manager = DictManager::new();
        let base = manager.new_dict(&mut vm, HashMap::new()).unwrap();
        let tracker = manager.get_tracker(base).unwrap();
        assert!(matches!(
            tracker.get_value(&MaybeRelocatable::Int(Felt252::from(1))),
            Err(HintError::NoValueForKey(_))
        ));
    }

    #[test]
    fn default_dict_inserts_default_on_miss() {
        let mut vm = VirtualMachine::new();
        let mut manager = DictManager::new();
        let default = MaybeRelocatable::Int(Felt252::from(7));
        let base = manager.new_default_dict(&mut vm, default.clone(), None).unwrap();
        let tracker = manager.get_tracker(base).unwrap();
        let key = MaybeRelocatable::Int(Felt252::from(1));
        assert_eq!(tracker.get_value(&key).unwrap(), default);
    }

    #[test]
    fn mismatched_dict_ptr_errors() {
        let mut vm = VirtualMachine::new();
        let mut manager = DictManager::new();
        let base = manager.new_dict(&mut vm, HashMap::new()).unwrap();
        let wrong_ptr = base.add_usize(5).unwrap();
        assert!(matches!(
            manager.get_tracker(wrong_ptr),
            Err(HintError::MismatchedDictPtr(_, _))
        ));
    }
}
