use std::any::Any;
use std::collections::BTreeMap;
use std::marker::PhantomData;

/// Typed key into a [`Blackboard`].
///
/// Keys are plain numeric ids so they can live in `const` items next to the code that owns them.
#[derive(Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct BbKey<T: 'static> {
    id: u64,
    _phantom: PhantomData<fn() -> T>,
}

impl<T: 'static> Copy for BbKey<T> {}

impl<T: 'static> Clone for BbKey<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T: 'static> BbKey<T> {
    pub const fn new(id: u64) -> Self {
        Self {
            id,
            _phantom: PhantomData,
        }
    }

    pub fn id(self) -> u64 {
        self.id
    }
}

/// Per-agent scratch memory shared between the scheduler and the scripts it drives.
///
/// Reading a key with the wrong type is treated as "absent" and logged, so a script bug can never
/// take down the simulation tick.
#[derive(Default)]
pub struct Blackboard {
    values: BTreeMap<u64, Box<dyn Any>>,
}

impl Blackboard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn clear(&mut self) {
        self.values.clear();
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn contains<T: 'static>(&self, key: BbKey<T>) -> bool {
        self.values.contains_key(&key.id)
    }

    pub fn set<T: 'static>(&mut self, key: BbKey<T>, value: T) {
        self.values.insert(key.id, Box::new(value));
    }

    pub fn get<T: 'static>(&self, key: BbKey<T>) -> Option<&T> {
        let value = self.values.get(&key.id)?;
        let typed = value.downcast_ref::<T>();
        if typed.is_none() {
            type_mismatch(key.id);
        }
        typed
    }

    pub fn get_mut<T: 'static>(&mut self, key: BbKey<T>) -> Option<&mut T> {
        let value = self.values.get_mut(&key.id)?;
        let typed = value.downcast_mut::<T>();
        if typed.is_none() {
            type_mismatch(key.id);
        }
        typed
    }

    /// Get the value for `key`, inserting `make()` first when absent.
    ///
    /// A value of the wrong type under the same id is replaced.
    pub fn get_or_insert_with<T: 'static>(&mut self, key: BbKey<T>, make: impl FnOnce() -> T) -> &mut T {
        let stale = self.values.get(&key.id).is_some_and(|value| !value.is::<T>());
        if stale {
            type_mismatch(key.id);
            self.values.remove(&key.id);
        }
        let slot = self.values.entry(key.id).or_insert_with(|| Box::new(make()));
        match slot.downcast_mut::<T>() {
            Some(value) => value,
            None => unreachable!("slot type checked above"),
        }
    }

    pub fn remove<T: 'static>(&mut self, key: BbKey<T>) -> Option<T> {
        let value = self.values.remove(&key.id)?;
        match value.downcast::<T>() {
            Ok(typed) => Some(*typed),
            Err(_) => {
                type_mismatch(key.id);
                None
            }
        }
    }
}

fn type_mismatch(id: u64) {
    tracing::warn!(key = id, "blackboard type mismatch (stored type differs from requested)");
}
