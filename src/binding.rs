//! Boundary to the scene objects tracks write into.
//!
//! Concrete scene bindings (a light, a renderer's color, a transform) live outside this
//! crate and implement [`TargetBinding`]. [`MemoryBinding`] is the in-memory
//! implementation used by sessions, tools and tests.

/// Read/write access to one bound target.
pub trait TargetBinding {
    type Value: Clone;

    /// Value to use as the mixing baseline. Called once when a track starts
    /// contributing; defaults to [`TargetBinding::read`].
    fn capture_initial(&self) -> Self::Value {
        self.read()
    }

    fn read(&self) -> Self::Value;

    fn write(&mut self, value: Self::Value);
}

/// Target state held in memory.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct MemoryBinding<V> {
    value: V,
    #[serde(skip)]
    writes: u64,
}

impl<V: Clone> MemoryBinding<V> {
    pub fn new(value: V) -> Self {
        Self { value, writes: 0 }
    }

    pub fn value(&self) -> &V {
        &self.value
    }

    /// Number of writes since creation.
    pub fn writes(&self) -> u64 {
        self.writes
    }

    /// Set the value as a scene edit would, without counting a mixer write.
    pub fn set(&mut self, value: V) {
        self.value = value;
    }

    pub fn into_inner(self) -> V {
        self.value
    }
}

impl<V: Clone> TargetBinding for MemoryBinding<V> {
    type Value = V;

    fn read(&self) -> V {
        self.value.clone()
    }

    fn write(&mut self, value: V) {
        self.value = value;
        self.writes += 1;
    }
}

impl<B: TargetBinding + ?Sized> TargetBinding for &mut B {
    type Value = B::Value;

    fn capture_initial(&self) -> Self::Value {
        (**self).capture_initial()
    }

    fn read(&self) -> Self::Value {
        (**self).read()
    }

    fn write(&mut self, value: Self::Value) {
        (**self).write(value);
    }
}

#[cfg(test)]
#[path = "../tests/unit/binding.rs"]
mod tests;
