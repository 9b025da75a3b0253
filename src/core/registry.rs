use std::collections::HashMap;

/// Id-keyed map that iterates in insertion order.
#[derive(Debug, Clone)]
pub struct Registry<V> {
    index: HashMap<u32, usize>,
    entries: Vec<(u32, V)>,
}

impl<V> Default for Registry<V> {
    fn default() -> Self {
        Self {
            index: HashMap::new(),
            entries: Vec::new(),
        }
    }
}

impl<V> Registry<V> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, id: u32) -> bool {
        self.index.contains_key(&id)
    }

    /// Inserts only when `id` is free. Returns the value back if it was taken.
    pub fn insert_new(&mut self, id: u32, value: V) -> Result<(), V> {
        if self.contains(id) {
            return Err(value);
        }
        self.index.insert(id, self.entries.len());
        self.entries.push((id, value));
        Ok(())
    }

    pub fn get(&self, id: u32) -> Option<&V> {
        self.index.get(&id).map(|&slot| &self.entries[slot].1)
    }

    pub fn get_mut(&mut self, id: u32) -> Option<&mut V> {
        match self.index.get(&id) {
            Some(&slot) => Some(&mut self.entries[slot].1),
            None => None,
        }
    }

    pub fn values(&self) -> impl Iterator<Item = &V> {
        self.entries.iter().map(|(_, value)| value)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
