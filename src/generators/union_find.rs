/// Disjoint-set forest over flat cell indices.
///
/// `find` walks the representative chain without compressing it and `union`
/// always hangs the first root under the second, so the shape of the forest
/// depends only on the order of unions.
#[derive(Debug, Clone)]
pub struct DisjointSet {
    parent: Vec<usize>,
}

impl DisjointSet {
    pub fn new(size: usize) -> Self {
        DisjointSet {
            parent: (0..size).collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.parent.len()
    }

    pub fn is_empty(&self) -> bool {
        self.parent.is_empty()
    }

    /// Representative of the set containing `x`.
    ///
    /// # Panics
    /// If `x` is not below [`len`](Self::len).
    pub fn find(&self, x: usize) -> usize {
        let mut current = x;
        while self.parent[current] != current {
            current = self.parent[current];
        }
        current
    }

    /// Merge the sets of `x` and `y`; the root of `x` now points at the root of `y`.
    pub fn union(&mut self, x: usize, y: usize) {
        let root_x = self.find(x);
        let root_y = self.find(y);
        if root_x != root_y {
            self.parent[root_x] = root_y;
        }
    }

    pub fn connected(&self, x: usize, y: usize) -> bool {
        self.find(x) == self.find(y)
    }

    /// Put every index back into its own singleton set.
    pub fn reset(&mut self) {
        self.parent
            .iter_mut()
            .enumerate()
            .for_each(|(i, p)| *p = i);
    }
}
