//! The two working sets of a run: the [`Frontier`] (open set) and
//! [`Visited`] (closed set).
//!
//! Both address cells by arena index. The frontier keeps its members in
//! insertion order and selects the minimum-cost cell by a linear scan
//! with a strict comparison, so cost ties always go to the earliest
//! inserted member. That makes tie-breaking deterministic for a given
//! grid and policy.

/// The open set: discovered cells not yet expanded. Membership is unique.
#[derive(Debug, Clone)]
pub struct Frontier {
    order: Vec<usize>,
    member: Vec<bool>,
}

impl Frontier {
    /// An empty frontier for an arena of `len` cells.
    pub fn new(len: usize) -> Self {
        Self {
            order: Vec::new(),
            member: vec![false; len],
        }
    }

    /// Insert `idx`. Returns `false` if it was already present.
    pub fn insert(&mut self, idx: usize) -> bool {
        if self.member[idx] {
            return false;
        }
        self.member[idx] = true;
        self.order.push(idx);
        true
    }

    /// Remove `idx`. Returns `false` if it was not present.
    pub fn remove(&mut self, idx: usize) -> bool {
        if !self.member[idx] {
            return false;
        }
        self.member[idx] = false;
        self.order.retain(|&i| i != idx);
        true
    }

    #[inline]
    pub fn contains(&self, idx: usize) -> bool {
        self.member[idx]
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.order.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Drop all members.
    pub fn clear(&mut self) {
        self.order.clear();
        self.member.fill(false);
    }

    /// The member with the smallest cost under `cost`, ties broken by
    /// insertion order (first encountered wins).
    pub fn select_min(&self, cost: impl Fn(usize) -> f64) -> Option<usize> {
        let mut best: Option<(usize, f64)> = None;
        for &idx in &self.order {
            let c = cost(idx);
            match best {
                Some((_, bc)) if c >= bc => {}
                _ => best = Some((idx, c)),
            }
        }
        best.map(|(idx, _)| idx)
    }
}

/// The closed set: cells already expanded, excluded from re-expansion for
/// the rest of the run.
#[derive(Debug, Clone)]
pub struct Visited {
    member: Vec<bool>,
    count: usize,
}

impl Visited {
    /// An empty closed set for an arena of `len` cells.
    pub fn new(len: usize) -> Self {
        Self {
            member: vec![false; len],
            count: 0,
        }
    }

    /// Insert `idx`. Returns `false` if it was already present.
    pub fn insert(&mut self, idx: usize) -> bool {
        if self.member[idx] {
            return false;
        }
        self.member[idx] = true;
        self.count += 1;
        true
    }

    #[inline]
    pub fn contains(&self, idx: usize) -> bool {
        self.member[idx]
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.count
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// Drop all members.
    pub fn clear(&mut self) {
        self.member.fill(false);
        self.count = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn frontier_membership_is_unique() {
        let mut f = Frontier::new(8);
        assert!(f.insert(3));
        assert!(!f.insert(3));
        assert_eq!(f.len(), 1);
        assert!(f.contains(3));
        assert!(f.remove(3));
        assert!(!f.remove(3));
        assert!(f.is_empty());
    }

    #[test]
    fn select_min_breaks_ties_by_insertion_order() {
        let mut f = Frontier::new(8);
        f.insert(5);
        f.insert(2);
        f.insert(7);
        let costs = [9.0, 9.0, 4.0, 9.0, 9.0, 4.0, 9.0, 4.0];
        // 5, 2 and 7 tie on cost 4.0; 5 was inserted first.
        assert_eq!(f.select_min(|i| costs[i]), Some(5));
        f.remove(5);
        assert_eq!(f.select_min(|i| costs[i]), Some(2));
    }

    #[test]
    fn select_min_empty() {
        let f = Frontier::new(4);
        assert_eq!(f.select_min(|_| 0.0), None);
    }

    #[test]
    fn visited_counts() {
        let mut v = Visited::new(4);
        assert!(v.insert(1));
        assert!(!v.insert(1));
        assert_eq!(v.len(), 1);
        v.clear();
        assert!(v.is_empty());
        assert!(!v.contains(1));
    }
}
