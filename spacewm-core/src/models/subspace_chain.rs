use serde::{Deserialize, Serialize};

/// Most recently used order of subspace ordinals, most recent first.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct SubspaceChain {
    chain: Vec<u32>,
}

impl SubspaceChain {
    pub fn new(count: u32) -> Self {
        Self {
            chain: (1..=count).collect(),
        }
    }

    pub fn as_slice(&self) -> &[u32] {
        &self.chain
    }

    /// The ordinal used right after `x11_id`, wrapping to the most recent.
    pub fn next(&self, x11_id: u32) -> u32 {
        match self.chain.iter().position(|&id| id == x11_id) {
            Some(index) if index + 1 < self.chain.len() => self.chain[index + 1],
            _ => self.chain.first().copied().unwrap_or(1),
        }
    }

    /// Mark `x11_id` as the most recently used.
    pub fn add(&mut self, x11_id: u32) {
        if self.chain.is_empty() {
            return;
        }
        let index = self
            .chain
            .iter()
            .position(|&id| id == x11_id)
            .unwrap_or(self.chain.len() - 1);
        self.chain[..=index].rotate_right(1);
        self.chain[0] = x11_id;
    }

    /// A subspace was inserted at `x11_id`. Following ordinals shift up and
    /// the new one becomes the least recently used.
    pub fn insert(&mut self, x11_id: u32) {
        for id in &mut self.chain {
            if *id >= x11_id {
                *id += 1;
            }
        }
        self.chain.push(x11_id);
    }

    /// The subspace at `x11_id` was removed. Following ordinals shift down.
    pub fn remove(&mut self, x11_id: u32) {
        self.chain.retain(|&id| id != x11_id);
        for id in &mut self.chain {
            if *id > x11_id {
                *id -= 1;
            }
        }
    }

    /// Hold exactly the ordinals `1..=count`, keeping the order of the
    /// surviving ones and appending the missing ones.
    pub fn resize(&mut self, count: u32) {
        let mut seen = Vec::with_capacity(count as usize);
        self.chain.retain(|&id| {
            let keep = (1..=count).contains(&id) && !seen.contains(&id);
            if keep {
                seen.push(id);
            }
            keep
        });
        let missing: Vec<u32> = (1..=count).filter(|id| !seen.contains(id)).collect();
        self.chain.extend(missing);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn add_moves_to_front() {
        let mut chain = SubspaceChain::new(4);
        chain.add(3);
        assert_eq!(chain.as_slice(), [3, 1, 2, 4]);
        chain.add(4);
        assert_eq!(chain.as_slice(), [4, 3, 1, 2]);
        assert_eq!(chain.next(4), 3);
        assert_eq!(chain.next(2), 4);
    }

    #[test]
    fn resize_appends_and_drops() {
        let mut chain = SubspaceChain::new(2);
        chain.add(2);
        chain.resize(4);
        assert_eq!(chain.as_slice(), [2, 1, 3, 4]);
        chain.add(4);
        chain.resize(2);
        assert_eq!(chain.as_slice(), [2, 1]);
    }

    #[test]
    fn removal_renumbers_following_ordinals() {
        let mut chain = SubspaceChain::new(4);
        chain.add(2);
        chain.add(4);
        assert_eq!(chain.as_slice(), [4, 2, 1, 3]);
        chain.remove(2);
        assert_eq!(chain.as_slice(), [3, 1, 2]);
        chain.resize(3);
        assert_eq!(chain.as_slice(), [3, 1, 2]);
    }

    #[test]
    fn insertion_shifts_and_appends() {
        let mut chain = SubspaceChain::new(3);
        chain.add(3);
        chain.insert(1);
        assert_eq!(chain.as_slice(), [4, 2, 3, 1]);
        chain.resize(4);
        assert_eq!(chain.as_slice(), [4, 2, 3, 1]);
    }
}
