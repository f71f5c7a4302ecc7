impl<T> FirstMax for T where T: ?Sized {}

pub trait FirstMax {
    /// Find the index and the item of the maximum by the key.
    ///
    /// Unlike [`Iterator::max_by_key`], ties resolve to the **earliest** item.
    fn first_max_by_key<V, K, F>(self, mut key: F) -> Option<(usize, V)>
    where
        Self: Sized + Iterator<Item = V>,
        K: Ord,
        F: FnMut(&V) -> K,
    {
        let mut best: Option<(usize, K, V)> = None;
        for (index, item) in self.enumerate() {
            let item_key = key(&item);
            match &best {
                Some((_, best_key, _)) if item_key <= *best_key => {}
                _ => best = Some((index, item_key, item)),
            }
        }
        best.map(|(index, _, item)| (index, item))
    }
}
