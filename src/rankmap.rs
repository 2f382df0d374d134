use crate::node::{is_red, size, Color, Link, Node};
use std::borrow::Borrow;
use std::cmp::Ordering;
use std::mem;

/// An ordered key-value map based on a left-leaning red-black tree.
///
/// Every node caches the size of its subtree, so rank queries run in
/// O(logN) alongside the usual map operations.
#[derive(Debug)]
pub struct RankMap<K, V> {
    /// Root of the tree
    pub(crate) root: Link<K, V>,
}

impl<K, V> RankMap<K, V>
where
    K: Ord,
{
    /// Create an empty `RankMap`
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self { root: None }
    }

    /// Insert a key-value pair into the map.
    /// If the key exists, overwrite and return the previous value.
    ///
    /// # Example
    /// ```rust
    /// use llrb_rank_map::RankMap;
    ///
    /// let mut map = RankMap::new();
    /// assert_eq!(map.insert(1, 1), None);
    /// assert_eq!(map.insert(1, 2), Some(1));
    /// assert_eq!(map.insert(1, 3), Some(2));
    /// ```
    #[inline]
    pub fn insert(&mut self, key: K, value: V) -> Option<V> {
        let (mut root, old_value) = Self::insert_inner(self.root.take(), key, value);
        root.color = Color::Black;
        self.root = Some(root);
        old_value
    }

    /// Remove a key from the map, returning the value at the key if the key
    /// was present.
    ///
    /// # Example
    /// ```rust
    /// use llrb_rank_map::RankMap;
    ///
    /// let mut map = RankMap::new();
    /// map.insert(1, 1);
    /// map.insert(2, 2);
    /// assert_eq!(map.len(), 2);
    /// assert_eq!(map.remove(&3), None);
    /// assert_eq!(map.len(), 2);
    /// assert_eq!(map.remove(&2), Some(2));
    /// assert_eq!(map.len(), 1);
    /// ```
    #[inline]
    pub fn remove<Q>(&mut self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        if !self.contains_key(key) {
            return None;
        }
        let Some(mut root) = self.root.take() else {
            return None;
        };
        // Seed the top-down red push: the descent below expects a red
        // link on the search path at every step.
        if !is_red(root.left()) && !is_red(root.right()) {
            root.color = Color::Red;
        }
        let (root, removed) = Self::remove_inner(Some(root), key);
        self.root = root.map(|mut node| {
            node.color = Color::Black;
            node
        });
        removed
    }

    /// Return a reference to the value corresponding to the key.
    ///
    /// # Example
    /// ```rust
    /// use llrb_rank_map::RankMap;
    ///
    /// let mut map = RankMap::new();
    /// map.insert(1, 1);
    /// map.insert(7, 4);
    /// assert_eq!(map.get(&1), Some(&1));
    /// assert_eq!(map.get(&7), Some(&4));
    /// assert_eq!(map.get(&5), None);
    /// ```
    #[inline]
    pub fn get<Q>(&self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        let mut node = self.root.as_deref();
        while let Some(current) = node {
            node = match key.cmp(current.key.borrow()) {
                Ordering::Less => current.left.as_deref(),
                Ordering::Greater => current.right.as_deref(),
                Ordering::Equal => return Some(&current.value),
            };
        }
        None
    }

    /// Return a mutable reference to the value corresponding to the key.
    ///
    /// # Example
    /// ```rust
    /// use llrb_rank_map::RankMap;
    ///
    /// let mut map = RankMap::new();
    /// map.insert(3, 0);
    /// map.get_mut(&3).map(|v| *v += 1);
    /// assert_eq!(map.get(&3), Some(&1));
    /// ```
    #[inline]
    pub fn get_mut<Q>(&mut self, key: &Q) -> Option<&mut V>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        let mut node = self.root.as_deref_mut();
        while let Some(current) = node {
            node = match key.cmp(current.key.borrow()) {
                Ordering::Less => current.left.as_deref_mut(),
                Ordering::Greater => current.right.as_deref_mut(),
                Ordering::Equal => return Some(&mut current.value),
            };
        }
        None
    }

    /// Check if the map contains the given key.
    ///
    /// # Example
    /// ```rust
    /// use llrb_rank_map::RankMap;
    ///
    /// let mut map = RankMap::new();
    /// map.insert(1, ());
    /// assert!(map.contains_key(&1));
    /// assert!(!map.contains_key(&2));
    /// ```
    #[inline]
    #[must_use]
    pub fn contains_key<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.get(key).is_some()
    }

    /// Return the number of keys strictly less than the given key.
    ///
    /// The key itself does not have to be present.
    ///
    /// # Example
    /// ```rust
    /// use llrb_rank_map::RankMap;
    ///
    /// let mut map = RankMap::new();
    /// map.insert(10, ());
    /// map.insert(20, ());
    /// map.insert(30, ());
    /// assert_eq!(map.rank(&10), 0);
    /// assert_eq!(map.rank(&25), 2);
    /// assert_eq!(map.rank(&40), 3);
    /// ```
    #[inline]
    #[must_use]
    pub fn rank<Q>(&self, key: &Q) -> usize
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        let mut node = self.root.as_deref();
        let mut rank = 0;
        while let Some(current) = node {
            match key.cmp(current.key.borrow()) {
                Ordering::Less => node = current.left.as_deref(),
                Ordering::Greater => {
                    rank += size(current.left.as_deref()) + 1;
                    node = current.right.as_deref();
                }
                Ordering::Equal => return rank + size(current.left.as_deref()),
            }
        }
        rank
    }

    /// Return the key at the given in-order position, or `None` if `rank`
    /// is not smaller than the number of keys.
    ///
    /// # Example
    /// ```rust
    /// use llrb_rank_map::RankMap;
    ///
    /// let mut map = RankMap::new();
    /// map.insert(20, ());
    /// map.insert(10, ());
    /// assert_eq!(map.get_by_rank(0), Some(&10));
    /// assert_eq!(map.get_by_rank(1), Some(&20));
    /// assert_eq!(map.get_by_rank(2), None);
    /// ```
    #[inline]
    #[must_use]
    pub fn get_by_rank(&self, mut rank: usize) -> Option<&K> {
        let mut node = self.root.as_deref();
        while let Some(current) = node {
            let left_size = size(current.left.as_deref());
            match rank.cmp(&left_size) {
                Ordering::Less => node = current.left.as_deref(),
                Ordering::Greater => {
                    rank -= left_size + 1;
                    node = current.right.as_deref();
                }
                Ordering::Equal => return Some(&current.key),
            }
        }
        None
    }

    /// Return the keys at in-order positions `low..=high`, in order.
    ///
    /// The result is empty when `high` is out of bounds or the interval is
    /// inverted.
    ///
    /// # Example
    /// ```rust
    /// use llrb_rank_map::RankMap;
    ///
    /// let mut map = RankMap::new();
    /// for key in [5, 3, 8, 1, 4] {
    ///     map.insert(key, ());
    /// }
    /// assert_eq!(map.range_by_rank(1, 3), vec![&3, &4, &5]);
    /// assert_eq!(map.range_by_rank(0, 5), Vec::<&i32>::new());
    /// ```
    #[inline]
    #[must_use]
    pub fn range_by_rank(&self, low: usize, high: usize) -> Vec<&K> {
        if low > high || high >= self.len() {
            return Vec::new();
        }
        let mut keys = Vec::with_capacity(high - low + 1);
        Self::collect_range(self.root.as_deref(), low, high, 0, &mut keys);
        keys
    }

    /// Return the height of the tree: -1 when empty, 0 for a single node.
    ///
    /// # Example
    /// ```rust
    /// use llrb_rank_map::RankMap;
    ///
    /// let mut map = RankMap::new();
    /// assert_eq!(map.height(), -1);
    /// map.insert(1, ());
    /// assert_eq!(map.height(), 0);
    /// ```
    #[inline]
    #[must_use]
    pub fn height(&self) -> isize {
        Self::height_inner(self.root.as_deref())
    }

    /// Remove all elements from the map
    #[inline]
    pub fn clear(&mut self) {
        self.root = None;
    }

    /// Return the number of elements in the map.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        size(self.root.as_deref())
    }

    /// Return `true` if the map contains no elements.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    /// Return a read-only view of the root node, for external tree
    /// renderers that walk colors, keys, and children.
    #[inline]
    #[must_use]
    pub fn root_node(&self) -> Option<&Node<K, V>> {
        self.root.as_deref()
    }
}

impl<K, V> Default for RankMap<K, V>
where
    K: Ord,
{
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

impl<K, V> RankMap<K, V>
where
    K: Ord,
{
    /// Insert below `node`, rebalancing on the way back up.
    fn insert_inner(node: Link<K, V>, key: K, value: V) -> (Box<Node<K, V>>, Option<V>) {
        let Some(mut node) = node else {
            return (Node::new(key, value), None);
        };
        let old_value = match key.cmp(&node.key) {
            Ordering::Less => {
                let (left, old_value) = Self::insert_inner(node.left.take(), key, value);
                node.left = Some(left);
                old_value
            }
            Ordering::Greater => {
                let (right, old_value) = Self::insert_inner(node.right.take(), key, value);
                node.right = Some(right);
                old_value
            }
            Ordering::Equal => Some(mem::replace(&mut node.value, value)),
        };
        (Self::balance(node), old_value)
    }

    /// Remove `key` below `node`.
    ///
    /// The descent pushes a red link ahead of the search so it never steps
    /// through a 2-node; every return rebalances the traversed subtree.
    fn remove_inner<Q>(node: Link<K, V>, key: &Q) -> (Link<K, V>, Option<V>)
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        let Some(mut node) = node else {
            return (None, None);
        };

        if key < node.key.borrow() {
            if node.left.is_none() {
                return (Some(node), None);
            }
            if !is_red(node.left()) && !is_red(node.left().and_then(Node::left)) {
                node = Self::move_red_left(node);
            }
            let (left, removed) = Self::remove_inner(node.left.take(), key);
            node.left = left;
            (Some(Self::balance(node)), removed)
        } else {
            if is_red(node.left()) {
                node = Self::rotate_right(node);
            }
            if key == node.key.borrow() && node.right.is_none() {
                // The rotation above straightened any 3-node away, so the
                // match sits on a red leaf and unlinks trivially.
                let node = *node;
                return (node.left, Some(node.value));
            }
            if node.right.is_some()
                && !is_red(node.right())
                && !is_red(node.right().and_then(Node::left))
            {
                node = Self::move_red_right(node);
            }
            if key == node.key.borrow() {
                // Interior match: take over the in-order successor's entry
                // and excise the successor from the right subtree.
                let (right, min) = Self::delete_min(node.right.take());
                node.right = right;
                let Some(min) = min else {
                    unreachable!("an interior node always has a right subtree here");
                };
                let min = *min;
                node.key = min.key;
                let removed = mem::replace(&mut node.value, min.value);
                (Some(Self::balance(node)), Some(removed))
            } else {
                let (right, removed) = Self::remove_inner(node.right.take(), key);
                node.right = right;
                (Some(Self::balance(node)), removed)
            }
        }
    }

    /// Detach the minimum node below `node`, applying the same red push
    /// as the removal descent while walking leftmost.
    fn delete_min(node: Link<K, V>) -> (Link<K, V>, Option<Box<Node<K, V>>>) {
        let Some(mut node) = node else {
            return (None, None);
        };
        if node.left.is_none() {
            return (None, Some(node));
        }
        if !is_red(node.left()) && !is_red(node.left().and_then(Node::left)) {
            node = Self::move_red_left(node);
        }
        let (left, min) = Self::delete_min(node.left.take());
        node.left = left;
        (Some(Self::balance(node)), min)
    }

    /// In-order collection of the keys at positions `low..=high`, skipping
    /// subtrees whose rank interval falls outside the query.
    fn collect_range<'a>(
        node: Option<&'a Node<K, V>>,
        low: usize,
        high: usize,
        offset: usize,
        keys: &mut Vec<&'a K>,
    ) {
        let Some(node) = node else {
            return;
        };
        // Ranks offset..rank sit in the left subtree, rank+1.. in the right.
        let rank = offset + size(node.left.as_deref());
        if low < rank {
            Self::collect_range(node.left.as_deref(), low, high, offset, keys);
        }
        if low <= rank && rank <= high {
            keys.push(&node.key);
        }
        if rank < high {
            Self::collect_range(node.right.as_deref(), low, high, rank + 1, keys);
        }
    }

    fn height_inner(node: Option<&Node<K, V>>) -> isize {
        node.map_or(-1, |node| {
            1 + Self::height_inner(node.left.as_deref()).max(Self::height_inner(node.right.as_deref()))
        })
    }
}

// Red-black tree helpers. Rotations and color flips are local O(1)
// repairs; `balance` composes them to restore the left-leaning
// invariants on the way back up a recursive change.
impl<K, V> RankMap<K, V>
where
    K: Ord,
{
    /// Make a right-leaning red link lean to the left.
    ///
    /// The caller guarantees the right link is red.
    fn rotate_left(mut node: Box<Node<K, V>>) -> Box<Node<K, V>> {
        let Some(mut x) = node.right.take() else {
            unreachable!("rotate_left: rotating a null link");
        };
        node.right = x.left.take();
        x.color = node.color;
        node.color = Color::Red;
        x.size = node.size;
        node.update_size();
        x.left = Some(node);
        x
    }

    /// Make a left-leaning red link lean to the right.
    ///
    /// The caller guarantees the left link is red.
    fn rotate_right(mut node: Box<Node<K, V>>) -> Box<Node<K, V>> {
        let Some(mut x) = node.left.take() else {
            unreachable!("rotate_right: rotating a null link");
        };
        node.left = x.right.take();
        x.color = node.color;
        node.color = Color::Red;
        x.size = node.size;
        node.update_size();
        x.right = Some(node);
        x
    }

    /// Toggle the colors of `node` and both its children, merging or
    /// splitting the 2-3 node they form.
    ///
    /// The caller guarantees both children exist and carry the opposite
    /// color of `node`.
    fn flip_colors(node: &mut Node<K, V>) {
        node.color = node.color.flip();
        let left = node.left.as_mut().unwrap();
        left.color = left.color.flip();
        let right = node.right.as_mut().unwrap();
        right.color = right.color.flip();
    }

    /// Assuming `node` is red and both `node.left` and `node.left.left`
    /// are black, make `node.left` or one of its children red.
    fn move_red_left(mut node: Box<Node<K, V>>) -> Box<Node<K, V>> {
        Self::flip_colors(&mut node);
        if is_red(node.right().and_then(Node::left)) {
            let right = node.right.take().unwrap();
            node.right = Some(Self::rotate_right(right));
            node = Self::rotate_left(node);
            Self::flip_colors(&mut node);
        }
        node
    }

    /// Assuming `node` is red and both `node.right` and `node.right.left`
    /// are black, make `node.right` or one of its children red.
    fn move_red_right(mut node: Box<Node<K, V>>) -> Box<Node<K, V>> {
        Self::flip_colors(&mut node);
        if is_red(node.left().and_then(Node::left)) {
            node = Self::rotate_right(node);
            Self::flip_colors(&mut node);
        }
        node
    }

    /// Restore the left-leaning invariants for a subtree whose children
    /// already satisfy them, and refresh the cached size.
    fn balance(mut node: Box<Node<K, V>>) -> Box<Node<K, V>> {
        if is_red(node.right()) {
            node = Self::rotate_left(node);
        }
        if is_red(node.left()) && is_red(node.left().and_then(Node::left)) {
            node = Self::rotate_right(node);
        }
        if is_red(node.left()) && is_red(node.right()) {
            Self::flip_colors(&mut node);
        }
        node.update_size();
        node
    }
}
