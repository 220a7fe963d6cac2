//! Depth-first enumeration of the regions at one tree level.
//!
//! The walk visits nodes in insertion order: the first continent's countries
//! (and their cities) before the second continent. That order is the
//! tie-break for every "first match" rule in the query services.

use crate::{Granularity, RegionNode, Tree};

/// A region yielded by [`RegionWalk`] with its labels from the root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegionEntry<'a> {
    /// The region itself.
    pub node: &'a RegionNode,
    /// Labels from the continent down to `node`, excluding `World`.
    pub path: Vec<&'a str>,
}

impl RegionEntry<'_> {
    /// Path labels as owned strings.
    #[must_use]
    pub fn owned_path(&self) -> Vec<String> {
        self.path.iter().map(|label| (*label).to_owned()).collect()
    }
}

/// Lazy depth-first iterator over every region at one depth.
///
/// Created by [`Tree::regions`] or [`Tree::cities`]; calling either again
/// starts a fresh walk.
#[derive(Debug, Clone)]
pub struct RegionWalk<'a> {
    target_depth: usize,
    stack: Vec<std::slice::Iter<'a, RegionNode>>,
    path: Vec<&'a str>,
}

impl<'a> RegionWalk<'a> {
    fn new(root: &'a RegionNode, granularity: Granularity) -> Self {
        Self {
            target_depth: granularity.depth(),
            stack: vec![root.children().iter()],
            path: Vec::with_capacity(granularity.depth()),
        }
    }
}

impl<'a> Iterator for RegionWalk<'a> {
    type Item = RegionEntry<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let depth = self.stack.len();
            let frame = self.stack.last_mut()?;
            let Some(node) = frame.next() else {
                self.stack.pop();
                continue;
            };
            self.path.truncate(depth - 1);
            self.path.push(node.label());
            if depth == self.target_depth {
                return Some(RegionEntry {
                    node,
                    path: self.path.clone(),
                });
            }
            self.stack.push(node.children().iter());
        }
    }
}

impl Tree {
    /// Walk every region at `granularity` in depth-first insertion order.
    #[must_use]
    pub fn regions(&self, granularity: Granularity) -> RegionWalk<'_> {
        RegionWalk::new(self.root(), granularity)
    }

    /// Walk every city, synthetic `"0"` cities included, yielding
    /// `(city, [continent, country, city])` entries.
    ///
    /// # Examples
    /// ```
    /// use songscape_core::{Song, Tree};
    ///
    /// # fn main() -> Result<(), songscape_core::TreeError> {
    /// let mut tree = Tree::new();
    /// tree.insert_region_path(&["Asia", "Japan", "Tokyo"])?;
    /// tree.attach_song(&["Europe", "Iceland"], Song::new("t", "a", 1, 1)?)?;
    /// let paths: Vec<_> = tree.cities().map(|entry| entry.path).collect();
    /// assert_eq!(paths, [["Asia", "Japan", "Tokyo"], ["Europe", "Iceland", "0"]]);
    /// # Ok(())
    /// # }
    /// ```
    #[must_use]
    pub fn cities(&self) -> RegionWalk<'_> {
        self.regions(Granularity::City)
    }
}
