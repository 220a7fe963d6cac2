//! The region hierarchy: construction and navigation.
//!
//! A [`Tree`] has a fixed shape. Depth 0 is the `World` root, depth 1 holds
//! continents, depth 2 countries and depth 3 cities. Only cities hold songs,
//! and a node's content is a [`NodeBody`] variant so a node can never hold
//! both regions and songs.

use crate::{MAX_RANK, Song, TreeError};

/// Label of the root node.
pub const ROOT_LABEL: &str = "World";

/// Label of the city created for a country without a city breakdown.
pub const SYNTHETIC_CITY_LABEL: &str = "0";

pub(crate) const COUNTRY_DEPTH: usize = 2;
pub(crate) const CITY_DEPTH: usize = 3;

/// Content of a [`RegionNode`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NodeBody {
    /// Child regions in first-seen order. New nodes start here, empty.
    Regions(Vec<RegionNode>),
    /// Up to five songs in strictly ascending rank.
    Songs(Vec<Song>),
}

/// A continent, country, city or the root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegionNode {
    label: String,
    body: NodeBody,
}

impl RegionNode {
    fn new(label: &str) -> Self {
        Self {
            label: label.to_owned(),
            body: NodeBody::Regions(Vec::new()),
        }
    }

    /// Label with its source casing.
    #[must_use]
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Tagged node content.
    #[must_use]
    pub const fn body(&self) -> &NodeBody {
        &self.body
    }

    /// Child regions; empty for song-holding nodes.
    #[must_use]
    pub fn children(&self) -> &[Self] {
        match &self.body {
            NodeBody::Regions(children) => children,
            NodeBody::Songs(_) => &[],
        }
    }

    /// Song leaves in rank order; empty for region-holding nodes.
    #[must_use]
    pub fn songs(&self) -> &[Song] {
        match &self.body {
            NodeBody::Songs(songs) => songs,
            NodeBody::Regions(_) => &[],
        }
    }

    /// Direct child with the given label.
    #[must_use]
    pub fn child(&self, label: &str) -> Option<&Self> {
        self.children().iter().find(|child| child.label == label)
    }

    #[expect(
        clippy::indexing_slicing,
        reason = "index comes from a successful search or the push just above"
    )]
    fn child_or_insert(&mut self, label: &str) -> Result<&mut Self, TreeError> {
        let NodeBody::Regions(children) = &mut self.body else {
            return Err(TreeError::HoldsSongs {
                label: self.label.clone(),
            });
        };
        let index = children
            .iter()
            .position(|child| child.label == label)
            .unwrap_or_else(|| {
                children.push(Self::new(label));
                children.len() - 1
            });
        Ok(&mut children[index])
    }

    fn push_song(&mut self, song: Song) -> Result<(), TreeError> {
        if matches!(&self.body, NodeBody::Regions(children) if children.is_empty()) {
            self.body = NodeBody::Songs(Vec::with_capacity(usize::from(MAX_RANK)));
        }
        let NodeBody::Songs(songs) = &mut self.body else {
            return Err(TreeError::HoldsRegions {
                label: self.label.clone(),
            });
        };
        if songs.len() >= usize::from(MAX_RANK) {
            return Err(TreeError::CityFull {
                label: self.label.clone(),
            });
        }
        if let Some(last) = songs.last()
            && song.rank() <= last.rank()
        {
            return Err(TreeError::RankOutOfOrder {
                label: self.label.clone(),
                rank: song.rank(),
                previous: last.rank(),
            });
        }
        songs.push(song);
        Ok(())
    }
}

/// Owner of the region hierarchy.
///
/// Built once through [`Tree::insert_region_path`] and [`Tree::attach_song`],
/// then shared by reference with the query services.
///
/// # Examples
/// ```
/// use songscape_core::{Song, Tree, SYNTHETIC_CITY_LABEL};
///
/// # fn main() -> Result<(), songscape_core::TreeError> {
/// let mut tree = Tree::new();
/// tree.attach_song(&["Europe", "Iceland"], Song::new("Hey", "Band", 7, 1)?)?;
/// let city = tree.navigate(&["Europe", "Iceland", SYNTHETIC_CITY_LABEL])?;
/// assert_eq!(city.songs().len(), 1);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tree {
    root: RegionNode,
}

impl Default for Tree {
    fn default() -> Self {
        Self::new()
    }
}

impl Tree {
    /// Create a tree holding only the empty `World` root.
    #[must_use]
    pub fn new() -> Self {
        Self {
            root: RegionNode::new(ROOT_LABEL),
        }
    }

    /// The `World` root.
    #[must_use]
    pub const fn root(&self) -> &RegionNode {
        &self.root
    }

    /// Ensure every region along `path` exists, creating missing children in
    /// first-seen order. Repeating a path is a no-op.
    ///
    /// # Errors
    /// Returns [`TreeError::EmptyPath`] or [`TreeError::PathTooDeep`] for a
    /// path outside `1..=3` segments, and [`TreeError::HoldsSongs`] when the
    /// path descends through a city that already holds songs.
    pub fn insert_region_path<S: AsRef<str>>(&mut self, path: &[S]) -> Result<(), TreeError> {
        self.ensure_path(path).map(|_| ())
    }

    /// Append `song` to the city at `city_path`.
    ///
    /// A two-segment `[continent, country]` path targets the country's
    /// synthetic `"0"` city. Missing regions along the path are created. The
    /// song is neither reordered nor deduplicated.
    ///
    /// # Errors
    /// Returns [`TreeError::NotACityPath`] for paths that are not two or three
    /// segments long, [`TreeError::HoldsRegions`] when the target already has
    /// child regions, [`TreeError::CityFull`] for a sixth song and
    /// [`TreeError::RankOutOfOrder`] when ranks do not strictly ascend.
    pub fn attach_song<S: AsRef<str>>(
        &mut self,
        city_path: &[S],
        song: Song,
    ) -> Result<(), TreeError> {
        let city = match city_path.len() {
            COUNTRY_DEPTH => self
                .ensure_path(city_path)?
                .child_or_insert(SYNTHETIC_CITY_LABEL)?,
            CITY_DEPTH => self.ensure_path(city_path)?,
            depth => return Err(TreeError::NotACityPath { depth }),
        };
        city.push_song(song)
    }

    /// Descend from the root label by label.
    ///
    /// An empty path returns the root.
    ///
    /// # Errors
    /// Returns [`TreeError::SegmentNotFound`] naming the first absent label.
    pub fn navigate<S: AsRef<str>>(&self, path: &[S]) -> Result<&RegionNode, TreeError> {
        path.iter().try_fold(&self.root, |node, segment| {
            let label = segment.as_ref();
            node.child(label)
                .ok_or_else(|| TreeError::SegmentNotFound {
                    parent: node.label.clone(),
                    label: label.to_owned(),
                })
        })
    }

    fn ensure_path<S: AsRef<str>>(&mut self, path: &[S]) -> Result<&mut RegionNode, TreeError> {
        if path.is_empty() {
            return Err(TreeError::EmptyPath);
        }
        if path.len() > CITY_DEPTH {
            return Err(TreeError::PathTooDeep {
                path: path.iter().map(|s| s.as_ref().to_owned()).collect(),
            });
        }
        let mut node = &mut self.root;
        for segment in path {
            node = node.child_or_insert(segment.as_ref())?;
        }
        Ok(node)
    }
}
