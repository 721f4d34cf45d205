//! Binary space partition tree
//!
//! The tree lives in an arena: nodes are addressed by [`NodeId`] and an
//! internal node stores the ids of its two children. Children always tile
//! their parent exactly, with no gap and no overlap.

use serde::{Deserialize, Serialize};

use super::rect::{Point, Rect, Size};
use super::room::Room;
use crate::rng::RandomSource;

/// Index of a node in a [`PartitionTree`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct NodeId(pub usize);

/// Direction of a split
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SplitAxis {
    /// Cut across the height: `left` is the top half, `right` the bottom
    Horizontal,
    /// Cut across the width: `left` is the west half, `right` the east
    Vertical,
}

/// One region of the partition
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PartitionNode {
    pub area: Rect,
    pub depth: u32,
    /// `(left, right)` for internal nodes
    pub children: Option<(NodeId, NodeId)>,
    /// Set during room placement, leaves only
    pub room: Option<Room>,
}

impl PartitionNode {
    fn new(area: Rect, depth: u32) -> Self {
        Self {
            area,
            depth,
            children: None,
            room: None,
        }
    }

    pub fn is_leaf(&self) -> bool {
        self.children.is_none()
    }
}

/// Arena-backed partition tree; the root is always node 0
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PartitionTree {
    nodes: Vec<PartitionNode>,
}

impl PartitionTree {
    pub const ROOT: NodeId = NodeId(0);

    /// Recursively split `area` until `max_depth` is reached or a region is
    /// too small to yield two leaves of at least `min_leaf` on the chosen axis.
    pub fn build(area: Rect, max_depth: u32, min_leaf: Size, rng: &mut impl RandomSource) -> Self {
        let mut tree = Self {
            nodes: vec![PartitionNode::new(area, 0)],
        };
        tree.split(Self::ROOT, max_depth, min_leaf, rng);
        log::debug!(
            "partitioned {} into {} nodes, {} leaves",
            area,
            tree.nodes.len(),
            tree.leaf_count()
        );
        tree
    }

    fn split(&mut self, id: NodeId, max_depth: u32, min_leaf: Size, rng: &mut impl RandomSource) {
        let area = self.nodes[id.0].area;
        let depth = self.nodes[id.0].depth;
        if depth >= max_depth {
            return;
        }

        let axis = if rng.coin_flip() {
            SplitAxis::Horizontal
        } else {
            SplitAxis::Vertical
        };

        let (left, right) = match axis {
            SplitAxis::Horizontal => {
                if area.height < min_leaf.height.saturating_mul(2) {
                    return; // Can't split this direction
                }
                let split_y = rng.range_int(min_leaf.height, area.height - min_leaf.height + 1);
                (
                    Rect::new(area.x, area.y, area.width, split_y),
                    Rect::new(area.x, area.y + split_y, area.width, area.height - split_y),
                )
            }
            SplitAxis::Vertical => {
                if area.width < min_leaf.width.saturating_mul(2) {
                    return; // Can't split this direction
                }
                let split_x = rng.range_int(min_leaf.width, area.width - min_leaf.width + 1);
                (
                    Rect::new(area.x, area.y, split_x, area.height),
                    Rect::new(area.x + split_x, area.y, area.width - split_x, area.height),
                )
            }
        };

        let left = self.push(left, depth + 1);
        let right = self.push(right, depth + 1);
        self.nodes[id.0].children = Some((left, right));

        self.split(left, max_depth, min_leaf, rng);
        self.split(right, max_depth, min_leaf, rng);
    }

    fn push(&mut self, area: Rect, depth: u32) -> NodeId {
        self.nodes.push(PartitionNode::new(area, depth));
        NodeId(self.nodes.len() - 1)
    }

    pub fn node(&self, id: NodeId) -> &PartitionNode {
        &self.nodes[id.0]
    }

    pub(crate) fn node_mut(&mut self, id: NodeId) -> &mut PartitionNode {
        &mut self.nodes[id.0]
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// All nodes in arena order
    pub fn nodes(&self) -> impl Iterator<Item = (NodeId, &PartitionNode)> {
        self.nodes.iter().enumerate().map(|(i, n)| (NodeId(i), n))
    }

    /// Leaf ids in depth-first, left-to-right order
    pub fn leaves(&self) -> Vec<NodeId> {
        let mut out = Vec::new();
        let mut stack = vec![Self::ROOT];
        while let Some(id) = stack.pop() {
            match self.nodes[id.0].children {
                Some((left, right)) => {
                    stack.push(right);
                    stack.push(left);
                }
                None => out.push(id),
            }
        }
        out
    }

    pub fn leaf_count(&self) -> usize {
        self.nodes.iter().filter(|n| n.is_leaf()).count()
    }

    /// Centers of every room placed under `id`
    pub fn room_centers(&self, id: NodeId) -> Vec<Point> {
        let mut centers = Vec::new();
        self.collect_centers(id, &mut centers);
        centers
    }

    fn collect_centers(&self, id: NodeId, centers: &mut Vec<Point>) {
        let node = &self.nodes[id.0];
        if let Some(room) = &node.room {
            centers.push(room.center);
        }
        if let Some((left, right)) = node.children {
            self.collect_centers(left, centers);
            self.collect_centers(right, centers);
        }
    }
}
