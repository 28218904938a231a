//! # Barnes–Hut Quadtree (2D)
//!
//! This module implements a **2D Barnes–Hut quadtree** for approximating
//! gravitational acceleration in an `N`-body system. The naive `O(N²)`
//! all-pairs sum is replaced by an approximate `O(N log N)` traversal.
//!
//! ## Core Concepts
//!
//! - The domain is recursively subdivided into 4 regions (quadrants).
//! - Each region becomes a node of the quadtree.
//! - Leaf nodes hold a list of bodies; once a leaf holds more than
//!   `leaf_capacity` bodies (and is still larger than `min_cell_size` on
//!   both sides) it splits and pushes its bodies down into children.
//! - Each node stores:
//!   - total mass of its subtree
//!   - center of mass (COM)
//!   - bounding rectangle (for computing size and subdivision)
//!
//! Mass and COM are maintained **incrementally** while inserting: every node
//! on a body's insertion path folds that body in with a running weighted
//! mean, so no separate bottom-up pass is needed after the build.
//!
//! When a leaf splits, its bodies are *redistributed* into children. The
//! splitting node already counted them on their first insertion, so the
//! redistribution only updates the children it routes into.
//!
//! The tree is rebuilt from scratch every step; see
//! [`QuadTree::build`].

use log::trace;

use crate::simulation::params::Parameters;
use crate::simulation::states::{Bounds, PointMass};
use crate::simulation::vector::{NVec2, Vec2Ext};

/// Split rule shared by every node of one tree
#[derive(Debug, Clone, Copy)]
pub struct SplitRule {
    pub leaf_capacity: usize,
    pub min_cell_size: f64,
}

impl SplitRule {
    /// A leaf holding `count` bodies over `bounds` must split
    #[inline]
    fn must_split(&self, count: usize, bounds: &Bounds) -> bool {
        count > self.leaf_capacity
            && bounds.width > self.min_cell_size
            && bounds.height > self.min_cell_size
    }
}

/// A single quadtree node.
///
/// A node is a **leaf** iff it has no children, however many bodies it holds.
/// Children are created lazily, one quadrant at a time, and are owned by the
/// slot they live in: dropping a node drops its whole subtree.
#[derive(Debug)]
pub struct QuadNode {
    pub bounds: Bounds,
    pub mass: f64, // total mass of the subtree
    pub com: NVec2, // center of mass of the subtree
    pub bodies: Vec<PointMass>, // only non-empty on leaves
    pub children: [Option<Box<QuadNode>>; 4], // indexed by Bounds::quadrant_of
}

impl QuadNode {
    /// Fresh, empty node covering `bounds`: zero mass, no bodies, no children.
    ///
    /// This is the only way a node is made; nodes are never cloned.
    pub fn from_bounds(bounds: Bounds) -> Self {
        Self {
            bounds,
            mass: 0.0,
            com: NVec2::zeros(),
            bodies: Vec::new(),
            children: [None, None, None, None],
        }
    }

    pub fn is_leaf(&self) -> bool {
        self.children.iter().all(|c| c.is_none())
    }

    /// Existing children, in quadrant order
    pub fn child_nodes(&self) -> impl Iterator<Item = &QuadNode> {
        self.children.iter().flatten().map(|c| &**c)
    }

    /// Number of bodies stored in leaves of this subtree
    pub fn body_count(&self) -> usize {
        self.bodies.len() + self.child_nodes().map(|c| c.body_count()).sum::<usize>()
    }

    /// Depth of this subtree (a lone leaf has depth 1)
    pub fn depth(&self) -> usize {
        1 + self.child_nodes().map(|c| c.depth()).max().unwrap_or(0)
    }

    /// Insert a body that this subtree has not seen yet.
    ///
    /// - Internal node: route it into the child for its quadrant.
    /// - Leaf: store it; if the leaf is now over capacity and still larger
    ///   than the minimum cell size, split it by redistributing every stored
    ///   body into children.
    ///
    /// Either way, this node's mass and COM then absorb the body.
    pub fn insert_new(&mut self, body: &PointMass, rule: SplitRule) {
        if self.is_leaf() {
            self.bodies.push(*body);

            if rule.must_split(self.bodies.len(), &self.bounds) {
                let held = std::mem::take(&mut self.bodies);
                self.redistribute(&held, rule);
            }
        } else {
            self.route(body, rule);
        }

        self.absorb(body);
    }

    /// Push bodies this node has already accounted for down into its
    /// children. This node's own mass and COM are left untouched; the
    /// children receiving them absorb them as new.
    fn redistribute(&mut self, bodies: &[PointMass], rule: SplitRule) {
        for body in bodies {
            self.route(body, rule);
        }
    }

    /// Insert into the child for the body's quadrant, creating that child
    /// (one quarter of this node's bounds) on first use
    fn route(&mut self, body: &PointMass, rule: SplitRule) {
        let idx = self.bounds.quadrant_of(&body.x);
        let bounds = self.bounds.quadrant(idx);
        self.children[idx]
            .get_or_insert_with(|| Box::new(QuadNode::from_bounds(bounds)))
            .insert_new(body, rule);
    }

    /// Running weighted mean:
    /// com' = (com * m_old + x * m) / (m_old + m)
    fn absorb(&mut self, body: &PointMass) {
        let prev_mass = self.mass;
        self.mass += body.m;

        // zero-mass bodies into an empty node would divide 0 by 0
        if self.mass != 0.0 {
            self.com = (self.com * prev_mass + body.x * body.m) / self.mass;
        }
    }

    /// Approximate acceleration on `body` due to this subtree.
    ///
    /// - `r = com - x`; a zero `r` contributes nothing (self / coincident).
    /// - A leaf whose bounds contain the body contributes nothing: its
    ///   aggregate already includes the body.
    /// - If `size / |r| < theta`, or the node is a leaf, the subtree acts as
    ///   one mass at its COM: `mass / |r|² * normalize(r)`.
    /// - Otherwise the contributions of all existing children are summed.
    ///
    /// `ops` is incremented once per visited node.
    pub fn approximate_acceleration(&self, body: &PointMass, theta: f64, ops: &mut u64) -> NVec2 {
        *ops += 1;

        let r = self.com - body.x;
        let dist2 = r.square_length();
        if dist2 == 0.0 {
            return NVec2::zeros();
        }

        let leaf = self.is_leaf();
        if leaf && self.bounds.contains(&body.x) {
            return NVec2::zeros();
        }

        let dist = dist2.sqrt();
        let size = self.bounds.extent();

        if size / dist < theta || leaf {
            // far enough (or nothing finer to look at): one pseudo-body at COM
            r.tolerant_normalize() * (self.mass / dist2)
        } else {
            let mut acc = NVec2::zeros();
            for child in self.child_nodes() {
                acc += child.approximate_acceleration(body, theta, ops);
            }
            acc
        }
    }
}

/// A quadtree built over one snapshot of the bodies
#[derive(Debug)]
pub struct QuadTree {
    pub root: QuadNode,
    pub rule: SplitRule,
}

impl QuadTree {
    /// Empty tree whose root covers `domain`
    pub fn new(domain: Bounds, rule: SplitRule) -> Self {
        Self {
            root: QuadNode::from_bounds(domain),
            rule,
        }
    }

    /// Build a fresh tree over `domain` and insert every body.
    ///
    /// Only the domain geometry carries over between steps; aggregates,
    /// bodies and children all start empty.
    pub fn build(domain: Bounds, bodies: &[PointMass], params: &Parameters) -> Self {
        let rule = SplitRule {
            leaf_capacity: params.leaf_capacity,
            min_cell_size: params.min_cell_size,
        };
        let mut tree = QuadTree::new(domain, rule);
        for body in bodies {
            tree.insert(body);
        }

        trace!(
            "quadtree built: {} bodies, depth {}, total mass {:.6e}",
            bodies.len(),
            tree.root.depth(),
            tree.root.mass
        );

        tree
    }

    pub fn insert(&mut self, body: &PointMass) {
        self.root.insert_new(body, self.rule);
    }

    /// Net approximate acceleration on `body`, counting visited nodes in `ops`
    pub fn acceleration_on(&self, body: &PointMass, theta: f64, ops: &mut u64) -> NVec2 {
        self.root.approximate_acceleration(body, theta, ops)
    }
}
