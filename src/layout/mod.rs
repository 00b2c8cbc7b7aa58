// Layout engine: a tree of equal-split stacks with colored tiles at the leaves.

use std::sync::atomic::{AtomicU64, Ordering};

use crate::config::palette::Color;
use crate::geometry::{split, Axis, Rect};

/// Global monotonically increasing node ID counter.
static NEXT_NODE_ID: AtomicU64 = AtomicU64::new(1);

/// Identity of a tile or stack. Unique for the lifetime of the process and
/// only ever compared for equality.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(u64);

impl NodeId {
    /// Generate a new unique NodeId.
    pub fn next() -> Self {
        Self(NEXT_NODE_ID.fetch_add(1, Ordering::Relaxed))
    }
}

/// A leaf: one colored rectangle on the canvas.
///
/// `Clone` keeps the identity (a snapshot of the same tile); use
/// [`Tile::duplicate`] for a fresh node.
#[derive(Debug, Clone, PartialEq)]
pub struct Tile {
    id: NodeId,
    pub rect: Rect,
    pub color: Color,
}

impl Tile {
    pub fn new(rect: Rect, color: Color) -> Self {
        Self {
            id: NodeId::next(),
            rect,
            color,
        }
    }

    pub fn id(&self) -> NodeId {
        self.id
    }

    /// A new tile with the same rect and color but its own identity.
    pub fn duplicate(&self) -> Self {
        Self::new(self.rect, self.color)
    }
}

/// A container that partitions its rect into equal slices for its children.
#[derive(Debug, Clone, PartialEq)]
pub struct Stack {
    id: NodeId,
    children: Vec<Node>,
    axis: Axis,
    rect: Rect,
}

/// A node in the layout tree.
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    Tile(Tile),
    Stack(Stack),
}

impl Node {
    pub fn id(&self) -> NodeId {
        match self {
            Node::Tile(tile) => tile.id,
            Node::Stack(stack) => stack.id,
        }
    }

    pub fn rect(&self) -> Rect {
        match self {
            Node::Tile(tile) => tile.rect,
            Node::Stack(stack) => stack.rect,
        }
    }

    /// Assign a new rect. Stacks re-flow their children immediately.
    pub fn set_rect(&mut self, rect: Rect) {
        match self {
            Node::Tile(tile) => tile.rect = rect,
            Node::Stack(stack) => stack.set_rect(rect),
        }
    }

    pub fn is_tile(&self) -> bool {
        matches!(self, Node::Tile(_))
    }

    pub fn as_tile(&self) -> Option<&Tile> {
        match self {
            Node::Tile(tile) => Some(tile),
            Node::Stack(_) => None,
        }
    }

    pub fn as_stack(&self) -> Option<&Stack> {
        match self {
            Node::Tile(_) => None,
            Node::Stack(stack) => Some(stack),
        }
    }
}

impl Stack {
    /// Create an empty stack with a zero rect.
    pub fn new(axis: Axis) -> Self {
        Self {
            id: NodeId::next(),
            children: Vec::new(),
            axis,
            rect: Rect::ZERO,
        }
    }

    /// Create a stack that owns `children` and lays them out inside `rect`.
    pub fn with_children(children: Vec<Node>, axis: Axis, rect: Rect) -> Self {
        let mut stack = Self {
            id: NodeId::next(),
            children,
            axis,
            rect,
        };
        stack.reflow();
        stack
    }

    pub fn id(&self) -> NodeId {
        self.id
    }

    pub fn axis(&self) -> Axis {
        self.axis
    }

    /// Change the arrangement axis. Rects are not touched until the next
    /// reflow.
    pub fn set_axis(&mut self, axis: Axis) {
        self.axis = axis;
    }

    pub fn rect(&self) -> Rect {
        self.rect
    }

    /// Assign a new rect and cascade the change down the subtree.
    pub fn set_rect(&mut self, rect: Rect) {
        self.rect = rect;
        self.reflow();
    }

    pub fn children(&self) -> &[Node] {
        &self.children
    }

    pub fn len(&self) -> usize {
        self.children.len()
    }

    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }

    /// Recompute every child's rect as an equal slice of this stack's rect.
    /// Child stacks re-flow their own children in turn.
    pub fn reflow(&mut self) {
        let rects = split(self.rect, self.children.len(), self.axis);
        for (child, rect) in self.children.iter_mut().zip(rects) {
            child.set_rect(rect);
        }
    }

    /// Assign explicit rects to children in order, cascading into child
    /// stacks. Children beyond `rects` are left alone. The stack's own rect
    /// is unchanged, so the next reflow restores equal slices.
    pub fn place_children(&mut self, rects: &[Rect]) {
        for (child, rect) in self.children.iter_mut().zip(rects) {
            child.set_rect(*rect);
        }
    }

    /// Lay the subtree out inside `viewport` and return every leaf tile in
    /// depth-first order. The cached rects in the tree are updated on the way.
    pub fn collect_tiles(&mut self, viewport: Rect) -> Vec<Tile> {
        let mut tiles = Vec::new();
        self.collect_tiles_into(viewport, &mut tiles);
        tiles
    }

    fn collect_tiles_into(&mut self, viewport: Rect, out: &mut Vec<Tile>) {
        self.rect = viewport;
        let rects = split(viewport, self.children.len(), self.axis);
        for (child, rect) in self.children.iter_mut().zip(rects) {
            match child {
                Node::Tile(tile) => {
                    tile.rect = rect;
                    out.push(tile.clone());
                }
                Node::Stack(stack) => stack.collect_tiles_into(rect, out),
            }
        }
    }

    /// Leaf tiles in depth-first order with their cached rects, as last
    /// assigned by a reflow or an in-place preview adjustment.
    pub fn tiles(&self) -> Vec<&Tile> {
        let mut tiles = Vec::new();
        self.tiles_into(&mut tiles);
        tiles
    }

    fn tiles_into<'a>(&'a self, out: &mut Vec<&'a Tile>) {
        for child in &self.children {
            match child {
                Node::Tile(tile) => out.push(tile),
                Node::Stack(stack) => stack.tiles_into(out),
            }
        }
    }

    /// Every stack in the subtree, self first, in pre-order.
    pub fn collect_stacks(&self) -> Vec<&Stack> {
        let mut stacks = vec![self];
        for child in &self.children {
            if let Node::Stack(stack) = child {
                stacks.extend(stack.collect_stacks());
            }
        }
        stacks
    }

    /// Every stack in the subtree paired with the rect it occupies when the
    /// subtree is laid out inside `viewport`. Self first, pre-order.
    pub fn collect_stacks_with_rect(&self, viewport: Rect) -> Vec<(&Stack, Rect)> {
        let mut stacks = vec![(self, viewport)];
        let rects = split(viewport, self.children.len(), self.axis);
        for (child, rect) in self.children.iter().zip(rects) {
            if let Node::Stack(stack) = child {
                stacks.extend(stack.collect_stacks_with_rect(rect));
            }
        }
        stacks
    }

    /// Insert a copy of `tile` with a new identity at `index`.
    /// Indices past the end append.
    pub fn add_tile(&mut self, tile: &Tile, index: usize) -> NodeId {
        self.insert_node(Node::Tile(tile.duplicate()), index)
    }

    /// Insert a copy of `stack` (same children and axis, new identity) at
    /// `index`. Indices past the end append.
    pub fn add_stack(&mut self, stack: &Stack, index: usize) -> NodeId {
        let copy = Stack {
            id: NodeId::next(),
            children: stack.children.clone(),
            axis: stack.axis,
            rect: stack.rect,
        };
        self.insert_node(Node::Stack(copy), index)
    }

    fn insert_node(&mut self, node: Node, index: usize) -> NodeId {
        let id = node.id();
        let index = index.min(self.children.len());
        self.children.insert(index, node);
        id
    }

    /// Detach the child at `index`. Returns None if out of range.
    pub fn remove_child(&mut self, index: usize) -> Option<Node> {
        if index < self.children.len() {
            Some(self.children.remove(index))
        } else {
            None
        }
    }

    /// Drop every child. The stack keeps its rect.
    pub fn clear(&mut self) {
        self.children.clear();
    }

    /// Position of a direct child by identity.
    pub fn position_of(&self, id: NodeId) -> Option<usize> {
        self.children.iter().position(|child| child.id() == id)
    }

    /// The stack in this subtree whose direct children include `id`.
    pub fn parent_of(&self, id: NodeId) -> Option<&Stack> {
        self.collect_stacks()
            .into_iter()
            .find(|stack| stack.position_of(id).is_some())
    }

    /// Find a stack in this subtree (self included) by identity.
    pub fn stack_mut(&mut self, id: NodeId) -> Option<&mut Stack> {
        if self.id == id {
            return Some(self);
        }
        self.children.iter_mut().find_map(|child| match child {
            Node::Stack(stack) => stack.stack_mut(id),
            Node::Tile(_) => None,
        })
    }

    /// Find a tile in this subtree by identity.
    pub fn tile_mut(&mut self, id: NodeId) -> Option<&mut Tile> {
        self.children.iter_mut().find_map(|child| match child {
            Node::Tile(tile) if tile.id == id => Some(tile),
            Node::Tile(_) => None,
            Node::Stack(stack) => stack.tile_mut(id),
        })
    }
}

impl Default for Stack {
    fn default() -> Self {
        Self::new(Axis::default())
    }
}

/// Test helpers shared with the controller tests.
#[cfg(test)]
pub(crate) mod test_support {
    use super::*;

    const EPS: f32 = 1e-3;

    fn rect_approx(a: Rect, b: Rect) -> bool {
        (a.x - b.x).abs() < EPS
            && (a.y - b.y).abs() < EPS
            && (a.width - b.width).abs() < EPS
            && (a.height - b.height).abs() < EPS
    }

    /// Assert that every stack's children tile the stack's rect exactly,
    /// in order, along its axis. Checked recursively.
    pub(crate) fn assert_partitioned(stack: &Stack) {
        let expected = split(stack.rect(), stack.len(), stack.axis());
        for (child, slot) in stack.children().iter().zip(expected) {
            assert!(
                rect_approx(child.rect(), slot),
                "child {:?} of stack {:?} has rect {:?}, expected {:?}",
                child.id(),
                stack.id(),
                child.rect(),
                slot
            );
            if let Node::Stack(inner) = child {
                assert_partitioned(inner);
            }
        }
    }
}
