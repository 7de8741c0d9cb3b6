//! In-memory arena over the `category` table.
//!
//! The schema stores the tree as parent pointers and does not enforce
//! acyclicity, so every walk here tracks visited ids and stops on a repeat.

use crate::entity::category;
use std::collections::{BTreeMap, BTreeSet, VecDeque};

#[derive(Debug, Clone)]
struct Node {
    category: category::Model,
    children: Vec<i32>,
}

/// Categories indexed by id, with parent and child links.
#[derive(Debug, Clone, Default)]
pub struct CategoryTree {
    nodes: BTreeMap<i32, Node>,
}

impl CategoryTree {
    /// Build the arena from every row of the `category` table.
    ///
    /// A parent id that is not among `categories` is kept on the model but
    /// the category is treated as a root.
    pub fn new<I>(categories: I) -> Self
    where
        I: IntoIterator<Item = category::Model>,
    {
        let mut nodes: BTreeMap<i32, Node> = categories
            .into_iter()
            .map(|category| {
                (
                    category.id,
                    Node {
                        category,
                        children: Vec::new(),
                    },
                )
            })
            .collect();

        let links: Vec<(i32, i32)> = nodes
            .values()
            .filter_map(|node| Some((node.category.parent_id?, node.category.id)))
            .collect();
        for (parent, child) in links {
            if let Some(node) = nodes.get_mut(&parent) {
                node.children.push(child);
            }
        }

        Self { nodes }
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn contains(&self, id: i32) -> bool {
        self.nodes.contains_key(&id)
    }

    pub fn get(&self, id: i32) -> Option<&category::Model> {
        self.nodes.get(&id).map(|node| &node.category)
    }

    /// Parent id, if the parent is present in the tree.
    pub fn parent(&self, id: i32) -> Option<i32> {
        let parent = self.nodes.get(&id)?.category.parent_id?;
        self.contains(parent).then_some(parent)
    }

    /// Direct children in ascending id order.
    pub fn children(&self, id: i32) -> &[i32] {
        self.nodes
            .get(&id)
            .map(|node| node.children.as_slice())
            .unwrap_or_default()
    }

    /// Categories without a (present) parent, in ascending id order.
    pub fn roots(&self) -> impl Iterator<Item = &category::Model> + '_ {
        self.nodes
            .values()
            .filter(|node| self.parent(node.category.id).is_none())
            .map(|node| &node.category)
    }

    /// Ancestors of `id`, nearest first.
    pub fn ancestors(&self, id: i32) -> Vec<i32> {
        let mut seen = BTreeSet::from([id]);
        let mut ancestors = Vec::new();
        let mut current = id;
        while let Some(parent) = self.parent(current) {
            if !seen.insert(parent) {
                break;
            }
            ancestors.push(parent);
            current = parent;
        }
        ancestors
    }

    /// Number of ancestors; roots have depth 0.
    pub fn depth(&self, id: i32) -> Option<usize> {
        self.contains(id).then(|| self.ancestors(id).len())
    }

    /// Every category below `id`, breadth first.
    ///
    /// Reversing the result yields an order in which each category comes
    /// before its parent.
    pub fn descendants(&self, id: i32) -> Vec<i32> {
        let mut seen = BTreeSet::from([id]);
        let mut queue = VecDeque::from([id]);
        let mut descendants = Vec::new();
        while let Some(current) = queue.pop_front() {
            for &child in self.children(current) {
                if seen.insert(child) {
                    descendants.push(child);
                    queue.push_back(child);
                }
            }
        }
        descendants
    }

    /// `true` when making `parent` the parent of `id` would close a loop.
    pub fn would_create_cycle(&self, id: i32, parent: i32) -> bool {
        id == parent || self.ancestors(parent).contains(&id)
    }

    /// Ids of a loop already present in the stored parent pointers, if any.
    pub fn find_cycle(&self) -> Option<Vec<i32>> {
        let mut cleared = BTreeSet::new();
        for &start in self.nodes.keys() {
            let mut path = Vec::new();
            let mut current = Some(start);
            while let Some(id) = current {
                if cleared.contains(&id) {
                    break;
                }
                if let Some(at) = path.iter().position(|&seen| seen == id) {
                    return Some(path.split_off(at));
                }
                path.push(id);
                current = self.parent(id);
            }
            cleared.extend(path);
        }
        None
    }
}
