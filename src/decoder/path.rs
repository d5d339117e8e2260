//! Candidate paths through the outcome lattice.
//!
//! Paths form a tree that only grows forward: siblings share their parent
//! through `Rc`, and a path lives exactly as long as some survivor still
//! reaches it.

use std::fmt;
use std::rc::Rc;

/// An immutable partial label sequence: its last outcome, its accumulated
/// score and the path it extends.
pub struct Path<O> {
    outcome: O,
    score: f64,
    depth: usize,
    parent: Option<Rc<Path<O>>>,
}

impl<O> Path<O> {
    /// A path covering position 0 only
    pub fn root(outcome: O, score: f64) -> Rc<Self> {
        Rc::new(Self {
            outcome,
            score,
            depth: 1,
            parent: None,
        })
    }

    /// A path extending `parent` by one position
    pub fn extend(parent: &Rc<Self>, outcome: O, score: f64) -> Rc<Self> {
        Rc::new(Self {
            outcome,
            score,
            depth: parent.depth + 1,
            parent: Some(Rc::clone(parent)),
        })
    }

    pub fn outcome(&self) -> &O {
        &self.outcome
    }

    pub fn score(&self) -> f64 {
        self.score
    }

    /// Number of positions covered
    pub fn depth(&self) -> usize {
        self.depth
    }

    pub fn parent(&self) -> Option<&Rc<Path<O>>> {
        self.parent.as_ref()
    }

    /// Outcomes from position 0 to this path's position, oldest first.
    pub fn history(&self) -> Vec<O>
    where
        O: Clone,
    {
        let mut outcomes = Vec::with_capacity(self.depth);
        let mut node = Some(self);
        while let Some(path) = node {
            outcomes.push(path.outcome.clone());
            node = path.parent.as_deref();
        }
        outcomes.reverse();
        outcomes
    }

    /// The last `limit` outcomes of [`Path::history`], oldest first.
    pub fn recent_history(&self, limit: usize) -> Vec<O>
    where
        O: Clone,
    {
        let mut outcomes = Vec::with_capacity(limit.min(self.depth));
        let mut node = Some(self);
        while let Some(path) = node {
            if outcomes.len() == limit {
                break;
            }
            outcomes.push(path.outcome.clone());
            node = path.parent.as_deref();
        }
        outcomes.reverse();
        outcomes
    }
}

// Prints the parent's depth only; walking ancestors would recurse once per position.
impl<O: fmt::Debug> fmt::Debug for Path<O> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Path")
            .field("outcome", &self.outcome)
            .field("score", &self.score)
            .field("depth", &self.depth)
            .field("parent_depth", &self.parent.as_ref().map(|p| p.depth))
            .finish()
    }
}

impl<O> Drop for Path<O> {
    // Unlinks the ancestor chain iteratively; the default recursive drop
    // overflows the stack on long sequences.
    fn drop(&mut self) {
        let mut next = self.parent.take();
        while let Some(rc) = next {
            match Rc::try_unwrap(rc) {
                Ok(mut path) => next = path.parent.take(),
                // still shared with another survivor
                Err(_) => break,
            }
        }
    }
}
