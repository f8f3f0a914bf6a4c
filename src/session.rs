use crate::config::{LayoutConfig, TransitionPolicy};
use crate::diff::{Transition, diff_with};
use crate::layout::{LayoutError, LayoutTree, compute_layout};
use crate::model::{ContentProvider, ModelNode};

/// Keeps the last layout so each relayout can be animated from it.
///
/// Callers serialise relayouts: a new one should not start while the previous
/// update's transitions are still being consumed.
#[derive(Debug, Clone)]
pub struct LayoutSession<K> {
    config: LayoutConfig,
    policy: TransitionPolicy,
    current: Option<LayoutTree<K>>,
}

/// Outcome of one relayout.
#[derive(Debug, Clone)]
pub struct LayoutUpdate<'a, K> {
    pub tree: &'a LayoutTree<K>,
    pub transitions: Vec<Transition<K>>,
}

impl<K: Clone + Ord> LayoutSession<K> {
    pub fn new(config: LayoutConfig) -> Self {
        Self {
            config,
            policy: TransitionPolicy::default(),
            current: None,
        }
    }

    pub fn with_policy(mut self, policy: TransitionPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn config(&self) -> &LayoutConfig {
        &self.config
    }

    /// Takes effect on the next relayout.
    pub fn set_config(&mut self, config: LayoutConfig) {
        self.config = config;
    }

    pub fn current(&self) -> Option<&LayoutTree<K>> {
        self.current.as_ref()
    }

    /// Forgets the stored layout; the next relayout animates every node in.
    pub fn clear(&mut self) {
        self.current = None;
    }

    /// Lays out `root`, diffs against the stored layout, and stores the result.
    /// On error the stored layout is kept.
    pub fn relayout<N, P>(
        &mut self,
        root: Option<&N>,
        provider: &P,
    ) -> Result<LayoutUpdate<'_, K>, LayoutError>
    where
        N: ModelNode<Id = K>,
        P: ContentProvider<N> + ?Sized,
    {
        let next = compute_layout(root, provider, &self.config)?;
        let transitions = diff_with(self.current.as_ref(), &next, &self.policy);
        let tree = self.current.insert(next);
        Ok(LayoutUpdate { tree, transitions })
    }
}
