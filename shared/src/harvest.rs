//! Tree harvesting: chop a standing tree enough times and it falls, leaving a stump that
//! grows back into a fresh tree after a fixed delay.
//!
//! Time is a monotonic `Duration` since an arbitrary origin (the client uses app uptime),
//! which keeps the state machine free of any clock and easy to test.

use crate::constants::{CHOPS_TO_FELL, TREE_RESPAWN_DELAY};
use std::{collections::BTreeMap, time::Duration};

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TreeId(pub u32);

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TreeState {
    Standing { chops: u8 },
    /// Hidden tree, visible stump.
    Felled { at: Duration },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ChopOutcome {
    /// The tree took a chop and is still standing.
    Chopped { chops: u8 },
    /// This chop brought the tree down.
    Felled,
    /// The tree is a stump; chops do nothing until it regrows.
    AlreadyFelled,
    UnknownTree,
}

#[derive(Clone, Debug)]
pub struct Grove {
    trees: BTreeMap<TreeId, TreeState>,
    chops_to_fell: u8,
    respawn_delay: Duration,
}

impl Grove {
    /// A grove where every tree stands untouched.
    pub fn new(ids: impl IntoIterator<Item = TreeId>) -> Self {
        Self::with_rules(ids, CHOPS_TO_FELL, TREE_RESPAWN_DELAY)
    }

    pub fn with_rules(
        ids: impl IntoIterator<Item = TreeId>,
        chops_to_fell: u8,
        respawn_delay: Duration,
    ) -> Self {
        Self {
            trees: ids
                .into_iter()
                .map(|id| (id, TreeState::Standing { chops: 0 }))
                .collect(),
            chops_to_fell: chops_to_fell.max(1),
            respawn_delay,
        }
    }

    pub fn state(&self, id: TreeId) -> Option<TreeState> {
        self.trees.get(&id).copied()
    }

    pub fn is_felled(&self, id: TreeId) -> bool {
        matches!(self.state(id), Some(TreeState::Felled { .. }))
    }

    pub fn iter(&self) -> impl Iterator<Item = (TreeId, TreeState)> + '_ {
        self.trees.iter().map(|(id, state)| (*id, *state))
    }

    /// Register one chop on `id` at time `now`.
    pub fn chop(&mut self, id: TreeId, now: Duration) -> ChopOutcome {
        let Some(state) = self.trees.get_mut(&id) else {
            return ChopOutcome::UnknownTree;
        };

        match *state {
            TreeState::Felled { .. } => ChopOutcome::AlreadyFelled,
            TreeState::Standing { chops } => {
                let chops = chops.saturating_add(1);
                if chops >= self.chops_to_fell {
                    *state = TreeState::Felled { at: now };
                    ChopOutcome::Felled
                } else {
                    *state = TreeState::Standing { chops };
                    ChopOutcome::Chopped { chops }
                }
            }
        }
    }

    /// Regrow every tree whose respawn delay has elapsed by `now`.
    ///
    /// Returns the regrown ids in ascending order; each comes back standing with no chops.
    pub fn regrow(&mut self, now: Duration) -> Vec<TreeId> {
        let mut regrown = Vec::new();
        for (id, state) in self.trees.iter_mut() {
            if let TreeState::Felled { at } = *state {
                if now.saturating_sub(at) >= self.respawn_delay {
                    *state = TreeState::Standing { chops: 0 };
                    regrown.push(*id);
                }
            }
        }
        regrown
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn secs(s: u64) -> Duration {
        Duration::from_secs(s)
    }

    fn grove() -> Grove {
        Grove::new([TreeId(0), TreeId(1)])
    }

    #[test]
    fn chops_count_up_until_the_tree_falls() {
        let mut g = grove();
        for n in 1..CHOPS_TO_FELL {
            assert_eq!(g.chop(TreeId(0), secs(1)), ChopOutcome::Chopped { chops: n });
        }
        assert_eq!(g.chop(TreeId(0), secs(2)), ChopOutcome::Felled);
        assert_eq!(g.state(TreeId(0)), Some(TreeState::Felled { at: secs(2) }));

        // The neighbour is untouched.
        assert_eq!(g.state(TreeId(1)), Some(TreeState::Standing { chops: 0 }));
    }

    #[test]
    fn felled_tree_ignores_chops() {
        let mut g = Grove::with_rules([TreeId(7)], 1, secs(15));
        assert_eq!(g.chop(TreeId(7), secs(3)), ChopOutcome::Felled);
        assert_eq!(g.chop(TreeId(7), secs(4)), ChopOutcome::AlreadyFelled);

        // The felling time is not pushed back by extra chops.
        assert_eq!(g.state(TreeId(7)), Some(TreeState::Felled { at: secs(3) }));
    }

    #[test]
    fn unknown_tree_is_reported() {
        let mut g = grove();
        assert_eq!(g.chop(TreeId(99), secs(0)), ChopOutcome::UnknownTree);
        assert!(!g.is_felled(TreeId(99)));
    }

    #[test]
    fn tree_regrows_after_the_delay_with_a_fresh_count() {
        let mut g = Grove::with_rules([TreeId(0)], 2, secs(15));
        g.chop(TreeId(0), secs(10));
        g.chop(TreeId(0), secs(10));
        assert!(g.is_felled(TreeId(0)));

        assert!(g.regrow(secs(24)).is_empty());
        assert_eq!(g.regrow(secs(25)), vec![TreeId(0)]);
        assert_eq!(g.state(TreeId(0)), Some(TreeState::Standing { chops: 0 }));

        // Regrowth happens once per felling.
        assert!(g.regrow(secs(100)).is_empty());
        assert_eq!(g.chop(TreeId(0), secs(101)), ChopOutcome::Chopped { chops: 1 });
    }

    #[test]
    fn regrow_reports_trees_in_id_order() {
        let mut g = Grove::with_rules([TreeId(3), TreeId(1), TreeId(2)], 1, secs(5));
        g.chop(TreeId(3), secs(0));
        g.chop(TreeId(1), secs(1));
        g.chop(TreeId(2), secs(30));

        assert_eq!(g.regrow(secs(10)), vec![TreeId(1), TreeId(3)]);
        assert!(g.is_felled(TreeId(2)));
    }

    #[test]
    fn zero_chop_rule_still_needs_one_chop() {
        let mut g = Grove::with_rules([TreeId(0)], 0, secs(1));
        assert!(!g.is_felled(TreeId(0)));
        assert_eq!(g.chop(TreeId(0), secs(0)), ChopOutcome::Felled);
    }
}
