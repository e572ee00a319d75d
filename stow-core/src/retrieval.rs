use crate::common::*;
use crate::Container;

/// One step of a retrieval plan. Numbering starts at 1 and is monotonic
/// across the whole plan.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "camelCase")]
pub enum RetrievalStep {
    Remove { step: u32, item_id: ItemId },
    SetAside { step: u32, item_id: ItemId },
    Retrieve { step: u32, item_id: ItemId },
    PlaceBack { step: u32, item_id: ItemId },
}

/// Builds the ordered extraction/restoration plan for `target_id`:
/// remove and set aside each blocker shallowest-first, retrieve the
/// target, then place the blockers back in reverse order. Does not mutate
/// `container` — callers decide whether and how to commit the plan.
pub fn retrieval_steps(container: &Container, target_id: &str) -> Vec<RetrievalStep> {
    let blockers = container.blockers_of(target_id);
    let mut steps = Vec::with_capacity(blockers.len() * 2 + 1 + blockers.len());
    let mut step = 0u32;

    let mut next_step = || {
        step += 1;
        step
    };

    for blocker in &blockers {
        steps.push(RetrievalStep::Remove {
            step: next_step(),
            item_id: blocker.clone(),
        });
        steps.push(RetrievalStep::SetAside {
            step: next_step(),
            item_id: blocker.clone(),
        });
    }

    steps.push(RetrievalStep::Retrieve {
        step: next_step(),
        item_id: target_id.to_string(),
    });

    for blocker in blockers.iter().rev() {
        steps.push(RetrievalStep::PlaceBack {
            step: next_step(),
            item_id: blocker.clone(),
        });
    }

    log::debug!(
        "retrieval plan for {}: {} blocker(s), {} step(s)",
        target_id,
        blockers.len(),
        steps.len()
    );

    steps
}
