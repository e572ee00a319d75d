use crate::common::*;
use crate::retrieval::{retrieval_steps, RetrievalStep};
use crate::{Container, Item};

/// Why an item is considered waste. "Out of Uses" takes precedence over
/// "Expired" when both apply (see [`Item::waste_reason`]).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum WasteReason {
    #[serde(rename = "Out of Uses")]
    OutOfUses,
    #[serde(rename = "Expired")]
    Expired,
}

impl std::fmt::Display for WasteReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            WasteReason::OutOfUses => write!(f, "Out of Uses"),
            WasteReason::Expired => write!(f, "Expired"),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WasteItem {
    pub item_id: ItemId,
    pub name: String,
    pub reason: WasteReason,
    pub container_id: Option<ContainerId>,
    pub position: Option<BoxRegion>,
}

/// Scans `items` and returns every one that is waste, in iteration order.
pub(crate) fn identify_waste<'a>(
    items: impl Iterator<Item = &'a Item>,
    now: jiff::civil::Date,
) -> Vec<WasteItem> {
    items
        .filter_map(|item| {
            item.waste_reason(now).map(|reason| WasteItem {
                item_id: item.id.clone(),
                name: item.name.clone(),
                reason,
                container_id: item.container_id().cloned(),
                position: item.current_placement().map(|(_, region)| *region),
            })
        })
        .collect()
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReturnPlanEntry {
    pub step: u32,
    pub item_id: ItemId,
    pub item_name: String,
    pub from_container: Option<ContainerId>,
    pub to_container: ContainerId,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReturnManifestItem {
    pub item_id: ItemId,
    pub name: String,
    pub reason: WasteReason,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReturnManifest {
    pub undocking_container_id: ContainerId,
    pub undocking_date: jiff::civil::Date,
    pub return_items: Vec<ReturnManifestItem>,
    pub total_volume: Cm,
    pub total_weight: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReturnPlanResult {
    pub return_plan: Vec<ReturnPlanEntry>,
    pub retrieval_steps: Vec<RetrievalStep>,
    pub manifest: ReturnManifest,
}

/// One waste candidate together with the data needed to plan its return:
/// its current container, if still stowed.
pub struct WasteCandidate<'a> {
    pub item: &'a Item,
    pub reason: WasteReason,
    pub container: Option<&'a Container>,
}

/// Builds a mass-capped return plan.
///
/// `candidates` need not be pre-sorted; this function sorts them ascending
/// by priority (stable) so the least important waste is consolidated first.
/// The walk is a single greedy pass, not an optimal subset-sum knapsack: a
/// candidate that would exceed `max_weight` is skipped, but lighter
/// candidates further down the (now sorted) list are still considered.
pub(crate) fn create_waste_return_plan(
    mut candidates: Vec<WasteCandidate<'_>>,
    undocking_container_id: ContainerId,
    undocking_date: jiff::civil::Date,
    max_weight: f64,
) -> ReturnPlanResult {
    candidates.sort_by(|a, b| a.item.priority.cmp(&b.item.priority));

    let mut return_plan = Vec::new();
    let mut steps = Vec::new();
    let mut return_items = Vec::new();
    let mut total_weight = 0.0;
    let mut total_volume: Cm = 0;
    let mut step = 0u32;

    for candidate in &candidates {
        if total_weight + candidate.item.mass > max_weight {
            continue;
        }

        step += 1;
        return_plan.push(ReturnPlanEntry {
            step,
            item_id: candidate.item.id.clone(),
            item_name: candidate.item.name.clone(),
            from_container: candidate.item.container_id().cloned(),
            to_container: undocking_container_id.clone(),
        });

        if let Some(container) = candidate.container {
            steps.extend(retrieval_steps(container, &candidate.item.id));
        }

        return_items.push(ReturnManifestItem {
            item_id: candidate.item.id.clone(),
            name: candidate.item.name.clone(),
            reason: candidate.reason,
        });

        total_volume += candidate.item.volume();
        total_weight += candidate.item.mass;
    }

    log::info!(
        "waste return plan for {}: {} item(s), {:.2}kg / {:.2}kg cap",
        undocking_container_id,
        return_items.len(),
        total_weight,
        max_weight
    );

    ReturnPlanResult {
        return_plan,
        retrieval_steps: steps,
        manifest: ReturnManifest {
            undocking_container_id,
            undocking_date,
            return_items,
            total_volume,
            total_weight,
        },
    }
}
