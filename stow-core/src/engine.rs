use indexmap::IndexMap;

use crate::common::*;
use crate::clock::{simulate_day, SimulationChanges};
use crate::placement::{find_best_placement, PlacementOutcome};
use crate::retrieval::{retrieval_steps, RetrievalStep};
use crate::waste::{create_waste_return_plan, identify_waste, WasteCandidate};
use crate::{Container, EngineConfig, Item, ReturnPlanResult, SimulatedClock, WasteItem};

/// The aggregate root: owns every [`Item`] and [`Container`] plus the
/// simulated clock and scoring config that drive them. There is no
/// process-wide state anywhere else in this crate — a host that needs more
/// than one independent stowage scenario simply constructs more than one
/// `Engine`.
pub struct Engine {
    items: IndexMap<ItemId, Item>,
    containers: IndexMap<ContainerId, Container>,
    clock: SimulatedClock,
    config: EngineConfig,
}

impl Engine {
    pub fn new(clock: SimulatedClock, config: EngineConfig) -> Self {
        Self {
            items: IndexMap::new(),
            containers: IndexMap::new(),
            clock,
            config,
        }
    }

    pub fn today(&self) -> jiff::civil::Date {
        self.clock.now()
    }

    pub fn container(&self, container_id: &str) -> StowResult<&Container> {
        self.containers
            .get(container_id)
            .ok_or_else(|| StowError::UnknownContainer(container_id.to_string()))
    }

    pub fn item(&self, item_id: &str) -> StowResult<&Item> {
        self.items.get(item_id).ok_or_else(|| StowError::UnknownItem(item_id.to_string()))
    }

    pub fn containers(&self) -> impl Iterator<Item = &Container> {
        self.containers.values()
    }

    pub fn items(&self) -> impl Iterator<Item = &Item> {
        self.items.values()
    }

    /// Registers a new container. Replaces any existing container with the
    /// same id.
    pub fn add_container(&mut self, container: Container) {
        log::debug!("registered container {}", container.id);
        self.containers.insert(container.id.clone(), container);
    }

    /// Registers a new, unplaced item. Replaces any existing item with the
    /// same id.
    pub fn add_item(&mut self, item: Item) {
        log::debug!("registered item {}", item.id);
        self.items.insert(item.id.clone(), item);
    }

    /// C2: runs the placement search across every registered container and,
    /// if a fit is found, commits it to both the item and its container.
    ///
    /// Returns `Ok(None)` if the item is unplaceable anywhere — not an
    /// error, see [`crate::placement`].
    pub fn place_item(&mut self, item_id: &str) -> StowResult<Option<PlacementOutcome>> {
        let item = self.items.get(item_id).ok_or_else(|| StowError::UnknownItem(item_id.to_string()))?;
        let refs: Vec<&Container> = self.containers.values().collect();
        let outcome = find_best_placement(item, &refs, &self.config);

        if let Some(outcome) = &outcome {
            let container = self
                .containers
                .get_mut(&outcome.container_id)
                .ok_or_else(|| StowError::UnknownContainer(outcome.container_id.clone()))?;
            if !container.add_item(item_id.to_string(), outcome.region) {
                return Err(StowError::NoSpace);
            }
            let item = self.items.get_mut(item_id).expect("checked present above");
            item.set_placement(outcome.container_id.clone(), outcome.region);
        }

        Ok(outcome)
    }

    /// C3: builds the retrieval plan for an already-stowed item. Does not
    /// mutate any state — the plan only records what a human operator would
    /// physically do.
    pub fn retrieval_plan(&self, item_id: &str) -> StowResult<Vec<RetrievalStep>> {
        let item = self.item(item_id)?;
        let container_id = item.container_id().ok_or_else(|| StowError::InvalidInput(format!("item {item_id} is not stowed")))?;
        let container = self.container(container_id)?;
        Ok(retrieval_steps(container, item_id))
    }

    /// Removes `item_id` from its container's occupancy and clears its
    /// placement, without deleting the item itself. Used both by manual
    /// retrieval and as a step inside waste return planning.
    pub fn retrieve_item(&mut self, item_id: &str) -> StowResult<()> {
        let container_id = self
            .item(item_id)?
            .container_id()
            .cloned()
            .ok_or_else(|| StowError::InvalidInput(format!("item {item_id} is not stowed")))?;
        let container = self
            .containers
            .get_mut(&container_id)
            .ok_or_else(|| StowError::UnknownContainer(container_id.clone()))?;
        container.remove_item(item_id);
        self.items.get_mut(item_id).expect("checked present above").clear_placement();
        Ok(())
    }

    /// C4: advances the simulated clock by one day, applies usage to
    /// `used_item_ids`, and re-scans every item for expiry.
    pub fn simulate_day(&mut self, used_item_ids: &[ItemId]) -> (jiff::civil::Date, SimulationChanges) {
        simulate_day(&mut self.clock, self.items.values_mut(), used_item_ids)
    }

    /// C5: every item currently out of uses or past its expiry date.
    pub fn identify_waste(&self) -> Vec<WasteItem> {
        identify_waste(self.items.values(), self.clock.now())
    }

    /// C5: builds a mass-capped return plan for every current waste item,
    /// routing the retrieval steps through `undocking_container_id`.
    ///
    /// `max_weight` of `f64::INFINITY` disables the cap, matching the
    /// original API's default.
    pub fn waste_return_plan(&self, undocking_container_id: &str, max_weight: f64) -> StowResult<ReturnPlanResult> {
        if !self.containers.contains_key(undocking_container_id) {
            return Err(StowError::UnknownContainer(undocking_container_id.to_string()));
        }

        let now = self.clock.now();
        let candidates: Vec<WasteCandidate<'_>> = self
            .items
            .values()
            .filter_map(|item| {
                item.waste_reason(now).map(|reason| WasteCandidate {
                    item,
                    reason,
                    container: item.container_id().and_then(|cid| self.containers.get(cid)),
                })
            })
            .collect();

        Ok(create_waste_return_plan(
            candidates,
            undocking_container_id.to_string(),
            now,
            max_weight,
        ))
    }

    /// Completes an undocking: deletes every item currently stowed in
    /// `undocking_container_id` from the registry and empties the
    /// container's occupancy. Returns how many items were removed.
    pub fn complete_undocking(&mut self, undocking_container_id: &str) -> StowResult<usize> {
        let container = self
            .containers
            .get_mut(undocking_container_id)
            .ok_or_else(|| StowError::UnknownContainer(undocking_container_id.to_string()))?;
        container.clear();

        let to_remove: Vec<ItemId> = self
            .items
            .values()
            .filter(|item| item.container_id().is_some_and(|cid| cid == undocking_container_id))
            .map(|item| item.id.clone())
            .collect();

        for item_id in &to_remove {
            self.items.shift_remove(item_id);
        }

        log::info!("undocked {}: {} item(s) removed", undocking_container_id, to_remove.len());
        Ok(to_remove.len())
    }
}
