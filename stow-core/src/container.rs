use crate::common::*;
use crate::Container;

impl Container {
    pub fn new(id: ContainerId, zone: String, width: Cm, depth: Cm, height: Cm) -> StowResult<Self> {
        if width <= 0 || depth <= 0 || height <= 0 {
            return Err(StowError::InvalidInput(format!(
                "container {id} has a non-positive dimension ({width}x{depth}x{height})"
            )));
        }
        Ok(Self {
            id,
            zone,
            width,
            depth,
            height,
            occupancy: Vec::new(),
        })
    }

    /// True iff `region` fits within this container's bounds and overlaps
    /// no existing occupant.
    pub fn is_space_available(&self, region: &BoxRegion) -> bool {
        if !region.fits_within(self.width, self.depth, self.height) {
            return false;
        }
        self.occupancy.iter().all(|(_, occupied)| !occupied.overlaps(region))
    }

    /// Appends `(item_id, region)` to the occupancy list iff the space is
    /// free. The caller guarantees `item_id` is not already present.
    pub fn add_item(&mut self, item_id: ItemId, region: BoxRegion) -> bool {
        if !self.is_space_available(&region) {
            return false;
        }
        self.occupancy.push((item_id, region));
        true
    }

    /// Removes the occupancy entry for `item_id`, if present. Returns
    /// whether an entry was removed.
    pub fn remove_item(&mut self, item_id: &str) -> bool {
        if let Some(idx) = self.occupancy.iter().position(|(id, _)| id == item_id) {
            self.occupancy.remove(idx);
            true
        } else {
            false
        }
    }

    pub fn position_of(&self, item_id: &str) -> Option<BoxRegion> {
        self.occupancy
            .iter()
            .find(|(id, _)| id == item_id)
            .map(|(_, region)| *region)
    }

    pub fn occupancy(&self) -> &[(ItemId, BoxRegion)] {
        &self.occupancy
    }

    /// Empties the occupancy list, as happens when the container undocks.
    pub(crate) fn clear(&mut self) {
        self.occupancy.clear();
    }

    /// `true` iff the item's box fits inside this container's bounds in at
    /// least one of the six axis-aligned orientations.
    pub fn admits_any_orientation(&self, item: &crate::Item) -> bool {
        crate::placement::orientations(item.width, item.depth, item.height)
            .into_iter()
            .any(|(w, d, h)| w <= self.width && d <= self.depth && h <= self.height)
    }

    /// Items that must be moved aside to extract `item_id` through the open
    /// face (`depth = 0`). An item `B` blocks `T` iff `B` and `T` overlap on
    /// the width and height axes (half-open intervals) and `B` is strictly
    /// shallower than `T`. Returned sorted shallowest-first.
    pub fn blockers_of(&self, item_id: &str) -> Vec<ItemId> {
        let Some(target) = self.position_of(item_id) else {
            return Vec::new();
        };

        let mut blockers: Vec<(Cm, ItemId)> = self
            .occupancy
            .iter()
            .filter(|(id, _)| id != item_id)
            .filter_map(|(id, region)| {
                let width_overlap = region.start.width < target.end.width && region.end.width > target.start.width;
                let height_overlap =
                    region.start.height < target.end.height && region.end.height > target.start.height;
                let shallower = region.start.depth < target.start.depth;
                if width_overlap && height_overlap && shallower {
                    Some((region.start.depth, id.clone()))
                } else {
                    None
                }
            })
            .collect();

        blockers.sort_by_key(|(d1, _)| *d1);
        blockers.into_iter().map(|(_, id)| id).collect()
    }
}
