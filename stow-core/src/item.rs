use crate::common::*;
use crate::{Item, WasteReason};

impl Item {
    /// Creates a new, unplaced item. `uses_remaining` starts at `usage_limit`.
    ///
    /// Returns [`StowError::InvalidInput`] if any dimension is non-positive.
    /// `priority` is taken as given and not range-checked here — by
    /// convention it is expected in `[1, 100]`, but clamping it is a host
    /// concern, not the core's.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        id: ItemId,
        name: String,
        width: Cm,
        depth: Cm,
        height: Cm,
        mass: f64,
        priority: u8,
        expiry_date: Option<jiff::civil::Date>,
        usage_limit: u32,
        preferred_zone: String,
    ) -> StowResult<Self> {
        if width <= 0 || depth <= 0 || height <= 0 {
            return Err(StowError::InvalidInput(format!(
                "item {id} has a non-positive dimension ({width}x{depth}x{height})"
            )));
        }

        Ok(Self {
            id,
            name,
            width,
            depth,
            height,
            mass,
            priority,
            expiry_date,
            usage_limit,
            uses_remaining: usage_limit,
            preferred_zone,
            placement: None,
        })
    }

    #[inline(always)]
    pub fn uses_remaining(&self) -> u32 {
        self.uses_remaining
    }

    /// Current `(container, box)` if the item is stowed, `None` otherwise.
    #[inline(always)]
    pub fn current_placement(&self) -> Option<&(ContainerId, BoxRegion)> {
        self.placement.as_ref()
    }

    #[inline(always)]
    pub fn container_id(&self) -> Option<&ContainerId> {
        self.placement.as_ref().map(|(cid, _)| cid)
    }

    pub(crate) fn set_placement(&mut self, container_id: ContainerId, region: BoxRegion) {
        self.placement = Some((container_id, region));
    }

    pub(crate) fn clear_placement(&mut self) {
        self.placement = None;
    }

    /// Decrements `uses_remaining` by one, saturating at zero. Idempotent
    /// once the item has reached zero uses. Returns the prior and new
    /// count so the caller can detect the zero-crossing.
    pub(crate) fn record_use(&mut self) -> (u32, u32) {
        let old = self.uses_remaining;
        if self.uses_remaining > 0 {
            self.uses_remaining -= 1;
        }
        (old, self.uses_remaining)
    }

    /// `true` if uses are exhausted or the item has an expiry strictly
    /// before `now`. "Out of Uses" takes precedence when both apply.
    pub fn waste_reason(&self, now: jiff::civil::Date) -> Option<WasteReason> {
        if self.uses_remaining == 0 {
            return Some(WasteReason::OutOfUses);
        }
        if let Some(expiry) = self.expiry_date {
            if now > expiry {
                return Some(WasteReason::Expired);
            }
        }
        None
    }

    #[inline(always)]
    pub fn volume(&self) -> Cm {
        self.width * self.depth * self.height
    }
}
