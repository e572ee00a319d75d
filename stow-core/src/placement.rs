use itertools::Itertools;

use crate::common::*;
use crate::{Container, EngineConfig, Item};

/// A committed placement: which container, and which box inside it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlacementOutcome {
    pub container_id: ContainerId,
    pub region: BoxRegion,
    pub score: f64,
}

/// `Some(outcome)` if a fit was found anywhere; `None` means "unplaceable" —
/// not an error, a caller should treat it as a rearrangement hint.
pub type PlacementResult = Option<PlacementOutcome>;

/// The six axis-aligned orientations of a `(width, depth, height)` box, in
/// the fixed enumeration order that the placement search relies on for
/// deterministic tie-breaking: (w,d,h), (w,h,d), (d,w,h), (d,h,w), (h,w,d),
/// (h,d,w).
pub fn orientations(width: Cm, depth: Cm, height: Cm) -> [(Cm, Cm, Cm); 6] {
    [
        (width, depth, height),
        (width, height, depth),
        (depth, width, height),
        (depth, height, width),
        (height, width, depth),
        (height, depth, width),
    ]
}

/// Orders candidates so containers whose zone matches `preferred_zone` come
/// first, stable within each group.
fn order_by_zone_preference<'a>(containers: &'a [&'a Container], preferred_zone: &str) -> Vec<&'a Container> {
    containers
        .iter()
        .copied()
        .sorted_by_key(|c| if c.zone == preferred_zone { 0 } else { 1 })
        .collect()
}

/// Finds the best `(container, orientation, anchor)` for `item` across
/// `containers`, scoring each admissible placement as
/// `priority + (zone bonus if preferred zone matches) - depth_penalty * y`.
///
/// Deterministic: ties are broken by examination order — zone-preferred
/// containers first, then container order as given, then lexicographic
/// `(x, y, z)` anchor order, then the fixed orientation enumeration order —
/// using a strict `>` comparison so the first-examined tuple always wins.
pub fn find_best_placement(item: &Item, containers: &[&Container], config: &EngineConfig) -> PlacementResult {
    let mut best: Option<PlacementOutcome> = None;

    for container in order_by_zone_preference(containers, &item.preferred_zone) {
        if !container.admits_any_orientation(item) {
            continue;
        }

        for (w, d, h) in orientations(item.width, item.depth, item.height) {
            if w > container.width || d > container.depth || h > container.height {
                continue;
            }

            let max_x = container.width - w;
            let max_y = container.depth - d;
            let max_z = container.height - h;

            for x in 0..=max_x {
                for y in 0..=max_y {
                    for z in 0..=max_z {
                        let anchor = Coord3::new(x, y, z);
                        let region = BoxRegion::from_dims(anchor, w, d, h);
                        if !container.is_space_available(&region) {
                            continue;
                        }

                        let zone_bonus = if container.zone == item.preferred_zone {
                            config.preferred_zone_bonus
                        } else {
                            0.0
                        };
                        let score = item.priority as f64 + zone_bonus - config.depth_penalty_weight * (y as f64);

                        let is_better = match &best {
                            None => true,
                            Some(current) => score > current.score,
                        };
                        if is_better {
                            best = Some(PlacementOutcome {
                                container_id: container.id.clone(),
                                region,
                                score,
                            });
                        }
                    }
                }
            }
        }
    }

    if let Some(outcome) = &best {
        log::debug!(
            "placement search: item {} fits in {} at {:?} (score {:.2})",
            item.id,
            outcome.container_id,
            outcome.region,
            outcome.score
        );
    } else {
        log::warn!("placement search: item {} is unplaceable in the given containers", item.id);
    }

    best
}
