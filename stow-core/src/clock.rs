use jiff::ToSpan;

use crate::common::*;
use crate::Item;

/// The simulated "current date" of one engine. Advances by exactly one
/// calendar day per tick, using checked calendar-aware addition so month
/// and year boundaries roll over correctly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SimulatedClock {
    now: jiff::civil::Date,
}

impl SimulatedClock {
    pub fn new(now: jiff::civil::Date) -> Self {
        Self { now }
    }

    #[inline(always)]
    pub fn now(&self) -> jiff::civil::Date {
        self.now
    }

    /// Advances the clock by one calendar day. Panics only if the date is
    /// already at `jiff`'s representable range limit — not a condition a
    /// caller can trigger in practice over the lifetime of a mission.
    pub(crate) fn advance_one_day(&mut self) {
        self.now = self
            .now
            .checked_add(1.day())
            .expect("simulated date overflowed the representable calendar range");
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UsedEvent {
    pub item_id: ItemId,
    pub name: String,
    pub uses_remaining: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutOfUsesEvent {
    pub item_id: ItemId,
    pub name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExpiredEvent {
    pub item_id: ItemId,
    pub name: String,
    pub expiry_date: jiff::civil::Date,
}

/// The report returned by one `simulate_day` tick.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SimulationChanges {
    pub used: Vec<UsedEvent>,
    pub expired: Vec<ExpiredEvent>,
    pub out_of_uses: Vec<OutOfUsesEvent>,
}

/// Advances `clock` by one day, decrements uses for `used_item_ids` (unknown
/// ids are silently skipped), and scans every item for expiry.
///
/// Expiry is level-triggered: an item past its expiry date is reported every
/// tick it remains expired, not only on the tick it first expires.
pub(crate) fn simulate_day<'a>(
    clock: &mut SimulatedClock,
    items: impl Iterator<Item = &'a mut Item>,
    used_item_ids: &[ItemId],
) -> (jiff::civil::Date, SimulationChanges) {
    clock.advance_one_day();
    let now = clock.now();

    let mut changes = SimulationChanges::default();
    let mut items: Vec<&mut Item> = items.collect();

    let mut by_id: std::collections::HashMap<ItemId, usize> = std::collections::HashMap::new();
    for (idx, item) in items.iter().enumerate() {
        by_id.insert(item.id.clone(), idx);
    }

    for used_id in used_item_ids {
        if let Some(&idx) = by_id.get(used_id) {
            let item = &mut items[idx];
            let (old_uses, new_uses) = item.record_use();
            changes.used.push(UsedEvent {
                item_id: item.id.clone(),
                name: item.name.clone(),
                uses_remaining: new_uses,
            });
            if old_uses > 0 && new_uses == 0 {
                changes.out_of_uses.push(OutOfUsesEvent {
                    item_id: item.id.clone(),
                    name: item.name.clone(),
                });
            }
        }
    }

    for item in items.iter() {
        if let Some(expiry) = item.expiry_date {
            if now > expiry {
                changes.expired.push(ExpiredEvent {
                    item_id: item.id.clone(),
                    name: item.name.clone(),
                    expiry_date: expiry,
                });
            }
        }
    }

    log::info!(
        "simulated day -> {now}: {} used, {} expired, {} out of uses",
        changes.used.len(),
        changes.expired.len(),
        changes.out_of_uses.len()
    );

    (now, changes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Item;

    fn date(y: i16, m: i8, d: i8) -> jiff::civil::Date {
        jiff::civil::Date::new(y, m, d).unwrap()
    }

    #[test]
    fn s7_advancing_rolls_over_month_and_year_boundaries() {
        let mut clock = SimulatedClock::new(date(2026, 1, 31));
        clock.advance_one_day();
        assert_eq!(clock.now(), date(2026, 2, 1));

        let mut clock = SimulatedClock::new(date(2026, 12, 31));
        clock.advance_one_day();
        assert_eq!(clock.now(), date(2027, 1, 1));
    }

    #[test]
    fn s4_out_of_uses_fires_once_on_the_zero_crossing() {
        let mut clock = SimulatedClock::new(date(2026, 1, 1));
        let mut item = Item::new("i1".into(), "tool".into(), 1, 1, 1, 1.0, 50, None, 1, "Zone".into()).unwrap();

        let used = vec!["i1".to_string()];
        let (_, changes) = simulate_day(&mut clock, std::iter::once(&mut item), &used);
        assert_eq!(changes.used.len(), 1);
        assert_eq!(changes.used[0].uses_remaining, 0);
        assert_eq!(changes.out_of_uses.len(), 1);

        let (_, changes) = simulate_day(&mut clock, std::iter::once(&mut item), &used);
        assert_eq!(changes.used[0].uses_remaining, 0);
        assert!(changes.out_of_uses.is_empty());
    }

    #[test]
    fn expiry_is_level_triggered_every_tick_past_the_date() {
        let mut clock = SimulatedClock::new(date(2026, 1, 1));
        let mut item = Item::new(
            "i1".into(),
            "ration".into(),
            1,
            1,
            1,
            1.0,
            50,
            Some(date(2026, 1, 1)),
            10,
            "Zone".into(),
        )
        .unwrap();

        let (_, changes) = simulate_day(&mut clock, std::iter::once(&mut item), &[]);
        assert_eq!(changes.expired.len(), 1);

        let (_, changes) = simulate_day(&mut clock, std::iter::once(&mut item), &[]);
        assert_eq!(changes.expired.len(), 1, "still expired the next tick too");
    }

    #[test]
    fn unknown_used_item_ids_are_silently_skipped() {
        let mut clock = SimulatedClock::new(date(2026, 1, 1));
        let mut item = Item::new("i1".into(), "tool".into(), 1, 1, 1, 1.0, 50, None, 1, "Zone".into()).unwrap();
        let (_, changes) = simulate_day(&mut clock, std::iter::once(&mut item), &["ghost".to_string()]);
        assert!(changes.used.is_empty());
    }
}
