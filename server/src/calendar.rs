//! Published session calendar
//!
//! The bookable (day, time) grid is finite and known to both client and
//! server. The server side is authoritative: availability and admission only
//! ever speak about slots that exist here. Slots are derived keys, never
//! persisted.

/// The wire key for a slot: `"<day>|<time>"`.
pub fn slot_key(day: &str, time: &str) -> String {
    format!("{day}|{time}")
}

/// Bookable session grid: every (day, time) pair with a fixed per-slot capacity.
#[derive(Debug, Clone)]
pub struct SlotCalendar {
    days: Vec<String>,
    times: Vec<String>,
    capacity: u32,
}

impl SlotCalendar {
    pub fn new(days: Vec<String>, times: Vec<String>, capacity: u32) -> Self {
        Self {
            days,
            times,
            capacity,
        }
    }

    /// Whether (day, time) is part of the published calendar.
    pub fn contains(&self, day: &str, time: &str) -> bool {
        self.days.iter().any(|d| d == day) && self.times.iter().any(|t| t == time)
    }

    /// Per-slot capacity (spots per session).
    pub fn capacity(&self) -> u32 {
        self.capacity
    }

    pub fn days(&self) -> &[String] {
        &self.days
    }

    pub fn times(&self) -> &[String] {
        &self.times
    }

    /// All slot keys, day-major.
    pub fn slot_keys(&self) -> impl Iterator<Item = String> + '_ {
        self.days
            .iter()
            .flat_map(|d| self.times.iter().map(move |t| slot_key(d, t)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn calendar() -> SlotCalendar {
        SlotCalendar::new(
            vec!["2026-02-01".into(), "2026-02-02".into()],
            vec!["10:00".into(), "11:30".into()],
            6,
        )
    }

    #[test]
    fn contains_only_published_pairs() {
        let cal = calendar();
        assert!(cal.contains("2026-02-01", "10:00"));
        assert!(cal.contains("2026-02-02", "11:30"));
        assert!(!cal.contains("2026-02-03", "10:00"));
        assert!(!cal.contains("2026-02-01", "12:00"));
    }

    #[test]
    fn slot_keys_cover_the_grid() {
        let keys: Vec<String> = calendar().slot_keys().collect();
        assert_eq!(
            keys,
            vec![
                "2026-02-01|10:00",
                "2026-02-01|11:30",
                "2026-02-02|10:00",
                "2026-02-02|11:30",
            ]
        );
    }
}
