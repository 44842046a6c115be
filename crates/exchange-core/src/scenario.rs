//! Canned freight-fraud scenarios.

use rand::Rng;

/// The fixed set of narratives the picker draws from.
pub const SCENARIOS: &[&str] = &[
    "A carrier with a two-week-old MC number books a high-value electronics load, \
     then asks to switch the payee to a new bank account before pickup.",
    "A dispatcher emailing from a free webmail address claims to represent an \
     established fleet and quotes a rate far below the lane average.",
    "A load is double brokered: the booked carrier re-posts it on an open board \
     and a stranger shows up at the dock with the paperwork.",
    "A caller impersonating the shipper asks to reroute a reefer load to a new \
     consignee address at the last minute.",
    "A carrier's ELD location stops matching the route halfway through transit \
     while the driver insists the truck is on schedule.",
    "An insurance certificate arrives with the right policy number but an \
     edited coverage date and a mismatched agent phone number.",
];

/// Picks one scenario uniformly at random.
#[derive(Debug, Clone)]
pub struct ScenarioPicker {
    scenarios: &'static [&'static str],
}

impl Default for ScenarioPicker {
    fn default() -> Self {
        Self::new()
    }
}

impl ScenarioPicker {
    /// Create a picker over [`SCENARIOS`].
    pub fn new() -> Self {
        Self {
            scenarios: SCENARIOS,
        }
    }

    pub fn scenarios(&self) -> &'static [&'static str] {
        self.scenarios
    }

    /// Return one scenario from the fixed set.
    pub fn pick<R: Rng>(&self, rng: &mut R) -> &'static str {
        self.scenarios[rng.gen_range(0..self.scenarios.len())]
    }
}
