//! Manufacturing pipeline stage machine
//!
//! Orders flow welding -> paint -> assembly -> qa -> staging, with the
//! single regression qa -> rework -> qa on a failed inspection. A worker
//! carrying an order walks toward the destination zone of the order's
//! current stage; the transition fires on arrival in that zone.

use rand::Rng;

use crate::world::order::{QualityCheck, Stage};
use crate::world::zone::ZoneId;

/// The zone a worker walks toward while an order sits in `stage`
///
/// `Qa` and `Staging` have no destination: a qa-stage order resolves in
/// place from its quality outcome, and staging is terminal.
pub fn stage_destination(stage: Stage) -> Option<ZoneId> {
    match stage {
        Stage::Welding => Some(ZoneId::Paint),
        Stage::Paint => Some(ZoneId::Assembly),
        Stage::Assembly => Some(ZoneId::Qa),
        Stage::Rework => Some(ZoneId::Qa),
        Stage::Qa => None,
        Stage::Staging => None,
    }
}

/// The stage an order enters when its carrier reaches the destination zone
///
/// Arrivals into QA (from assembly or rework) carry a fresh inspection
/// roll; a rework re-attempt is a new inspection, not a replay of the old
/// outcome.
pub fn stage_after_arrival(stage: Stage) -> Option<Stage> {
    match stage {
        Stage::Welding => Some(Stage::Paint),
        Stage::Paint => Some(Stage::Assembly),
        Stage::Assembly => Some(Stage::Qa),
        Stage::Rework => Some(Stage::Qa),
        Stage::Qa => None,
        Stage::Staging => None,
    }
}

/// Roll a quality inspection
pub fn roll_quality<R: Rng>(rng: &mut R, pass_rate: f64) -> QualityCheck {
    if rng.gen_bool(pass_rate) {
        QualityCheck::Pass
    } else {
        QualityCheck::Fail
    }
}
