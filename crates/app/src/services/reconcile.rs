//! Import reconciliation — keep only the discovered doors the operator picked.

use doorbridge_domain::discovery::ImportSelection;
use doorbridge_domain::door::DoorRecord;

/// Filter `candidates` down to `selection`, preserving candidate order.
///
/// Selected ids that are not among the candidates are ignored. An empty
/// result is returned as-is; deciding whether that is acceptable belongs to
/// the caller.
#[must_use]
pub fn reconcile(candidates: Vec<DoorRecord>, selection: &ImportSelection) -> Vec<DoorRecord> {
    match selection {
        ImportSelection::All => candidates,
        ImportSelection::Only(_) => candidates
            .into_iter()
            .filter(|door| selection.includes(&door.door_id))
            .collect(),
    }
}
