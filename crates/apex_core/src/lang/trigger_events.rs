//! Trigger timing/event vocabulary.
//!
//! A trigger header lists one or more `timing operation` pairs such as `before insert`. The set is
//! fixed; `before undelete` does not exist and is rejected like any other unknown pair.
//!
//! ## Examples
//! ```rust
//! use apex_core::lang::trigger_events::{self, TriggerEventId};
//!
//! assert_eq!(trigger_events::from_parts("Before", "INSERT"), Some(TriggerEventId::BeforeInsert));
//! assert_eq!(trigger_events::from_parts("before", "undelete"), None);
//! ```

/// Stable identifier for each trigger event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TriggerEventId {
    BeforeInsert,
    BeforeUpdate,
    BeforeDelete,
    AfterInsert,
    AfterUpdate,
    AfterDelete,
    AfterUndelete,
}

/// When the trigger runs relative to the DML operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TriggerTiming {
    Before,
    After,
}

/// Metadata for a trigger event.
#[derive(Debug, Clone, Copy)]
pub struct TriggerEventInfo {
    pub id: TriggerEventId,
    pub timing: TriggerTiming,
    /// Lowercase operation word (`insert`, `update`, `delete`, `undelete`).
    pub operation: &'static str,
    pub canonical: &'static str,
}

/// Registry of the valid trigger events, in declaration order.
pub const TRIGGER_EVENTS: &[TriggerEventInfo] = &[
    event(TriggerEventId::BeforeInsert, TriggerTiming::Before, "insert", "before insert"),
    event(TriggerEventId::BeforeUpdate, TriggerTiming::Before, "update", "before update"),
    event(TriggerEventId::BeforeDelete, TriggerTiming::Before, "delete", "before delete"),
    event(TriggerEventId::AfterInsert, TriggerTiming::After, "insert", "after insert"),
    event(TriggerEventId::AfterUpdate, TriggerTiming::After, "update", "after update"),
    event(TriggerEventId::AfterDelete, TriggerTiming::After, "delete", "after delete"),
    event(TriggerEventId::AfterUndelete, TriggerTiming::After, "undelete", "after undelete"),
];

/// Canonical two-word spelling.
pub fn as_str(id: TriggerEventId) -> &'static str {
    info_for(id).canonical
}

/// Full metadata.
///
/// ## Panics
/// - If the registry is missing an entry for `id` (this indicates a programming error).
pub fn info_for(id: TriggerEventId) -> &'static TriggerEventInfo {
    TRIGGER_EVENTS
        .iter()
        .find(|e| e.id == id)
        .expect("trigger event info missing")
}

/// Parse a timing word (`before`/`after`), ignoring ASCII case.
pub fn timing_from_str(s: &str) -> Option<TriggerTiming> {
    if s.eq_ignore_ascii_case("before") {
        Some(TriggerTiming::Before)
    } else if s.eq_ignore_ascii_case("after") {
        Some(TriggerTiming::After)
    } else {
        None
    }
}

/// Resolve a `timing operation` pair, ignoring ASCII case.
///
/// ## Returns
/// - `None` when either word is unknown or the pair is not part of the fixed set.
pub fn from_parts(timing: &str, operation: &str) -> Option<TriggerEventId> {
    let timing = timing_from_str(timing)?;
    TRIGGER_EVENTS
        .iter()
        .find(|e| e.timing == timing && e.operation.eq_ignore_ascii_case(operation))
        .map(|e| e.id)
}

// --- helpers -----------------------------------------------------------------

const fn event(
    id: TriggerEventId,
    timing: TriggerTiming,
    operation: &'static str,
    canonical: &'static str,
) -> TriggerEventInfo {
    TriggerEventInfo {
        id,
        timing,
        operation,
        canonical,
    }
}
