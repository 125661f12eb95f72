/// A recorded ledger fact.
///
/// Events are never edited once journaled; corrections are new events.
pub trait Event: Clone + core::fmt::Debug + Send + Sync + 'static {
    /// Stable dotted name, e.g. `inventory.product.reserved`.
    fn event_type(&self) -> &'static str;

    /// Schema version for this event type.
    fn version(&self) -> u32;

    /// `event_type@vN`, the form used in logs.
    fn versioned_type(&self) -> String {
        format!("{}@v{}", self.event_type(), self.version())
    }
}
