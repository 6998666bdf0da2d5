/// What the injection runtime exposes of the host page.
///
/// All of this is fragile by nature: the selectors behind these methods belong
/// to the host application and can change under us. Implementations must
/// never panic on a missing node; absence is an answer, not an error.
pub trait HostPage {
    /// The current location href (the host is client-side routed, so this
    /// changes without a page load).
    fn current_location(&self) -> String;

    /// Start observing structural mutations in the page.
    fn observe_region(&self);

    /// Stop observing structural mutations.
    fn unobserve_region(&self);

    /// Entry identifiers currently visible in the continue-watching region,
    /// or `None` while the region has not rendered.
    fn continue_watching_entries(&self) -> Option<Vec<String>>;

    /// Whether the entry's control container already carries our remove
    /// control (the idempotence marker).
    fn has_remove_control(&self, entry_id: &str) -> bool;

    /// Attach a remove control to the entry's control container.
    fn attach_remove_control(&self, entry_id: &str);

    /// Remove the entry's visual container from the page.
    fn detach_entry(&self, entry_id: &str);
}
