//! Résumé slot fed by the file picker and by drag-and-drop.
//!
//! In the browser a file's bytes arrive asynchronously after selection.
//! Every selection therefore takes a [`ReadTicket`]; only the newest ticket
//! may complete, so a slow read of an earlier file cannot overwrite a later
//! choice.

use crate::model::attachment::Attachment;

/// Handle for an in-flight file read.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReadTicket(u64);

#[derive(Debug, Default)]
pub struct FileAttachment {
    current: Option<Attachment>,
    drag_active: bool,
    generation: u64,
}

impl FileAttachment {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current(&self) -> Option<&Attachment> {
        self.current.as_ref()
    }

    pub fn is_drag_active(&self) -> bool {
        self.drag_active
    }

    /// Replaces the held attachment, returning the discarded one.
    ///
    /// Also supersedes any read still in flight.
    pub fn set_file(&mut self, attachment: Attachment) -> Option<Attachment> {
        self.generation += 1;
        log::debug!(
            "attachment set to {} ({} bytes, {})",
            attachment.name,
            attachment.size(),
            attachment.media_type
        );
        self.current.replace(attachment)
    }

    /// Starts a selection whose bytes will be delivered later.
    pub fn begin_read(&mut self) -> ReadTicket {
        self.generation += 1;
        ReadTicket(self.generation)
    }

    /// Delivers the bytes for `ticket`. Returns `false` and drops the
    /// attachment when a newer selection happened in the meantime.
    pub fn complete_read(&mut self, ticket: ReadTicket, attachment: Attachment) -> bool {
        if !self.is_latest(ticket) {
            log::debug!("ignoring stale read of {}", attachment.name);
            return false;
        }
        self.set_file(attachment);
        true
    }

    /// Whether `ticket` belongs to the newest selection. A failed read of
    /// an older one has nothing left to report.
    pub fn is_latest(&self, ticket: ReadTicket) -> bool {
        ticket.0 == self.generation
    }

    pub fn drag_enter(&mut self) {
        self.drag_active = true;
    }

    pub fn drag_over(&mut self) {
        self.drag_active = true;
    }

    pub fn drag_leave(&mut self) {
        self.drag_active = false;
    }

    /// Drop whose file still has to be read. Clears the drag indicator and
    /// hands out a ticket when a file was actually dropped.
    pub fn drop_pending(&mut self, has_file: bool) -> Option<ReadTicket> {
        self.drag_active = false;
        has_file.then(|| self.begin_read())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn file(name: &str) -> Attachment {
        Attachment::new(name, name.as_bytes().to_vec(), None)
    }

    #[test]
    fn set_file_replaces_previous() {
        let mut slot = FileAttachment::new();
        assert!(slot.set_file(file("a.pdf")).is_none());
        let previous = slot.set_file(file("b.docx")).expect("previous attachment");
        assert_eq!(previous.name, "a.pdf");
        assert_eq!(slot.current().map(|a| a.name.as_str()), Some("b.docx"));
    }

    #[test]
    fn drag_indicator_follows_enter_over_leave_and_drop() {
        let mut slot = FileAttachment::new();
        slot.drag_enter();
        assert!(slot.is_drag_active());
        slot.drag_leave();
        assert!(!slot.is_drag_active());
        slot.drag_over();
        assert!(slot.is_drag_active());
        assert!(slot.drop_pending(false).is_none());
        assert!(!slot.is_drag_active());
        assert!(slot.current().is_none());
    }

    #[test]
    fn dropped_file_becomes_attachment_once_read() {
        let mut slot = FileAttachment::new();
        slot.drag_enter();
        let ticket = slot.drop_pending(true).expect("ticket for dropped file");
        assert!(!slot.is_drag_active());
        assert!(slot.complete_read(ticket, file("first.pdf")));
        assert_eq!(slot.current().map(|a| a.name.as_str()), Some("first.pdf"));
    }

    #[test]
    fn only_newest_selection_is_latest() {
        let mut slot = FileAttachment::new();
        let first = slot.begin_read();
        assert!(slot.is_latest(first));
        let second = slot.begin_read();
        assert!(!slot.is_latest(first));
        assert!(slot.is_latest(second));
        slot.set_file(file("picked.pdf"));
        assert!(!slot.is_latest(second));
    }

    #[test]
    fn stale_reads_are_discarded() {
        let mut slot = FileAttachment::new();
        let older = slot.begin_read();
        slot.drag_enter();
        let newer = slot.drop_pending(true).expect("ticket for dropped file");
        assert!(slot.complete_read(newer, file("new.pdf")));
        assert!(!slot.complete_read(older, file("old.pdf")));
        assert_eq!(slot.current().map(|a| a.name.as_str()), Some("new.pdf"));
        assert!(slot.drop_pending(false).is_none());
    }

    #[test]
    fn direct_selection_supersedes_pending_read() {
        let mut slot = FileAttachment::new();
        let pending = slot.begin_read();
        slot.set_file(file("picked.pdf"));
        assert!(!slot.complete_read(pending, file("late.pdf")));
        assert_eq!(slot.current().map(|a| a.name.as_str()), Some("picked.pdf"));
    }
}
