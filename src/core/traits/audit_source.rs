use crate::core::errors::Result;
use crate::core::models::audit_entry::AuditEntry;
use crate::core::services::audit_filter::AuditFilter;

/// Port for loading audit trail entries.
pub trait AuditSource: Send + Sync {
    /// Fetch the entries matching `filter`, in source order.
    fn fetch(&self, filter: &AuditFilter) -> Result<Vec<AuditEntry>>;

    /// Fetch every entry.
    fn fetch_all(&self) -> Result<Vec<AuditEntry>> {
        self.fetch(&AuditFilter::default())
    }
}

impl<T: AuditSource + ?Sized> AuditSource for Box<T> {
    fn fetch(&self, filter: &AuditFilter) -> Result<Vec<AuditEntry>> {
        (**self).fetch(filter)
    }
}
