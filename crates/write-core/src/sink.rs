//! Seams between the write loop and the outside world.

use crate::record::Record;
use async_trait::async_trait;

/// Destination for generated records.
///
/// Implementations perform exactly one insert attempt per call. Retrying is
/// the caller's job.
#[async_trait]
pub trait RecordSink: Send + Sync {
    async fn insert(&self, record: &Record) -> anyhow::Result<()>;
}

#[async_trait]
impl<T: RecordSink + ?Sized> RecordSink for &T {
    async fn insert(&self, record: &Record) -> anyhow::Result<()> {
        (**self).insert(record).await
    }
}

/// Producer of fresh records, called once per loop iteration.
pub trait RecordSource: Send {
    fn next_record(&mut self) -> Record;
}
