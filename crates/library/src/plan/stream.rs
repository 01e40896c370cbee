use crate::error::{ErrorKind, Result};
use crate::plan::file::{Plan, plan_file};
use crate::{Context, MAX_PLAN_CONCURRENCY};
use async_stream::stream;
use futures::stream::FuturesUnordered;
use futures::{Stream, StreamExt};
use shelf_models::{Catalog, FileView};
use shelf_placement::fs::Filesystem;

/// Progress events emitted by [`plan`].
///
/// Events follow a strict ordering:
/// 1. [`Started`](Self::Started), exactly once.
/// 2. [`DiscoveryComplete`](Self::DiscoveryComplete), exactly once, with the
///    number of files to plan.
/// 3. [`Planned`](Self::Planned), zero or more times, one per file that could
///    be planned.
/// 4. [`Complete`](Self::Complete), exactly once.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlanEvent {
    Started,
    DiscoveryComplete(u64),
    Planned(Plan),
    Complete,
}

/// Streams a [`Plan`] for every file in `files`.
///
/// Files are planned concurrently, at most [`MAX_PLAN_CONCURRENCY`] at a time,
/// so plans arrive in completion order rather than input order. A file that
/// cannot be planned yields an [`ErrorKind::Plan`] item carrying its id; the
/// stream carries on with the remaining files.
pub fn plan<'a>(
    ctx: &'a Context,
    catalog: &'a dyn Catalog,
    fs: &'a dyn Filesystem,
    files: &'a [FileView],
) -> impl Stream<Item = Result<PlanEvent>> + 'a {
    // `rustfmt` does not format macros that use braces. Wrap in parentheses!
    stream!({
        yield Ok(PlanEvent::Started);
        // Infallible: a usize (either 32- or 64-bit) will always fit in a u64.
        yield Ok(PlanEvent::DiscoveryComplete(u64::try_from(files.len()).unwrap_or(0)));

        let mut pending: Vec<_> = files
            .iter()
            .map(|file| async move {
                plan_file(ctx, catalog, fs, file)
                    .await
                    .inspect_err(|e| tracing::warn!(file_id = file.id, error = %**e, "Unable to plan file"))
                    .map_err(|e| ErrorKind::plan(file.id, e))
            })
            .collect();
        let mut processing = FuturesUnordered::new();
        processing.extend(pending.drain(..MAX_PLAN_CONCURRENCY.min(pending.len())));
        while let Some(result) = processing.next().await {
            yield result.map(PlanEvent::Planned);
            // Pop-n-push, but FIFO instead of LIFO.
            if !pending.is_empty() {
                processing.push(pending.remove(0));
            }
        }

        yield Ok(PlanEvent::Complete);
    })
}
